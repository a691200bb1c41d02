use serde::{Deserialize, Serialize};

use crate::catalog::ColorRecord;
use crate::colors::Hsl;

/// One of the three HSL dimensions colors are compared along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Hue,
    Saturation,
    Lightness,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Hue, Axis::Saturation, Axis::Lightness];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Lightness => "lightness",
        }
    }
}

/// Signed distance between two colors along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDistance {
    Comparable(i32),
    /// Grays and saturated hue-0 colors are never in the same hue neighborhood.
    NonComparable,
}

impl AxisDistance {
    pub fn value(self) -> Option<i32> {
        match self {
            Self::Comparable(d) => Some(d),
            Self::NonComparable => None,
        }
    }
}

/// Signed distance from `a` to `b` along `axis`.
///
/// Hue wraps on the 360-degree ring and returns the shortest arc, magnitude at most 180.
/// Hue 0 is shared by grays (saturation 0) and reds: two hue-0 colors with equal
/// saturation are the same family (distance 0), while a gray compared against a
/// color of different saturation is [`AxisDistance::NonComparable`].
///
/// ```
/// # use named_colors_shared::colors::Hsl;
/// # use named_colors_shared::distance::{Axis, AxisDistance, axis_distance_hsl};
/// let red = Hsl::new(0, 100, 50);
/// let blue = Hsl::new(240, 100, 50);
/// assert_eq!(axis_distance_hsl(&red, &blue, Axis::Hue), AxisDistance::Comparable(-120));
/// assert_eq!(axis_distance_hsl(&blue, &red, Axis::Hue), AxisDistance::Comparable(120));
/// ```
pub fn axis_distance(a: &ColorRecord, b: &ColorRecord, axis: Axis) -> AxisDistance {
    axis_distance_hsl(&a.hsl, &b.hsl, axis)
}

pub fn axis_distance_hsl(a: &Hsl, b: &Hsl, axis: Axis) -> AxisDistance {
    match axis {
        Axis::Hue => {
            if a.h == 0 && b.h == 0 && a.s == b.s {
                return AxisDistance::Comparable(0);
            }
            if a.s != b.s && (a.is_grayscale() || b.is_grayscale()) {
                return AxisDistance::NonComparable;
            }

            let dh = b.h - a.h;
            if dh > 180 {
                AxisDistance::Comparable(dh - 360)
            } else if dh < -180 {
                AxisDistance::Comparable(dh + 360)
            } else {
                AxisDistance::Comparable(dh)
            }
        }
        Axis::Saturation => AxisDistance::Comparable(b.s - a.s),
        Axis::Lightness => AxisDistance::Comparable(b.l - a.l),
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisDistance, axis_distance_hsl};
    use crate::colors::Hsl;

    const RED: Hsl = Hsl::new(0, 100, 50);
    const GREEN: Hsl = Hsl::new(120, 100, 50);
    const BLUE: Hsl = Hsl::new(240, 100, 50);
    const VIOLET: Hsl = Hsl::new(300, 100, 50);
    const BLACK: Hsl = Hsl::new(0, 0, 0);

    fn hue(a: Hsl, b: Hsl) -> AxisDistance {
        axis_distance_hsl(&a, &b, Axis::Hue)
    }

    #[test]
    fn hue_takes_shortest_arc() {
        assert_eq!(hue(RED, BLUE), AxisDistance::Comparable(-120));
        assert_eq!(hue(BLUE, RED), AxisDistance::Comparable(120));
        assert_eq!(hue(RED, GREEN), AxisDistance::Comparable(120));
        assert_eq!(hue(RED, VIOLET), AxisDistance::Comparable(-60));
        assert_eq!(hue(VIOLET, RED), AxisDistance::Comparable(60));
    }

    #[test]
    fn hue_half_turn_keeps_direction_sign() {
        let a = Hsl::new(10, 50, 50);
        let b = Hsl::new(190, 50, 50);
        assert_eq!(hue(a, b), AxisDistance::Comparable(180));
        assert_eq!(hue(b, a), AxisDistance::Comparable(-180));
    }

    #[test]
    fn hue_is_antisymmetric_for_equal_saturation() {
        for h1 in (0..360).step_by(7) {
            for h2 in (0..360).step_by(11) {
                let a = Hsl::new(h1, 60, 40);
                let b = Hsl::new(h2, 60, 40);
                let ab = hue(a, b).value().expect("comparable");
                let ba = hue(b, a).value().expect("comparable");
                assert!(ab.abs() <= 180);
                assert_eq!(ab, -ba, "{h1} -> {h2}");
            }
        }
    }

    #[test]
    fn grays_and_reds_never_collide() {
        let gray = Hsl::new(0, 0, 50);
        let pinkish_red = Hsl::new(0, 50, 50);
        assert_eq!(hue(gray, pinkish_red), AxisDistance::NonComparable);
        assert_eq!(hue(pinkish_red, gray), AxisDistance::NonComparable);
        assert_eq!(hue(BLACK, BLUE), AxisDistance::NonComparable);
    }

    #[test]
    fn same_family_hue_zero_is_zero_distance() {
        let silver = Hsl::new(0, 0, 75);
        assert_eq!(hue(BLACK, silver), AxisDistance::Comparable(0));
        let maroon = Hsl::new(0, 100, 25);
        assert_eq!(hue(RED, maroon), AxisDistance::Comparable(0));
    }

    #[test]
    fn saturation_and_lightness_are_plain_differences() {
        assert_eq!(
            axis_distance_hsl(&RED, &BLACK, Axis::Saturation),
            AxisDistance::Comparable(-100)
        );
        assert_eq!(
            axis_distance_hsl(&RED, &BLUE, Axis::Saturation),
            AxisDistance::Comparable(0)
        );
        assert_eq!(
            axis_distance_hsl(&BLACK, &RED, Axis::Lightness),
            AxisDistance::Comparable(50)
        );
    }
}
