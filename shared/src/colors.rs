use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ColorRecord;

/// Integer HSL triple: hue in degrees (0..360), saturation and lightness in percent.
///
/// Serialized as a `[h, s, l]` array, the same shape the catalog stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct Hsl {
    pub h: i32,
    pub s: i32,
    pub l: i32,
}

impl Hsl {
    pub const fn new(h: i32, s: i32, l: i32) -> Self {
        Self { h, s, l }
    }

    pub fn is_grayscale(&self) -> bool {
        self.h == 0 && self.s == 0
    }
}

impl From<[i32; 3]> for Hsl {
    fn from([h, s, l]: [i32; 3]) -> Self {
        Self { h, s, l }
    }
}

impl From<Hsl> for [i32; 3] {
    fn from(hsl: Hsl) -> Self {
        [hsl.h, hsl.s, hsl.l]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({},{}%,{}%)", self.h, self.s, self.l)
    }
}

/// Round half up, matching how the catalog values were generated.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Convert RGB to integer HSL. This is the conversion the catalog was derived with;
/// each channel is rounded to the nearest whole number.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let mut h = 0.0;
    let mut s = 0.0;

    if max != min {
        let d = max - min;
        s = d / (1.0 - (2.0 * l - 1.0).abs());

        h = if max == r {
            ((g - b) / d % 6.0) * 60.0
        } else if max == g {
            ((b - r) / d + 2.0) * 60.0
        } else {
            ((r - g) / d + 4.0) * 60.0
        };
    }

    if h < 0.0 {
        h += 360.0;
    }

    Hsl {
        h: round_half_up(h),
        s: round_half_up(s * 100.0),
        l: round_half_up(l * 100.0),
    }
}

/// Parse `#rrggbb` (leading `#` optional) into RGB bytes.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn format_hsl(hsl: &Hsl) -> String {
    hsl.to_string()
}

/// Display format for color values across the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Hex,
    Keyword,
    Rgb,
    Hsl,
}

impl Format {
    /// Toggle order: hex -> keyword -> rgb -> hsl -> hex.
    pub fn next(self) -> Self {
        match self {
            Self::Hex => Self::Keyword,
            Self::Keyword => Self::Rgb,
            Self::Rgb => Self::Hsl,
            Self::Hsl => Self::Hex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hex => "HEX",
            Self::Keyword => "name",
            Self::Rgb => "RGB",
            Self::Hsl => "HSL",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Keyword => "keyword",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "hex" => Some(Self::Hex),
            "keyword" => Some(Self::Keyword),
            "rgb" => Some(Self::Rgb),
            "hsl" => Some(Self::Hsl),
            _ => None,
        }
    }

    pub fn copy_tooltip(self) -> &'static str {
        match self {
            Self::Hex => "Copy hex code",
            Self::Keyword => "Copy keyword",
            Self::Rgb => "Copy RGB code",
            Self::Hsl => "Copy HSL code",
        }
    }
}

pub fn value_for_format(format: Format, color: &ColorRecord) -> String {
    match format {
        Format::Hex => color.hex.clone(),
        Format::Keyword => color.keyword.clone(),
        Format::Rgb => {
            let [r, g, b] = color.rgb;
            format!("rgb({r},{g},{b})")
        }
        Format::Hsl => format_hsl(&color.hsl),
    }
}
