use serde::{Deserialize, Serialize};

use crate::catalog::ColorRecord;
use crate::colors::Hsl;
use crate::rng::Rng;

/// Placeholder for unrevealed letters in a name hint.
pub const HINT_GAP: char = '_';
/// Name guesses shorter than this are not submitted.
pub const MIN_NAME_GUESS_LEN: usize = 3;
/// Longest CSS color keyword is 20 characters; input is capped a little above that.
pub const MAX_NAME_GUESS_LEN: usize = 26;

const MAX_NAME_MISMATCHES: usize = 2;
const CLOSE_CHANNEL_DIFF: i32 = 10;
const PARTIAL_LIGHTNESS_DIFF: i32 = 20;

/// Whether a guessed name is within two edits of the actual keyword.
///
/// Case-insensitive. Walks both strings once; on a mismatch it peeks one character
/// ahead in each to skip over a single inserted or dropped character.
pub fn names_close_enough(guess: &str, actual: &str) -> bool {
    let a: Vec<char> = guess.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = actual.chars().flat_map(char::to_lowercase).collect();

    if a == b {
        return true;
    }
    if a.len() >= b.len() + 2 || b.len() >= a.len() + 2 {
        return false;
    }

    let mut mismatches = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] != b[j] {
            mismatches += 1;
            if mismatches > MAX_NAME_MISMATCHES {
                return false;
            }
            if a.get(i + 1) == Some(&b[j]) {
                i += 1;
            } else if b.get(j + 1) == Some(&a[i]) {
                j += 1;
            }
        }
        i += 1;
        j += 1;
    }

    mismatches <= MAX_NAME_MISMATCHES
}

/// How many HSL channels must be close for [`colors_close_enough`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closeness {
    /// Every channel within 10.
    All,
    /// Hue or saturation within 10, and lightness within 20.
    Any,
}

/// Plain (non-circular) channel-wise comparison of two HSL triples.
pub fn colors_close_enough(guess: &Hsl, actual: &Hsl, closeness: Closeness) -> bool {
    let hue_diff = (guess.h - actual.h).abs();
    let sat_diff = (guess.s - actual.s).abs();
    let light_diff = (guess.l - actual.l).abs();

    match closeness {
        Closeness::All => {
            hue_diff < CLOSE_CHANNEL_DIFF
                && sat_diff < CLOSE_CHANNEL_DIFF
                && light_diff < CLOSE_CHANNEL_DIFF
        }
        Closeness::Any => {
            (hue_diff < CLOSE_CHANNEL_DIFF || sat_diff < CLOSE_CHANNEL_DIFF)
                && light_diff < PARTIAL_LIGHTNESS_DIFF
        }
    }
}

/// Reveal `floor(len * 2 / 5)` random letters of `word`, gaps elsewhere.
///
/// `generate_hint("watermelon", rng)` might give `"_a____el_n"`.
pub fn generate_hint(word: &str, rng: &mut Rng) -> String {
    let letters: Vec<char> = word.chars().collect();
    let reveal = letters.len() * 2 / 5;

    let mut positions: Vec<usize> = (0..letters.len()).collect();
    rng.shuffle(&mut positions);
    let mut revealed = vec![false; letters.len()];
    for &idx in positions.iter().take(reveal) {
        revealed[idx] = true;
    }

    letters
        .iter()
        .zip(revealed)
        .map(|(&ch, shown)| if shown { ch } else { HINT_GAP })
        .collect()
}

/// A partial HSL triple exposing one true channel; `None` marks the unknown ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HslHint {
    pub h: Option<i32>,
    pub s: Option<i32>,
    pub l: Option<i32>,
}

impl HslHint {
    /// Overwrite the revealed channel of `hsl`, leaving the others untouched.
    pub fn apply_to(&self, hsl: &mut Hsl) {
        if let Some(h) = self.h {
            hsl.h = h;
        } else if let Some(s) = self.s {
            hsl.s = s;
        } else if let Some(l) = self.l {
            hsl.l = l;
        }
    }
}

pub fn generate_hsl_hint(color: &ColorRecord, rng: &mut Rng) -> HslHint {
    let Hsl { h, s, l } = color.hsl;
    match rng.below(3) {
        0 => HslHint {
            h: Some(h),
            ..HslHint::default()
        },
        1 => HslHint {
            s: Some(s),
            ..HslHint::default()
        },
        _ => HslHint {
            l: Some(l),
            ..HslHint::default()
        },
    }
}

/// Clean up raw name input: spaces removed, capped at [`MAX_NAME_GUESS_LEN`].
pub fn normalize_name_guess(raw: &str) -> String {
    raw.chars()
        .filter(|ch| *ch != ' ')
        .take(MAX_NAME_GUESS_LEN)
        .collect()
}

pub fn can_submit_name_guess(guess: &str) -> bool {
    guess.chars().count() >= MIN_NAME_GUESS_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_close_enough_examples() {
        assert!(names_close_enough("ornage", "orange"));
        assert!(!names_close_enough("blue", "red"));
        assert!(names_close_enough("cyan", "cyans"));
        assert!(names_close_enough("CadetBlue", "cadetblue"));
    }

    #[test]
    fn names_close_enough_handles_single_insertions_and_deletions() {
        assert!(names_close_enough("cornflowrblue", "cornflowerblue"));
        assert!(names_close_enough("aliceeblue", "aliceblue"));
        assert!(names_close_enough("lightslategrey", "lightslategray"));
    }

    #[test]
    fn names_close_enough_rejects_large_length_gaps_and_many_typos() {
        assert!(!names_close_enough("blu", "blue12"));
        assert!(!names_close_enough("teal", "te"));
        assert!(!names_close_enough("maroon", "mxxxon"));
        assert!(!names_close_enough("purple", "orange"));
    }

    #[test]
    fn colors_close_enough_examples() {
        let black = Hsl::new(0, 0, 0);
        assert!(colors_close_enough(&black, &Hsl::new(5, 5, 5), Closeness::All));
        assert!(!colors_close_enough(&black, &Hsl::new(15, 0, 0), Closeness::All));
        assert!(colors_close_enough(&black, &Hsl::new(15, 0, 0), Closeness::Any));
    }

    #[test]
    fn colors_close_enough_any_needs_lightness_within_twenty() {
        let base = Hsl::new(100, 50, 50);
        assert!(colors_close_enough(&base, &Hsl::new(200, 55, 69), Closeness::Any));
        assert!(!colors_close_enough(&base, &Hsl::new(200, 55, 70), Closeness::Any));
        assert!(!colors_close_enough(&base, &Hsl::new(200, 90, 50), Closeness::Any));
    }

    #[test]
    fn colors_close_enough_is_not_circular() {
        let a = Hsl::new(355, 50, 50);
        let b = Hsl::new(2, 50, 50);
        assert!(!colors_close_enough(&a, &b, Closeness::All));
    }

    #[test]
    fn hint_reveals_two_fifths_of_the_letters() {
        let mut rng = Rng::new(11);
        for word in ["watermelon", "red", "cadetblue", "lightgoldenrodyellow"] {
            let hint = generate_hint(word, &mut rng);
            assert_eq!(hint.chars().count(), word.chars().count());
            let shown = hint
                .chars()
                .zip(word.chars())
                .filter(|(h, w)| h == w && *h != HINT_GAP)
                .count();
            let gaps = hint.chars().filter(|c| *c == HINT_GAP).count();
            assert_eq!(shown, word.len() * 2 / 5, "{word}: {hint}");
            assert_eq!(gaps, word.len() - shown);
        }
    }

    #[test]
    fn hsl_hint_exposes_exactly_one_true_channel() {
        let color = ColorRecord {
            keyword: "red".into(),
            hex: "#ff0000".into(),
            rgb: [255, 0, 0],
            hsl: Hsl::new(0, 100, 50),
            tags: Vec::new(),
        };
        let mut rng = Rng::new(5);
        let mut seen = [false; 3];
        for _ in 0..64 {
            let hint = generate_hsl_hint(&color, &mut rng);
            let known = [hint.h, hint.s, hint.l];
            assert_eq!(known.iter().filter(|c| c.is_some()).count(), 1);
            match known {
                [Some(h), None, None] => {
                    assert_eq!(h, 0);
                    seen[0] = true;
                }
                [None, Some(s), None] => {
                    assert_eq!(s, 100);
                    seen[1] = true;
                }
                [None, None, Some(l)] => {
                    assert_eq!(l, 50);
                    seen[2] = true;
                }
                other => panic!("unexpected hint {other:?}"),
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn hsl_hint_applies_only_known_channel() {
        let mut guess = Hsl::new(10, 20, 30);
        HslHint {
            s: Some(77),
            ..HslHint::default()
        }
        .apply_to(&mut guess);
        assert_eq!(guess, Hsl::new(10, 77, 30));
    }

    #[test]
    fn name_guess_input_is_normalized() {
        assert_eq!(normalize_name_guess("cadet blue"), "cadetblue");
        assert_eq!(normalize_name_guess(&"a".repeat(40)).len(), MAX_NAME_GUESS_LEN);
        assert!(!can_submit_name_guess("re"));
        assert!(can_submit_name_guess("red"));
    }
}
