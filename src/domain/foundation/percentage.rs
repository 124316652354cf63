//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Maps a raw 0-255 brightness level to a rounded percentage.
    pub fn from_brightness(level: u8) -> Self {
        // Round half up without going through floating point.
        let scaled = (u32::from(level) * 100 + 127) / 255;
        Self(scaled as u8)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn brightness_extremes_map_to_bounds() {
        assert_eq!(Percentage::from_brightness(255).to_string(), "100%");
        assert_eq!(Percentage::from_brightness(0).to_string(), "0%");
    }

    #[test]
    fn brightness_midpoint_rounds_to_fifty() {
        assert_eq!(Percentage::from_brightness(128).to_string(), "50%");
        assert_eq!(Percentage::from_brightness(127).to_string(), "50%");
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::from_brightness(191)), "75%");
        assert_eq!(format!("{}", Percentage::default()), "0%");
    }

    proptest! {
        #[test]
        fn brightness_mapping_matches_rounded_ratio(level in 0u8..=255) {
            let expected = (f64::from(level) / 255.0 * 100.0).round() as u8;
            prop_assert_eq!(Percentage::from_brightness(level).to_string(), format!("{}%", expected));
        }

        #[test]
        fn brightness_mapping_is_monotonic(a in 0u8..=255, b in 0u8..=255) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Percentage::from_brightness(lo) <= Percentage::from_brightness(hi));
        }
    }
}
