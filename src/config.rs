//! Run options: the fixed pixel-budget choices and batch configuration.

use crate::imaging::Quality;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Output-size choice: keep the original size, or cap the pixel count at
/// one of the fixed megapixel budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelBudget {
    Original,
    Megapixels(u8),
}

impl PixelBudget {
    /// The selectable megapixel counts.
    pub const MEGAPIXEL_CHOICES: &[u8] = &[2, 4, 6, 8, 10, 12, 14, 16];

    /// Build a budget from a megapixel count; only the fixed choices are
    /// accepted.
    pub fn from_megapixels(mp: u8) -> Option<Self> {
        Self::MEGAPIXEL_CHOICES
            .contains(&mp)
            .then_some(Self::Megapixels(mp))
    }

    /// Maximum output pixel count; `None` disables resizing entirely.
    pub fn pixel_count(self) -> Option<u64> {
        match self {
            Self::Original => None,
            Self::Megapixels(mp) => Some(u64::from(mp) * 1_000_000),
        }
    }
}

impl Default for PixelBudget {
    fn default() -> Self {
        Self::Original
    }
}

impl fmt::Display for PixelBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Megapixels(mp) => write!(f, "{mp}"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("not a pixel-budget choice: {0:?} (use 'original' or one of 2, 4, 6, 8, 10, 12, 14, 16)")]
pub struct PixelBudgetParseError(String);

impl FromStr for PixelBudget {
    type Err = PixelBudgetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }
        s.parse::<u8>()
            .ok()
            .and_then(Self::from_megapixels)
            .ok_or_else(|| PixelBudgetParseError(s.to_string()))
    }
}

/// Everything a batch run needs besides the backend.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pixel_budget: PixelBudget,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_fixed_choice() {
        assert_eq!("original".parse(), Ok(PixelBudget::Original));
        assert_eq!("Original".parse(), Ok(PixelBudget::Original));
        for &mp in PixelBudget::MEGAPIXEL_CHOICES {
            let parsed: PixelBudget = mp.to_string().parse().unwrap();
            assert_eq!(parsed, PixelBudget::Megapixels(mp));
        }
    }

    #[test]
    fn rejects_values_outside_the_fixed_set() {
        assert!("3".parse::<PixelBudget>().is_err());
        assert!("0".parse::<PixelBudget>().is_err());
        assert!("18".parse::<PixelBudget>().is_err());
        assert!("orig".parse::<PixelBudget>().is_err());
        assert!("".parse::<PixelBudget>().is_err());
    }

    #[test]
    fn pixel_count_math() {
        assert_eq!(PixelBudget::Original.pixel_count(), None);
        assert_eq!(
            PixelBudget::Megapixels(4).pixel_count(),
            Some(4_000_000)
        );
        assert_eq!(
            PixelBudget::Megapixels(16).pixel_count(),
            Some(16_000_000)
        );
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for budget in [PixelBudget::Original, PixelBudget::Megapixels(8)] {
            let parsed: PixelBudget = budget.to_string().parse().unwrap();
            assert_eq!(parsed, budget);
        }
    }
}
