//! One-decimal percentages as they appear on the wire.

use std::fmt;
use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};

/// A percentage fixed to one decimal place.
///
/// Serializes as a string such as `"75.0"`. A ratio with nothing to measure
/// (an empty denominator) serializes as the number `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireForm", into = "WireForm")]
pub struct Percentage(Option<f64>);

impl Percentage {
    /// Nothing was measured.
    pub const UNMEASURED: Self = Self(None);

    /// `part / whole` as a percentage rounded to one decimal.
    ///
    /// Unmeasured when `whole` is zero.
    ///
    /// ```rust
    /// use page_seo_audit::Percentage;
    ///
    /// assert_eq!(Percentage::of(3, 4).to_string(), "75.0");
    /// assert_eq!(Percentage::of(0, 0), Percentage::UNMEASURED);
    /// ```
    #[must_use]
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::UNMEASURED;
        }
        let value = part as f64 / whole as f64 * 100.0;
        Self(Some((value * 10.0).round() / 10.0))
    }

    /// Numeric value; `0.0` when unmeasured.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    /// Whether a ratio was actually computed.
    #[must_use]
    pub fn is_measured(self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireForm {
    Fixed(String),
    Unmeasured(u8),
}

impl From<Percentage> for WireForm {
    fn from(p: Percentage) -> Self {
        match p.0 {
            Some(_) => Self::Fixed(p.to_string()),
            None => Self::Unmeasured(0),
        }
    }
}

impl TryFrom<WireForm> for Percentage {
    type Error = ParseFloatError;

    fn try_from(wire: WireForm) -> Result<Self, Self::Error> {
        match wire {
            WireForm::Fixed(text) => text.parse().map(|v| Self(Some(v))),
            WireForm::Unmeasured(_) => Ok(Self::UNMEASURED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_one_decimal() {
        assert_eq!(Percentage::of(1, 3).value(), 33.3);
        assert_eq!(Percentage::of(2, 3).value(), 66.7);
        assert_eq!(Percentage::of(4, 4).to_string(), "100.0");
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_value(Percentage::of(3, 4)).ok(), Some(serde_json::json!("75.0")));
        assert_eq!(serde_json::to_value(Percentage::of(0, 4)).ok(), Some(serde_json::json!("0.0")));
        assert_eq!(serde_json::to_value(Percentage::UNMEASURED).ok(), Some(serde_json::json!(0)));
    }

    #[test]
    fn test_reads_back() {
        let fixed: Option<Percentage> = serde_json::from_str("\"66.7\"").ok();
        assert_eq!(fixed, Some(Percentage::of(2, 3)));

        let zero: Option<Percentage> = serde_json::from_str("0").ok();
        assert_eq!(zero, Some(Percentage::UNMEASURED));

        assert!(serde_json::from_str::<Percentage>("\"abc\"").is_err());
    }
}
