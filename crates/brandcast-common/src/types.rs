//! Common type definitions and newtype wrappers for domain modeling.

use crate::{BrandcastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel the web form uses for "no competitor selected".
pub const NO_COMPETITOR: &str = "None";

/// A brand identifier. Brand names key artifact file names, so they are
/// restricted to values that cannot escape the artifact directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Brand(String);

impl Brand {
    /// Creates a brand after checking the name is usable as a file-name stem.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(BrandcastError::validation_field(
                "brand name cannot be empty",
                "brand",
            ));
        }
        if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
            return Err(BrandcastError::validation_field(
                format!("brand name '{trimmed}' contains path characters"),
                "brand",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parses an optional competitor field, treating blanks and the
    /// `"None"` sentinel as no competitor.
    pub fn parse_competitor(value: Option<&str>) -> Result<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") | Some(NO_COMPETITOR) => Ok(None),
            Some(name) => Self::new(name).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Brand {
    type Error = BrandcastError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Brand> for String {
    fn from(brand: Brand) -> Self {
        brand.0
    }
}

impl AsRef<str> for Brand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sentiment label attached to a social-media event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// Any label outside the three known ones. Counted in totals only.
    Unlabeled,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Positive" => Self::Positive,
            "Negative" => Self::Negative,
            "Neutral" => Self::Neutral,
            _ => Self::Unlabeled,
        }
    }
}

/// Direction of the forecast relative to the last observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// `Up` only when the prediction strictly exceeds the last observation.
    pub fn classify(predicted: f64, last_observed: f64) -> Self {
        if predicted > last_observed {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Display label used by both dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "📈 Trending UP",
            Self::Down => "📉 Trending DOWN",
        }
    }

    /// Hex color associated with the direction on the web page.
    pub fn color(self) -> &'static str {
        match self {
            Self::Up => "#2ecc71",
            Self::Down => "#ff4757",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_accepts_plain_names() {
        let brand = Brand::new("  Nike ").unwrap();
        assert_eq!(brand.as_str(), "Nike");
        assert_eq!(brand.to_string(), "Nike");
    }

    #[test]
    fn test_brand_rejects_path_like_names() {
        assert!(Brand::new("").is_err());
        assert!(Brand::new("   ").is_err());
        assert!(Brand::new("../etc/passwd").is_err());
        assert!(Brand::new("a/b").is_err());
        assert!(Brand::new("a\\b").is_err());
    }

    #[test]
    fn test_parse_competitor_sentinel() {
        assert_eq!(Brand::parse_competitor(None).unwrap(), None);
        assert_eq!(Brand::parse_competitor(Some("None")).unwrap(), None);
        assert_eq!(Brand::parse_competitor(Some("")).unwrap(), None);
        assert_eq!(
            Brand::parse_competitor(Some("Adidas")).unwrap(),
            Some(Brand::new("Adidas").unwrap())
        );
    }

    #[test]
    fn test_brand_serde_round_trip_validates() {
        let brand: Brand = serde_json::from_str("\"Apple\"").unwrap();
        assert_eq!(brand.as_str(), "Apple");
        assert!(serde_json::from_str::<Brand>("\"../x\"").is_err());
    }

    #[test]
    fn test_sentiment_labels() {
        assert_eq!(Sentiment::from_label("Positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("Negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label(" Neutral "), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Unlabeled);
        assert_eq!(Sentiment::from_label("Mixed"), Sentiment::Unlabeled);
    }

    #[test]
    fn test_trend_equality_is_down() {
        assert_eq!(TrendDirection::classify(1.0, 1.0), TrendDirection::Down);
        assert_eq!(TrendDirection::classify(1.0001, 1.0), TrendDirection::Up);
        assert_eq!(TrendDirection::classify(0.5, 1.0), TrendDirection::Down);
    }

    #[test]
    fn test_trend_presentation() {
        assert!(TrendDirection::Up.label().contains("UP"));
        assert_eq!(TrendDirection::Down.color(), "#ff4757");
        assert_eq!(TrendDirection::Up.to_string(), "up");
    }
}
