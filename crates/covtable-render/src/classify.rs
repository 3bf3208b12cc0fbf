//! Watermark classification of metric values.
//!
//! A [`Watermark`] splits the percentage range into three bands. Values below
//! `low` are [`Classification::Low`], values at or above `high` are
//! [`Classification::High`], everything in between is
//! [`Classification::Medium`].
//!
//! The table renderer only asks a [`Classify`] implementation for a label and
//! hands it to the palette. Labels never influence widths or truncation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::model::{MetricKind, MetricTotals};

/// Severity label for a metric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Low,
    Medium,
    High,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Low,
        Classification::Medium,
        Classification::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Low => "low",
            Classification::Medium => "medium",
            Classification::High => "high",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Classification::Low),
            "medium" => Ok(Classification::Medium),
            "high" => Ok(Classification::High),
            other => Err(RenderError::UnknownClass(other.to_string())),
        }
    }
}

/// Low and high thresholds in percentage points.
///
/// Serialized as a two-element array: `[50, 80]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Watermark {
    pub low: f64,
    pub high: f64,
}

impl Watermark {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn classify(&self, pct: f64) -> Classification {
        if pct >= self.high {
            Classification::High
        } else if pct >= self.low {
            Classification::Medium
        } else {
            Classification::Low
        }
    }

    /// Both thresholds within `0..=100` and `low <= high`.
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        in_range(self.low) && in_range(self.high) && self.low <= self.high
    }
}

impl Default for Watermark {
    fn default() -> Self {
        Watermark::new(50.0, 80.0)
    }
}

impl From<[f64; 2]> for Watermark {
    fn from([low, high]: [f64; 2]) -> Self {
        Watermark::new(low, high)
    }
}

impl From<Watermark> for [f64; 2] {
    fn from(mark: Watermark) -> Self {
        [mark.low, mark.high]
    }
}

/// One watermark per metric kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Watermarks {
    pub statements: Watermark,
    pub branches: Watermark,
    pub functions: Watermark,
    pub lines: Watermark,
}

impl Watermarks {
    pub fn get(&self, kind: MetricKind) -> &Watermark {
        match kind {
            MetricKind::Statements => &self.statements,
            MetricKind::Branches => &self.branches,
            MetricKind::Functions => &self.functions,
            MetricKind::Lines => &self.lines,
        }
    }

    /// Returns the first metric kind whose watermark is out of range.
    pub fn first_invalid(&self) -> Option<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .find(|kind| !self.get(*kind).is_valid())
    }
}

/// Maps a metric to a classification label.
pub trait Classify {
    fn classify(&self, kind: MetricKind, totals: &MetricTotals) -> Classification;
}

impl Classify for Watermarks {
    fn classify(&self, kind: MetricKind, totals: &MetricTotals) -> Classification {
        self.get(kind).classify(totals.get(kind).pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metric;

    #[test]
    fn test_watermark_bands() {
        let mark = Watermark::new(50.0, 80.0);
        assert_eq!(mark.classify(0.0), Classification::Low);
        assert_eq!(mark.classify(49.99), Classification::Low);
        assert_eq!(mark.classify(50.0), Classification::Medium);
        assert_eq!(mark.classify(79.99), Classification::Medium);
        assert_eq!(mark.classify(80.0), Classification::High);
        assert_eq!(mark.classify(100.0), Classification::High);
    }

    #[test]
    fn test_watermarks_classify_each_kind_independently() {
        let marks = Watermarks {
            branches: Watermark::new(10.0, 20.0),
            ..Watermarks::default()
        };
        let totals = MetricTotals {
            statements: Metric::new(10, 3, 0),
            branches: Metric::new(10, 3, 0),
            ..MetricTotals::default()
        };
        assert_eq!(
            marks.classify(MetricKind::Statements, &totals),
            Classification::Low
        );
        assert_eq!(
            marks.classify(MetricKind::Branches, &totals),
            Classification::High
        );
    }

    #[test]
    fn test_watermark_validity() {
        assert!(Watermark::new(50.0, 80.0).is_valid());
        assert!(Watermark::new(0.0, 0.0).is_valid());
        assert!(!Watermark::new(80.0, 50.0).is_valid());
        assert!(!Watermark::new(-1.0, 50.0).is_valid());
        assert!(!Watermark::new(50.0, 101.0).is_valid());
    }

    #[test]
    fn test_first_invalid() {
        let mut marks = Watermarks::default();
        assert_eq!(marks.first_invalid(), None);
        marks.functions = Watermark::new(90.0, 10.0);
        assert_eq!(marks.first_invalid(), Some(MetricKind::Functions));
    }

    #[test]
    fn test_watermarks_from_yaml_arrays() {
        let marks: Watermarks = serde_yaml::from_str("lines: [60, 90]\n").unwrap();
        assert_eq!(marks.lines, Watermark::new(60.0, 90.0));
        assert_eq!(marks.statements, Watermark::default());
    }

    #[test]
    fn test_classification_from_str() {
        assert_eq!("medium".parse::<Classification>().unwrap(), Classification::Medium);
        assert!("severe".parse::<Classification>().is_err());
    }
}
