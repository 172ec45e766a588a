//! Strength classification of detection labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength bucket derived from a class label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthCategory {
    Strong,
    Medium,
    Weak,
    /// Label matched none of the keywords.
    Default,
}

impl StrengthCategory {
    /// Categories published as report buckets, in reporting order.
    pub const BUCKETS: [StrengthCategory; 3] = [Self::Strong, Self::Medium, Self::Weak];

    /// Case-insensitive substring match, checked in the fixed order
    /// strong, medium, weak. First match wins, so a label containing
    /// several keywords takes the earliest one in that order.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("strong") {
            Self::Strong
        } else if lower.contains("medium") {
            Self::Medium
        } else if lower.contains("weak") {
            Self::Weak
        } else {
            Self::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
            Self::Default => "default",
        }
    }

    /// True for the three categories that have their own report bucket.
    pub fn is_bucket(&self) -> bool {
        !matches!(self, Self::Default)
    }
}

impl fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
