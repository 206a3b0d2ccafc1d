//! Closed vocabularies shared by the pipeline, the store, and the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by `FromStr` when a label is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Classification assigned to a detected content change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Release,
    Campaign,
    Pricing,
    Hiring,
    News,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Release,
        Category::Campaign,
        Category::Pricing,
        Category::Hiring,
        Category::News,
        Category::Unknown,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Release => "RELEASE",
            Category::Campaign => "CAMPAIGN",
            Category::Pricing => "PRICING",
            Category::Hiring => "HIRING",
            Category::News => "NEWS",
            Category::Unknown => "UNKNOWN",
        }
    }

    /// Map a raw classifier label onto the taxonomy.
    ///
    /// Matching ignores surrounding whitespace and ASCII case. Anything outside
    /// the closed set becomes [`Category::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Kind of page a scrape target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetType {
    Blog,
    Pricing,
    News,
    Careers,
    #[default]
    Other,
}

impl TargetType {
    pub const ALL: [TargetType; 5] = [
        TargetType::Blog,
        TargetType::Pricing,
        TargetType::News,
        TargetType::Careers,
        TargetType::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Blog => "BLOG",
            TargetType::Pricing => "PRICING",
            TargetType::News => "NEWS",
            TargetType::Careers => "CAREERS",
            TargetType::Other => "OTHER",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                kind: "target type",
                value: s.to_string(),
            })
    }
}
