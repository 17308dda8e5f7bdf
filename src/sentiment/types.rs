// src/sentiment/types.rs
// Request and result types for comment classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifyError;

/// Lowest and highest legal rating
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Body of `POST /comment`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

/// Polarity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ClassifyError;

    /// Exact match only; "Positive" or "mixed" are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                ClassifyError::SchemaViolation(format!(
                    "sentiment '{}' is not one of positive, negative, neutral",
                    s
                ))
            })
    }
}

/// Ordinal score, 1 (highly negative) to 5 (highly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Polarity this rating stands for in the documented mapping
    pub fn implied_sentiment(self) -> Sentiment {
        match self.0 {
            4..=5 => Sentiment::Positive,
            3 => Sentiment::Neutral,
            _ => Sentiment::Negative,
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = ClassifyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ClassifyError::SchemaViolation(format!(
                "rating {} is outside {}..={}",
                value, MIN_RATING, MAX_RATING
            )))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated classification returned to callers.
///
/// Serialize-only: completions are checked by
/// `parse::validate_classification`, the single place results are built
/// from untrusted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub sentiment: Sentiment,
    pub rating: Rating,
}

impl ClassificationResult {
    /// Whether `rating` and `sentiment` agree with the documented mapping.
    /// Informational only; disagreeing results are still returned.
    pub fn is_consistent(&self) -> bool {
        self.rating.implied_sentiment() == self.sentiment
    }
}
