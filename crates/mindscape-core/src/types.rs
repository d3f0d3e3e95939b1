//! Fundamental types for the Mindscape system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Unique identifier for an analyzed post
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn new() -> Self {
        Self(format!("post-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PostId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Topical classification of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    /// Routine life updates: weather, food, commute
    Daily,
    /// Complaints, anger, venting
    Rant,
    /// Deep thoughts, questions about life, self-realization
    Reflection,
    /// Success, finishing tasks, pride
    Achievement,
    /// Friends, family, partners, social interactions
    Relationship,
    /// Anything that fits nowhere else
    Other,
}

impl PostCategory {
    pub const COUNT: usize = 6;

    pub const ALL: [PostCategory; Self::COUNT] = [
        PostCategory::Daily,
        PostCategory::Rant,
        PostCategory::Reflection,
        PostCategory::Achievement,
        PostCategory::Relationship,
        PostCategory::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PostCategory::Daily => "daily",
            PostCategory::Rant => "rant",
            PostCategory::Reflection => "reflection",
            PostCategory::Achievement => "achievement",
            PostCategory::Relationship => "relationship",
            PostCategory::Other => "other",
        }
    }

    /// Categories that face the outside world (count towards extraversion)
    pub fn is_outward(&self) -> bool {
        matches!(
            self,
            PostCategory::Relationship | PostCategory::Achievement | PostCategory::Daily
        )
    }

    /// Categories that face inwards (count against extraversion)
    pub fn is_inward(&self) -> bool {
        matches!(self, PostCategory::Reflection)
    }

    /// Categories that signal structured, composed expression
    pub fn is_structured(&self) -> bool {
        matches!(self, PostCategory::Achievement | PostCategory::Reflection)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PostCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(PostCategory::Daily),
            "rant" => Ok(PostCategory::Rant),
            "reflection" => Ok(PostCategory::Reflection),
            "achievement" => Ok(PostCategory::Achievement),
            "relationship" => Ok(PostCategory::Relationship),
            "other" => Ok(PostCategory::Other),
            other => Err(Error::UnknownCategory(other.to_string())),
        }
    }
}

/// Per-post emotional metrics produced by an analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPostAnalysis")]
pub struct PostAnalysis {
    /// Polarity in [-1, 1]
    pub sentiment_score: f64,
    /// Emotional charge in 1..=5
    pub intensity: u8,
    pub category: PostCategory,
}

impl PostAnalysis {
    pub const MIN_INTENSITY: u8 = 1;
    pub const MAX_INTENSITY: u8 = 5;

    /// Build an analysis, clamping values into their domains.
    /// A NaN sentiment becomes neutral.
    pub fn new(sentiment_score: f64, intensity: u8, category: PostCategory) -> Self {
        let sentiment_score = if sentiment_score.is_nan() {
            0.0
        } else {
            sentiment_score.clamp(-1.0, 1.0)
        };

        Self {
            sentiment_score,
            intensity: intensity.clamp(Self::MIN_INTENSITY, Self::MAX_INTENSITY),
            category,
        }
    }

    /// Build an analysis, rejecting values outside their domains
    pub fn try_new(sentiment_score: f64, intensity: i64, category: PostCategory) -> Result<Self> {
        if !(-1.0..=1.0).contains(&sentiment_score) {
            return Err(Error::OutOfRange {
                field: "sentimentScore",
                value: sentiment_score,
            });
        }

        if !(Self::MIN_INTENSITY as i64..=Self::MAX_INTENSITY as i64).contains(&intensity) {
            return Err(Error::OutOfRange {
                field: "intensity",
                value: intensity as f64,
            });
        }

        Ok(Self {
            sentiment_score,
            intensity: intensity as u8,
            category,
        })
    }

    /// Neutral analysis used for degenerate input
    pub fn neutral() -> Self {
        Self {
            sentiment_score: 0.0,
            intensity: Self::MIN_INTENSITY,
            category: PostCategory::Other,
        }
    }
}

impl Default for PostAnalysis {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Unchecked wire form of [`PostAnalysis`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPostAnalysis {
    sentiment_score: f64,
    intensity: i64,
    category: PostCategory,
}

impl TryFrom<RawPostAnalysis> for PostAnalysis {
    type Error = Error;

    fn try_from(raw: RawPostAnalysis) -> Result<Self> {
        PostAnalysis::try_new(raw.sentiment_score, raw.intensity, raw.category)
    }
}

/// A post together with its derived metrics.
///
/// Immutable once created: fields are only readable through accessors.
/// Deserializing rejects metrics outside their domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAnalyzedPost")]
pub struct AnalyzedPost {
    id: PostId,
    original_text: String,
    sentiment_score: f64,
    intensity: u8,
    category: PostCategory,
    timestamp_index: usize,
}

impl AnalyzedPost {
    pub fn new(
        id: PostId,
        original_text: impl Into<String>,
        analysis: PostAnalysis,
        timestamp_index: usize,
    ) -> Self {
        Self {
            id,
            original_text: original_text.into(),
            sentiment_score: analysis.sentiment_score,
            intensity: analysis.intensity,
            category: analysis.category,
            timestamp_index,
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn category(&self) -> PostCategory {
        self.category
    }

    pub fn timestamp_index(&self) -> usize {
        self.timestamp_index
    }

    pub fn analysis(&self) -> PostAnalysis {
        PostAnalysis {
            sentiment_score: self.sentiment_score,
            intensity: self.intensity,
            category: self.category,
        }
    }
}

/// Unchecked wire form of [`AnalyzedPost`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalyzedPost {
    id: PostId,
    original_text: String,
    sentiment_score: f64,
    intensity: i64,
    category: PostCategory,
    timestamp_index: usize,
}

impl TryFrom<RawAnalyzedPost> for AnalyzedPost {
    type Error = Error;

    fn try_from(raw: RawAnalyzedPost) -> Result<Self> {
        let analysis = PostAnalysis::try_new(raw.sentiment_score, raw.intensity, raw.category)?;
        Ok(AnalyzedPost::new(
            raw.id,
            raw.original_text,
            analysis,
            raw.timestamp_index,
        ))
    }
}
