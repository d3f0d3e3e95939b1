//! Category/sentiment to color, and color to tower cluster.

use mindscape_core::{EmotionColor, PostCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sphere color for a post.
///
/// The category decides when it carries an emotion of its own; `other`
/// falls back to sentiment banding.
pub fn sphere_color(category: PostCategory, sentiment: f64) -> EmotionColor {
    match category {
        PostCategory::Rant => EmotionColor::Anxiety,
        PostCategory::Achievement => EmotionColor::Joy,
        PostCategory::Reflection => EmotionColor::Sadness,
        PostCategory::Daily if sentiment > 0.0 => EmotionColor::Joy,
        PostCategory::Daily => EmotionColor::Embarrassment,
        PostCategory::Relationship if sentiment > 0.3 => EmotionColor::Joy,
        PostCategory::Relationship if sentiment < -0.3 => EmotionColor::Sadness,
        PostCategory::Relationship => EmotionColor::Embarrassment,
        PostCategory::Other => sentiment_band(sentiment),
    }
}

fn sentiment_band(sentiment: f64) -> EmotionColor {
    if sentiment > 0.5 {
        EmotionColor::Joy
    } else if sentiment > 0.1 {
        EmotionColor::Envy
    } else if sentiment < -0.5 {
        EmotionColor::Sadness
    } else if sentiment < -0.2 {
        EmotionColor::Anxiety
    } else {
        EmotionColor::Neutral
    }
}

/// One of the five towers in the categorical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EmotionCluster {
    Joy = 0,
    Sadness = 1,
    Anxiety = 2,
    Envy = 3,
    /// Catch-all for every other color
    Embarrassment = 4,
}

impl EmotionCluster {
    pub const COUNT: usize = 5;

    pub const ALL: [EmotionCluster; Self::COUNT] = [
        EmotionCluster::Joy,
        EmotionCluster::Sadness,
        EmotionCluster::Anxiety,
        EmotionCluster::Envy,
        EmotionCluster::Embarrassment,
    ];

    /// Tower slot around the ring
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            EmotionCluster::Joy => "joy",
            EmotionCluster::Sadness => "sadness",
            EmotionCluster::Anxiety => "anxiety",
            EmotionCluster::Envy => "envy",
            EmotionCluster::Embarrassment => "embarrassment",
        }
    }
}

impl From<EmotionColor> for EmotionCluster {
    fn from(color: EmotionColor) -> Self {
        match color {
            EmotionColor::Joy => EmotionCluster::Joy,
            EmotionColor::Sadness => EmotionCluster::Sadness,
            EmotionColor::Anxiety => EmotionCluster::Anxiety,
            EmotionColor::Envy => EmotionCluster::Envy,
            EmotionColor::Embarrassment
            | EmotionColor::Anger
            | EmotionColor::Fear
            | EmotionColor::Neutral => EmotionCluster::Embarrassment,
        }
    }
}

impl fmt::Display for EmotionCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
