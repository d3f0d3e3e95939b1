//! Emotion color palette shared by sphere coloring and persona auras.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of emotion colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionColor {
    /// Golden yellow: achievement, positive moments
    Joy,
    /// Deep blue: reflection, melancholy
    Sadness,
    /// Vibrant orange: rants, nervous energy
    Anxiety,
    /// Cyan-green: comparison, aspiration
    Envy,
    /// Soft pink: vulnerability, self-consciousness
    Embarrassment,
    /// Intense red: strong negative emotion
    Anger,
    /// Purple: uncertainty, caution
    Fear,
    /// Grey-blue: nothing in particular
    Neutral,
}

impl EmotionColor {
    pub const ALL: [EmotionColor; 8] = [
        EmotionColor::Joy,
        EmotionColor::Sadness,
        EmotionColor::Anxiety,
        EmotionColor::Envy,
        EmotionColor::Embarrassment,
        EmotionColor::Anger,
        EmotionColor::Fear,
        EmotionColor::Neutral,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            EmotionColor::Joy => "#FFD700",
            EmotionColor::Sadness => "#4A90E2",
            EmotionColor::Anxiety => "#FF6B35",
            EmotionColor::Envy => "#00D9B5",
            EmotionColor::Embarrassment => "#FF9ECD",
            EmotionColor::Anger => "#E63946",
            EmotionColor::Fear => "#9B59B6",
            EmotionColor::Neutral => "#A8B5C7",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EmotionColor::Joy => "joy",
            EmotionColor::Sadness => "sadness",
            EmotionColor::Anxiety => "anxiety",
            EmotionColor::Envy => "envy",
            EmotionColor::Embarrassment => "embarrassment",
            EmotionColor::Anger => "anger",
            EmotionColor::Fear => "fear",
            EmotionColor::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}
