//! Persona dimensions and the target persona catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::palette::EmotionColor;

/// Five aggregate personality dimensions.
/// Each dimension is scored on a scale of 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonaDimensions {
    /// Interaction and external focus
    pub extraversion: f64,

    /// Intensity variance and volatility
    pub emotionality: f64,

    /// Positive sentiment, relationship focus
    pub warmth: f64,

    /// Structure, reflection, achievement
    pub conscientiousness: f64,

    /// Assertiveness as opposed to hedging and self-deprecation
    pub confidence: f64,
}

impl PersonaDimensions {
    pub fn new(
        extraversion: f64,
        emotionality: f64,
        warmth: f64,
        conscientiousness: f64,
        confidence: f64,
    ) -> Self {
        Self {
            extraversion: clamp_unit(extraversion),
            emotionality: clamp_unit(emotionality),
            warmth: clamp_unit(warmth),
            conscientiousness: clamp_unit(conscientiousness),
            confidence: clamp_unit(confidence),
        }
    }

    /// Midpoint on every dimension; the value of an empty post collection
    pub fn neutral() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5, 0.5)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Extraversion => self.extraversion,
            Dimension::Emotionality => self.emotionality,
            Dimension::Warmth => self.warmth,
            Dimension::Conscientiousness => self.conscientiousness,
            Dimension::Confidence => self.confidence,
        }
    }

    /// Iterate `(dimension, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Get the dominant dimension (highest score, earliest on ties)
    pub fn dominant_dimension(&self) -> Dimension {
        self.iter()
            .fold(None, |best: Option<(Dimension, f64)>, (d, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((d, v)),
            })
            .map(|(d, _)| d)
            .unwrap_or(Dimension::Extraversion)
    }

    /// Emotion color that best summarizes the persona as a whole.
    ///
    /// Rules are checked in order; the first match wins.
    pub fn dominant_emotion(&self) -> EmotionColor {
        if self.emotionality > 0.6 {
            EmotionColor::Anxiety
        } else if self.extraversion < 0.4 && self.emotionality > 0.4 {
            EmotionColor::Sadness
        } else if self.warmth > 0.6 && self.extraversion > 0.6 {
            EmotionColor::Joy
        } else if self.warmth < 0.4 && self.confidence < 0.4 {
            EmotionColor::Embarrassment
        } else if self.conscientiousness > 0.7 && self.emotionality > 0.3 {
            EmotionColor::Anxiety
        } else if self.confidence < 0.3 && self.emotionality > 0.5 {
            EmotionColor::Fear
        } else if (self.extraversion - 0.5).abs() < 0.2 && (self.warmth - 0.5).abs() < 0.2 {
            EmotionColor::Envy
        } else {
            EmotionColor::Joy
        }
    }
}

impl Default for PersonaDimensions {
    fn default() -> Self {
        Self::neutral()
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.5
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Individual persona dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Extraversion,
    Emotionality,
    Warmth,
    Conscientiousness,
    Confidence,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Extraversion,
        Dimension::Emotionality,
        Dimension::Warmth,
        Dimension::Conscientiousness,
        Dimension::Confidence,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Extraversion => "extraversion",
            Dimension::Emotionality => "emotionality",
            Dimension::Warmth => "warmth",
            Dimension::Conscientiousness => "conscientiousness",
            Dimension::Confidence => "confidence",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference persona the user can grow towards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPersona {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dimensions: PersonaDimensions,
    pub color_hint: String,
}

impl TargetPersona {
    fn preset(
        id: &str,
        name: &str,
        description: &str,
        dimensions: [f64; 5],
        color: EmotionColor,
    ) -> Self {
        let [e, em, w, c, conf] = dimensions;
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            dimensions: PersonaDimensions::new(e, em, w, c, conf),
            color_hint: color.hex().to_string(),
        }
    }

    /// Built-in preset catalog
    pub fn presets() -> Vec<TargetPersona> {
        vec![
            Self::preset(
                "radiant-connector",
                "Radiant Connector",
                "Outgoing and warm, energised by the people around them.",
                [0.85, 0.45, 0.90, 0.50, 0.80],
                EmotionColor::Joy,
            ),
            Self::preset(
                "steady-architect",
                "Steady Architect",
                "Composed and methodical, building quietly towards long-term goals.",
                [0.40, 0.25, 0.55, 0.90, 0.75],
                EmotionColor::Sadness,
            ),
            Self::preset(
                "quiet-sage",
                "Quiet Sage",
                "Reflective and gentle, at peace with an inward-facing life.",
                [0.25, 0.30, 0.70, 0.70, 0.60],
                EmotionColor::Envy,
            ),
            Self::preset(
                "bold-trailblazer",
                "Bold Trailblazer",
                "Decisive and driven, speaks plainly and acts quickly.",
                [0.80, 0.60, 0.50, 0.65, 0.95],
                EmotionColor::Anxiety,
            ),
            Self::preset(
                "balanced-self",
                "Balanced Self",
                "Even-keeled across the board, with no dimension crowding the rest.",
                [0.60, 0.40, 0.65, 0.60, 0.65],
                EmotionColor::Embarrassment,
            ),
        ]
    }

    /// Look up a preset by id
    pub fn find(id: &str) -> Option<TargetPersona> {
        Self::presets().into_iter().find(|p| p.id == id)
    }
}
