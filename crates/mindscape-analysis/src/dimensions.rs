//! Persona dimension mapping from corpus metrics.
//!
//! ## Metric-to-Dimension Mappings
//!
//! | Dimension | Formula |
//! |-----------|---------|
//! | Extraversion | `0.5 + 0.5 * (outward - inward) / n` |
//! | Emotionality | `w_s * std(sentiment) + w_i * std(intensity) / 2` |
//! | Warmth | `w_rel * (mean_s(relationship) + 1) / 2 + w_pos * positive_share` |
//! | Conscientiousness | `w_struct * (achievement + reflection) / n + w_comp * (1 - std(intensity) / 2)` |
//! | Confidence | `w_hedge * (1 - min(hedges / n, 1)) + w_ach * (mean_s(achievement) + 1) / 2` |
//!
//! Warmth falls back to the overall mean sentiment when there are no
//! relationship posts; confidence uses 0.5 for the achievement term when there
//! are no achievement posts. All outputs are clamped to [0, 1].

use mindscape_core::{AnalyzedPost, PersonaDimensions, PostCategory};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::CorpusMetrics;

/// Weights for the dimension formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub emotionality_sentiment: f64,
    pub emotionality_intensity: f64,
    pub warmth_relationship: f64,
    pub warmth_positive: f64,
    pub conscientiousness_structure: f64,
    pub conscientiousness_composure: f64,
    pub confidence_hedging: f64,
    pub confidence_achievement: f64,
    /// Sentiment above which a post counts as positive for warmth
    pub positive_threshold: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            emotionality_sentiment: 0.6,
            emotionality_intensity: 0.4,
            warmth_relationship: 0.6,
            warmth_positive: 0.4,
            conscientiousness_structure: 0.6,
            conscientiousness_composure: 0.4,
            confidence_hedging: 0.5,
            confidence_achievement: 0.5,
            positive_threshold: 0.1,
        }
    }
}

/// Maps corpus metrics to persona dimensions
#[derive(Debug, Clone, Default)]
pub struct DimensionMapper {
    weights: DimensionWeights,
}

impl DimensionMapper {
    pub fn new(weights: DimensionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &DimensionWeights {
        &self.weights
    }

    /// Reduce a post collection to its five dimensions
    pub fn compute(&self, posts: &[AnalyzedPost]) -> PersonaDimensions {
        self.map(&CorpusMetrics::from_posts(posts))
    }

    /// Map pre-computed metrics to dimensions
    pub fn map(&self, metrics: &CorpusMetrics) -> PersonaDimensions {
        if metrics.is_empty() {
            return PersonaDimensions::neutral();
        }

        let w = &self.weights;
        let n = metrics.post_count() as f64;
        let sentiment = metrics.sentiment();
        let intensity = metrics.intensity();

        let extraversion =
            0.5 + 0.5 * (metrics.outward_count() as f64 - metrics.inward_count() as f64) / n;

        let emotionality = w.emotionality_sentiment * sentiment.std_dev
            + w.emotionality_intensity * intensity.std_dev / 2.0;

        let relationship_mean = metrics
            .category_sentiment(PostCategory::Relationship)
            .map(|s| s.mean)
            .unwrap_or(sentiment.mean);
        let warmth = w.warmth_relationship * (relationship_mean + 1.0) / 2.0
            + w.warmth_positive * metrics.positive_share(w.positive_threshold);

        let conscientiousness = w.conscientiousness_structure * metrics.structured_count() as f64
            / n
            + w.conscientiousness_composure * (1.0 - intensity.std_dev / 2.0);

        let achievement_term = metrics
            .category_sentiment(PostCategory::Achievement)
            .map(|s| (s.mean + 1.0) / 2.0)
            .unwrap_or(0.5);
        let confidence = w.confidence_hedging * (1.0 - metrics.hedge_density().min(1.0))
            + w.confidence_achievement * achievement_term;

        let dims = PersonaDimensions::new(
            extraversion,
            emotionality,
            warmth,
            conscientiousness,
            confidence,
        );

        debug!(
            posts = metrics.post_count(),
            extraversion = dims.extraversion,
            emotionality = dims.emotionality,
            warmth = dims.warmth,
            conscientiousness = dims.conscientiousness,
            confidence = dims.confidence,
            "computed persona dimensions"
        );

        dims
    }
}

/// Compute dimensions with the default weights
pub fn compute_dimensions(posts: &[AnalyzedPost]) -> PersonaDimensions {
    DimensionMapper::default().compute(posts)
}
