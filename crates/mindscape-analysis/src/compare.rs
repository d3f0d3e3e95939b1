//! Gap-to-target comparison and what-if projection.

use mindscape_core::{AnalyzedPost, Dimension, PersonaDimensions, PostId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::RuleBasedAnalyzer;
use crate::dimensions::DimensionMapper;

/// Gap under which a dimension counts as aligned with its target
pub const ALIGNMENT_TOLERANCE: f64 = 0.1;

/// Smallest projected shift worth surfacing
pub const SIGNIFICANT_SHIFT: f64 = 0.005;

/// Signed per-dimension difference (`target - current`), unclamped
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionDelta {
    pub extraversion: f64,
    pub emotionality: f64,
    pub warmth: f64,
    pub conscientiousness: f64,
    pub confidence: f64,
}

impl DimensionDelta {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Extraversion => self.extraversion,
            Dimension::Emotionality => self.emotionality,
            Dimension::Warmth => self.warmth,
            Dimension::Conscientiousness => self.conscientiousness,
            Dimension::Confidence => self.confidence,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Whether the gap on `dimension` is strictly below `tolerance`
    pub fn is_aligned(&self, dimension: Dimension, tolerance: f64) -> bool {
        self.get(dimension).abs() < tolerance
    }

    /// Whether every dimension is within [`ALIGNMENT_TOLERANCE`]
    pub fn all_aligned(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| self.is_aligned(*d, ALIGNMENT_TOLERANCE))
    }

    /// Dimension with the largest absolute gap (earliest on ties)
    pub fn largest_gap(&self) -> (Dimension, f64) {
        self.iter()
            .fold((Dimension::Extraversion, self.extraversion), |best, (d, v)| {
                if v.abs() > best.1.abs() {
                    (d, v)
                } else {
                    best
                }
            })
    }
}

/// Per-dimension `target - current`
pub fn diff(current: &PersonaDimensions, target: &PersonaDimensions) -> DimensionDelta {
    DimensionDelta {
        extraversion: target.extraversion - current.extraversion,
        emotionality: target.emotionality - current.emotionality,
        warmth: target.warmth - current.warmth,
        conscientiousness: target.conscientiousness - current.conscientiousness,
        confidence: target.confidence - current.confidence,
    }
}

/// Before/after view of a hypothetical draft post
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfOutcome {
    pub baseline: PersonaDimensions,
    pub projected: PersonaDimensions,
    /// `projected - baseline`
    pub shift: DimensionDelta,
}

impl WhatIfOutcome {
    /// Dimensions that would move by at least [`SIGNIFICANT_SHIFT`]
    pub fn significant_shifts(&self) -> Vec<(Dimension, f64)> {
        self.shift
            .iter()
            .filter(|(_, v)| v.abs() >= SIGNIFICANT_SHIFT)
            .collect()
    }
}

/// Projects how one extra post would change the persona
#[derive(Debug, Clone, Default)]
pub struct WhatIfSimulator {
    analyzer: RuleBasedAnalyzer,
    mapper: DimensionMapper,
}

impl WhatIfSimulator {
    pub fn new(analyzer: RuleBasedAnalyzer, mapper: DimensionMapper) -> Self {
        Self { analyzer, mapper }
    }

    /// Dimensions of `current_posts` plus `draft`.
    ///
    /// A blank draft leaves the collection unchanged.
    pub fn simulate(&self, current_posts: &[AnalyzedPost], draft: &str) -> PersonaDimensions {
        match self.draft_post(current_posts, draft) {
            Some(post) => {
                let mut extended = current_posts.to_vec();
                extended.push(post);
                self.mapper.compute(&extended)
            }
            None => self.mapper.compute(current_posts),
        }
    }

    /// Baseline, projection and the shift between them
    pub fn outcome(&self, current_posts: &[AnalyzedPost], draft: &str) -> WhatIfOutcome {
        let baseline = self.mapper.compute(current_posts);
        let projected = self.simulate(current_posts, draft);
        let shift = diff(&baseline, &projected);

        debug!(
            posts = current_posts.len(),
            largest = %shift.largest_gap().0,
            "what-if projection"
        );

        WhatIfOutcome {
            baseline,
            projected,
            shift,
        }
    }

    fn draft_post(&self, current_posts: &[AnalyzedPost], draft: &str) -> Option<AnalyzedPost> {
        let draft = draft.trim();
        if draft.is_empty() {
            return None;
        }

        let position = current_posts.len();
        Some(AnalyzedPost::new(
            PostId::from("draft"),
            draft,
            self.analyzer.analyze(draft, position),
            position,
        ))
    }
}
