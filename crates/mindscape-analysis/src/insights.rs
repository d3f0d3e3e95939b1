//! Summary statistics and language-pattern insights over a post collection.

use mindscape_core::{AnalyzedPost, EmotionColor, PersonaDimensions, PostCategory};
use serde::{Deserialize, Serialize};

use crate::dimensions::DimensionMapper;
use crate::metrics::CorpusMetrics;

/// Headline numbers for a post collection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub count: usize,
    pub average_sentiment: f64,
    pub average_intensity: f64,
    /// Most frequent category, earliest in enumeration order on ties
    pub dominant_category: Option<PostCategory>,
}

impl PostStats {
    pub fn from_posts(posts: &[AnalyzedPost]) -> Self {
        Self::from_metrics(&CorpusMetrics::from_posts(posts))
    }

    pub fn from_metrics(metrics: &CorpusMetrics) -> Self {
        if metrics.is_empty() {
            return Self::default();
        }

        let dominant_category = PostCategory::ALL
            .into_iter()
            .fold(None, |best: Option<(PostCategory, usize)>, c| {
                let count = metrics.category_count(c);
                match best {
                    Some((_, bc)) if bc >= count => best,
                    _ => Some((c, count)),
                }
            })
            .map(|(c, _)| c);

        Self {
            count: metrics.post_count(),
            average_sentiment: metrics.sentiment().mean,
            average_intensity: metrics.intensity().mean,
            dominant_category,
        }
    }
}

/// A structured observation about writing patterns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Insight {
    /// Rants outnumber achievements more than two to one
    #[serde(rename_all = "camelCase")]
    FrustrationOutweighsCelebration { rant_share: f64 },
    /// Achievements outnumber rants more than three to one
    AchievementHeavy,
    /// Fewer than two relationship posts
    InwardFocus,
    /// Emotionality above 0.8
    EmotionalVolatility,
    /// Confidence below 0.4, usually from hedging
    HedgingLanguage,
    /// None of the other patterns apply
    Balanced,
}

/// Derive insights from a collection and its dimensions.
///
/// Every pattern is checked independently; `Balanced` is returned only when
/// none match. An empty collection yields no insights.
pub fn insights(posts: &[AnalyzedPost], dimensions: &PersonaDimensions) -> Vec<Insight> {
    if posts.is_empty() {
        return Vec::new();
    }

    let metrics = CorpusMetrics::from_posts(posts);
    let rants = metrics.category_count(PostCategory::Rant);
    let achievements = metrics.category_count(PostCategory::Achievement);
    let relationships = metrics.category_count(PostCategory::Relationship);

    let mut found = Vec::new();

    if rants > achievements * 2 && rants > 3 {
        found.push(Insight::FrustrationOutweighsCelebration {
            rant_share: rants as f64 / metrics.post_count() as f64,
        });
    }
    if achievements > rants * 3 {
        found.push(Insight::AchievementHeavy);
    }
    if relationships < 2 {
        found.push(Insight::InwardFocus);
    }
    if dimensions.emotionality > 0.8 {
        found.push(Insight::EmotionalVolatility);
    }
    if dimensions.confidence < 0.4 {
        found.push(Insight::HedgingLanguage);
    }
    if found.is_empty() {
        found.push(Insight::Balanced);
    }

    found
}

/// Complete persona profile for a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    pub dimensions: PersonaDimensions,
    pub stats: PostStats,
    /// Aura color summarizing the persona
    pub dominant_emotion: EmotionColor,
    pub insights: Vec<Insight>,
}

impl PersonaProfile {
    pub fn from_posts(posts: &[AnalyzedPost], mapper: &DimensionMapper) -> Self {
        let metrics = CorpusMetrics::from_posts(posts);
        let dimensions = mapper.map(&metrics);

        Self {
            dimensions,
            stats: PostStats::from_metrics(&metrics),
            dominant_emotion: dimensions.dominant_emotion(),
            insights: insights(posts, &dimensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindscape_core::{PostAnalysis, PostId};

    fn post(c: PostCategory, idx: usize) -> AnalyzedPost {
        AnalyzedPost::new(
            PostId::from(format!("p{idx}")),
            "",
            PostAnalysis::new(0.0, 2, c),
            idx,
        )
    }

    fn collection(counts: &[(PostCategory, usize)]) -> Vec<AnalyzedPost> {
        counts
            .iter()
            .flat_map(|(c, n)| std::iter::repeat(*c).take(*n))
            .enumerate()
            .map(|(i, c)| post(c, i))
            .collect()
    }

    #[test]
    fn test_stats_tie_goes_to_earliest_category() {
        let posts = collection(&[(PostCategory::Rant, 2), (PostCategory::Daily, 2)]);
        let stats = PostStats::from_posts(&posts);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.average_intensity, 2.0);
        assert_eq!(stats.dominant_category, Some(PostCategory::Daily));
    }

    #[test]
    fn test_stats_empty() {
        let stats = PostStats::from_posts(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.dominant_category.is_none());
    }

    #[test]
    fn test_frustration_insight() {
        let posts = collection(&[
            (PostCategory::Rant, 4),
            (PostCategory::Achievement, 1),
            (PostCategory::Relationship, 3),
        ]);
        let found = insights(&posts, &PersonaDimensions::neutral());

        assert_eq!(
            found,
            vec![Insight::FrustrationOutweighsCelebration { rant_share: 0.5 }]
        );
    }

    #[test]
    fn test_independent_insights_accumulate() {
        let posts = collection(&[(PostCategory::Achievement, 4)]);
        let dims = PersonaDimensions::new(0.5, 0.9, 0.5, 0.5, 0.2);
        let found = insights(&posts, &dims);

        assert_eq!(
            found,
            vec![
                Insight::AchievementHeavy,
                Insight::InwardFocus,
                Insight::EmotionalVolatility,
                Insight::HedgingLanguage,
            ]
        );
    }

    #[test]
    fn test_balanced_fallback() {
        let posts = collection(&[
            (PostCategory::Relationship, 2),
            (PostCategory::Rant, 1),
            (PostCategory::Achievement, 1),
        ]);
        assert_eq!(
            insights(&posts, &PersonaDimensions::neutral()),
            vec![Insight::Balanced]
        );
        assert!(insights(&[], &PersonaDimensions::neutral()).is_empty());
    }

    #[test]
    fn test_profile_is_consistent() {
        let posts = collection(&[(PostCategory::Reflection, 3)]);
        let profile = PersonaProfile::from_posts(&posts, &DimensionMapper::default());

        assert_eq!(profile.dimensions, crate::compute_dimensions(&posts));
        assert_eq!(profile.dominant_emotion, profile.dimensions.dominant_emotion());
        assert_eq!(profile.stats.dominant_category, Some(PostCategory::Reflection));
    }

    #[test]
    fn test_insight_serialization() {
        let json = serde_json::to_string(&Insight::InwardFocus).unwrap();
        assert_eq!(json, r#"{"kind":"inwardFocus"}"#);
    }
}
