//! Corpus-level metrics gathered in one pass over the post collection.
//!
//! Every float sum is taken over values sorted with [`f64::total_cmp`], and
//! integer quantities are accumulated as integers. Reordering the input
//! therefore produces bit-identical metrics.

use mindscape_core::{AnalyzedPost, PostCategory};
use serde::{Deserialize, Serialize};

use crate::lexicon;

/// Mean and population standard deviation of a series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Statistics of an already sorted series
    pub fn from_sorted(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            count: values.len(),
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Statistics of an integer series from its exact sums
    pub fn from_integer_sums(count: usize, sum: u64, sum_sq: u64) -> Self {
        if count == 0 {
            return Self::default();
        }

        let n = count as u128;
        let (sum, sum_sq) = (sum as u128, sum_sq as u128);
        // n * Σx² - (Σx)² is exact and never negative
        let spread = (n * sum_sq).saturating_sub(sum * sum);

        let nf = count as f64;
        Self {
            count,
            mean: sum as f64 / nf,
            std_dev: (spread as f64).sqrt() / nf,
        }
    }
}

/// Aggregate counters over a post collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusMetrics {
    post_count: usize,
    category_counts: [usize; PostCategory::COUNT],
    sentiments: Vec<f64>,
    category_sentiments: [Vec<f64>; PostCategory::COUNT],
    intensity_sum: u64,
    intensity_sq_sum: u64,
    hedge_count: usize,
}

impl CorpusMetrics {
    /// Fold a whole collection into metrics
    pub fn from_posts(posts: &[AnalyzedPost]) -> Self {
        posts
            .iter()
            .fold(Self::default(), |mut acc, post| {
                acc.push(post);
                acc
            })
            .finalized()
    }

    fn push(&mut self, post: &AnalyzedPost) {
        let idx = post.category().index();
        let intensity = post.intensity() as u64;

        self.post_count += 1;
        self.category_counts[idx] += 1;
        self.sentiments.push(post.sentiment_score());
        self.category_sentiments[idx].push(post.sentiment_score());
        self.intensity_sum += intensity;
        self.intensity_sq_sum += intensity * intensity;
        self.hedge_count += lexicon::count_hedges(post.original_text());
    }

    fn finalized(mut self) -> Self {
        self.sentiments.sort_by(f64::total_cmp);
        for series in &mut self.category_sentiments {
            series.sort_by(f64::total_cmp);
        }
        self
    }

    pub fn post_count(&self) -> usize {
        self.post_count
    }

    pub fn is_empty(&self) -> bool {
        self.post_count == 0
    }

    pub fn category_count(&self, category: PostCategory) -> usize {
        self.category_counts[category.index()]
    }

    /// Posts in outward-facing categories
    pub fn outward_count(&self) -> usize {
        PostCategory::ALL
            .iter()
            .filter(|c| c.is_outward())
            .map(|c| self.category_count(*c))
            .sum()
    }

    /// Posts in inward-facing categories
    pub fn inward_count(&self) -> usize {
        PostCategory::ALL
            .iter()
            .filter(|c| c.is_inward())
            .map(|c| self.category_count(*c))
            .sum()
    }

    /// Achievement and reflection posts
    pub fn structured_count(&self) -> usize {
        PostCategory::ALL
            .iter()
            .filter(|c| c.is_structured())
            .map(|c| self.category_count(*c))
            .sum()
    }

    pub fn sentiment(&self) -> SeriesStats {
        SeriesStats::from_sorted(&self.sentiments)
    }

    /// Sentiment statistics of one category, `None` when it has no posts
    pub fn category_sentiment(&self, category: PostCategory) -> Option<SeriesStats> {
        let series = &self.category_sentiments[category.index()];
        (!series.is_empty()).then(|| SeriesStats::from_sorted(series))
    }

    pub fn intensity(&self) -> SeriesStats {
        SeriesStats::from_integer_sums(self.post_count, self.intensity_sum, self.intensity_sq_sum)
    }

    /// Share of posts whose sentiment exceeds `threshold`
    pub fn positive_share(&self, threshold: f64) -> f64 {
        if self.post_count == 0 {
            return 0.0;
        }
        let positive = self.sentiments.iter().filter(|s| **s > threshold).count();
        positive as f64 / self.post_count as f64
    }

    pub fn hedge_count(&self) -> usize {
        self.hedge_count
    }

    /// Hedge markers per post
    pub fn hedge_density(&self) -> f64 {
        if self.post_count == 0 {
            return 0.0;
        }
        self.hedge_count as f64 / self.post_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindscape_core::{PostAnalysis, PostId};

    fn post(text: &str, s: f64, i: u8, c: PostCategory, idx: usize) -> AnalyzedPost {
        AnalyzedPost::new(
            PostId::from(format!("p{idx}")),
            text,
            PostAnalysis::new(s, i, c),
            idx,
        )
    }

    #[test]
    fn test_series_stats() {
        let stats = SeriesStats::from_sorted(&[-1.0, 1.0]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 1.0);

        assert_eq!(SeriesStats::from_sorted(&[]), SeriesStats::default());
    }

    #[test]
    fn test_integer_stats_are_exact() {
        // 2, 4, 4, 4, 5, 5, 7, 9 has mean 5 and population std dev 2
        let values = [2u64, 4, 4, 4, 5, 5, 7, 9];
        let sum = values.iter().sum();
        let sum_sq = values.iter().map(|v| v * v).sum();
        let stats = SeriesStats::from_integer_sums(values.len(), sum, sum_sq);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);

        let flat = SeriesStats::from_integer_sums(3, 9, 27);
        assert_eq!(flat.std_dev, 0.0);
    }

    #[test]
    fn test_corpus_counts() {
        let posts = vec![
            post("finally done, maybe", 0.5, 3, PostCategory::Achievement, 0),
            post("i think i guess", 0.0, 1, PostCategory::Reflection, 1),
            post("coffee", 0.2, 2, PostCategory::Daily, 2),
            post("ugh", -0.8, 5, PostCategory::Rant, 3),
        ];
        let m = CorpusMetrics::from_posts(&posts);

        assert_eq!(m.post_count(), 4);
        assert_eq!(m.outward_count(), 2);
        assert_eq!(m.inward_count(), 1);
        assert_eq!(m.structured_count(), 2);
        assert_eq!(m.hedge_count(), 3);
        assert_eq!(m.hedge_density(), 0.75);
        assert_eq!(m.positive_share(0.1), 0.5);
        assert!(m.category_sentiment(PostCategory::Relationship).is_none());
        assert_eq!(
            m.category_sentiment(PostCategory::Achievement).map(|s| s.mean),
            Some(0.5)
        );
    }

    #[test]
    fn test_permutation_gives_identical_metrics() {
        let mut posts: Vec<AnalyzedPost> = (0..12)
            .map(|i| {
                let s = ((i * 7) % 13) as f64 / 6.5 - 1.0;
                let c = PostCategory::ALL[i % PostCategory::COUNT];
                post("so maybe", s, (i % 5 + 1) as u8, c, i)
            })
            .collect();

        let forward = CorpusMetrics::from_posts(&posts);
        posts.reverse();
        posts.swap(2, 9);
        let shuffled = CorpusMetrics::from_posts(&posts);

        assert_eq!(forward, shuffled);
        assert_eq!(
            forward.sentiment().std_dev.to_bits(),
            shuffled.sentiment().std_dev.to_bits()
        );
    }
}
