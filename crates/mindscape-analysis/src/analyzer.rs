//! Rule-based text analyzer.
//!
//! A fixed lexical heuristic turning one journal line into a sentiment score,
//! an intensity and a category. It is the fallback path whenever the remote
//! analyzer is unavailable, so it must be deterministic and never fail.

use mindscape_core::{PostAnalysis, PostCategory};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::lexicon::{self, TokenizedText};

/// Tunable weights for the rule-based analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Multiplier an intensifier applies to the next polar word
    pub intensifier_boost: f64,
    /// Magnitude kept by a negated polar word (its sign is flipped)
    pub negation_scale: f64,
    /// Number of tokens after a negator that it affects
    pub negation_window: usize,
    /// Softness of the `raw / sqrt(raw² + alpha)` squashing
    pub normalization_alpha: f64,
    /// Contribution of |sentiment| to intensity
    pub magnitude_weight: f64,
    /// Intensity per '!' (at most three count)
    pub exclamation_weight: f64,
    /// Intensity per '?' (at most three count)
    pub question_weight: f64,
    /// Intensity added for an all-caps word of 3+ letters
    pub shout_bonus: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            intensifier_boost: 1.5,
            negation_scale: 0.75,
            negation_window: 3,
            normalization_alpha: 4.0,
            magnitude_weight: 3.0,
            exclamation_weight: 0.5,
            question_weight: 0.25,
            shout_bonus: 0.5,
        }
    }
}

/// Punctuation cap for emphasis counting
const MAX_EMPHASIS_MARKS: usize = 3;

/// Minimum letters for an all-caps word to count as shouting
const MIN_SHOUT_LETTERS: usize = 3;

/// Intermediate signals extracted from one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignals {
    /// Signed lexicon sum before normalization
    pub raw_sentiment: f64,
    /// Number of positive or negative lexicon hits
    pub polar_hits: usize,
    pub exclamations: usize,
    pub questions: usize,
    pub shouting: bool,
    pub hedges: usize,
    pub category: PostCategory,
}

/// Deterministic lexicon-driven analyzer
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer {
    config: AnalyzerConfig,
}

impl RuleBasedAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one line of text.
    ///
    /// `position` is the line's index within its batch; it is only recorded
    /// for tracing. Blank input yields [`PostAnalysis::neutral`].
    pub fn analyze(&self, text: &str, position: usize) -> PostAnalysis {
        let text = text.trim();
        if text.is_empty() {
            trace!(position, "blank line, using neutral analysis");
            return PostAnalysis::neutral();
        }

        let signals = self.signals(text);
        let sentiment = self.normalize(signals.raw_sentiment);
        let intensity = self.intensity(sentiment, &signals);

        trace!(
            position,
            sentiment,
            intensity,
            polar_hits = signals.polar_hits,
            hedges = signals.hedges,
            category = %signals.category,
            "classified line"
        );

        PostAnalysis::new(sentiment, intensity, signals.category)
    }

    /// Analyze an ordered batch, keeping index alignment
    pub fn analyze_batch<S: AsRef<str>>(&self, lines: &[S]) -> Vec<PostAnalysis> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| self.analyze(line.as_ref(), i))
            .collect()
    }

    /// Extract the raw lexical signals of a line
    pub fn signals(&self, text: &str) -> TextSignals {
        let tokens = TokenizedText::new(text);
        let (raw_sentiment, polar_hits) = self.score_tokens(tokens.tokens());

        TextSignals {
            raw_sentiment,
            polar_hits,
            exclamations: text.matches('!').count(),
            questions: text.matches('?').count(),
            shouting: has_shouting(text),
            hedges: tokens.count_all(lexicon::HEDGES),
            category: lexicon::classify(&tokens),
        }
    }

    fn score_tokens(&self, tokens: &[String]) -> (f64, usize) {
        let max_boost = self.config.intensifier_boost * self.config.intensifier_boost;

        let mut raw = 0.0;
        let mut hits = 0;
        let mut boost = 1.0;
        let mut negated_for = 0usize;

        for token in tokens {
            let token = token.as_str();

            if lexicon::is_negator(token) {
                negated_for = self.config.negation_window;
                boost = 1.0;
                continue;
            }

            if lexicon::is_intensifier(token) {
                boost = (boost * self.config.intensifier_boost).min(max_boost);
                continue;
            }

            let polarity = if lexicon::is_positive(token) {
                1.0
            } else if lexicon::is_negative(token) {
                -1.0
            } else {
                0.0
            };

            if polarity != 0.0 {
                let mut value = polarity * boost;
                if negated_for > 0 {
                    value *= -self.config.negation_scale;
                }
                raw += value;
                hits += 1;
            }

            boost = 1.0;
            negated_for = negated_for.saturating_sub(1);
        }

        (raw, hits)
    }

    fn normalize(&self, raw: f64) -> f64 {
        if raw == 0.0 {
            return 0.0;
        }
        let alpha = self.config.normalization_alpha.max(f64::EPSILON);
        (raw / (raw * raw + alpha).sqrt()).clamp(-1.0, 1.0)
    }

    fn intensity(&self, sentiment: f64, signals: &TextSignals) -> u8 {
        let emphasis = self.config.exclamation_weight
            * signals.exclamations.min(MAX_EMPHASIS_MARKS) as f64
            + self.config.question_weight * signals.questions.min(MAX_EMPHASIS_MARKS) as f64
            + if signals.shouting {
                self.config.shout_bonus
            } else {
                0.0
            };

        let value = (1.0 + sentiment.abs() * self.config.magnitude_weight + emphasis).round();
        value.clamp(
            PostAnalysis::MIN_INTENSITY as f64,
            PostAnalysis::MAX_INTENSITY as f64,
        ) as u8
    }
}

/// Whether any word is written in capitals with at least three letters
fn has_shouting(text: &str) -> bool {
    text.split_whitespace().any(|word| {
        let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        letters.len() >= MIN_SHOUT_LETTERS && letters.iter().all(|c| c.is_uppercase())
    })
}

/// Analyze a line with the default configuration
pub fn analyze(text: &str, position: usize) -> PostAnalysis {
    RuleBasedAnalyzer::default().analyze(text, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_daily_line() {
        let a = analyze("I am so happy today!", 0);
        assert!((a.sentiment_score - 0.6).abs() < 1e-9);
        assert_eq!(a.intensity, 3);
        assert_eq!(a.category, PostCategory::Daily);
    }

    #[test]
    fn test_terrible_rant_line() {
        let a = analyze("Everything is terrible and I hate this.", 1);
        assert!(a.sentiment_score < -0.7);
        assert!(a.sentiment_score > -0.71);
        assert_eq!(a.intensity, 3);
        assert_eq!(a.category, PostCategory::Rant);
    }

    #[test]
    fn test_neutral_line() {
        let a = analyze("ok", 0);
        assert_eq!(a.sentiment_score, 0.0);
        assert_eq!(a.intensity, 1);
        assert_eq!(a.category, PostCategory::Other);
    }

    #[test]
    fn test_blank_input_is_neutral() {
        assert_eq!(analyze("", 0), PostAnalysis::neutral());
        assert_eq!(analyze("   \t ", 3), PostAnalysis::neutral());
    }

    #[test]
    fn test_deterministic_and_position_independent() {
        let analyzer = RuleBasedAnalyzer::default();
        let text = "Finally shipped the release, so proud!!";
        let first = analyzer.analyze(text, 0);
        for position in 0..10 {
            assert_eq!(analyzer.analyze(text, position), first);
        }
    }

    #[test]
    fn test_outputs_in_range() {
        let lines = [
            "love love love love love love love love",
            "HATE HATE HATE!!!!!!!???",
            "worst awful terrible horrible miserable day ever",
            "nothing much",
            "?",
        ];
        for line in lines {
            let a = analyze(line, 0);
            assert!((-1.0..=1.0).contains(&a.sentiment_score));
            assert!((1..=5).contains(&a.intensity));
        }
    }

    #[test]
    fn test_negation_flips_sign() {
        let plain = analyze("I am happy", 0);
        let negated = analyze("I am not happy", 0);
        assert!(plain.sentiment_score > 0.0);
        assert!(negated.sentiment_score < 0.0);
        assert!(negated.sentiment_score.abs() < plain.sentiment_score.abs());

        let curly = analyze("I don’t hate it", 0);
        assert!(curly.sentiment_score > 0.0);
    }

    #[test]
    fn test_negation_window_expires() {
        // "happy" is four tokens after the negator
        let a = analyze("not that it matters much happy", 0);
        assert!(a.sentiment_score > 0.0);
    }

    #[test]
    fn test_intensifier_boosts() {
        let plain = analyze("good", 0);
        let boosted = analyze("very good", 0);
        let stacked = analyze("really really really really good", 0);
        assert!(boosted.sentiment_score > plain.sentiment_score);
        // Stacked boosts are capped at the square of a single boost
        let expected = 2.25 / (2.25f64 * 2.25 + 4.0).sqrt();
        assert!((stacked.sentiment_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_punctuation_does_not_change_sentiment() {
        let calm = analyze("what a great day", 0);
        let loud = analyze("what a great day!!!???", 0);
        assert_eq!(calm.sentiment_score, loud.sentiment_score);
        assert!(loud.intensity >= calm.intensity);
    }

    #[test]
    fn test_intensity_monotonic_in_magnitude() {
        let lines = ["good", "good great", "good great amazing", "good great amazing awesome"];
        let intensities: Vec<u8> = lines.iter().map(|l| analyze(l, 0).intensity).collect();
        for pair in intensities.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_shouting_adds_intensity() {
        let analyzer = RuleBasedAnalyzer::default();
        assert!(analyzer.signals("this is SO ANNOYING").shouting);
        assert!(!analyzer.signals("I am OK").shouting);
    }

    #[test]
    fn test_signals_count_polar_words_and_hedges() {
        let signals = RuleBasedAnalyzer::default()
            .signals("Maybe I think the food was good but the service was bad!!");

        assert_eq!(signals.polar_hits, 2);
        assert_eq!(signals.hedges, 2);
        assert_eq!(signals.exclamations, 2);
        assert_eq!(signals.raw_sentiment, 0.0);
    }

    #[test]
    fn test_category_bucket_precedence() {
        // Achievement beats daily and relationship
        assert_eq!(
            analyze("Finally finished my thesis this morning with my mom", 0).category,
            PostCategory::Achievement
        );
        // Relationship beats rant
        assert_eq!(
            analyze("My brother is so annoying", 0).category,
            PostCategory::Relationship
        );
        // Rant beats reflection
        assert_eq!(
            analyze("I think this is ridiculous", 0).category,
            PostCategory::Rant
        );
        assert_eq!(
            analyze("Wondering about the meaning of it all", 0).category,
            PostCategory::Reflection
        );
    }

    #[test]
    fn test_batch_keeps_alignment() {
        let analyzer = RuleBasedAnalyzer::default();
        let lines = vec!["great day", "awful day", "ok"];
        let batch = analyzer.analyze_batch(&lines);
        assert_eq!(batch.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(batch[i], analyzer.analyze(line, i));
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"negation_window": 5}"#).unwrap();
        assert_eq!(config.negation_window, 5);
        assert_eq!(config.intensifier_boost, 1.5);
    }
}
