//! Fixed word lists driving the rule-based analyzer.
//!
//! All matching is case-insensitive and works on whole tokens. Multi-word
//! entries match consecutive tokens. Curly apostrophes are folded to ASCII
//! before matching, so "don’t" and "don't" are the same token.
//!
//! ## Category Bucket Order
//!
//! Buckets are checked in the order of [`CATEGORY_BUCKETS`]; the first bucket
//! with any hit wins and `other` is the fallback:
//!
//! 1. achievement
//! 2. relationship
//! 3. rant
//! 4. reflection
//! 5. daily

use mindscape_core::PostCategory;

/// Positive polarity markers
pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "glad", "great", "good", "love", "loved", "lovely", "amazing", "awesome",
    "wonderful", "fantastic", "excellent", "joy", "joyful", "excited", "exciting", "proud",
    "grateful", "thankful", "thanks", "thank", "beautiful", "nice", "fun", "enjoy",
    "enjoyed", "peaceful", "calm", "relaxed", "hopeful", "win", "won", "success",
    "successful", "best", "perfect", "smile", "smiled", "laugh", "laughed", "cheerful",
    "delighted", "blessed", "brilliant", "cozy",
];

/// Negative polarity markers
pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "terrible", "awful", "horrible", "hate", "hated", "angry", "mad",
    "furious", "annoyed", "annoying", "frustrated", "frustrating", "upset", "tired",
    "exhausted", "stressed", "anxious", "worried", "lonely", "hurt", "pain", "cry",
    "cried", "depressed", "miserable", "worst", "sick", "fail", "failed", "failure",
    "stuck", "disappointed", "scared", "afraid", "boring", "ugly", "rude", "disaster",
    "nightmare", "sucks", "ruined", "broke", "broken",
];

/// Tokens that amplify the next polar word
pub const INTENSIFIERS: &[&str] = &[
    "so", "very", "really", "extremely", "incredibly", "super", "totally", "absolutely",
    "completely", "utterly", "truly", "deeply", "insanely", "too",
];

/// Tokens that flip the polarity of the next few words
pub const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "cannot",
    "can't", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "won't",
    "wouldn't", "shouldn't", "couldn't", "hardly", "barely",
];

/// Tentative qualifiers that lower confidence
pub const HEDGES: &[&str] = &[
    "maybe", "perhaps", "probably", "possibly", "might", "kinda", "sorta", "somewhat",
    "i guess", "i think", "sort of", "kind of", "i suppose", "not sure", "i feel like",
];

pub const ACHIEVEMENT_WORDS: &[&str] = &[
    "finished", "finally", "achieved", "accomplished", "completed", "promoted",
    "promotion", "passed", "won", "succeeded", "graduated", "shipped", "launched",
    "milestone", "goal", "award", "proud", "nailed", "hired", "aced", "got the job",
    "personal best",
];

pub const RELATIONSHIP_WORDS: &[&str] = &[
    "friend", "friends", "family", "mom", "mum", "dad", "mother", "father", "sister",
    "brother", "wife", "husband", "partner", "boyfriend", "girlfriend", "kids", "son",
    "daughter", "baby", "date", "wedding", "married", "relationship", "crush",
    "grandma", "grandpa", "together", "hang out", "hung out",
];

pub const RANT_WORDS: &[&str] = &[
    "hate", "terrible", "awful", "horrible", "annoying", "annoyed", "ridiculous", "stupid",
    "angry", "furious", "worst", "sucks", "frustrated", "frustrating", "unfair", "rude",
    "sick of", "fed up", "can't stand", "rant",
];

pub const REFLECTION_WORDS: &[&str] = &[
    "think", "thinking", "thought", "wonder", "wondering", "realize", "realized",
    "realise", "realised", "meaning", "life", "reflect", "reflecting", "lesson",
    "learned", "learnt", "purpose", "myself", "remember", "memories", "understand",
    "journey", "why",
];

pub const DAILY_WORDS: &[&str] = &[
    "today", "morning", "tonight", "breakfast", "lunch", "dinner", "coffee", "tea",
    "weather", "rain", "sunny", "commute", "work", "walk", "sleep", "slept", "weekend",
    "ate", "cooked", "gym", "bus", "train", "groceries", "shopping",
];

/// Category buckets in check order
pub const CATEGORY_BUCKETS: &[(PostCategory, &[&str])] = &[
    (PostCategory::Achievement, ACHIEVEMENT_WORDS),
    (PostCategory::Relationship, RELATIONSHIP_WORDS),
    (PostCategory::Rant, RANT_WORDS),
    (PostCategory::Reflection, REFLECTION_WORDS),
    (PostCategory::Daily, DAILY_WORDS),
];

/// Lowercased token stream of a line
#[derive(Debug, Clone)]
pub struct TokenizedText {
    tokens: Vec<String>,
    /// Tokens joined by single spaces, padded on both ends
    padded: String,
}

impl TokenizedText {
    pub fn new(text: &str) -> Self {
        let folded = text.replace(['\u{2019}', '\u{2018}'], "'").to_lowercase();

        let tokens: Vec<String> = folded
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let padded = format!(" {} ", tokens.join(" "));

        Self { tokens, padded }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `term` (one or more words) occurs as whole tokens
    pub fn contains(&self, term: &str) -> bool {
        self.padded.contains(&format!(" {} ", term))
    }

    /// Non-overlapping occurrences of `term` as whole tokens
    pub fn count(&self, term: &str) -> usize {
        let needle = format!(" {} ", term);
        let mut count = 0;
        let mut from = 0;
        while let Some(pos) = self.padded[from..].find(&needle) {
            count += 1;
            // Step past the term but keep its trailing space for the next match
            from += pos + needle.len() - 1;
        }
        count
    }

    pub fn contains_any(&self, terms: &[&str]) -> bool {
        terms.iter().any(|t| self.contains(t))
    }

    pub fn count_all(&self, terms: &[&str]) -> usize {
        terms.iter().map(|t| self.count(t)).sum()
    }
}

pub fn is_positive(token: &str) -> bool {
    POSITIVE_WORDS.contains(&token)
}

pub fn is_negative(token: &str) -> bool {
    NEGATIVE_WORDS.contains(&token)
}

pub fn is_intensifier(token: &str) -> bool {
    INTENSIFIERS.contains(&token)
}

pub fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token)
}

/// Number of hedge markers in a line of text
pub fn count_hedges(text: &str) -> usize {
    TokenizedText::new(text).count_all(HEDGES)
}

/// First category bucket with a hit, or `Other`
pub fn classify(text: &TokenizedText) -> PostCategory {
    CATEGORY_BUCKETS
        .iter()
        .find(|(_, words)| text.contains_any(words))
        .map(|(category, _)| *category)
        .unwrap_or(PostCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let t = TokenizedText::new("Can’t   STAND this, honestly!!");
        assert_eq!(t.tokens(), &["can't", "stand", "this", "honestly"]);
        assert!(t.contains("can't stand"));
        assert!(!t.contains("stand this honestly now"));
    }

    #[test]
    fn test_count_is_whole_word() {
        let t = TokenizedText::new("maybe maybe maybeso");
        assert_eq!(t.count("maybe"), 2);

        let t = TokenizedText::new("I think, I think so");
        assert_eq!(t.count("i think"), 2);
    }

    #[test]
    fn test_count_hedges() {
        assert_eq!(count_hedges("I guess it was kind of fine, maybe."), 3);
        assert_eq!(count_hedges("Shipped it."), 0);
    }

    #[test]
    fn test_bucket_order_first_match_wins() {
        // Both achievement ("finally") and daily ("today") match
        let t = TokenizedText::new("Finally done today");
        assert_eq!(classify(&t), PostCategory::Achievement);

        let t = TokenizedText::new("My sister is being ridiculous");
        assert_eq!(classify(&t), PostCategory::Relationship);

        let t = TokenizedText::new("purple elephants");
        assert_eq!(classify(&t), PostCategory::Other);
    }

    #[test]
    fn test_word_lists_are_lowercase() {
        let lists: &[&[&str]] = &[
            POSITIVE_WORDS,
            NEGATIVE_WORDS,
            INTENSIFIERS,
            NEGATORS,
            HEDGES,
            ACHIEVEMENT_WORDS,
            RELATIONSHIP_WORDS,
            RANT_WORDS,
            REFLECTION_WORDS,
            DAILY_WORDS,
        ];
        for list in lists {
            for word in *list {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }
}
