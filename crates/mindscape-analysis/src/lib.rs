//! # Mindscape-Analysis
//!
//! Turns raw journal lines into emotional metrics and reduces collections of
//! analyzed posts to five persona dimensions.
//!
//! ## Pipeline
//!
//! 1. **Analyzer** - fixed lexical heuristic: text → sentiment, intensity, category
//! 2. **Metrics** - one commutative fold over the post collection
//! 3. **Dimensions** - weighted mapping from metrics to persona dimensions
//! 4. **Compare** - signed gap to a target persona, and what-if projections
//!
//! ## Dimension Mapping
//!
//! | Signal | High Value → Dimension |
//! |--------|------------------------|
//! | Outward vs inward categories | Extraversion |
//! | Sentiment / intensity spread | Emotionality |
//! | Relationship sentiment, positive share | Warmth |
//! | Achievement + reflection share, composure | Conscientiousness |
//! | Few hedges, upbeat achievements | Confidence |
//!
//! Nothing here is a statistical model: every threshold and word list is a
//! documented constant in [`lexicon`] or a tunable weight.

pub mod analyzer;
pub mod compare;
pub mod dimensions;
pub mod insights;
pub mod lexicon;
pub mod metrics;

pub use analyzer::*;
pub use compare::*;
pub use dimensions::*;
pub use insights::*;
pub use metrics::*;
