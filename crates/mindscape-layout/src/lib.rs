//! # Mindscape-Layout
//!
//! Places analyzed posts as memory spheres in three alternative 3D spaces:
//! a temporal wave, an archetype figure and a ring of categorical towers.
//!
//! ## Color Flow
//!
//! ```text
//! PostCategory + sentiment ──► EmotionColor ──► EmotionCluster ──► tower slot
//! ```
//!
//! Every step is an enum-to-enum mapping; no color strings are compared.

pub mod layout;
pub mod palette;
pub mod regions;

pub use layout::*;
pub use palette::*;
pub use regions::*;
