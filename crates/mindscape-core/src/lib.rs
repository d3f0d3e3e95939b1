//! # Mindscape-Core
//!
//! Core types shared by the Mindscape analysis, layout and engine crates:
//! analyzed posts, persona dimensions, the target persona catalog, the
//! emotion color palette and the small amount of 3D geometry the layout
//! engine needs.

pub mod error;
pub mod geometry;
pub mod palette;
pub mod persona;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use palette::*;
pub use persona::*;
pub use types::*;
