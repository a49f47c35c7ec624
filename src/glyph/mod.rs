//! Cistercian glyphs: the reference library, composition and classification.
//!
//! A numeral is drawn as one glyph whose four quadrants each show one digit.
//! The reference library holds, for every place value, nine glyphs inked only
//! in that place's quadrant (plus the shared centre stem), and one blank glyph
//! standing in for digit 0.
//!
//! ## Components
//!
//! - [`library`]: 37-entry indexed glyph set, loaded from disk or built
//! - [`strokes`]: procedural drawing of the reference glyph set
//! - [`compose`]: numeral → glyph by AND-overlaying four library glyphs
//! - [`classify`]: glyph → numeral by exact quadrant matching

pub mod classify;
pub mod compose;
pub mod library;
pub mod strokes;

pub use classify::{Classification, QuadrantClassifier, Strictness};
pub use compose::{compose, compose_all};
pub use library::GlyphLibrary;

use crate::error::LibraryError;

/// Result type for glyph library operations.
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
