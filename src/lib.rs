// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # cistercian
//!
//! A visual codec that writes text as a grid of Cistercian numerals and reads
//! it back.
//!
//! Each character with code `c` becomes a randomly chosen four-digit numeral
//! `n` with `n mod M == c`. The numeral is drawn as one glyph whose four
//! quadrants hold its four digits, and the glyphs are laid out in a grid
//! image. Decoding cuts the grid into cells, matches every quadrant exactly
//! against a reference glyph library and reduces the numerals mod `M`.
//!
//! ## Architecture
//!
//! - **Raster core** (`raster`): bit-packed monochrome images, cell geometry
//! - **SIMD acceleration** (`simd`): runtime-dispatched AVX2/generic kernels
//! - **Numerals** (`numeral`): candidate tables, random choice, reduction
//! - **Glyphs** (`glyph`): reference library, composition, classification
//! - **Grid** (`grid`): square or single-row layout and its inverse
//! - **Codec** (`codec`): the encode/decode facade
//!
//! ## Library usage
//!
//! ```no_run
//! use cistercian::codec::Codec;
//! use cistercian::config::CodecConfig;
//! use cistercian::numeral::RandomSource;
//!
//! let codec = Codec::new(CodecConfig::default()).unwrap();
//! let grid = codec.encode("hi", &mut RandomSource::seeded(7)).unwrap();
//! let report = codec.decode(&grid).unwrap();
//! assert_eq!(report.text, "hi");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod numeral;
pub mod raster;
pub mod simd;
