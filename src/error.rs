//! Rich diagnostic error types for the cistercian codec.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the codec.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Numeral(#[from] NumeralError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Raster errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RasterError {
    #[error("raster size mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    #[diagnostic(
        code(cistercian::raster::size_mismatch),
        help(
            "Pixel-wise operations need rasters of identical size. \
             Check that every glyph was produced with the same cell geometry."
        )
    )]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("region {x},{y} {width}x{height} lies outside a {raster_width}x{raster_height} raster")]
    #[diagnostic(
        code(cistercian::raster::out_of_bounds),
        help("Crop rectangles must lie entirely inside the source raster.")
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        raster_width: u32,
        raster_height: u32,
    },

    #[error("image error for {path}: {message}")]
    #[diagnostic(
        code(cistercian::raster::image),
        help(
            "The file could not be decoded or encoded as an image. \
             Check that it exists and is a PNG written by this tool or an equivalent monochrome raster."
        )
    )]
    Image { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Glyph library errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LibraryError {
    #[error("glyph library needs {expected} entries, found {actual}")]
    #[diagnostic(
        code(cistercian::library::entry_count),
        help(
            "A library holds 9 glyphs for each of the 4 place values plus one blank glyph. \
             Regenerate the asset directory with `cistercian library generate`."
        )
    )]
    EntryCount { expected: usize, actual: usize },

    #[error("glyph entry {index} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    #[diagnostic(
        code(cistercian::library::glyph_size),
        help("Every library glyph must match the configured cell geometry exactly.")
    )]
    GlyphSize {
        index: usize,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("no glyph for digit {digit} at place {place}")]
    #[diagnostic(
        code(cistercian::library::missing_entry),
        help("Digits 1-9 must exist for every place value. The library is malformed.")
    )]
    MissingEntry { place: String, digit: u8 },

    #[error("blank glyph (entry {index}) contains {ink} ink pixels")]
    #[diagnostic(
        code(cistercian::library::blank_not_blank),
        help(
            "The last entry in sorted order must be an all-background glyph. \
             Check the asset file names sort as documented."
        )
    )]
    BlankHasInk { index: usize, ink: usize },

    #[error("digits {first} and {second} at place {place} have identical quadrants")]
    #[diagnostic(
        code(cistercian::library::ambiguous),
        help(
            "Quadrant classification needs every digit of a place to look different. \
             Digit 0 stands for the blank and for any ink the other places leave in the quadrant."
        )
    )]
    Ambiguous {
        place: String,
        first: u8,
        second: u8,
    },

    #[error("cannot read glyph directory {path}")]
    #[diagnostic(
        code(cistercian::library::read_dir),
        help("Ensure the directory exists and is readable.")
    )]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write glyph directory {path}")]
    #[diagnostic(
        code(cistercian::library::write_dir),
        help("Ensure the parent directory exists and you have write permissions.")
    )]
    WriteDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Numeral errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum NumeralError {
    #[error("numeral {value} does not fit in four digits")]
    #[diagnostic(
        code(cistercian::numeral::out_of_range),
        help("Numerals range over 0..=9999.")
    )]
    OutOfRange { value: u32 },

    #[error("character {character:?} (code {code}) is outside the modulus range 0..{modulus}")]
    #[diagnostic(
        code(cistercian::numeral::unsupported_char),
        help(
            "Only characters whose code is below the modulus can be encoded. \
             Raise `modulus` in the config (at most 9999) or remove the character."
        )
    )]
    UnsupportedChar {
        character: char,
        code: u32,
        modulus: u32,
    },

    #[error("no numeral in 1..=9999 is congruent to {code} modulo {modulus}")]
    #[diagnostic(
        code(cistercian::numeral::no_candidates),
        help("The modulus must be at most 9999 so every code has a numeral.")
    )]
    NoCandidates { code: u32, modulus: u32 },

    #[error("code {code} is not a valid character")]
    #[diagnostic(
        code(cistercian::numeral::invalid_char),
        help("The reduced code does not name a Unicode scalar value.")
    )]
    InvalidChar { code: u32 },
}

// ---------------------------------------------------------------------------
// Layout errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LayoutError {
    #[error("grid of {width}x{height} is not a multiple of the {cell_width}x{cell_height} cell")]
    #[diagnostic(
        code(cistercian::layout::not_aligned),
        help(
            "Grid images must be exact multiples of the cell size. \
             The image was cropped, scaled, or written with a different geometry."
        )
    )]
    NotAligned {
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },

    #[error("cannot lay out an empty message")]
    #[diagnostic(
        code(cistercian::layout::empty),
        help("Provide at least one character to encode.")
    )]
    EmptyMessage,

    #[error("grid of {cols}x{rows} cells of {cell_width}x{cell_height} exceeds the image size limit")]
    #[diagnostic(
        code(cistercian::layout::too_large),
        help("Image sides are limited to u32 pixels. Split the message or use the square layout.")
    )]
    TooLarge {
        cols: usize,
        rows: usize,
        cell_width: u32,
        cell_height: u32,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Raster(#[from] RasterError),
}

// ---------------------------------------------------------------------------
// Classification errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClassifyError {
    #[error(
        "cell {cell}: {place} quadrant matches no reference glyph \
         (nearest digit {nearest_digit}, {nearest_difference} differing pixels)"
    )]
    #[diagnostic(
        code(cistercian::classify::unmatched),
        help(
            "Strict decoding rejects quadrants that are not pixel-identical to a reference. \
             The image may be anti-aliased, compressed, or made with another glyph library. \
             Decode leniently to read unmatched quadrants as digit 0."
        )
    )]
    Unmatched {
        cell: usize,
        place: String,
        nearest_digit: u8,
        nearest_difference: u32,
    },

    #[error("cell {cell} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    #[diagnostic(
        code(cistercian::classify::cell_size),
        help("Cells handed to the classifier must match the cell geometry.")
    )]
    CellSize {
        cell: usize,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Raster(#[from] RasterError),
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid modulus {modulus}")]
    #[diagnostic(
        code(cistercian::config::modulus),
        help("The modulus must lie in 1..=9999 so every character code has a four-digit numeral.")
    )]
    InvalidModulus { modulus: u32 },

    #[error("invalid cell geometry: {message}")]
    #[diagnostic(
        code(cistercian::config::geometry),
        help("Cells must be at least 8x8 with even sides, and the midline overlap below half the width.")
    )]
    InvalidGeometry { message: String },

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(cistercian::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(cistercian::config::parse),
        help("Check the TOML syntax. `cistercian config show` prints a valid example.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(cistercian::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning codec results.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
