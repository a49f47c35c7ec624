//! The codec facade: text to grid and back.
//!
//! A [`Codec`] owns everything that is fixed for its lifetime: the raster
//! kernel, the glyph library, the candidate table and the classifier's
//! reference quadrants. Encoding and decoding only borrow it, so one codec
//! can serve any number of messages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::CodecConfig;
use crate::error::{CodecResult, LibraryError};
use crate::glyph::{self, GlyphLibrary, QuadrantClassifier, Strictness};
use crate::grid::{self, LayoutMode};
use crate::numeral::{self, CandidateTable, Modulus, Numeral, NumeralSource};
use crate::raster::Raster;
use crate::raster::geometry::CellGeometry;
use crate::raster::ops::RasterOps;
use crate::simd;

/// What a decode recovered, with enough detail to judge its quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    /// The recovered text.
    pub text: String,
    /// One numeral per decoded cell.
    pub numerals: Vec<Numeral>,
    /// Cells in the grid, padding included.
    pub cells: usize,
    /// Trailing blank cells dropped before classification.
    pub padding_trimmed: usize,
    /// Quadrants read as 0 because they matched nothing (lenient mode).
    pub unmatched_quadrants: usize,
}

/// Text ↔ grid codec.
pub struct Codec {
    config: CodecConfig,
    modulus: Modulus,
    ops: Arc<RasterOps>,
    library: Arc<GlyphLibrary>,
    table: CandidateTable,
    classifier: QuadrantClassifier,
}

impl Codec {
    /// Build a codec, loading the glyph library from `config.library_dir`
    /// or drawing it procedurally.
    pub fn new(config: CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        let library = match config.library_dir {
            Some(ref dir) => GlyphLibrary::load_dir(dir, config.geometry)?,
            None => GlyphLibrary::procedural(config.geometry)?,
        };
        Self::with_library(config, Arc::new(library))
    }

    /// Build a codec around an existing library. The library's geometry
    /// overrides the configured one.
    pub fn with_library(mut config: CodecConfig, library: Arc<GlyphLibrary>) -> CodecResult<Self> {
        config.geometry = library.geometry();
        config.validate()?;
        let modulus = config.checked_modulus()?;

        let source = match config.library_dir {
            Some(ref dir) => dir.display().to_string(),
            None => "procedural".to_string(),
        };
        let kernel = simd::best_kernel();
        tracing::info!(
            isa = %kernel.isa_level(),
            modulus = modulus.get(),
            width = config.geometry.width,
            height = config.geometry.height,
            library = %source,
            "initializing cistercian codec"
        );

        let ops = Arc::new(RasterOps::new(kernel));
        let table = CandidateTable::new(modulus)?;
        let classifier = QuadrantClassifier::new(&library, config.strictness)?;

        Ok(Self {
            config,
            modulus,
            ops,
            library,
            table,
            classifier,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    pub fn geometry(&self) -> CellGeometry {
        self.library.geometry()
    }

    pub fn library(&self) -> &Arc<GlyphLibrary> {
        &self.library
    }

    pub fn ops(&self) -> &Arc<RasterOps> {
        &self.ops
    }

    pub fn strictness(&self) -> Strictness {
        self.classifier.strictness()
    }

    /// Choose one numeral per character of `text`.
    pub fn numerals(&self, text: &str, source: &mut dyn NumeralSource) -> CodecResult<Vec<Numeral>> {
        Ok(self.table.generate(text, source)?)
    }

    /// Choose numerals for words joined by single spaces.
    pub fn word_numerals<S: AsRef<str>>(
        &self,
        words: &[S],
        source: &mut dyn NumeralSource,
    ) -> CodecResult<Vec<Numeral>> {
        Ok(self.table.generate_words(words, source)?)
    }

    /// Render numerals into a grid using the configured layout.
    pub fn encode_numerals(&self, numerals: &[Numeral]) -> CodecResult<Raster> {
        self.encode_numerals_with(numerals, self.config.layout)
    }

    /// Render numerals into a grid with an explicit layout.
    pub fn encode_numerals_with(&self, numerals: &[Numeral], mode: LayoutMode) -> CodecResult<Raster> {
        let glyphs = glyph::compose_all(&self.ops, &self.library, numerals)?;
        let grid = grid::layout(&glyphs, self.geometry(), mode)?;
        let (cols, rows) = grid::grid_shape(numerals.len(), mode);
        tracing::info!(chars = numerals.len(), cols, rows, "encoded message");
        Ok(grid)
    }

    /// Encode text into a grid.
    pub fn encode(&self, text: &str, source: &mut dyn NumeralSource) -> CodecResult<Raster> {
        let numerals = self.numerals(text, source)?;
        self.encode_numerals(&numerals)
    }

    /// Encode words joined by single spaces.
    pub fn encode_words<S: AsRef<str>>(
        &self,
        words: &[S],
        source: &mut dyn NumeralSource,
    ) -> CodecResult<Raster> {
        let numerals = self.word_numerals(words, source)?;
        self.encode_numerals(&numerals)
    }

    /// Write each numeral's glyph as a standalone cell image named by its
    /// four digits (`0104.png`). Repeated numerals share one file.
    pub fn write_cells(&self, numerals: &[Numeral], dir: &Path) -> CodecResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir).map_err(|source| LibraryError::WriteDir {
            path: dir.display().to_string(),
            source,
        })?;
        let glyphs = glyph::compose_all(&self.ops, &self.library, numerals)?;
        let mut paths = Vec::with_capacity(numerals.len());
        for (numeral, cell) in numerals.iter().zip(&glyphs) {
            let path = dir.join(format!("{numeral}.png"));
            cell.save(&path)?;
            paths.push(path);
        }
        tracing::info!(dir = %dir.display(), cells = paths.len(), "wrote cell images");
        Ok(paths)
    }

    /// Decode a grid back into text.
    pub fn decode(&self, grid: &Raster) -> CodecResult<DecodeReport> {
        let mut cells = grid::unlayout(grid, self.geometry())?;
        let total = cells.len();

        // The generator never emits numeral 0, so a blank cell can only be
        // padding after the last glyph.
        let mut padding_trimmed: usize = 0;
        if self.config.trim_padding {
            while cells.last().is_some_and(Raster::is_blank) {
                cells.pop();
                padding_trimmed += 1;
            }
        }

        let ops = self.ops.as_ref();
        let classifications = cells
            .par_iter()
            .enumerate()
            .map(|(index, cell)| self.classifier.classify(ops, index, cell))
            .collect::<Result<Vec<_>, _>>()?;

        let unmatched_quadrants: usize = classifications.iter().map(|c| c.unmatched.len()).sum();
        let numerals: Vec<Numeral> = classifications.into_iter().map(|c| c.numeral).collect();
        let text = numeral::reduce_all(&numerals, self.modulus)?;

        if unmatched_quadrants > 0 {
            tracing::warn!(
                unmatched = unmatched_quadrants,
                "quadrants matched no reference glyph and were read as 0"
            );
        }
        tracing::info!(
            cells = total,
            padding_trimmed,
            unmatched = unmatched_quadrants,
            "decoded grid"
        );

        Ok(DecodeReport {
            text,
            numerals,
            cells: total,
            padding_trimmed,
            unmatched_quadrants,
        })
    }

    /// Load a grid image from disk and decode it.
    pub fn decode_file(&self, path: &Path) -> CodecResult<DecodeReport> {
        let grid = Raster::open(path)?;
        tracing::debug!(path = %path.display(), width = grid.width(), height = grid.height(), "read grid");
        self.decode(&grid)
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("modulus", &self.modulus)
            .field("geometry", &self.geometry())
            .field("isa", &self.ops.isa_level())
            .field("strictness", &self.strictness())
            .finish()
    }
}
