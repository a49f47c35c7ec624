//! The reference glyph library.
//!
//! Entries are addressed by `rank * 9 + digit - 1` (units rank 0 through
//! thousands rank 3), with the shared blank glyph at index 36. On disk the
//! library is a directory of images whose file names sort into exactly that
//! order: `0001.png`..`0009.png`, `0010.png`..`0090.png`,
//! `0100.png`..`0900.png`, `1000.png`..`9000.png`, then `blank.png`.

use std::path::Path;

use crate::error::LibraryError;
use crate::numeral::PlaceValue;
use crate::raster::Raster;
use crate::raster::geometry::CellGeometry;

use super::LibraryResult;
use super::strokes;

/// Non-blank glyphs per place value.
pub const DIGITS_PER_PLACE: usize = 9;

/// Total entry count: four places of nine digits, plus blank.
pub const LIBRARY_LEN: usize = 4 * DIGITS_PER_PLACE + 1;

/// Index of the blank glyph.
pub const BLANK_INDEX: usize = LIBRARY_LEN - 1;

/// Library index of a non-zero digit, or `None` for digit 0 (the blank).
pub fn entry_index(place: PlaceValue, digit: u8) -> Option<usize> {
    match digit {
        1..=9 => Some(place.rank() * DIGITS_PER_PLACE + digit as usize - 1),
        _ => None,
    }
}

/// Canonical asset file name for an entry index.
pub fn file_name(index: usize) -> String {
    if index >= BLANK_INDEX {
        return "blank.png".to_string();
    }
    let rank = index / DIGITS_PER_PLACE;
    let digit = (index % DIGITS_PER_PLACE + 1) as u32;
    format!("{:04}.png", digit * 10u32.pow(rank as u32))
}

/// Immutable, validated set of reference glyphs.
#[derive(Debug, Clone)]
pub struct GlyphLibrary {
    geometry: CellGeometry,
    entries: Vec<Raster>,
}

impl GlyphLibrary {
    /// Build from entries already in index order.
    ///
    /// Checks the geometry, the entry count, glyph sizes, that the blank entry
    /// holds no ink, and that every digit of a place has a quadrant of its own.
    pub fn from_entries(entries: Vec<Raster>, geometry: CellGeometry) -> LibraryResult<Self> {
        geometry.validate()?;
        if entries.len() != LIBRARY_LEN {
            return Err(LibraryError::EntryCount {
                expected: LIBRARY_LEN,
                actual: entries.len(),
            });
        }
        for (index, glyph) in entries.iter().enumerate() {
            if glyph.width() != geometry.width || glyph.height() != geometry.height {
                return Err(LibraryError::GlyphSize {
                    index,
                    expected_width: geometry.width,
                    expected_height: geometry.height,
                    actual_width: glyph.width(),
                    actual_height: glyph.height(),
                });
            }
        }
        let ink = entries[BLANK_INDEX].ink_count();
        if ink != 0 {
            return Err(LibraryError::BlankHasInk {
                index: BLANK_INDEX,
                ink,
            });
        }

        let library = Self { geometry, entries };
        library.check_distinct()?;
        Ok(library)
    }

    /// Digits 1-9 of a place must differ from each other and from every
    /// pattern that place reads as 0. `first: 0` names a zero pattern.
    fn check_distinct(&self) -> LibraryResult<()> {
        for place in PlaceValue::ALL {
            let rect = self.geometry.quadrant_rect(place.quadrant());
            let zeros = self.zero_patterns(place)?;
            let mut seen: Vec<Raster> = Vec::with_capacity(DIGITS_PER_PLACE);
            for digit in 1..=9u8 {
                let quadrant = self.glyph(place, digit)?.crop(rect)?;
                let clash = if zeros.contains(&quadrant) {
                    Some(0)
                } else {
                    seen.iter().position(|q| *q == quadrant).map(|i| i as u8 + 1)
                };
                if let Some(first) = clash {
                    return Err(LibraryError::Ambiguous {
                        place: place.to_string(),
                        first,
                        second: digit,
                    });
                }
                seen.push(quadrant);
            }
        }
        Ok(())
    }

    /// Quadrant contents a place reads as digit 0: the blank, plus whatever
    /// the other places' glyphs leave inside its quadrant (the centre stem).
    pub fn zero_patterns(&self, place: PlaceValue) -> LibraryResult<Vec<Raster>> {
        let rect = self.geometry.quadrant_rect(place.quadrant());
        let mut zeros = vec![self.blank().crop(rect)?];
        for other in PlaceValue::ALL.into_iter().filter(|&p| p != place) {
            for digit in 1..=9u8 {
                let footprint = self.glyph(other, digit)?.crop(rect)?;
                if !zeros.contains(&footprint) {
                    zeros.push(footprint);
                }
            }
        }
        Ok(zeros)
    }

    /// The procedurally drawn reference set for a geometry.
    pub fn procedural(geometry: CellGeometry) -> LibraryResult<Self> {
        geometry.validate()?;
        let library = Self::from_entries(strokes::build_entries(&geometry), geometry)?;
        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            "built procedural glyph library"
        );
        Ok(library)
    }

    /// Load a library from a directory of images, sorted by file name.
    pub fn load_dir(dir: &Path, geometry: CellGeometry) -> LibraryResult<Self> {
        geometry.validate()?;
        let read_err = |source| LibraryError::ReadDir {
            path: dir.display().to_string(),
            source,
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if entry.file_type().map_err(read_err)?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if paths.len() != LIBRARY_LEN {
            return Err(LibraryError::EntryCount {
                expected: LIBRARY_LEN,
                actual: paths.len(),
            });
        }

        let entries = paths
            .iter()
            .map(|p| Raster::open(p))
            .collect::<Result<Vec<_>, _>>()?;

        let library = Self::from_entries(entries, geometry)?;
        tracing::info!(
            dir = %dir.display(),
            entries = LIBRARY_LEN,
            "loaded glyph library"
        );
        Ok(library)
    }

    /// Write every entry under its canonical file name.
    pub fn save_dir(&self, dir: &Path) -> LibraryResult<()> {
        std::fs::create_dir_all(dir).map_err(|source| LibraryError::WriteDir {
            path: dir.display().to_string(),
            source,
        })?;
        for (index, glyph) in self.entries.iter().enumerate() {
            glyph.save(&dir.join(file_name(index)))?;
        }
        tracing::info!(dir = %dir.display(), entries = LIBRARY_LEN, "saved glyph library");
        Ok(())
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[Raster] {
        &self.entries
    }

    /// The shared blank glyph.
    pub fn blank(&self) -> &Raster {
        &self.entries[BLANK_INDEX]
    }

    /// Glyph for a digit at a place. Digit 0 is always the blank glyph.
    pub fn glyph(&self, place: PlaceValue, digit: u8) -> LibraryResult<&Raster> {
        if digit == 0 {
            return Ok(self.blank());
        }
        entry_index(place, digit)
            .and_then(|i| self.entries.get(i))
            .ok_or_else(|| LibraryError::MissingEntry {
                place: place.to_string(),
                digit,
            })
    }
}
