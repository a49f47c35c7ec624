//! Glyph-to-numeral classification by exact quadrant matching.
//!
//! A cell is cut into its four quadrants. Each quadrant is compared pixel for
//! pixel against the same quadrant of the nine reference glyphs of its place
//! value; the first exact match (zero differing pixels) gives the digit.
//!
//! A quadrant that matches no reference reads as digit 0. In lenient mode that
//! is all that happens, so corrupted or anti-aliased input silently loses
//! digits. Strict mode only accepts 0 for quadrants that look like a real zero
//! (see [`QuadrantClassifier::zero_patterns`]) and reports anything else.

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::numeral::{Numeral, PlaceValue};
use crate::raster::Raster;
use crate::raster::geometry::CellGeometry;
use crate::raster::ops::RasterOps;

use super::LibraryResult;
use super::library::GlyphLibrary;

/// Result type for classification.
pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;

/// How to treat a quadrant that matches no reference glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Read it as digit 0.
    #[default]
    Lenient,
    /// Fail unless it is a recognised zero pattern.
    Strict,
}

/// Outcome of classifying one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub numeral: Numeral,
    /// Places that matched nothing and were read as 0 (lenient mode only).
    pub unmatched: Vec<PlaceValue>,
}

/// Reference quadrants for one place value.
#[derive(Debug, Clone)]
struct PlaceReferences {
    /// Quadrant crops of digits 1-9, in digit order.
    digits: Vec<Raster>,
    /// Quadrant contents that legitimately mean digit 0.
    zeros: Vec<Raster>,
}

/// Precomputed quadrant crops of a glyph library.
#[derive(Debug, Clone)]
pub struct QuadrantClassifier {
    geometry: CellGeometry,
    strictness: Strictness,
    /// Indexed by place rank.
    places: Vec<PlaceReferences>,
}

impl QuadrantClassifier {
    pub fn new(library: &GlyphLibrary, strictness: Strictness) -> LibraryResult<Self> {
        let geometry = library.geometry();
        let mut places = Vec::with_capacity(PlaceValue::ALL.len());

        for place in PlaceValue::ALL {
            let rect = geometry.quadrant_rect(place.quadrant());
            let digits = (1..=9u8)
                .map(|d| -> LibraryResult<Raster> { Ok(library.glyph(place, d)?.crop(rect)?) })
                .collect::<LibraryResult<Vec<_>>>()?;
            let zeros = library.zero_patterns(place)?;
            places.push(PlaceReferences { digits, zeros });
        }

        Ok(Self {
            geometry,
            strictness,
            places,
        })
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Quadrant contents accepted as digit 0 for a place in strict mode.
    pub fn zero_patterns(&self, place: PlaceValue) -> &[Raster] {
        &self.places[place.rank()].zeros
    }

    /// Classify one cell. `cell_index` only labels errors.
    pub fn classify(
        &self,
        ops: &RasterOps,
        cell_index: usize,
        cell: &Raster,
    ) -> ClassifyResult<Classification> {
        if cell.width() != self.geometry.width || cell.height() != self.geometry.height {
            return Err(ClassifyError::CellSize {
                cell: cell_index,
                expected_width: self.geometry.width,
                expected_height: self.geometry.height,
                actual_width: cell.width(),
                actual_height: cell.height(),
            });
        }

        let mut digits = Vec::with_capacity(PlaceValue::ALL.len());
        let mut unmatched = Vec::new();

        for place in PlaceValue::ALL {
            let references = &self.places[place.rank()];
            let quadrant = cell.crop(self.geometry.quadrant_rect(place.quadrant()))?;

            let mut matched = None;
            for (i, reference) in references.digits.iter().enumerate() {
                if ops.equal(&quadrant, reference)? {
                    matched = Some(i as u8 + 1);
                    break;
                }
            }

            match matched {
                Some(digit) => digits.push((place, digit)),
                None => {
                    if references.zeros.contains(&quadrant) {
                        continue;
                    }
                    match self.strictness {
                        Strictness::Lenient => unmatched.push(place),
                        Strictness::Strict => {
                            let (nearest_digit, nearest_difference) =
                                self.nearest(ops, references, &quadrant)?;
                            return Err(ClassifyError::Unmatched {
                                cell: cell_index,
                                place: place.to_string(),
                                nearest_digit,
                                nearest_difference,
                            });
                        }
                    }
                }
            }
        }

        Ok(Classification {
            numeral: Numeral::from_place_digits(digits),
            unmatched,
        })
    }

    /// Closest reference digit (0 meaning a zero pattern) and its distance.
    fn nearest(
        &self,
        ops: &RasterOps,
        references: &PlaceReferences,
        quadrant: &Raster,
    ) -> ClassifyResult<(u8, u32)> {
        let mut best = (0u8, u32::MAX);
        for zero in &references.zeros {
            let d = ops.difference(quadrant, zero)?;
            if d < best.1 {
                best = (0, d);
            }
        }
        for (i, reference) in references.digits.iter().enumerate() {
            let d = ops.difference(quadrant, reference)?;
            if d < best.1 {
                best = (i as u8 + 1, d);
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::compose::compose;
    use crate::raster::geometry::Quadrant;

    fn fixture(strictness: Strictness) -> (RasterOps, GlyphLibrary, QuadrantClassifier) {
        let lib = GlyphLibrary::procedural(CellGeometry::STANDARD).unwrap();
        let classifier = QuadrantClassifier::new(&lib, strictness).unwrap();
        (RasterOps::default(), lib, classifier)
    }

    #[test]
    fn recovers_composed_numerals() {
        let (ops, lib, classifier) = fixture(Strictness::Strict);
        for value in [1u32, 9, 10, 104, 360, 1000, 1234, 5050, 9999, 7001] {
            let n = Numeral::new(value).unwrap();
            let cell = compose(&ops, &lib, n).unwrap();
            let result = classifier.classify(&ops, 0, &cell).unwrap();
            assert_eq!(result.numeral, n, "numeral {n}");
            assert!(result.unmatched.is_empty());
        }
    }

    #[test]
    fn blank_cell_is_zero() {
        let (ops, lib, classifier) = fixture(Strictness::Strict);
        let result = classifier.classify(&ops, 0, lib.blank()).unwrap();
        assert_eq!(result.numeral, Numeral::ZERO);
    }

    #[test]
    fn stem_only_quadrants_are_zero_patterns() {
        let (_, lib, classifier) = fixture(Strictness::Strict);
        let g = lib.geometry();
        let stem = crate::glyph::strokes::stem(&g);
        for place in PlaceValue::ALL {
            let stem_quadrant = stem.crop(g.quadrant_rect(place.quadrant())).unwrap();
            assert!(classifier.zero_patterns(place).contains(&stem_quadrant));
            // Blank plus the shared stem.
            assert_eq!(classifier.zero_patterns(place).len(), 2);
        }
    }

    fn smudged(lib: &GlyphLibrary, ops: &RasterOps) -> Raster {
        let mut cell = compose(ops, lib, Numeral::new(1234).unwrap()).unwrap();
        // One stray ink pixel in the top-right (units) quadrant.
        let r = lib.geometry().quadrant_rect(Quadrant::TopRight);
        cell.set(r.x + r.width - 2, r.y + r.height - 2, false);
        cell
    }

    #[test]
    fn lenient_reads_unmatched_quadrant_as_zero() {
        let (ops, lib, classifier) = fixture(Strictness::Lenient);
        let result = classifier.classify(&ops, 3, &smudged(&lib, &ops)).unwrap();
        assert_eq!(result.numeral.value(), 1230);
        assert_eq!(result.unmatched, vec![PlaceValue::Units]);
    }

    #[test]
    fn strict_reports_nearest_digit() {
        let (ops, lib, classifier) = fixture(Strictness::Strict);
        let err = classifier.classify(&ops, 3, &smudged(&lib, &ops)).unwrap_err();
        match err {
            ClassifyError::Unmatched {
                cell,
                place,
                nearest_digit,
                nearest_difference,
            } => {
                assert_eq!(cell, 3);
                assert_eq!(place, "units");
                assert_eq!(nearest_digit, 4);
                assert_eq!(nearest_difference, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_cell_size_rejected() {
        let (ops, _, classifier) = fixture(Strictness::Lenient);
        let err = classifier
            .classify(&ops, 0, &Raster::blank(10, 10))
            .unwrap_err();
        assert!(matches!(err, ClassifyError::CellSize { .. }));
    }
}
