//! Numeral-to-glyph composition.
//!
//! Each library glyph is background everywhere except its own quadrant (and
//! the shared stem), so AND-ing the four digit glyphs of a numeral shows all
//! four digits at once without one bleeding into another's quadrant.

use crate::numeral::{Numeral, PlaceValue};
use crate::raster::Raster;
use crate::raster::ops::RasterOps;

use super::LibraryResult;
use super::library::GlyphLibrary;

/// Render one numeral as a single glyph.
pub fn compose(ops: &RasterOps, library: &GlyphLibrary, numeral: Numeral) -> LibraryResult<Raster> {
    let mut layers = vec![library.blank()];
    for place in PlaceValue::ALL {
        layers.push(library.glyph(place, numeral.digit(place))?);
    }
    let glyph = ops.and_all(&layers)?;
    Ok(glyph.unwrap_or_else(|| library.blank().clone()))
}

/// Render a sequence of numerals.
pub fn compose_all(
    ops: &RasterOps,
    library: &GlyphLibrary,
    numerals: &[Numeral],
) -> LibraryResult<Vec<Raster>> {
    numerals
        .iter()
        .map(|&n| compose(ops, library, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::geometry::{CellGeometry, Quadrant};

    fn fixture() -> (RasterOps, GlyphLibrary) {
        (
            RasterOps::default(),
            GlyphLibrary::procedural(CellGeometry::STANDARD).unwrap(),
        )
    }

    #[test]
    fn zero_composes_to_blank() {
        let (ops, lib) = fixture();
        let glyph = compose(&ops, &lib, Numeral::ZERO).unwrap();
        assert!(glyph.is_blank());
    }

    #[test]
    fn single_digit_equals_library_glyph() {
        let (ops, lib) = fixture();
        let glyph = compose(&ops, &lib, Numeral::new(7).unwrap()).unwrap();
        assert_eq!(&glyph, lib.glyph(PlaceValue::Units, 7).unwrap());

        let glyph = compose(&ops, &lib, Numeral::new(3000).unwrap()).unwrap();
        assert_eq!(&glyph, lib.glyph(PlaceValue::Thousands, 3).unwrap());
    }

    #[test]
    fn changing_one_place_only_touches_its_quadrant() {
        let (ops, lib) = fixture();
        let g = lib.geometry();
        let base = compose(&ops, &lib, Numeral::new(1234).unwrap()).unwrap();

        for place in PlaceValue::ALL {
            let mut digits: Vec<(PlaceValue, u8)> =
                PlaceValue::ALL.iter().map(|&p| (p, base_digit(1234, p))).collect();
            for entry in digits.iter_mut() {
                if entry.0 == place {
                    entry.1 = 9;
                }
            }
            let changed = compose(&ops, &lib, Numeral::from_place_digits(digits)).unwrap();
            assert_ne!(changed, base);

            for quadrant in Quadrant::ALL {
                let rect = g.quadrant_rect(quadrant);
                let same = base.crop(rect).unwrap() == changed.crop(rect).unwrap();
                assert_eq!(same, quadrant != place.quadrant(), "{place} / {quadrant}");
            }
        }
    }

    fn base_digit(value: u32, place: PlaceValue) -> u8 {
        Numeral::new(value).unwrap().digit(place)
    }

    #[test]
    fn compose_all_keeps_order() {
        let (ops, lib) = fixture();
        let numerals = [104u32, 5].map(|v| Numeral::new(v).unwrap());
        let glyphs = compose_all(&ops, &lib, &numerals).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(&glyphs[1], lib.glyph(PlaceValue::Units, 5).unwrap());
    }
}
