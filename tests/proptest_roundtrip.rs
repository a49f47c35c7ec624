//! Property tests: text and numeral round trips, the modular invariant of
//! generated numerals, and square grid shapes.

use std::sync::OnceLock;

use proptest::prelude::*;

use cistercian::codec::Codec;
use cistercian::config::CodecConfig;
use cistercian::glyph::{Strictness, compose};
use cistercian::grid::{LayoutMode, grid_shape};
use cistercian::numeral::{CandidateTable, Modulus, Numeral, RandomSource, ScriptedSource};

fn codec() -> &'static Codec {
    static CODEC: OnceLock<Codec> = OnceLock::new();
    CODEC.get_or_init(|| {
        Codec::new(CodecConfig {
            strictness: Strictness::Strict,
            ..Default::default()
        })
        .unwrap()
    })
}

fn ascii_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..128, 1..40)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Any ASCII text survives encode and decode, whatever numerals are drawn.
    #[test]
    fn prop_text_round_trips(text in ascii_text(), seed in any::<u64>()) {
        let codec = codec();
        let grid = codec.encode(&text, &mut RandomSource::seeded(seed)).unwrap();
        let report = codec.decode(&grid).unwrap();
        prop_assert_eq!(report.text, text);
        prop_assert_eq!(report.unmatched_quadrants, 0);
    }

    // Every numeral in 0..=9999 is recovered exactly from its glyph.
    #[test]
    fn prop_numeral_glyph_round_trips(value in 0u32..=9999) {
        let codec = codec();
        let n = Numeral::new(value).unwrap();
        let grid = codec.encode_numerals_with(&[n], LayoutMode::SingleRow).unwrap();
        let cell = compose(codec.ops(), codec.library(), n).unwrap();
        prop_assert_eq!(&grid, &cell);

        let cfg = CodecConfig { trim_padding: false, ..codec.config().clone() };
        let untrimmed = Codec::with_library(cfg, codec.library().clone()).unwrap();
        prop_assert_eq!(untrimmed.decode(&grid).unwrap().numerals, vec![n]);
    }

    // Generated numerals are non-zero, in range and congruent to their code.
    #[test]
    fn prop_modular_invariant(m in 1u32..=9999, picks in prop::collection::vec(any::<usize>(), 1..20)) {
        let table = CandidateTable::new(Modulus::new(m).unwrap()).unwrap();
        let mut source = ScriptedSource::new(picks.clone());
        for (i, _) in picks.iter().enumerate() {
            let code = (i as u32 * 7919) % m;
            let candidates = table.candidates(code).unwrap();
            prop_assert!(!candidates.is_empty());
            let n = cistercian::numeral::NumeralSource::pick(&mut source, code, candidates);
            prop_assert!(n.value() >= 1);
            prop_assert_eq!(n.value() as u32 % m, code);
        }
    }

    // The square grid fits every glyph with less than one row of slack.
    #[test]
    fn prop_grid_shape(count in 1usize..500) {
        let (cols, rows) = grid_shape(count, LayoutMode::Square);
        prop_assert!(cols * rows >= count);
        prop_assert!(cols * (rows - 1) < count);
        prop_assert!((cols - 1) * (cols - 1) < count);
    }
}
