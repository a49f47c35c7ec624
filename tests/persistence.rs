//! Persistence tests: glyph assets, grid images and config files survive a
//! trip through the filesystem.

use cistercian::codec::Codec;
use cistercian::config::CodecConfig;
use cistercian::error::{CodecError, LibraryError};
use cistercian::glyph::{GlyphLibrary, QuadrantClassifier, Strictness};
use cistercian::glyph::library::{LIBRARY_LEN, file_name};
use cistercian::numeral::{self, RandomSource};
use cistercian::raster::Raster;
use cistercian::raster::geometry::CellGeometry;

#[test]
fn library_survives_save_and_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let built = GlyphLibrary::procedural(CellGeometry::STANDARD).unwrap();
    built.save_dir(dir.path()).unwrap();

    for index in 0..LIBRARY_LEN {
        assert!(dir.path().join(file_name(index)).is_file());
    }

    let loaded = GlyphLibrary::load_dir(dir.path(), CellGeometry::STANDARD).unwrap();
    assert_eq!(loaded.entries(), built.entries());
}

#[test]
fn grid_png_round_trip_with_loaded_library() {
    let tmp = tempfile::TempDir::new().unwrap();
    let assets = tmp.path().join("glyphs");
    GlyphLibrary::procedural(CellGeometry::STANDARD)
        .unwrap()
        .save_dir(&assets)
        .unwrap();

    let codec = Codec::new(CodecConfig {
        library_dir: Some(assets),
        ..Default::default()
    })
    .unwrap();

    let grid = codec
        .encode_words(&["ora", "et", "labora"], &mut RandomSource::seeded(1098))
        .unwrap();
    let path = tmp.path().join("message.png");
    grid.save(&path).unwrap();

    assert_eq!(Raster::open(&path).unwrap(), grid);
    let report = codec.decode_file(&path).unwrap();
    assert_eq!(report.text, "ora et labora");
}

#[test]
fn cell_images_reload_and_classify() {
    let tmp = tempfile::TempDir::new().unwrap();
    let codec = Codec::new(CodecConfig::default()).unwrap();
    let numerals = codec
        .word_numerals(&["testdata"], &mut RandomSource::seeded(127))
        .unwrap();
    let paths = codec.write_cells(&numerals, tmp.path()).unwrap();
    let classifier = QuadrantClassifier::new(codec.library(), Strictness::Strict).unwrap();

    for (index, (path, &n)) in paths.iter().zip(&numerals).enumerate() {
        assert_eq!(path.file_name().unwrap().to_string_lossy(), format!("{n}.png"));
        let cell = Raster::open(path).unwrap();
        let read = classifier.classify(codec.ops(), index, &cell).unwrap();
        assert_eq!(read.numeral, n);
        assert!(read.unmatched.is_empty());
    }
    assert_eq!(numeral::reduce_all(&numerals, codec.modulus()).unwrap(), "testdata");
}

#[test]
fn missing_asset_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    GlyphLibrary::procedural(CellGeometry::STANDARD)
        .unwrap()
        .save_dir(dir.path())
        .unwrap();
    std::fs::remove_file(dir.path().join("0500.png")).unwrap();

    let err = GlyphLibrary::load_dir(dir.path(), CellGeometry::STANDARD).unwrap_err();
    assert!(matches!(
        err,
        LibraryError::EntryCount {
            expected: 37,
            actual: 36
        }
    ));
}

#[test]
fn missing_directory_is_reported() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = Codec::new(CodecConfig {
        library_dir: Some(tmp.path().join("nowhere")),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Library(LibraryError::ReadDir { .. })
    ));
}

#[test]
fn geometry_mismatch_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    GlyphLibrary::procedural(CellGeometry::STANDARD)
        .unwrap()
        .save_dir(dir.path())
        .unwrap();
    let small = CellGeometry {
        width: 60,
        height: 80,
        midline_overlap: 1,
    };
    let err = GlyphLibrary::load_dir(dir.path(), small).unwrap_err();
    assert!(matches!(err, LibraryError::GlyphSize { index: 0, .. }));
}

#[test]
fn saved_config_drives_the_codec() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("codec.toml");
    CodecConfig {
        modulus: 200,
        trim_padding: false,
        ..Default::default()
    }
    .save(&path)
    .unwrap();

    let codec = Codec::new(CodecConfig::load(&path).unwrap()).unwrap();
    assert_eq!(codec.modulus().get(), 200);
    // 'Ç' (199) and 'Æ' (198) fit below 200. Three cells leave one padding cell.
    let grid = codec.encode("ÇaÆ", &mut RandomSource::seeded(5)).unwrap();
    assert_eq!(codec.decode(&grid).unwrap().text, "ÇaÆ\0");
}
