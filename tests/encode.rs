use std::fs;
use std::path::Path;

use stock_barcodes::encode::{artifact_path, Code128Encoder, EncodeError, Encoder, RenderConfig};
use tempfile::tempdir;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[test]
fn encode_writes_a_png_artifact() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("A100");

    let encoder = Code128Encoder::default();
    encoder.encode("A100", &stem).expect("A100 is a valid identifier");

    let artifact = artifact_path(&stem);
    let bytes = fs::read(&artifact).expect("artifact exists");
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

#[test]
fn encoding_is_deterministic() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("first/ITEM-42");
    let second = dir.path().join("second/ITEM-42");

    let encoder = Code128Encoder::default();
    encoder.encode("ITEM-42", &first).expect("encode");
    encoder.encode("ITEM-42", &second).expect("encode");

    let a = fs::read(artifact_path(&first)).expect("first artifact");
    let b = fs::read(artifact_path(&second)).expect("second artifact");
    assert_eq!(a, b, "same identifier and config must be byte-identical");
}

#[test]
fn invalid_identifier_creates_no_file() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("bad");

    let encoder = Code128Encoder::default();
    let err = encoder
        .encode("caf\u{e9}", &stem)
        .expect_err("non-ASCII identifiers are unsupported");
    assert!(matches!(err, EncodeError::InvalidIdentifier(_)));
    assert!(!artifact_path(&stem).exists(), "no partial file may appear");
}

#[test]
fn empty_identifier_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("empty");

    let err = Code128Encoder::default()
        .encode("", &stem)
        .expect_err("empty identifiers are invalid");
    assert!(matches!(err, EncodeError::InvalidIdentifier(_)));
    assert!(!artifact_path(&stem).exists());
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("a/b/c/NESTED-1");

    Code128Encoder::default()
        .encode("NESTED-1", &stem)
        .expect("intermediate directories are created");
    assert!(artifact_path(&stem).is_file());
}

#[test]
fn dotted_identifiers_keep_their_stem() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("A.1");

    Code128Encoder::default().encode("A.1", &stem).expect("encode");
    assert!(
        dir.path().join("A.1.png").is_file(),
        ".png is appended, not substituted for the dotted tail"
    );
}

#[test]
fn overwrites_an_existing_artifact() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("A100");
    let artifact = artifact_path(&stem);
    fs::write(&artifact, b"stale non-png content").expect("seed stale file");

    Code128Encoder::default().encode("A100", &stem).expect("encode");

    let bytes = fs::read(&artifact).expect("artifact");
    assert_eq!(&bytes[..8], &PNG_MAGIC, "stale content was replaced");
}

#[test]
fn render_config_controls_dimensions() {
    let dir = tempdir().expect("tempdir");
    let small_stem = dir.path().join("small");
    let large_stem = dir.path().join("large");

    Code128Encoder::new(RenderConfig::default())
        .encode("SIZE", &small_stem)
        .expect("encode");
    Code128Encoder::new(RenderConfig {
        module_height: 30.0,
        ..RenderConfig::default()
    })
    .encode("SIZE", &large_stem)
    .expect("encode");

    let small = image::open(artifact_path(&small_stem)).expect("decodable");
    let large = image::open(artifact_path(&large_stem)).expect("decodable");
    assert_eq!(small.width(), large.width());
    assert!(large.height() > small.height());
}

#[test]
fn longer_identifiers_render_wider() {
    let dir = tempdir().expect("tempdir");
    let short_stem = dir.path().join("short");
    let long_stem = dir.path().join("long");

    let encoder = Code128Encoder::default();
    encoder.encode("AB", &short_stem).expect("encode");
    encoder.encode("ABCDEFGH", &long_stem).expect("encode");

    let short = image::open(artifact_path(&short_stem)).expect("decodable");
    let long = image::open(artifact_path(&long_stem)).expect("decodable");
    assert!(long.width() > short.width());
}

#[test]
fn artifact_path_is_stable_for_relative_stems() {
    assert_eq!(
        artifact_path(Path::new("public/qrcodes/A100")),
        Path::new("public/qrcodes/A100.png")
    );
}
