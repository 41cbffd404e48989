mod common;

use common::*;
use graymap::{decode, encode, read_header, GrayMapError, GrayMatrix, PgmFormat};
use std::fs;

#[test]
fn test_raw_round_trip_8bit() {
    init();
    let dir = tempfile::tempdir().unwrap();
    for (i, (height, width)) in [(1, 1), (2, 3), (17, 31), (64, 48)].into_iter().enumerate() {
        let original = random_matrix(height, width, 255, 100 + i as u64);
        let path = dir.path().join(format!("rt8_{}.pgm", i));
        encode(&original, &path, PgmFormat::Raw).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded, original);
    }
}

#[test]
fn test_raw_round_trip_16bit() {
    init();
    let dir = tempfile::tempdir().unwrap();
    for (i, (height, width)) in [(1, 2), (5, 7), (40, 33)].into_iter().enumerate() {
        let mut original = random_matrix(height, width, 65535, 200 + i as u64);
        // Guarantee a wide maximum value.
        original[(0, 0)] = 65535;
        let path = dir.path().join(format!("rt16_{}.pgm", i));
        encode(&original, &path, PgmFormat::Raw).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded, original);
    }
}

#[test]
fn test_raw_depth_switching() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let (height, width) = (6, 9);
    let mut image = ramp_matrix(height, width, 256);
    assert_eq!(image.max_value().unwrap(), 53);
    image[(5, 8)] = 255;

    let narrow_path = dir.path().join("narrow.pgm");
    encode(&image, &narrow_path, PgmFormat::Raw).unwrap();
    let narrow = fs::read(&narrow_path).unwrap();
    let header = b"P5\n9 6\n255\n";
    assert!(narrow.starts_with(header));
    assert_eq!(narrow.len() - header.len(), height * width);

    image[(2, 4)] = 256;
    let wide_path = dir.path().join("wide.pgm");
    encode(&image, &wide_path, PgmFormat::Raw).unwrap();
    let wide = fs::read(&wide_path).unwrap();
    let header = b"P5\n9 6\n256\n";
    assert!(wide.starts_with(header));
    let payload = &wide[header.len()..];
    assert_eq!(payload.len(), 2 * height * width);

    // Big-endian: the 256 at (2, 4) is stored high byte first.
    let offset = 2 * (2 * width + 4);
    assert_eq!(&payload[offset..offset + 2], &[0x01, 0x00]);
    // The 255 at (5, 8) becomes 0x00FF.
    assert_eq!(&payload[payload.len() - 2..], &[0x00, 0xFF]);
}

#[test]
fn test_raw_truncation_returns_partial_image() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let original = random_matrix(8, 10, 255, 7);
    let path = dir.path().join("full.pgm");
    encode(&original, &path, PgmFormat::Raw).unwrap();

    let bytes = fs::read(&path).unwrap();
    let missing = 13;
    let truncated_path = dir.path().join("truncated.pgm");
    fs::write(&truncated_path, &bytes[..bytes.len() - missing]).unwrap();

    let err = decode(&truncated_path).unwrap_err();
    let total = original.len();
    assert!(matches!(
        err,
        GrayMapError::TruncatedPixelData { read, expected, .. } if read == total - missing && expected == total
    ));

    let partial = err.into_partial().unwrap();
    assert_eq!(partial.height(), 8);
    assert_eq!(partial.width(), 10);
    assert_eq!(partial.values()[..total - missing], original.values()[..total - missing]);
    assert!(partial.values()[total - missing..].iter().all(|&v| v == 0));
}

#[test]
fn test_raw_truncation_16bit() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let mut original = random_matrix(4, 4, 65535, 99);
    original[(0, 0)] = 1000;
    original[(3, 3)] = 40000;
    let path = dir.path().join("wide.pgm");
    encode(&original, &path, PgmFormat::Raw).unwrap();

    // Drop the last sample and a half.
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    let err = decode(&path).unwrap_err();
    assert_eq!(err.pixels_read(), Some(14));
    let partial = err.into_partial().unwrap();
    assert_eq!(partial.values()[..14], original.values()[..14]);
}

#[test]
fn test_invalid_max_value_rejected() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maxval.pgm");
    fs::write(&path, b"P5\n2 2\n70000\n\x00\x01\x00\x02\x00\x03\x00\x04").unwrap();

    let err = decode(&path).unwrap_err();
    assert!(matches!(err, GrayMapError::InvalidMaxValue(70000)));
    assert!(err.into_partial().is_none());
}

#[test]
fn test_raw_2x2_scenario() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("scenario.pgm");
    fs::write(&raw_path, b"P5\n2 2\n255\n\x0a\x14\x1e\x28").unwrap();

    let image = decode(&raw_path).unwrap();
    assert_eq!(image, GrayMatrix::from_rows(&[[10, 20], [30, 40]]).unwrap());

    let ascii_path = dir.path().join("scenario_ascii.pgm");
    encode(&image, &ascii_path, PgmFormat::Ascii).unwrap();
    assert_eq!(fs::read(&ascii_path).unwrap(), b"P2\n2 2\n40\n10 20 30 40 ");
}

#[test]
fn test_raw_invertibility() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("in.pgm");
    let out_path = dir.path().join("out.pgm");

    let mut original = random_matrix(21, 13, 4095, 4242);
    original[(20, 12)] = 4095;
    encode(&original, &in_path, PgmFormat::Raw).unwrap();

    let image = decode(&in_path).unwrap();
    encode(&image, &out_path, PgmFormat::Raw).unwrap();

    let in_hash = compute_file_hash(&in_path);
    let out_hash = compute_file_hash(&out_path);
    println!("Input file SHA1: {}", in_hash);
    println!("Output file SHA1: {}", out_hash);
    assert_eq!(in_hash, out_hash);
}

#[test]
fn test_header_of_encoded_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header.pgm");
    let image = ramp_matrix(3, 300, 1000);
    encode(&image, &path, PgmFormat::Raw).unwrap();

    let mut file = fs::File::open(&path).unwrap();
    let header = read_header(&mut file).unwrap();
    assert_eq!(header.format, PgmFormat::Raw);
    assert_eq!((header.width, header.height), (300, 3));
    assert_eq!(header.max_value, 899);
    assert_eq!(header.pixel_data_len(), Some(2 * 900));
}

#[test]
fn test_missing_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    match decode(dir.path().join("does_not_exist.pgm")) {
        Err(GrayMapError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected IoError, got {:?}", other),
    }
}

#[test]
fn test_encode_failures_create_no_file() {
    init();
    let dir = tempfile::tempdir().unwrap();

    let image = GrayMatrix::allocate(2, 2).unwrap();
    let path = dir.path().join("unknown.pgm");
    assert!(matches!(
        encode(&image, &path, PgmFormat::Unknown),
        Err(GrayMapError::InvalidArgument(_))
    ));
    assert!(!path.exists());

    let empty = GrayMatrix::allocate(0, 4).unwrap();
    let path = dir.path().join("empty.pgm");
    assert!(matches!(encode(&empty, &path, PgmFormat::Raw), Err(GrayMapError::EmptyMatrix)));
    assert!(!path.exists());

    let path = dir.path().join("no_such_dir").join("image.pgm");
    assert!(matches!(encode(&image, &path, PgmFormat::Raw), Err(GrayMapError::IoError(_))));
}
