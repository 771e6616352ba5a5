//! Edge case testing for the block codec

use onas::{
    decode_from_bytes, encode_to_bytes, encode_to_preview, mse, psnr, CodecConfig, Dimensions,
    OnasError, Pipeline, SampleGrid, TransformKind,
};
use onas_bitstream::HEADER_SIZE;

fn create_test_grid(width: u32, height: u32) -> SampleGrid {
    let (w, h) = (width as usize, height as usize);
    let samples = (0..h)
        .flat_map(|y| (0..w).map(move |x| ((x * 31 + y * 17) % 256) as f64))
        .collect();
    SampleGrid::from_vec(width, height, samples).unwrap()
}

/// Encode, decode and check the shape survives
fn roundtrip(grid: &SampleGrid) -> SampleGrid {
    let bytes = encode_to_bytes(grid, CodecConfig::default())
        .unwrap_or_else(|e| panic!("encoding {} failed: {}", grid.dimensions(), e));
    let decoded = decode_from_bytes(&bytes)
        .unwrap_or_else(|e| panic!("decoding {} failed: {}", grid.dimensions(), e));
    assert_eq!(decoded.dimensions(), grid.dimensions());
    decoded
}

#[test]
fn test_ten_by_ten_with_eight_blocks() {
    let grid = create_test_grid(10, 10);
    let pipeline = Pipeline::new(CodecConfig::default()).unwrap();
    let partitioned = pipeline.partition(&grid).unwrap();

    let shapes: Vec<_> = partitioned
        .blocks()
        .iter()
        .map(|b| (b.rows(), b.cols()))
        .collect();
    assert_eq!(shapes, vec![(8, 8), (8, 2), (2, 8), (2, 2)]);

    let preview = encode_to_preview(&grid, CodecConfig::default()).unwrap();
    assert_eq!(preview.reconstructed.dimensions(), Dimensions::new(10, 10));
    roundtrip(&grid);
}

#[test]
fn test_odd_dimensions() {
    for &(w, h) in &[(1, 1), (1, 17), (17, 1), (7, 7), (9, 17), (33, 15), (100, 3)] {
        let grid = create_test_grid(w, h);
        let decoded = roundtrip(&grid);
        let error = mse(&grid, &decoded).unwrap();
        assert!(error.is_finite(), "{}x{}: mse {}", w, h, error);
    }
}

#[test]
fn test_edge_blocks_lossless_without_quantization() {
    let grid = create_test_grid(21, 13);
    let preview = encode_to_preview(&grid, CodecConfig::new().block_size(5)).unwrap();
    for (a, b) in grid.samples().iter().zip(preview.reconstructed.samples()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn test_block_larger_than_grid() {
    let grid = create_test_grid(6, 4);
    let preview = encode_to_preview(&grid, CodecConfig::new().block_size(64)).unwrap();
    assert_eq!(preview.reconstructed.dimensions(), grid.dimensions());
    assert!(psnr(&grid, &preview.reconstructed).unwrap() > 100.0);
}

#[test]
fn test_extreme_samples() {
    let black = SampleGrid::from_samples(16, 16, &[0u8; 256]).unwrap();
    let white = SampleGrid::from_samples(16, 16, &[255u8; 256]).unwrap();
    assert_eq!(roundtrip(&black).to_samples::<u8>(), vec![0u8; 256]);
    assert_eq!(roundtrip(&white).to_samples::<u8>(), vec![255u8; 256]);

    let checker: Vec<u8> = (0..256)
        .map(|i| if (i % 16 + i / 16) % 2 == 0 { 0 } else { 255 })
        .collect();
    let checker = SampleGrid::from_samples(16, 16, &checker).unwrap();
    roundtrip(&checker);
}

#[test]
fn test_invalid_configurations() {
    let grid = create_test_grid(8, 8);
    for config in [
        CodecConfig::new().block_size(0),
        CodecConfig::new().block_size(129),
        CodecConfig::new().quantization_factor(0.0),
        CodecConfig::new().quantization_factor(-1.0),
        CodecConfig::new().quantization_factor(f64::NAN),
        CodecConfig::new().transform(TransformKind::Klt),
        CodecConfig::new().transform(TransformKind::Fft),
    ] {
        assert!(
            matches!(
                encode_to_preview(&grid, config),
                Err(OnasError::InvalidConfiguration(_))
            ),
            "{:?} accepted for preview",
            config
        );
        assert!(
            matches!(
                encode_to_bytes(&grid, config),
                Err(OnasError::InvalidConfiguration(_))
            ),
            "{:?} accepted for encoding",
            config
        );
    }
}

#[test]
fn test_non_standard_save_unsupported() {
    let grid = create_test_grid(32, 32);
    for block_size in [4, 16] {
        assert!(matches!(
            encode_to_bytes(&grid, CodecConfig::new().block_size(block_size)),
            Err(OnasError::UnsupportedOperation(_))
        ));
    }
}

#[test]
fn test_invalid_grids() {
    assert!(matches!(
        SampleGrid::from_vec(0, 4, vec![]),
        Err(OnasError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        SampleGrid::from_vec(2, 2, vec![1.0, 2.0, f64::INFINITY, 0.0]),
        Err(OnasError::InvalidSample(_))
    ));
    assert!(matches!(
        SampleGrid::from_vec(2, 2, vec![1.0; 3]),
        Err(OnasError::InvalidSample(_))
    ));
}

#[test]
fn test_metric_shape_mismatch() {
    let a = create_test_grid(8, 8);
    let b = create_test_grid(8, 9);
    assert!(matches!(psnr(&a, &b), Err(OnasError::DimensionMismatch { .. })));
}

#[test]
fn test_psnr_symmetry() {
    let original = create_test_grid(24, 24);
    let coded = encode_to_preview(&original, CodecConfig::new().quantization_factor(3.0))
        .unwrap()
        .reconstructed;
    let forward = psnr(&original, &coded).unwrap();
    let backward = psnr(&coded, &original).unwrap();
    assert!((forward - backward).abs() < 1e-12);
}

#[test]
fn test_truncated_stream_rejected() {
    let grid = create_test_grid(24, 24);
    let bytes = encode_to_bytes(&grid, CodecConfig::default()).unwrap();

    assert!(matches!(
        decode_from_bytes(&[]),
        Err(OnasError::InvalidBitstream(_))
    ));
    assert!(matches!(
        decode_from_bytes(&bytes[..HEADER_SIZE - 1]),
        Err(OnasError::InvalidBitstream(_))
    ));
    assert!(matches!(
        decode_from_bytes(&bytes[..HEADER_SIZE + 2]),
        Err(OnasError::InvalidBitstream(_))
    ));
}

#[test]
fn test_corrupt_header_rejected() {
    let grid = create_test_grid(8, 8);
    let mut bytes = encode_to_bytes(&grid, CodecConfig::default()).unwrap();
    // Zero width
    bytes[..4].copy_from_slice(&[0, 0, 0, 0]);
    assert!(decode_from_bytes(&bytes).is_err());
}

#[test]
fn test_forged_dimensions_rejected() {
    let grid = create_test_grid(8, 8);
    let valid = encode_to_bytes(&grid, CodecConfig::default()).unwrap();

    for (width, height) in [(u32::MAX, u32::MAX), (60_000, 60_000), (16, 8)] {
        let mut bytes = valid.clone();
        bytes[..4].copy_from_slice(&width.to_le_bytes());
        bytes[4..8].copy_from_slice(&height.to_le_bytes());
        assert!(
            matches!(decode_from_bytes(&bytes), Err(OnasError::InvalidBitstream(_))),
            "{}x{} accepted",
            width,
            height
        );
    }

    // A bare header: one block needs at least two payload bytes
    assert!(matches!(
        decode_from_bytes(&valid[..HEADER_SIZE]),
        Err(OnasError::InvalidBitstream(_))
    ));
}
