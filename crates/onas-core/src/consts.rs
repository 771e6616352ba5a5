//! Constants used throughout the codec

/// Block size of the standard mode
pub const STANDARD_BLOCK_SIZE: usize = 8;

/// Largest block size accepted by the configuration
pub const MAX_BLOCK_SIZE: usize = 128;

/// Default quantization factor (table used as-is)
pub const DEFAULT_QUANTIZATION_FACTOR: f64 = 1.0;

/// Peak sample value for 8-bit luma
pub const MAX_SAMPLE_VALUE: f64 = 255.0;

/// Number of blocks sampled per stage for introspection
pub const STEP_SAMPLE_BLOCKS: usize = 9;

/// Perceptual luminance quantization table for 8x8 blocks, row-major
pub const STANDARD_QUANT_TABLE: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99,
];
