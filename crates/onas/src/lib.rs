//! onas: a block transform still-image codec
//!
//! Single-channel grids are cut into square blocks, moved to the frequency
//! domain with an orthonormal DCT, quantized under the perceptual luminance
//! table and entropy coded in zigzag order with DC differencing and AC
//! run-length coding.
//!
//! # Paths
//!
//! - [`encode_to_bytes`] produces a byte stream and requires the standard
//!   configuration (8x8 blocks, DCT).
//! - [`encode_to_preview`] reconstructs the grid straight from the quantized
//!   coefficients and reports quality metrics. Other block sizes are accepted
//!   there; quantization is then bypassed.
//! - [`decode_from_bytes`] reverses [`encode_to_bytes`].
//! - [`inspect`] reports the intermediate data of each stage.
//!
//! # Example
//!
//! ```no_run
//! use onas::{encode_to_bytes, decode_from_bytes, CodecConfig, SampleGrid};
//!
//! # fn main() -> onas::OnasResult<()> {
//! let grid = SampleGrid::from_samples(16, 16, &[128u8; 256])?;
//! let config = CodecConfig::new().quantization_factor(2.0);
//! let bytes = encode_to_bytes(&grid, config)?;
//! let decoded = decode_from_bytes(&bytes)?;
//! assert_eq!(decoded.dimensions(), grid.dimensions());
//! # Ok(())
//! # }
//! ```

pub mod io;
pub mod pipeline;
pub mod steps;

pub use onas_core::{
    consts, execute_all_metrics, mse, psnr, snr, CodecConfig, Dimensions, Metrics, OnasError,
    OnasResult, Sample, SampleGrid, TransformKind, PSNR_NAME, SNR_NAME,
};
pub use onas_decoder::Decoder;
pub use onas_encoder::Encoder;
pub use pipeline::{Encoded, Partitioned, Pipeline, Preview, Quantized, Stage, Transformed};
pub use steps::{StepData, StepReport};

/// Encode a grid to a byte stream
///
/// Fails with [`OnasError::UnsupportedOperation`] for non-standard
/// configurations before any block is transformed.
pub fn encode_to_bytes(grid: &SampleGrid, config: CodecConfig) -> OnasResult<Vec<u8>> {
    Pipeline::new(config)?.encode_to_bytes(grid)
}

/// Quantize a grid and rebuild it, reporting PSNR and SNR against the input
pub fn encode_to_preview(grid: &SampleGrid, config: CodecConfig) -> OnasResult<Preview> {
    Pipeline::new(config)?.encode_to_preview(grid)
}

/// Decode a byte stream produced by [`encode_to_bytes`]
pub fn decode_from_bytes(bytes: &[u8]) -> OnasResult<SampleGrid> {
    Decoder::new().decode_bytes(bytes)
}

/// Per-stage reports for up to nine blocks from the middle of the image
pub fn inspect(grid: &SampleGrid, config: CodecConfig) -> OnasResult<Vec<StepReport>> {
    Pipeline::new(config)?.inspect(grid)
}
