//! Image file I/O
//!
//! Thin wrappers over the `image` crate. Files of any supported format are
//! loaded as 8-bit luma; grids are written back rounded and clamped to 8 bits.

use crate::Pipeline;
use image::GrayImage;
use onas_bitstream::SymbolStream;
use onas_core::{CodecConfig, OnasError, OnasResult, SampleGrid};
use onas_decoder::Decoder;
use std::path::Path;
use tracing::{debug, info};

fn image_error(err: image::ImageError) -> OnasError {
    OnasError::ImageError(err.to_string())
}

/// Decode an image file and convert it to grayscale
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> OnasResult<SampleGrid> {
    let path = path.as_ref();
    let luma = image::open(path).map_err(image_error)?.into_luma8();
    let (width, height) = luma.dimensions();
    debug!(path = %path.display(), width, height, "loaded image");
    SampleGrid::from_samples(width, height, luma.as_raw().as_slice())
}

/// Write a grid as an 8-bit grayscale image; the format follows the extension
pub fn save_grayscale<P: AsRef<Path>>(path: P, grid: &SampleGrid) -> OnasResult<()> {
    let path = path.as_ref();
    let luma = GrayImage::from_raw(
        grid.dimensions().width,
        grid.dimensions().height,
        grid.to_samples::<u8>(),
    )
    .ok_or_else(|| OnasError::InvalidSample("sample count does not match dimensions".into()))?;
    luma.save(path).map_err(image_error)?;
    debug!(path = %path.display(), "saved image");
    Ok(())
}

/// Encode `grid` and write the byte stream to `path`
///
/// Nothing is written unless the configuration is standard.
pub fn save_encoded<P: AsRef<Path>>(
    path: P,
    grid: &SampleGrid,
    config: CodecConfig,
) -> OnasResult<SymbolStream> {
    let path = path.as_ref();
    let pipeline = Pipeline::new(config)?;
    pipeline.require_standard()?;

    let symbols = pipeline.partition(grid)?.transform().quantize().encode_file(path)?;
    info!(path = %path.display(), blocks = symbols.len(), "saved encoded stream");
    Ok(symbols)
}

/// Read and decode a byte stream written by [`save_encoded`]
pub fn load_encoded<P: AsRef<Path>>(path: P) -> OnasResult<SampleGrid> {
    let path = path.as_ref();
    let mut decoder = Decoder::new();
    let grid = decoder.decode_file(path)?;
    if let Some(header) = decoder.header() {
        debug!(
            path = %path.display(),
            width = header.dimensions.width,
            height = header.dimensions.height,
            factor = header.quantization_factor,
            "loaded encoded stream"
        );
    }
    Ok(grid)
}
