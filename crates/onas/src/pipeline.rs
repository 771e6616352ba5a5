//! Encode/preview pipeline
//!
//! The pipeline moves linearly through its stages:
//!
//! ```text
//! Configured -> Partitioned -> Transformed -> Quantized -> Encoded | Decoded
//! ```
//!
//! Each stage is its own type and consumes the previous one, so a stage can only
//! be reached through the ones before it. Partitioning, transforming and
//! quantizing are independent per block and run on the rayon pool; blocks keep
//! their raster order.

use crate::steps::{self, StepReport};
use onas_bitstream::SymbolStream;
use onas_core::{
    execute_all_metrics, CodecConfig, Dimensions, Metrics, OnasError, OnasResult, SampleGrid,
};
use onas_decoder::reassemble;
use onas_encoder::Encoder;
use onas_transform::{
    create_transform, extract_block, Block, BlockLayout, BlockTransform, QuantizedBlock,
    Quantizer,
};
use rayon::prelude::*;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Pipeline stage, used for logging and introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configured,
    Partitioned,
    Transformed,
    Quantized,
    Encoded,
    Decoded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configured => "configured",
            Stage::Partitioned => "partitioned",
            Stage::Transformed => "transformed",
            Stage::Quantized => "quantized",
            Stage::Encoded => "encoded",
            Stage::Decoded => "decoded",
        };
        f.write_str(name)
    }
}

/// Result of the preview path
#[derive(Debug, Clone)]
pub struct Preview {
    /// Grid rebuilt from the quantized coefficients, same shape as the input
    pub reconstructed: SampleGrid,
    /// Quality of the reconstruction against the input
    pub metrics: Metrics,
}

/// A validated configuration with its transform and quantizer
#[derive(Debug)]
pub struct Pipeline {
    config: CodecConfig,
    transform: Box<dyn BlockTransform>,
    quantizer: Quantizer,
}

impl Pipeline {
    /// Validate `config`; nothing is computed for an invalid configuration
    pub fn new(config: CodecConfig) -> OnasResult<Self> {
        config.validate()?;
        let transform = create_transform(config.transform, config.block_size)?;
        let quantizer = Quantizer::new(&config);

        debug!(
            stage = %Stage::Configured,
            transform = %config.transform,
            block_size = config.block_size,
            factor = config.quantization_factor,
            standard = config.is_standard(),
            "pipeline configured"
        );
        Ok(Self {
            config,
            transform,
            quantizer,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Whether quantization and entropy coding are available
    pub fn is_standard(&self) -> bool {
        self.config.is_standard()
    }

    /// Split `grid` into blocks of the configured size
    pub fn partition(&self, grid: &SampleGrid) -> OnasResult<Partitioned<'_>> {
        let layout = BlockLayout::new(grid.dimensions(), self.config.block_size)?;
        let regions: Vec<_> = layout.regions().collect();
        let blocks = regions
            .par_iter()
            .map(|&region| extract_block(grid, region))
            .collect::<Vec<_>>();

        debug!(
            stage = %Stage::Partitioned,
            blocks = blocks.len(),
            blocks_x = layout.blocks_x(),
            blocks_y = layout.blocks_y(),
            "grid partitioned"
        );
        Ok(Partitioned {
            pipeline: self,
            dimensions: grid.dimensions(),
            blocks,
        })
    }

    /// Save path: partition, transform, quantize and entropy code
    ///
    /// Fails with `UnsupportedOperation` before any transform work unless the
    /// configuration is standard.
    pub fn encode_to_bytes(&self, grid: &SampleGrid) -> OnasResult<Vec<u8>> {
        self.require_standard()?;
        let encoded = self.partition(grid)?.transform().quantize().encode()?;
        Ok(encoded.into_bytes())
    }

    /// Preview path: partition, transform, quantize, then straight back to samples
    pub fn encode_to_preview(&self, grid: &SampleGrid) -> OnasResult<Preview> {
        let reconstructed = self.partition(grid)?.transform().quantize().decode()?;
        let metrics = execute_all_metrics(grid, &reconstructed)?;

        info!(
            width = grid.width(),
            height = grid.height(),
            metrics = ?metrics,
            "preview reconstructed"
        );
        Ok(Preview {
            reconstructed,
            metrics,
        })
    }

    /// Per-stage reports with a sample of intermediate blocks
    pub fn inspect(&self, grid: &SampleGrid) -> OnasResult<Vec<StepReport>> {
        let partitioned = self.partition(grid)?;
        let mut reports = vec![steps::block_creation(partitioned.blocks())];

        let transformed = partitioned.transform();
        reports.push(steps::direct_transform(transformed.coefficients()));

        let quantized = transformed.quantize();
        reports.push(steps::quantization(quantized.blocks()));

        if self.is_standard() {
            let encoded = quantized.encode()?;
            reports.extend(steps::entropy_steps(quantized.blocks(), encoded.symbols()));
        }
        Ok(reports)
    }

    pub(crate) fn require_standard(&self) -> OnasResult<()> {
        if !self.is_standard() {
            return Err(OnasError::UnsupportedOperation(format!(
                "saving requires 8x8 blocks with the DCT, got {}x{} blocks with the {}",
                self.config.block_size, self.config.block_size, self.config.transform
            )));
        }
        Ok(())
    }
}

/// Blocks cut from the input grid
#[derive(Debug)]
pub struct Partitioned<'p> {
    pipeline: &'p Pipeline,
    dimensions: Dimensions,
    blocks: Vec<Block<f64>>,
}

impl<'p> Partitioned<'p> {
    pub fn blocks(&self) -> &[Block<f64>] {
        &self.blocks
    }

    /// Forward transform of every block
    pub fn transform(self) -> Transformed<'p> {
        let transform = &self.pipeline.transform;
        let coefficients = self
            .blocks
            .par_iter()
            .map(|block| transform.forward(block))
            .collect::<Vec<_>>();

        debug!(
            stage = %Stage::Transformed,
            transform = %transform.kind(),
            blocks = coefficients.len(),
            "blocks transformed"
        );
        Transformed {
            pipeline: self.pipeline,
            dimensions: self.dimensions,
            coefficients,
        }
    }
}

/// Transform coefficients of every block
#[derive(Debug)]
pub struct Transformed<'p> {
    pipeline: &'p Pipeline,
    dimensions: Dimensions,
    coefficients: Vec<Block<f64>>,
}

impl<'p> Transformed<'p> {
    pub fn coefficients(&self) -> &[Block<f64>] {
        &self.coefficients
    }

    /// Quantize every block, or pass coefficients through outside standard mode
    pub fn quantize(self) -> Quantized<'p> {
        let quantizer = &self.pipeline.quantizer;
        if !quantizer.is_standard() {
            warn!(
                block_size = self.pipeline.config.block_size,
                "non-standard configuration, quantization bypassed"
            );
        }

        let blocks = self
            .coefficients
            .par_iter()
            .map(|block| quantizer.quantize(block))
            .collect::<Vec<_>>();

        debug!(stage = %Stage::Quantized, blocks = blocks.len(), "blocks quantized");
        Quantized {
            pipeline: self.pipeline,
            dimensions: self.dimensions,
            blocks,
        }
    }
}

/// Quantized (or bypassed) coefficients of every block
#[derive(Debug)]
pub struct Quantized<'p> {
    pipeline: &'p Pipeline,
    dimensions: Dimensions,
    blocks: Vec<QuantizedBlock>,
}

impl Quantized<'_> {
    pub fn blocks(&self) -> &[QuantizedBlock] {
        &self.blocks
    }

    /// Entropy code and serialize; standard mode only
    pub fn encode(&self) -> OnasResult<Encoded> {
        self.pipeline.require_standard()?;
        let encoder = Encoder::new(self.pipeline.config)?;
        let mut bytes = Vec::new();
        let symbols = encoder.encode(self.dimensions, &self.blocks, &mut bytes)?;

        debug!(stage = %Stage::Encoded, bytes = bytes.len(), "blocks encoded");
        Ok(Encoded { symbols, bytes })
    }

    /// Entropy code and serialize straight to a file; standard mode only
    pub fn encode_file<P: AsRef<Path>>(&self, path: P) -> OnasResult<SymbolStream> {
        self.pipeline.require_standard()?;
        let encoder = Encoder::new(self.pipeline.config)?;
        let symbols = encoder.encode_file(self.dimensions, &self.blocks, path)?;

        debug!(stage = %Stage::Encoded, blocks = symbols.len(), "blocks encoded to file");
        Ok(symbols)
    }

    /// Dequantize, inverse transform and reassemble
    pub fn decode(&self) -> OnasResult<SampleGrid> {
        let quantizer = &self.pipeline.quantizer;
        let transform = &self.pipeline.transform;
        let blocks = self
            .blocks
            .par_iter()
            .map(|block| transform.inverse(&quantizer.dequantize(block)))
            .collect::<Vec<_>>();

        let grid = reassemble(&blocks, self.dimensions)?;
        debug!(stage = %Stage::Decoded, blocks = blocks.len(), "blocks decoded");
        Ok(grid)
    }
}

/// Output of the save path
#[derive(Debug, Clone)]
pub struct Encoded {
    symbols: SymbolStream,
    bytes: Vec<u8>,
}

impl Encoded {
    pub fn symbols(&self) -> &SymbolStream {
        &self.symbols
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onas_core::{TransformKind, PSNR_NAME};

    fn gradient(width: u32, height: u32) -> SampleGrid {
        let samples = (0..height as usize)
            .flat_map(|y| (0..width as usize).map(move |x| ((x * 7 + y * 3) % 256) as f64))
            .collect();
        SampleGrid::from_vec(width, height, samples).unwrap()
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        assert!(matches!(
            Pipeline::new(CodecConfig::new().block_size(0)),
            Err(OnasError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Pipeline::new(CodecConfig::new().transform(TransformKind::Fft)),
            Err(OnasError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_stages_keep_raster_order() {
        let pipeline = Pipeline::new(CodecConfig::default()).unwrap();
        let grid = gradient(24, 16);
        let partitioned = pipeline.partition(&grid).unwrap();
        let origins: Vec<_> = partitioned
            .blocks()
            .iter()
            .map(|b| (b.region.row, b.region.col))
            .collect();
        assert_eq!(origins, vec![(0, 0), (0, 8), (0, 16), (8, 0), (8, 8), (8, 16)]);

        let transformed = partitioned.transform();
        let quantized = transformed.quantize();
        assert!(quantized.blocks().iter().all(|b| b.is_standard()));
    }

    #[test]
    fn test_non_standard_encode_fails() {
        let pipeline = Pipeline::new(CodecConfig::new().block_size(16)).unwrap();
        assert!(matches!(
            pipeline.encode_to_bytes(&gradient(32, 32)),
            Err(OnasError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_non_standard_preview_is_lossless() {
        let pipeline = Pipeline::new(CodecConfig::new().block_size(16)).unwrap();
        let grid = gradient(40, 24);
        let preview = pipeline.encode_to_preview(&grid).unwrap();
        assert_eq!(preview.reconstructed.dimensions(), grid.dimensions());
        for (a, b) in grid.samples().iter().zip(preview.reconstructed.samples()) {
            assert!((a - b).abs() < 1e-6);
        }
        assert!(preview.metrics[PSNR_NAME] > 100.0);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Quantized.to_string(), "quantized");
    }
}
