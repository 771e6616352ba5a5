//! Entropy encoder for the onas codec
//!
//! Turns quantized blocks into the run-length/amplitude symbol stream and
//! serializes it behind a minimal stream header.

pub mod entropy;
pub mod writer;

pub use entropy::{run_length_encode, scan_block, EntropyEncoder};
pub use writer::write_stream;

use onas_bitstream::{StreamHeader, SymbolStream};
use onas_core::{CodecConfig, Dimensions, OnasError, OnasResult};
use onas_transform::QuantizedBlock;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Encoder for quantized standard-mode blocks
#[derive(Debug, Clone)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    /// Fails unless `config` is valid and in standard mode
    pub fn new(config: CodecConfig) -> OnasResult<Self> {
        config.validate()?;
        if !config.is_standard() {
            return Err(OnasError::UnsupportedOperation(format!(
                "encoding requires 8x8 blocks with the DCT, got {}x{} blocks with the {}",
                config.block_size, config.block_size, config.transform
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Entropy code blocks given in raster order
    pub fn symbols(&self, blocks: &[QuantizedBlock]) -> OnasResult<SymbolStream> {
        EntropyEncoder::new().encode(blocks)
    }

    /// Entropy code and serialize to a writer, returning the symbol stream
    pub fn encode<W: Write>(
        &self,
        dimensions: Dimensions,
        blocks: &[QuantizedBlock],
        writer: W,
    ) -> OnasResult<SymbolStream> {
        let stream = self.symbols(blocks)?;
        let header = StreamHeader::new(dimensions, self.config.quantization_factor);
        write_stream(&header, &stream, writer)?;
        Ok(stream)
    }

    /// Entropy code and serialize to a byte vector
    pub fn encode_to_vec(
        &self,
        dimensions: Dimensions,
        blocks: &[QuantizedBlock],
    ) -> OnasResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.encode(dimensions, blocks, &mut bytes)?;
        info!(
            width = dimensions.width,
            height = dimensions.height,
            bytes = bytes.len(),
            "encoded grid"
        );
        Ok(bytes)
    }

    /// Entropy code and serialize to a file
    pub fn encode_file<P: AsRef<Path>>(
        &self,
        dimensions: Dimensions,
        blocks: &[QuantizedBlock],
        path: P,
    ) -> OnasResult<SymbolStream> {
        let file = File::create(path)?;
        self.encode(dimensions, blocks, BufWriter::new(file))
    }
}
