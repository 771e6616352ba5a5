//! Decoder for the onas codec
//!
//! Parses the serialized symbol stream, undoes the entropy coding, dequantizes,
//! applies the inverse DCT and reassembles the grid.

pub mod entropy;
pub mod reader;
pub mod reassemble;

pub use entropy::{run_length_decode, EntropyDecoder};
pub use reader::read_stream;
pub use reassemble::reassemble;

use onas_bitstream::StreamHeader;
use onas_core::consts::STANDARD_BLOCK_SIZE;
use onas_core::{CodecConfig, OnasResult, SampleGrid, TransformKind};
use onas_transform::{create_transform, BlockLayout, Quantizer};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Decoder for byte streams produced by the encoder
pub struct Decoder {
    header: Option<StreamHeader>,
}

impl Decoder {
    pub fn new() -> Self {
        Self { header: None }
    }

    /// Decode a stream stored in a file
    pub fn decode_file<P: AsRef<Path>>(&mut self, path: P) -> OnasResult<SampleGrid> {
        let file = File::open(path)?;
        self.decode(BufReader::new(file))
    }

    /// Decode from a reader
    pub fn decode<R: Read>(&mut self, mut reader: R) -> OnasResult<SampleGrid> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode_bytes(&bytes)
    }

    /// Decode a stream held in memory
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> OnasResult<SampleGrid> {
        let (header, stream) = read_stream(
            bytes,
            |header| Ok(BlockLayout::new(header.dimensions, STANDARD_BLOCK_SIZE)?.block_count()),
            STANDARD_BLOCK_SIZE * STANDARD_BLOCK_SIZE - 1,
        )?;
        self.header = Some(header);
        let layout = BlockLayout::new(header.dimensions, STANDARD_BLOCK_SIZE)?;

        let config = CodecConfig::new()
            .transform(TransformKind::Dct)
            .block_size(STANDARD_BLOCK_SIZE)
            .quantization_factor(header.quantization_factor);
        config.validate()?;

        let quantized = EntropyDecoder::new().decode(&stream, &layout)?;

        let quantizer = Quantizer::new(&config);
        let transform = create_transform(config.transform, config.block_size)?;
        let blocks: Vec<_> = quantized
            .par_iter()
            .map(|block| transform.inverse(&quantizer.dequantize(block)))
            .collect();

        let grid = reassemble(&blocks, header.dimensions)?;
        info!(
            width = header.dimensions.width,
            height = header.dimensions.height,
            blocks = blocks.len(),
            "decoded grid"
        );
        Ok(grid)
    }

    /// Header of the most recently decoded stream
    pub fn header(&self) -> Option<&StreamHeader> {
        self.header.as_ref()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
