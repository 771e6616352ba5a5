//! Quantization for lossy compression
//!
//! In standard mode every coefficient is divided by `factor * table[i][j]` and
//! rounded. Any other configuration bypasses quantization entirely so that the
//! coefficients pass through unchanged; callers can tell the two apart through
//! [`Quantizer::is_standard`] and the [`QuantizedBlock`] variant.

use crate::block::Block;
use onas_core::consts::{STANDARD_BLOCK_SIZE, STANDARD_QUANT_TABLE};
use onas_core::CodecConfig;

/// Quantization table for 8x8 blocks, row-major
pub type QuantTable = [u16; 64];

/// Output of the quantization stage
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizedBlock {
    /// Rounded integer levels (standard mode)
    Standard(Block<i32>),
    /// Transform coefficients passed through untouched
    Bypass(Block<f64>),
}

impl QuantizedBlock {
    pub fn is_standard(&self) -> bool {
        matches!(self, QuantizedBlock::Standard(_))
    }

    /// Values as floats, whichever the variant
    pub fn to_f64_block(&self) -> Block<f64> {
        match self {
            QuantizedBlock::Standard(block) => block.map(|v| v as f64),
            QuantizedBlock::Bypass(block) => block.clone(),
        }
    }
}

/// Scalar-factor quantizer over the perceptual table
#[derive(Debug, Clone)]
pub struct Quantizer {
    factor: f64,
    standard: bool,
    table: QuantTable,
}

impl Quantizer {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            factor: config.quantization_factor,
            standard: config.is_standard(),
            table: STANDARD_QUANT_TABLE,
        }
    }

    /// Whether quantization is applied or bypassed
    pub fn is_standard(&self) -> bool {
        self.standard
    }

    /// Effective step size for coefficient `(row, col)`
    pub fn step(&self, row: usize, col: usize) -> f64 {
        self.factor * self.table[row * STANDARD_BLOCK_SIZE + col] as f64
    }

    /// Quantize one block of transform coefficients
    ///
    /// Ties round to even.
    pub fn quantize(&self, coefficients: &Block<f64>) -> QuantizedBlock {
        if !self.standard {
            return QuantizedBlock::Bypass(coefficients.clone());
        }

        let cols = coefficients.cols();
        let data = coefficients
            .data
            .iter()
            .enumerate()
            .map(|(i, &c)| (c / self.step(i / cols, i % cols)).round_ties_even() as i32)
            .collect();
        QuantizedBlock::Standard(Block::new(coefficients.region, data))
    }

    /// Scale quantized levels back to coefficient magnitudes
    pub fn dequantize(&self, block: &QuantizedBlock) -> Block<f64> {
        match block {
            QuantizedBlock::Standard(levels) => {
                let cols = levels.cols();
                let data = levels
                    .data
                    .iter()
                    .enumerate()
                    .map(|(i, &q)| q as f64 * self.step(i / cols, i % cols))
                    .collect();
                Block::new(levels.region, data)
            }
            QuantizedBlock::Bypass(coefficients) => coefficients.clone(),
        }
    }
}
