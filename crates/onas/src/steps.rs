//! Step introspection
//!
//! Read-only reports of the intermediate data of each pipeline stage, for a
//! handful of blocks from the middle of the image. Nothing here feeds back into
//! coding.

use onas_bitstream::{AcCode, SymbolStream};
use onas_core::consts::STEP_SAMPLE_BLOCKS;
use onas_encoder::scan_block;
use onas_transform::{Block, QuantizedBlock, ZigZag};
use std::ops::Range;

/// Intermediate data carried by a [`StepReport`]
#[derive(Debug, Clone, PartialEq)]
pub enum StepData {
    /// Sample or coefficient blocks
    Blocks(Vec<Block<f64>>),
    /// Quantizer output (integer levels, or coefficients when bypassed)
    Quantized(Vec<QuantizedBlock>),
    /// DC differences from the previous block
    DcDiffs(Vec<i32>),
    /// Zigzag sequences
    Sequences(Vec<Vec<i32>>),
    /// Run-length coded AC terms
    AcCodes(Vec<Vec<AcCode>>),
}

impl StepData {
    /// Number of sampled blocks
    pub fn len(&self) -> usize {
        match self {
            StepData::Blocks(v) => v.len(),
            StepData::Quantized(v) => v.len(),
            StepData::DcDiffs(v) => v.len(),
            StepData::Sequences(v) => v.len(),
            StepData::AcCodes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One stage of the pipeline as seen from outside
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub name: &'static str,
    pub description: &'static str,
    pub data: StepData,
}

/// Indices of the sampled blocks: up to nine consecutive blocks starting at the
/// middle of the raster sequence, shifted back when the image is small
pub fn sample_range(block_count: usize) -> Range<usize> {
    let start = (block_count / 2).min(block_count.saturating_sub(STEP_SAMPLE_BLOCKS));
    start..block_count.min(start + STEP_SAMPLE_BLOCKS)
}

fn sample<T: Clone>(items: &[T]) -> Vec<T> {
    items[sample_range(items.len())].to_vec()
}

pub(crate) fn block_creation(blocks: &[Block<f64>]) -> StepReport {
    StepReport {
        name: "Block creation",
        description: "The image is cut into square blocks in raster order. \
                      Blocks on the right and bottom edges keep only the rows and \
                      columns that exist in the image.",
        data: StepData::Blocks(sample(blocks)),
    }
}

pub(crate) fn direct_transform(coefficients: &[Block<f64>]) -> StepReport {
    StepReport {
        name: "Direct Transform",
        description: "Each block is moved to the frequency domain. The top-left \
                      coefficient holds the block average and the rest hold \
                      increasingly fine detail.",
        data: StepData::Blocks(sample(coefficients)),
    }
}

pub(crate) fn quantization(blocks: &[QuantizedBlock]) -> StepReport {
    StepReport {
        name: "Quantization",
        description: "Coefficients are divided by the quantization table scaled by \
                      the quantization factor and rounded. High frequencies get \
                      larger steps, so most of them become zero.",
        data: StepData::Quantized(sample(blocks)),
    }
}

/// DC, zigzag and AC reports; `blocks` must be standard-mode output
pub(crate) fn entropy_steps(blocks: &[QuantizedBlock], symbols: &SymbolStream) -> Vec<StepReport> {
    let range = sample_range(symbols.len());
    let sampled = &symbols.blocks[range.clone()];
    let zigzag = ZigZag::standard();

    let sequences = blocks[range]
        .iter()
        .filter_map(|block| match block {
            QuantizedBlock::Standard(levels) => Some(scan_block(levels, zigzag)),
            QuantizedBlock::Bypass(_) => None,
        })
        .collect();

    vec![
        StepReport {
            name: "DC coefficient encoding",
            description: "The DC coefficient of each block is stored as its \
                          difference from the DC coefficient of the previous block.",
            data: StepData::DcDiffs(sampled.iter().map(|b| b.dc_diff).collect()),
        },
        StepReport {
            name: "Zig-zag scan",
            description: "Coefficients are read along the anti-diagonals, from low \
                          to high frequency, so the zeros gather at the end.",
            data: StepData::Sequences(sequences),
        },
        StepReport {
            name: "AC coefficient encoding",
            description: "The AC coefficients are stored as (zero run, size) pairs \
                          with their amplitude bits, and each block ends with an \
                          end-of-block symbol.",
            data: StepData::AcCodes(sampled.iter().map(|b| b.ac.clone()).collect()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_range() {
        assert_eq!(sample_range(0), 0..0);
        assert_eq!(sample_range(4), 0..4);
        assert_eq!(sample_range(9), 0..9);
        assert_eq!(sample_range(12), 3..12);
        assert_eq!(sample_range(100), 50..59);
    }
}
