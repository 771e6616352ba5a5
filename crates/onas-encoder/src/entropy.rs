//! Entropy coding of quantized blocks into the symbol stream
//!
//! Each block is zigzag scanned. The DC term is coded as the difference from
//! the previous block's DC in raster order, starting from 0. The AC terms are
//! run-length coded: zero runs longer than 15 are split with ZRL `(15, 0)` and
//! every block ends with an EOB `(0, 0)` symbol.

use onas_bitstream::{AcCode, BlockSymbols, SymbolStream, MAX_RUN};
use onas_core::{OnasError, OnasResult};
use onas_transform::{Block, QuantizedBlock, ZigZag};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Zigzag sequence of a quantized block
///
/// Truncated edge blocks are embedded in a zero square of the nominal size
/// before scanning.
pub fn scan_block(block: &Block<i32>, zigzag: &ZigZag) -> Vec<i32> {
    if block.region.is_truncated() {
        zigzag.flatten(&block.to_square(0))
    } else {
        zigzag.flatten(&block.data)
    }
}

/// Run-length code the AC part of a zigzag sequence
pub fn run_length_encode(ac: &[i32]) -> Vec<AcCode> {
    let mut codes = Vec::new();

    if let Some(last) = ac.iter().rposition(|&c| c != 0) {
        let mut run = 0u8;
        for &coefficient in &ac[..=last] {
            if coefficient == 0 {
                if run == MAX_RUN {
                    codes.push(AcCode::ZRL);
                    run = 0;
                } else {
                    run += 1;
                }
                continue;
            }
            codes.push(AcCode::value(run, coefficient));
            run = 0;
        }
    }

    codes.push(AcCode::EOB);
    codes
}

/// Sequential DC differencing state
///
/// The previous DC value is the only state shared between blocks, so the
/// encoder must see blocks one at a time in raster order.
#[derive(Debug, Default)]
pub struct EntropyEncoder {
    previous_dc: i32,
}

impl EntropyEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// DC difference for the next block in raster order
    pub fn dc_diff(&mut self, dc: i32) -> i32 {
        let diff = dc.wrapping_sub(self.previous_dc);
        self.previous_dc = dc;
        diff
    }

    /// Code every block of an image
    ///
    /// Scanning and AC run-length coding run in parallel; DC differencing is a
    /// single pass in raster order afterwards.
    pub fn encode(&mut self, blocks: &[QuantizedBlock]) -> OnasResult<SymbolStream> {
        let Some(first) = blocks.first() else {
            return Ok(SymbolStream::default());
        };
        let size = match first {
            QuantizedBlock::Standard(block) => block.region.size,
            QuantizedBlock::Bypass(_) => return Err(bypass_error()),
        };
        let zigzag = if size == ZigZag::standard().size() {
            ZigZag::standard().clone()
        } else {
            ZigZag::new(size)
        };

        let scanned: Vec<(i32, Vec<AcCode>)> = blocks
            .par_iter()
            .map(|block| match block {
                QuantizedBlock::Standard(levels) => {
                    let sequence = scan_block(levels, &zigzag);
                    Ok((sequence[0], run_length_encode(&sequence[1..])))
                }
                QuantizedBlock::Bypass(_) => Err(bypass_error()),
            })
            .collect::<OnasResult<_>>()?;

        let symbols = scanned
            .into_iter()
            .enumerate()
            .map(|(index, (dc, ac))| {
                let dc_diff = self.dc_diff(dc);
                trace!(block = index, dc, dc_diff, codes = ac.len(), "entropy coded block");
                BlockSymbols { dc_diff, ac }
            })
            .collect();

        let stream = SymbolStream::new(symbols);
        debug!(
            blocks = stream.len(),
            ac_codes = stream.ac_code_count(),
            "entropy coding finished"
        );
        Ok(stream)
    }
}

fn bypass_error() -> OnasError {
    OnasError::UnsupportedOperation(
        "entropy coding requires quantized 8x8 DCT blocks".to_string(),
    )
}
