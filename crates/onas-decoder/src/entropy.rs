//! Entropy decoding from the symbol stream back to quantized blocks

use onas_bitstream::{BlockSymbols, SymbolStream, MAX_RUN};
use onas_core::{OnasError, OnasResult};
use onas_transform::{Block, BlockLayout, QuantizedBlock, ZigZag};
use tracing::trace;

/// Rebuild the AC part of a zigzag sequence of `len` coefficients
pub fn run_length_decode(symbols: &BlockSymbols, len: usize) -> OnasResult<Vec<i32>> {
    let mut ac = Vec::with_capacity(len);

    for code in &symbols.ac {
        if code.symbol.is_eob() {
            break;
        }
        if code.symbol.is_zrl() {
            ac.resize(ac.len() + MAX_RUN as usize + 1, 0);
        } else {
            ac.resize(ac.len() + code.symbol.run as usize, 0);
            ac.push(code.coefficient());
        }
        if ac.len() > len {
            return Err(OnasError::InvalidBitstream(format!(
                "block holds more than {} AC coefficients",
                len
            )));
        }
    }

    ac.resize(len, 0);
    Ok(ac)
}

/// Running DC sum, the inverse of the encoder's differencing
#[derive(Debug, Default)]
pub struct EntropyDecoder {
    previous_dc: i32,
}

impl EntropyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// DC value of the next block in raster order
    pub fn dc(&mut self, dc_diff: i32) -> i32 {
        self.previous_dc = self.previous_dc.wrapping_add(dc_diff);
        self.previous_dc
    }

    /// Full zigzag sequence of one block
    pub fn decode_sequence(&mut self, symbols: &BlockSymbols, len: usize) -> OnasResult<Vec<i32>> {
        let mut sequence = Vec::with_capacity(len);
        sequence.push(self.dc(symbols.dc_diff));
        sequence.extend(run_length_decode(symbols, len - 1)?);
        Ok(sequence)
    }

    /// Quantized blocks for every region of `layout`, in raster order
    pub fn decode(
        &mut self,
        stream: &SymbolStream,
        layout: &BlockLayout,
    ) -> OnasResult<Vec<QuantizedBlock>> {
        if stream.len() != layout.block_count() {
            return Err(OnasError::InvalidBitstream(format!(
                "expected {} blocks, stream holds {}",
                layout.block_count(),
                stream.len()
            )));
        }

        let size = layout.block_size();
        let zigzag = if size == ZigZag::standard().size() {
            ZigZag::standard().clone()
        } else {
            ZigZag::new(size)
        };

        stream
            .blocks
            .iter()
            .zip(layout.regions())
            .enumerate()
            .map(|(index, (symbols, region))| {
                let sequence = self.decode_sequence(symbols, size * size)?;
                trace!(block = index, dc = sequence[0], "entropy decoded block");
                let square = zigzag.unflatten(&sequence);
                Ok(QuantizedBlock::Standard(Block::from_square(region, &square)))
            })
            .collect()
    }
}
