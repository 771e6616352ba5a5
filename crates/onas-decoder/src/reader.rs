//! Parsing of the serialized symbol stream

use onas_bitstream::{AcCode, BitReader, BlockSymbols, StreamHeader, SymbolStream, MIN_BLOCK_BITS};
use onas_core::{OnasError, OnasResult};
use tracing::debug;

/// Read a header and `block_count` blocks of symbols from `bytes`
///
/// `ac_len` is the number of AC coefficients per block; a block whose codes
/// would overflow it is rejected. So is a header announcing more blocks than
/// the payload has room for.
pub fn read_stream(
    bytes: &[u8],
    block_count: impl FnOnce(&StreamHeader) -> OnasResult<usize>,
    ac_len: usize,
) -> OnasResult<(StreamHeader, SymbolStream)> {
    let mut reader = bytes;
    let header = StreamHeader::read(&mut reader)?;
    let block_count = block_count(&header)?;

    let payload_bits = reader.len().saturating_mul(8);
    match block_count.checked_mul(MIN_BLOCK_BITS) {
        Some(needed) if needed <= payload_bits => {}
        _ => {
            return Err(OnasError::InvalidBitstream(format!(
                "{} blocks cannot fit in {} payload bytes",
                block_count,
                reader.len()
            )))
        }
    }

    let mut bit_reader = BitReader::new(reader);
    let mut blocks = Vec::with_capacity(block_count);
    for index in 0..block_count {
        blocks.push(read_block(&mut bit_reader, ac_len).map_err(|e| match e {
            OnasError::InvalidBitstream(msg) => {
                OnasError::InvalidBitstream(format!("block {}: {}", index, msg))
            }
            other => other,
        })?);
    }

    debug!(blocks = blocks.len(), "symbol stream parsed");
    Ok((header, SymbolStream::new(blocks)))
}

fn read_block(reader: &mut BitReader<&[u8]>, ac_len: usize) -> OnasResult<BlockSymbols> {
    let dc_diff = reader.read_amplitude()?;

    let mut ac = Vec::new();
    let mut position = 0usize;
    loop {
        let code = reader.read_ac()?;
        if code.symbol.is_eob() {
            ac.push(AcCode::EOB);
            break;
        }

        position += code.symbol.run as usize + 1;
        if position > ac_len {
            return Err(OnasError::InvalidBitstream(format!(
                "AC codes run past {} coefficients",
                ac_len
            )));
        }
        ac.push(code);
    }

    Ok(BlockSymbols { dc_diff, ac })
}
