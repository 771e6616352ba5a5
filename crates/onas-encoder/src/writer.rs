//! Serialization of the symbol stream to bytes
//!
//! Layout after the [`StreamHeader`]: for each block, the DC difference as a
//! size field followed by its amplitude bits, then each AC code as run field,
//! size field and amplitude bits. Fields are packed least-significant bit first
//! and the final byte is zero padded.

use onas_bitstream::{BitWriter, BlockSymbols, StreamHeader, SymbolStream};
use onas_core::OnasResult;
use std::io::Write;
use tracing::debug;

/// Write the header and every block of `stream`
pub fn write_stream<W: Write>(
    header: &StreamHeader,
    stream: &SymbolStream,
    mut writer: W,
) -> OnasResult<()> {
    header.write(&mut writer)?;

    let mut bit_writer = BitWriter::new(&mut writer);
    for block in &stream.blocks {
        write_block(block, &mut bit_writer)?;
    }
    bit_writer.flush()?;

    debug!(
        blocks = stream.len(),
        payload_bits = bit_writer.bits_written(),
        "symbol stream written"
    );
    Ok(())
}

fn write_block<W: Write>(block: &BlockSymbols, writer: &mut BitWriter<W>) -> OnasResult<()> {
    writer.write_amplitude(block.dc_diff)?;
    block.ac.iter().try_for_each(|code| writer.write_ac(code))
}
