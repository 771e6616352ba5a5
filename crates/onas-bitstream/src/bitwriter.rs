//! Bit packing for the symbol payload
//!
//! Fields are packed least-significant bit first. Besides raw fields the writer
//! knows the two composite fields of the payload: a size-prefixed amplitude
//! (used for DC differences) and a full AC code.

use crate::symbols::{encode_amplitude, AcCode, RUN_BITS, SIZE_BITS};
use onas_core::{OnasError, OnasResult};
use std::io::Write;

/// Widest field accepted by [`BitWriter::write_bits`]
const MAX_FIELD_BITS: usize = 32;

/// Packs variable-width fields into a byte sink
pub struct BitWriter<W: Write> {
    writer: W,
    pending: u64,
    pending_bits: usize,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: 0,
            pending_bits: 0,
            bits_written: 0,
        }
    }

    /// Append the low `num_bits` bits of `value`
    pub fn write_bits(&mut self, value: u32, num_bits: usize) -> OnasResult<()> {
        if num_bits > MAX_FIELD_BITS {
            return Err(OnasError::InvalidParameter(format!(
                "field of {} bits is wider than {}",
                num_bits, MAX_FIELD_BITS
            )));
        }
        if num_bits == 0 {
            return Ok(());
        }

        let mask = u64::MAX >> (64 - num_bits);
        self.pending |= (u64::from(value) & mask) << self.pending_bits;
        self.pending_bits += num_bits;
        self.bits_written += num_bits as u64;

        while self.pending_bits >= 8 {
            self.writer.write_all(&[self.pending as u8])?;
            self.pending >>= 8;
            self.pending_bits -= 8;
        }
        Ok(())
    }

    /// Size field followed by the amplitude bits of `value`
    pub fn write_amplitude(&mut self, value: i32) -> OnasResult<()> {
        let (size, amplitude) = encode_amplitude(value);
        self.write_bits(u32::from(size), SIZE_BITS)?;
        self.write_bits(amplitude, size as usize)
    }

    /// Run field, size field and amplitude bits of one AC code
    pub fn write_ac(&mut self, code: &AcCode) -> OnasResult<()> {
        self.write_bits(u32::from(code.symbol.run), RUN_BITS)?;
        self.write_bits(u32::from(code.symbol.size), SIZE_BITS)?;
        self.write_bits(code.amplitude, code.symbol.size as usize)
    }

    /// Payload bits so far, excluding padding
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Zero pad the last byte and flush the sink
    pub fn flush(&mut self) -> OnasResult<()> {
        if self.pending_bits > 0 {
            self.writer.write_all(&[self.pending as u8])?;
            self.pending = 0;
            self.pending_bits = 0;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
