//! Bit unpacking for the symbol payload
//!
//! Mirror of [`BitWriter`](crate::BitWriter). Composite fields are validated as
//! they are read, so a corrupt payload surfaces as `InvalidBitstream` rather
//! than as a wrong coefficient.

use crate::symbols::{
    check_symbol, checked_amplitude, AcCode, RunSize, MAX_SIZE, RUN_BITS, SIZE_BITS,
};
use onas_core::{OnasError, OnasResult};
use std::io::Read;

/// Widest field accepted by [`BitReader::read_bits`]
const MAX_FIELD_BITS: usize = 32;

/// Reads variable-width fields from a byte source
pub struct BitReader<R: Read> {
    reader: R,
    pending: u64,
    pending_bits: usize,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Read a `num_bits` wide field
    pub fn read_bits(&mut self, num_bits: usize) -> OnasResult<u32> {
        if num_bits > MAX_FIELD_BITS {
            return Err(OnasError::InvalidParameter(format!(
                "field of {} bits is wider than {}",
                num_bits, MAX_FIELD_BITS
            )));
        }
        if num_bits == 0 {
            return Ok(0);
        }

        while self.pending_bits < num_bits {
            let mut byte = [0u8; 1];
            if self.reader.read(&mut byte)? == 0 {
                return Err(OnasError::InvalidBitstream(
                    "unexpected end of stream".to_string(),
                ));
            }
            self.pending |= u64::from(byte[0]) << self.pending_bits;
            self.pending_bits += 8;
        }

        let value = self.pending & (u64::MAX >> (64 - num_bits));
        self.pending >>= num_bits;
        self.pending_bits -= num_bits;
        Ok(value as u32)
    }

    /// Size category field, rejected above [`MAX_SIZE`]
    pub fn read_size(&mut self) -> OnasResult<u8> {
        let size = self.read_bits(SIZE_BITS)? as u8;
        if size > MAX_SIZE {
            return Err(OnasError::InvalidBitstream(format!(
                "size category {} out of range",
                size
            )));
        }
        Ok(size)
    }

    /// Size-prefixed amplitude, as written by `BitWriter::write_amplitude`
    pub fn read_amplitude(&mut self) -> OnasResult<i32> {
        let size = self.read_size()?;
        let amplitude = self.read_bits(size as usize)?;
        checked_amplitude(size, amplitude)
    }

    /// One AC code, as written by `BitWriter::write_ac`
    pub fn read_ac(&mut self) -> OnasResult<AcCode> {
        let run = self.read_bits(RUN_BITS)? as u8;
        let size = self.read_size()?;
        let symbol = RunSize::new(run, size);
        check_symbol(symbol)?;

        let amplitude = self.read_bits(size as usize)?;
        checked_amplitude(size, amplitude)?;
        Ok(AcCode { symbol, amplitude })
    }
}
