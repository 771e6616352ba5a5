//! Stream preamble
//!
//! The symbol payload is preceded by the few parameters a decoder cannot infer:
//! grid width and height (`u32`, little endian) and the quantization factor
//! (`f64`, little endian). There are no markers or segments.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use onas_core::{Dimensions, OnasError, OnasResult};
use std::io::{ErrorKind, Read, Write};

/// Size of the preamble in bytes
pub const HEADER_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamHeader {
    pub dimensions: Dimensions,
    pub quantization_factor: f64,
}

impl StreamHeader {
    pub fn new(dimensions: Dimensions, quantization_factor: f64) -> Self {
        Self {
            dimensions,
            quantization_factor,
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> OnasResult<()> {
        writer.write_u32::<LittleEndian>(self.dimensions.width)?;
        writer.write_u32::<LittleEndian>(self.dimensions.height)?;
        writer.write_f64::<LittleEndian>(self.quantization_factor)?;
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R) -> OnasResult<Self> {
        let header = Self::read_fields(reader).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => {
                OnasError::InvalidBitstream("truncated stream header".to_string())
            }
            _ => OnasError::IoError(e),
        })?;

        if header.dimensions.is_empty() {
            return Err(OnasError::InvalidDimensions {
                width: header.dimensions.width,
                height: header.dimensions.height,
            });
        }
        if !header.quantization_factor.is_finite() || header.quantization_factor <= 0.0 {
            return Err(OnasError::InvalidBitstream(format!(
                "invalid quantization factor {}",
                header.quantization_factor
            )));
        }
        Ok(header)
    }

    fn read_fields<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let width = reader.read_u32::<LittleEndian>()?;
        let height = reader.read_u32::<LittleEndian>()?;
        let quantization_factor = reader.read_f64::<LittleEndian>()?;
        Ok(Self::new(Dimensions::new(width, height), quantization_factor))
    }
}
