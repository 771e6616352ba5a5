//! Run-length / size symbols produced by the entropy coder
//!
//! Every non-zero AC coefficient becomes a `(run, size)` pair, where `run` counts
//! the zeros skipped before it and `size` is the bit length of its magnitude, plus
//! `size` amplitude bits. Negative values are stored as the one's complement of
//! their magnitude so the top amplitude bit doubles as the sign.

use onas_core::{OnasError, OnasResult};
use std::fmt;

/// Longest zero run a single symbol can express
pub const MAX_RUN: u8 = 15;

/// Largest magnitude category (bit length of an `i32` magnitude)
pub const MAX_SIZE: u8 = 32;

/// Width of the run field when serialized
pub const RUN_BITS: usize = 4;

/// Width of the size field when serialized
pub const SIZE_BITS: usize = 6;

/// Fewest bits a serialized block can take: a zero DC size and a bare EOB
pub const MIN_BLOCK_BITS: usize = SIZE_BITS + RUN_BITS + SIZE_BITS;

/// A `(run, size)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunSize {
    pub run: u8,
    pub size: u8,
}

impl RunSize {
    /// End of block: every remaining AC coefficient is zero
    pub const EOB: RunSize = RunSize { run: 0, size: 0 };

    /// Zero run length: sixteen zeros with no value attached
    pub const ZRL: RunSize = RunSize {
        run: MAX_RUN,
        size: 0,
    };

    pub fn new(run: u8, size: u8) -> Self {
        Self { run, size }
    }

    pub fn is_eob(&self) -> bool {
        *self == Self::EOB
    }

    pub fn is_zrl(&self) -> bool {
        *self == Self::ZRL
    }
}

impl fmt::Display for RunSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.run, self.size)
    }
}

/// One AC symbol and its amplitude bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcCode {
    pub symbol: RunSize,
    pub amplitude: u32,
}

impl AcCode {
    pub const EOB: AcCode = AcCode {
        symbol: RunSize::EOB,
        amplitude: 0,
    };

    pub const ZRL: AcCode = AcCode {
        symbol: RunSize::ZRL,
        amplitude: 0,
    };

    /// Code a non-zero coefficient preceded by `run` zeros
    pub fn value(run: u8, coefficient: i32) -> Self {
        let (size, amplitude) = encode_amplitude(coefficient);
        Self {
            symbol: RunSize::new(run, size),
            amplitude,
        }
    }

    /// The coefficient carried by this code (zero for EOB/ZRL)
    pub fn coefficient(&self) -> i32 {
        decode_amplitude(self.symbol.size, self.amplitude)
    }
}

/// Symbols for a single block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockSymbols {
    /// DC difference from the previous block in raster order
    pub dc_diff: i32,
    /// AC codes, always terminated by [`AcCode::EOB`]
    pub ac: Vec<AcCode>,
}

/// The complete symbol stream of an image, blocks in raster order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolStream {
    pub blocks: Vec<BlockSymbols>,
}

impl SymbolStream {
    pub fn new(blocks: Vec<BlockSymbols>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn dc_diffs(&self) -> impl Iterator<Item = i32> + '_ {
        self.blocks.iter().map(|b| b.dc_diff)
    }

    /// Total number of AC codes, EOB markers included
    pub fn ac_code_count(&self) -> usize {
        self.blocks.iter().map(|b| b.ac.len()).sum()
    }
}

/// Number of bits needed for the magnitude of `value` (0 for zero)
pub fn bit_length(value: i32) -> u8 {
    (32 - value.unsigned_abs().leading_zeros()) as u8
}

/// Split a value into its size category and amplitude bits
pub fn encode_amplitude(value: i32) -> (u8, u32) {
    let size = bit_length(value);
    let amplitude = if value >= 0 {
        value as u32
    } else {
        // One's complement of the magnitude within `size` bits
        (value as i64 + (1i64 << size) - 1) as u32
    };
    (size, amplitude)
}

/// Inverse of [`encode_amplitude`]
pub fn decode_amplitude(size: u8, amplitude: u32) -> i32 {
    if size == 0 {
        return 0;
    }
    if (amplitude >> (size - 1)) & 1 == 1 {
        amplitude as i32
    } else {
        (amplitude as i64 - (1i64 << size) + 1) as i32
    }
}

/// [`decode_amplitude`] for amplitudes read from an untrusted stream
///
/// A set top bit means a positive value, and no positive `i32` needs 32 bits.
pub fn checked_amplitude(size: u8, amplitude: u32) -> OnasResult<i32> {
    if size > MAX_SIZE || (size < MAX_SIZE && amplitude >> size != 0) {
        return Err(OnasError::InvalidBitstream(format!(
            "amplitude {:#x} does not fit size {}",
            amplitude, size
        )));
    }
    if size == MAX_SIZE && amplitude >> (MAX_SIZE - 1) == 1 {
        return Err(OnasError::InvalidBitstream(format!(
            "amplitude {:#x} overflows a 32-bit coefficient",
            amplitude
        )));
    }
    Ok(decode_amplitude(size, amplitude))
}

/// Check a decoded `(run, size)` pair before its amplitude is read
pub fn check_symbol(symbol: RunSize) -> OnasResult<()> {
    if symbol.run > MAX_RUN || symbol.size > MAX_SIZE {
        return Err(OnasError::InvalidBitstream(format!(
            "symbol {} out of range",
            symbol
        )));
    }
    if symbol.size == 0 && !symbol.is_eob() && !symbol.is_zrl() {
        return Err(OnasError::InvalidBitstream(format!(
            "symbol {} has no value",
            symbol
        )));
    }
    Ok(())
}
