//! Bitstream reading and writing for the onas codec
//!
//! This crate provides bit-level I/O, the stream preamble and the
//! run-length/amplitude symbol stream produced by the entropy coder.

pub mod bitreader;
pub mod bitwriter;
pub mod header;
pub mod symbols;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use header::{StreamHeader, HEADER_SIZE};
pub use symbols::*;
