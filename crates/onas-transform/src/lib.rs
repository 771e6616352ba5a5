//! Block transform stages for the onas codec
//!
//! This crate implements block partitioning, the DCT (direct reference and
//! separable forms) behind a pluggable transform trait, quantization and
//! zigzag sequencing.

pub mod block;
pub mod dct;
pub mod quantization;
pub mod transform;
pub mod zigzag;

pub use block::*;
pub use dct::*;
pub use quantization::*;
pub use transform::*;
pub use zigzag::*;
