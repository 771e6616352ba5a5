//! Pluggable block transforms
//!
//! A [`BlockTransform`] maps sample blocks to coefficient blocks of the same
//! region and back. Only the DCT is available; selecting any other
//! [`TransformKind`] fails when the transform is created.

use crate::block::Block;
use crate::dct::{dct2d_forward, dct2d_inverse, DctBasis};
use onas_core::{OnasError, OnasResult, TransformKind};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Forward/inverse transform applied block by block
pub trait BlockTransform: Send + Sync + fmt::Debug {
    /// Which transform this is
    fn kind(&self) -> TransformKind;

    /// Samples to coefficients
    fn forward(&self, block: &Block<f64>) -> Block<f64>;

    /// Coefficients to samples
    fn inverse(&self, coefficients: &Block<f64>) -> Block<f64>;
}

/// Create the transform for `kind` operating on blocks of nominal `block_size`
pub fn create_transform(
    kind: TransformKind,
    block_size: usize,
) -> OnasResult<Box<dyn BlockTransform>> {
    debug!("creating {} transform for {}x{} blocks", kind, block_size, block_size);
    match kind {
        TransformKind::Dct => Ok(Box::new(Dct::new(block_size))),
        TransformKind::Klt | TransformKind::Fft => Err(OnasError::InvalidConfiguration(
            format!("{} transform is not implemented", kind),
        )),
    }
}

/// Orthonormal separable 2-D DCT
#[derive(Debug, Clone)]
pub struct Dct {
    basis: Arc<DctBasis>,
}

impl Dct {
    pub fn new(block_size: usize) -> Self {
        Self {
            basis: DctBasis::shared(block_size),
        }
    }

    /// Basis for an axis of length `n`; edge blocks need shorter ones
    fn basis(&self, n: usize) -> Arc<DctBasis> {
        if n == self.basis.len() {
            Arc::clone(&self.basis)
        } else {
            DctBasis::shared(n)
        }
    }
}

impl BlockTransform for Dct {
    fn kind(&self) -> TransformKind {
        TransformKind::Dct
    }

    fn forward(&self, block: &Block<f64>) -> Block<f64> {
        let data = dct2d_forward(
            &block.data,
            &self.basis(block.cols()),
            &self.basis(block.rows()),
        );
        Block::new(block.region, data)
    }

    fn inverse(&self, coefficients: &Block<f64>) -> Block<f64> {
        let data = dct2d_inverse(
            &coefficients.data,
            &self.basis(coefficients.cols()),
            &self.basis(coefficients.rows()),
        );
        Block::new(coefficients.region, data)
    }
}
