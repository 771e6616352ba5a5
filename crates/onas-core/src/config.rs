//! Codec configuration

use crate::consts::{DEFAULT_QUANTIZATION_FACTOR, MAX_BLOCK_SIZE, STANDARD_BLOCK_SIZE};
use crate::{OnasError, OnasResult};
use std::fmt;
use std::str::FromStr;

/// Block transform selected for the direct/inverse transform stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformKind {
    /// Discrete Cosine Transform (type II forward, type III inverse)
    #[default]
    Dct,
    /// Karhunen-Loève Transform
    Klt,
    /// Fourier transform
    Fft,
}

impl TransformKind {
    pub const ALL: [TransformKind; 3] = [TransformKind::Dct, TransformKind::Klt, TransformKind::Fft];

    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Dct => "DCT",
            TransformKind::Klt => "KLT",
            TransformKind::Fft => "FFT",
        }
    }

    /// Whether a block transform exists for this kind
    pub fn is_implemented(&self) -> bool {
        matches!(self, TransformKind::Dct)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = OnasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OnasError::InvalidConfiguration(format!("unknown transform '{}'", s)))
    }
}

/// Immutable codec configuration passed into every pipeline call
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Block transform
    pub transform: TransformKind,
    /// Multiplier applied to every quantization table entry
    pub quantization_factor: f64,
    /// Side length of the square blocks
    pub block_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            transform: TransformKind::Dct,
            quantization_factor: DEFAULT_QUANTIZATION_FACTOR,
            block_size: STANDARD_BLOCK_SIZE,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(mut self, transform: TransformKind) -> Self {
        self.transform = transform;
        self
    }

    pub fn quantization_factor(mut self, factor: f64) -> Self {
        self.quantization_factor = factor;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Check every field, rejecting values the pipeline cannot run with
    pub fn validate(&self) -> OnasResult<()> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(OnasError::InvalidConfiguration(format!(
                "block size must be in 1..={}, got {}",
                MAX_BLOCK_SIZE, self.block_size
            )));
        }
        if !self.quantization_factor.is_finite() || self.quantization_factor <= 0.0 {
            return Err(OnasError::InvalidConfiguration(format!(
                "quantization factor must be a positive number, got {}",
                self.quantization_factor
            )));
        }
        if !self.transform.is_implemented() {
            return Err(OnasError::InvalidConfiguration(format!(
                "{} transform is not implemented",
                self.transform
            )));
        }
        Ok(())
    }

    /// Standard mode: 8x8 blocks with the DCT
    ///
    /// Quantization and entropy coding are only defined in standard mode.
    pub fn is_standard(&self) -> bool {
        self.block_size == STANDARD_BLOCK_SIZE && self.transform == TransformKind::Dct
    }
}
