//! Core types and utilities for the onas block transform codec
//!
//! This crate provides the fundamental data structures shared by every stage of
//! the codec: sample grids, codec configuration, error types and quality metrics.

pub mod config;
pub mod consts;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod types;

pub use config::{CodecConfig, TransformKind};
pub use error::{OnasError, OnasResult};
pub use grid::*;
pub use metrics::*;
pub use types::*;
