//! Quality metrics comparing an original grid with its reconstruction

use crate::consts::MAX_SAMPLE_VALUE;
use crate::{OnasResult, SampleGrid};
use std::collections::BTreeMap;

/// Metric name used for PSNR in metric records
pub const PSNR_NAME: &str = "PSNR (dB)";

/// Metric name used for SNR in metric records
pub const SNR_NAME: &str = "SNR (dB)";

/// Named metric values, ordered by name
pub type Metrics = BTreeMap<&'static str, f64>;

/// Mean squared error between two grids of the same shape
pub fn mse(original: &SampleGrid, coded: &SampleGrid) -> OnasResult<f64> {
    original.ensure_same_shape(coded)?;

    let sum: f64 = original
        .samples()
        .iter()
        .zip(coded.samples())
        .map(|(o, c)| (o - c) * (o - c))
        .sum();

    Ok(sum / original.samples().len() as f64)
}

/// Peak signal-to-noise ratio in dB, `+inf` for identical grids
pub fn psnr(original: &SampleGrid, coded: &SampleGrid) -> OnasResult<f64> {
    let mse = mse(original, coded)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (MAX_SAMPLE_VALUE * MAX_SAMPLE_VALUE / mse).log10())
}

/// Signal-to-noise ratio in dB: signal energy over error energy
pub fn snr(original: &SampleGrid, coded: &SampleGrid) -> OnasResult<f64> {
    original.ensure_same_shape(coded)?;

    let (signal, noise) = original
        .samples()
        .iter()
        .zip(coded.samples())
        .fold((0.0, 0.0), |(signal, noise), (o, c)| {
            (signal + o * o, noise + (o - c) * (o - c))
        });

    if noise == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (signal / noise).log10())
}

/// Every available metric keyed by display name
pub fn execute_all_metrics(original: &SampleGrid, coded: &SampleGrid) -> OnasResult<Metrics> {
    let mut metrics = Metrics::new();
    metrics.insert(PSNR_NAME, psnr(original, coded)?);
    metrics.insert(SNR_NAME, snr(original, coded)?);
    Ok(metrics)
}
