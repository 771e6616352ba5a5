//! Sample grid data structure

use crate::{Dimensions, OnasError, OnasResult, Sample};

/// A single-channel 2-D grid of samples stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    dimensions: Dimensions,
    samples: Vec<f64>,
}

impl SampleGrid {
    /// Create a zero-filled grid
    pub fn new(dimensions: Dimensions) -> OnasResult<Self> {
        check_dimensions(dimensions)?;

        Ok(Self {
            dimensions,
            samples: vec![0.0; dimensions.pixel_count()],
        })
    }

    /// Build a grid from row-major samples of any supported sample type
    pub fn from_samples<T: Sample>(width: u32, height: u32, samples: &[T]) -> OnasResult<Self> {
        Self::from_vec(
            width,
            height,
            samples.iter().map(|s| s.into_f64()).collect(),
        )
    }

    /// Build a grid taking ownership of row-major `f64` samples
    pub fn from_vec(width: u32, height: u32, samples: Vec<f64>) -> OnasResult<Self> {
        let dimensions = Dimensions::new(width, height);
        check_dimensions(dimensions)?;

        if samples.len() != dimensions.pixel_count() {
            return Err(OnasError::InvalidSample(format!(
                "expected {} samples for a {} grid, got {}",
                dimensions.pixel_count(),
                dimensions,
                samples.len()
            )));
        }
        if let Some(pos) = samples.iter().position(|s| !s.is_finite()) {
            return Err(OnasError::InvalidSample(format!(
                "sample {} is not finite",
                pos
            )));
        }

        Ok(Self {
            dimensions,
            samples,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width as usize
    }

    pub fn height(&self) -> usize {
        self.dimensions.height as usize
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.samples[row * self.width() + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let width = self.width();
        self.samples[row * width + col] = value;
    }

    /// One row of samples
    pub fn row(&self, row: usize) -> &[f64] {
        let width = self.width();
        &self.samples[row * width..(row + 1) * width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let width = self.width();
        &mut self.samples[row * width..(row + 1) * width]
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Convert every sample, rounding and clamping for integer types
    pub fn to_samples<T: Sample>(&self) -> Vec<T> {
        self.samples.iter().map(|&s| T::from_f64(s)).collect()
    }

    /// Fail with `DimensionMismatch` unless both grids share a shape
    pub fn ensure_same_shape(&self, other: &SampleGrid) -> OnasResult<()> {
        if self.dimensions != other.dimensions {
            return Err(OnasError::DimensionMismatch {
                expected: self.dimensions,
                actual: other.dimensions,
            });
        }
        Ok(())
    }
}

fn check_dimensions(dimensions: Dimensions) -> OnasResult<()> {
    if dimensions.is_empty() {
        return Err(OnasError::InvalidDimensions {
            width: dimensions.width,
            height: dimensions.height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            SampleGrid::new(Dimensions::new(0, 4)),
            Err(OnasError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_from_u8_samples() {
        let data: Vec<u8> = (0..12).collect();
        let grid = SampleGrid::from_samples(4, 3, &data).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(2, 1), 9.0);
        assert_eq!(grid.row(1), &[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(grid.to_samples::<u8>(), data);
    }

    #[test]
    fn test_sample_count_checked() {
        let result = SampleGrid::from_vec(4, 4, vec![0.0; 15]);
        assert!(matches!(result, Err(OnasError::InvalidSample(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut data = vec![1.0; 4];
        data[2] = f64::NAN;
        assert!(SampleGrid::from_vec(2, 2, data).is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = SampleGrid::new(Dimensions::new(4, 4)).unwrap();
        let b = SampleGrid::new(Dimensions::new(4, 5)).unwrap();
        assert!(matches!(
            a.ensure_same_shape(&b),
            Err(OnasError::DimensionMismatch { .. })
        ));
    }
}
