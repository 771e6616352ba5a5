//! Block partitioning
//!
//! Images are split into non-overlapping square blocks in raster order. Blocks
//! on the right and bottom edges are truncated to the remaining columns/rows;
//! they are never padded with samples that do not exist in the grid.

use onas_core::{Dimensions, OnasError, OnasResult, SampleGrid};

/// Position and shape of one block inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRegion {
    /// Origin row in the source grid
    pub row: usize,
    /// Origin column in the source grid
    pub col: usize,
    /// Actual number of rows (smaller than `size` on the bottom edge)
    pub rows: usize,
    /// Actual number of columns (smaller than `size` on the right edge)
    pub cols: usize,
    /// Nominal block size
    pub size: usize,
}

impl BlockRegion {
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_truncated(&self) -> bool {
        self.rows != self.size || self.cols != self.size
    }
}

/// Raster layout of blocks over a grid of given dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    dimensions: Dimensions,
    size: usize,
}

impl BlockLayout {
    pub fn new(dimensions: Dimensions, size: usize) -> OnasResult<Self> {
        if size == 0 {
            return Err(OnasError::InvalidConfiguration(
                "block size must be positive".to_string(),
            ));
        }
        if dimensions.is_empty() {
            return Err(OnasError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        Ok(Self { dimensions, size })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn block_size(&self) -> usize {
        self.size
    }

    /// Number of block columns
    pub fn blocks_x(&self) -> usize {
        (self.dimensions.width as usize).div_ceil(self.size)
    }

    /// Number of block rows
    pub fn blocks_y(&self) -> usize {
        (self.dimensions.height as usize).div_ceil(self.size)
    }

    pub fn block_count(&self) -> usize {
        self.blocks_x().saturating_mul(self.blocks_y())
    }

    /// Region of the block at raster `index`
    pub fn region(&self, index: usize) -> BlockRegion {
        let row = (index / self.blocks_x()) * self.size;
        let col = (index % self.blocks_x()) * self.size;

        BlockRegion {
            row,
            col,
            rows: self.size.min(self.dimensions.height as usize - row),
            cols: self.size.min(self.dimensions.width as usize - col),
            size: self.size,
        }
    }

    /// All regions, outer loop over rows, inner loop over columns
    pub fn regions(&self) -> impl Iterator<Item = BlockRegion> + '_ {
        (0..self.block_count()).map(move |i| self.region(i))
    }
}

/// A rectangular block of values tagged with its region
#[derive(Debug, Clone, PartialEq)]
pub struct Block<T> {
    pub region: BlockRegion,
    /// Row-major values, `region.rows * region.cols` long
    pub data: Vec<T>,
}

impl<T: Copy> Block<T> {
    pub fn new(region: BlockRegion, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), region.len());
        Self { region, data }
    }

    pub fn rows(&self) -> usize {
        self.region.rows
    }

    pub fn cols(&self) -> usize {
        self.region.cols
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.region.cols + col]
    }

    /// Same region, values mapped one by one
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Block<U> {
        Block {
            region: self.region,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Values placed in the top-left corner of a `size`×`size` square of `fill`
    pub fn to_square(&self, fill: T) -> Vec<T> {
        let size = self.region.size;
        let mut square = vec![fill; size * size];
        for r in 0..self.rows() {
            let src = &self.data[r * self.cols()..(r + 1) * self.cols()];
            square[r * size..r * size + self.cols()].copy_from_slice(src);
        }
        square
    }

    /// Inverse of [`Block::to_square`]: crop a square back to `region`
    pub fn from_square(region: BlockRegion, square: &[T]) -> Self {
        let size = region.size;
        let mut data = Vec::with_capacity(region.len());
        for r in 0..region.rows {
            data.extend_from_slice(&square[r * size..r * size + region.cols]);
        }
        Self { region, data }
    }
}

/// Split a grid into blocks of `size` in raster order
pub fn partition(grid: &SampleGrid, size: usize) -> OnasResult<Vec<Block<f64>>> {
    let layout = BlockLayout::new(grid.dimensions(), size)?;
    Ok(layout
        .regions()
        .map(|region| extract_block(grid, region))
        .collect())
}

/// Copy the samples of `region` out of a grid
pub fn extract_block(grid: &SampleGrid, region: BlockRegion) -> Block<f64> {
    let mut data = Vec::with_capacity(region.len());
    for r in 0..region.rows {
        let row = grid.row(region.row + r);
        data.extend_from_slice(&row[region.col..region.col + region.cols]);
    }
    Block { region, data }
}

/// Write a block back at its origin
pub fn insert_block(grid: &mut SampleGrid, block: &Block<f64>) -> OnasResult<()> {
    let region = block.region;
    if region.row + region.rows > grid.height() || region.col + region.cols > grid.width() {
        return Err(OnasError::DimensionMismatch {
            expected: grid.dimensions(),
            actual: Dimensions::new(
                (region.col + region.cols) as u32,
                (region.row + region.rows) as u32,
            ),
        });
    }

    for r in 0..region.rows {
        let dst = &mut grid.row_mut(region.row + r)[region.col..region.col + region.cols];
        dst.copy_from_slice(&block.data[r * region.cols..(r + 1) * region.cols]);
    }
    Ok(())
}
