//! Reassembly of reconstructed blocks into a grid

use onas_core::{Dimensions, OnasResult, SampleGrid};
use onas_transform::{insert_block, Block};

/// Write each block at its recorded origin into a new grid of `dimensions`
///
/// Blocks are truncated exactly as the partitioner cut them, so edge blocks
/// write back only the rows and columns they cover.
pub fn reassemble(blocks: &[Block<f64>], dimensions: Dimensions) -> OnasResult<SampleGrid> {
    let mut grid = SampleGrid::new(dimensions)?;
    for block in blocks {
        insert_block(&mut grid, block)?;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onas_core::OnasError;
    use onas_transform::partition;

    #[test]
    fn test_reassemble_edge_blocks() {
        let samples = (0..100).map(|i| i as f64).collect();
        let grid = SampleGrid::from_vec(10, 10, samples).unwrap();
        let blocks = partition(&grid, 8).unwrap();
        assert_eq!(blocks.len(), 4);

        let rebuilt = reassemble(&blocks, grid.dimensions()).unwrap();
        assert_eq!(rebuilt.dimensions(), Dimensions::new(10, 10));
        assert_eq!(rebuilt, grid);
    }

    #[test]
    fn test_reassemble_into_smaller_grid_fails() {
        let grid = SampleGrid::from_vec(16, 16, vec![1.0; 256]).unwrap();
        let blocks = partition(&grid, 8).unwrap();
        assert!(matches!(
            reassemble(&blocks, Dimensions::new(10, 10)),
            Err(OnasError::DimensionMismatch { .. })
        ));
    }
}
