//! Zigzag scanning for transform coefficients
//!
//! Coefficients are visited along anti-diagonals of increasing total
//! frequency, alternating direction on each diagonal, so low frequencies come
//! first and likely-zero high frequencies cluster at the end. The order is
//! generated for any block size.

use onas_core::consts::STANDARD_BLOCK_SIZE;

lazy_static::lazy_static! {
    static ref STANDARD_ZIGZAG: ZigZag = ZigZag::new(STANDARD_BLOCK_SIZE);
}

/// Standard 8×8 zigzag scan order (scan index → row-major position)
pub const ZIGZAG_8X8: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Generate the zigzag order of an `n`×`n` block as row-major positions
pub fn zigzag_order(n: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(n * n);
    if n == 0 {
        return order;
    }

    for diagonal in 0..(2 * n - 1) {
        let low = diagonal.saturating_sub(n - 1);
        let high = diagonal.min(n - 1);

        if diagonal % 2 == 0 {
            // Even diagonals run bottom-left to top-right
            for row in (low..=high).rev() {
                order.push(row * n + (diagonal - row));
            }
        } else {
            for row in low..=high {
                order.push(row * n + (diagonal - row));
            }
        }
    }

    order
}

/// Zigzag sequencer for one block size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZigZag {
    size: usize,
    order: Vec<usize>,
}

impl ZigZag {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            order: zigzag_order(size),
        }
    }

    /// The shared 8×8 sequencer
    pub fn standard() -> &'static ZigZag {
        &STANDARD_ZIGZAG
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Scan index → row-major position
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// `(row, col)` visited at scan index `index`
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        let pos = self.order[index];
        (pos / self.size, pos % self.size)
    }

    /// Reorder a row-major square block into scan order
    pub fn flatten<T: Copy>(&self, block: &[T]) -> Vec<T> {
        assert_eq!(block.len(), self.order.len());
        self.order.iter().map(|&pos| block[pos]).collect()
    }

    /// Restore a row-major square block from scan order
    pub fn unflatten<T: Copy + Default>(&self, sequence: &[T]) -> Vec<T> {
        assert_eq!(sequence.len(), self.order.len());
        let mut block = vec![T::default(); sequence.len()];
        for (&value, &pos) in sequence.iter().zip(&self.order) {
            block[pos] = value;
        }
        block
    }
}
