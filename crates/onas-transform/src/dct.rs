//! DCT (Discrete Cosine Transform) implementation
//!
//! Orthonormal 2-D DCT-II (forward) and DCT-III (inverse) over blocks of any
//! shape. Each axis of length `n` uses the basis scale `1/sqrt(n)` for index 0
//! and `sqrt(2/n)` for all other indices.
//!
//! [`dct2d_forward_direct`] and [`dct2d_inverse_direct`] evaluate the defining
//! double sum in O(n^4) and serve as the numerical reference. [`DctBasis`]
//! computes the same result separably (rows, then columns) from a precomputed
//! cosine table in O(n^3).

use onas_core::consts::STANDARD_BLOCK_SIZE;
use std::f64::consts::PI;
use std::sync::Arc;

lazy_static::lazy_static! {
    static ref STANDARD_BASIS: Arc<DctBasis> = Arc::new(DctBasis::new(STANDARD_BLOCK_SIZE));
}

/// Orthonormal scale of basis function `u` for an axis of length `n`
#[inline]
pub fn basis_scale(u: usize, n: usize) -> f64 {
    if u == 0 {
        1.0 / (n as f64).sqrt()
    } else {
        (2.0 / n as f64).sqrt()
    }
}

#[inline]
fn cosine(x: usize, u: usize, n: usize) -> f64 {
    (((2 * x + 1) * u) as f64 * PI / (2 * n) as f64).cos()
}

/// Direct 2-D DCT-II of a `rows`×`cols` row-major block
pub fn dct2d_forward_direct(input: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    assert_eq!(input.len(), rows * cols);
    let mut output = vec![0.0; rows * cols];

    for i in 0..rows {
        for j in 0..cols {
            let mut sum = 0.0;
            for k in 0..rows {
                for l in 0..cols {
                    sum += input[k * cols + l] * cosine(k, i, rows) * cosine(l, j, cols);
                }
            }
            output[i * cols + j] = basis_scale(i, rows) * basis_scale(j, cols) * sum;
        }
    }

    output
}

/// Direct 2-D DCT-III of a `rows`×`cols` row-major coefficient block
pub fn dct2d_inverse_direct(input: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    assert_eq!(input.len(), rows * cols);
    let mut output = vec![0.0; rows * cols];

    for k in 0..rows {
        for l in 0..cols {
            let mut sum = 0.0;
            for i in 0..rows {
                for j in 0..cols {
                    sum += basis_scale(i, rows)
                        * basis_scale(j, cols)
                        * input[i * cols + j]
                        * cosine(k, i, rows)
                        * cosine(l, j, cols);
                }
            }
            output[k * cols + l] = sum;
        }
    }

    output
}

/// Scaled cosine table for one axis length
#[derive(Debug, Clone, PartialEq)]
pub struct DctBasis {
    n: usize,
    /// `table[u * n + x] = scale(u) * cos((2x + 1) u pi / 2n)`
    table: Vec<f64>,
}

impl DctBasis {
    pub fn new(n: usize) -> Self {
        let mut table = vec![0.0; n * n];
        for u in 0..n {
            let scale = basis_scale(u, n);
            for x in 0..n {
                table[u * n + x] = scale * cosine(x, u, n);
            }
        }
        Self { n, table }
    }

    /// Shared basis for `n`; the standard 8-point table is built once
    pub fn shared(n: usize) -> Arc<DctBasis> {
        if n == STANDARD_BLOCK_SIZE {
            Arc::clone(&STANDARD_BASIS)
        } else {
            Arc::new(DctBasis::new(n))
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// 1-D DCT-II of `n` values read with `stride`, written with `stride`
    #[inline]
    fn forward_1d(&self, input: &[f64], output: &mut [f64], offset: usize, stride: usize) {
        let n = self.n;
        for u in 0..n {
            let basis = &self.table[u * n..(u + 1) * n];
            let mut sum = 0.0;
            for (x, b) in basis.iter().enumerate() {
                sum += input[offset + x * stride] * b;
            }
            output[offset + u * stride] = sum;
        }
    }

    /// 1-D DCT-III of `n` values read with `stride`, written with `stride`
    #[inline]
    fn inverse_1d(&self, input: &[f64], output: &mut [f64], offset: usize, stride: usize) {
        let n = self.n;
        for x in 0..n {
            let mut sum = 0.0;
            for u in 0..n {
                sum += input[offset + u * stride] * self.table[u * n + x];
            }
            output[offset + x * stride] = sum;
        }
    }
}

/// Separable 2-D DCT-II: `row_basis` spans the columns of each row
pub fn dct2d_forward(input: &[f64], row_basis: &DctBasis, col_basis: &DctBasis) -> Vec<f64> {
    let rows = col_basis.len();
    let cols = row_basis.len();
    assert_eq!(input.len(), rows * cols);

    let mut temp = vec![0.0; rows * cols];
    for r in 0..rows {
        row_basis.forward_1d(input, &mut temp, r * cols, 1);
    }

    let mut output = vec![0.0; rows * cols];
    for c in 0..cols {
        col_basis.forward_1d(&temp, &mut output, c, cols);
    }
    output
}

/// Separable 2-D DCT-III, the exact inverse of [`dct2d_forward`]
pub fn dct2d_inverse(input: &[f64], row_basis: &DctBasis, col_basis: &DctBasis) -> Vec<f64> {
    let rows = col_basis.len();
    let cols = row_basis.len();
    assert_eq!(input.len(), rows * cols);

    let mut temp = vec![0.0; rows * cols];
    for c in 0..cols {
        col_basis.inverse_1d(input, &mut temp, c, cols);
    }

    let mut output = vec![0.0; rows * cols];
    for r in 0..rows {
        row_basis.inverse_1d(&temp, &mut output, r * cols, 1);
    }
    output
}
