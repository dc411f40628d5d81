//! Dense row-major matrix over `GF(2^4)`
//!
//! Mirrors a runtime `Matrix` (a `Vec<GfElement>` plus dimensions) rather
//! than a const-generic, compile-time-sized variant, since this crate's
//! matrices are built at runtime from `(N, K)`, so their size is not known
//! until then.
//!
//! The original C++ `matrix<Field>` carries a distinguished *Nil* state
//! (a null backing array) that propagates through arithmetic. Rust's
//! `Option`/`Result` make that state explicit instead: construction can
//! fail, and every fallible operation returns a `Result` rather than a
//! silently-Nil matrix.

use crate::coding::galois::GfElement;

/// A dense, row-major matrix of `GF(2^4)` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<GfElement>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// A zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![GfElement::ZERO; rows * cols],
            rows,
            cols,
        }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.set(i, i, GfElement::ONE);
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> GfElement {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: GfElement) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[GfElement] {
        debug_assert!(row < self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [GfElement] {
        debug_assert!(row < self.rows);
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        debug_assert!(a < self.rows && b < self.rows);
        let cols = self.cols;
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.data.split_at_mut(hi * cols);
        left[lo * cols..(lo + 1) * cols].swap_with_slice(&mut right[0..cols]);
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j));
            }
        }
        out
    }

    /// Elementwise sum. Panics (debug) on dimension mismatch.
    pub fn add(&self, rhs: &Matrix) -> Matrix {
        debug_assert_eq!(self.dims(), rhs.dims());
        let mut out = self.clone();
        for (a, b) in out.data.iter_mut().zip(rhs.data.iter()) {
            *a += *b;
        }
        out
    }

    /// Matrix product `self * rhs`. Panics (debug) if inner dimensions
    /// disagree.
    pub fn mul(&self, rhs: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols, rhs.rows);
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a.is_zero() {
                    continue;
                }
                for j in 0..rhs.cols {
                    let prod = a * rhs.get(k, j);
                    let cur = out.get(i, j);
                    out.set(i, j, cur + prod);
                }
            }
        }
        out
    }

    /// Build a new matrix keeping only the given row indices, in order.
    pub fn select_rows(&self, rows: &[usize]) -> Matrix {
        let mut out = Matrix::zeros(rows.len(), self.cols);
        for (dst, &src) in rows.iter().enumerate() {
            out.row_mut(dst).copy_from_slice(self.row(src));
        }
        out
    }

    /// Gauss-Jordan inverse via an augmented `[A | I]` matrix with row
    /// pivoting. Returns `None` if the matrix is singular (no nonzero
    /// pivot can be found in some column) or non-square.
    pub fn inverse(&self) -> Option<Matrix> {
        if !self.is_square() {
            return None;
        }
        let n = self.rows;
        let mut aug = Matrix::zeros(n, 2 * n);
        for i in 0..n {
            for j in 0..n {
                aug.set(i, j, self.get(i, j));
            }
            aug.set(i, n + i, GfElement::ONE);
        }

        for k in 0..n {
            if aug.get(k, k).is_zero() {
                let pivot = (k + 1..n).find(|&r| !aug.get(r, k).is_zero())?;
                aug.swap_rows(k, pivot);
            }

            let pivot_val = aug.get(k, k);
            let inv_pivot = GfElement::ONE / pivot_val;
            for j in 0..2 * n {
                let scaled = aug.get(k, j) * inv_pivot;
                aug.set(k, j, scaled);
            }

            for i in 0..n {
                if i == k {
                    continue;
                }
                let scale = aug.get(i, k);
                if scale.is_zero() {
                    continue;
                }
                for j in 0..2 * n {
                    let v = aug.get(i, j) - scale * aug.get(k, j);
                    aug.set(i, j, v);
                }
            }
        }

        let mut inv = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                inv.set(i, j, aug.get(i, n + j));
            }
        }
        Some(inv)
    }

    /// Whether the matrix has no inverse.
    pub fn is_singular(&self) -> bool {
        self.inverse().is_none()
    }

    /// Determinant via the same Gauss-Jordan elimination as [`Self::inverse`],
    /// without forming the augmented inverse half. `None` for a non-square
    /// matrix. In characteristic 2 there is no sign flip on row swaps, so
    /// the determinant is simply the product of the pivots actually used
    /// (zero if elimination ever fails to find one).
    pub fn determinant(&self) -> Option<GfElement> {
        if !self.is_square() {
            return None;
        }
        let n = self.rows;
        let mut work = self.clone();
        let mut det = GfElement::ONE;

        for k in 0..n {
            if work.get(k, k).is_zero() {
                match (k + 1..n).find(|&r| !work.get(r, k).is_zero()) {
                    Some(pivot) => work.swap_rows(k, pivot),
                    None => return Some(GfElement::ZERO),
                }
            }
            let pivot_val = work.get(k, k);
            det = det * pivot_val;
            for i in (k + 1)..n {
                let scale = work.get(i, k);
                if scale.is_zero() {
                    continue;
                }
                let factor = scale / pivot_val;
                for j in k..n {
                    let v = work.get(i, j) - factor * work.get(k, j);
                    work.set(i, j, v);
                }
            }
        }
        Some(det)
    }
}
