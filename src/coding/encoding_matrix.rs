//! Encoding-matrix construction
//!
//! Builds the `(N+K) x N` systematic / parity / Cauchy matrix: the top `N`
//! rows are the identity (so the first `N` coded blocks are just the data
//! blocks, unchanged), row `N` is the single all-ones parity row, and the
//! remaining `K-1` rows are a Cauchy construction which, combined with the
//! identity and parity rows, makes every `N x N` sub-matrix invertible
//! (the MDS property).
//!
//! Grounded in `IDA::EncodeMatrix` from the original HoloStor source.

use crate::coding::galois::GfElement;
use crate::coding::matrix::Matrix;

/// Build the `(N+K) x N` encoding matrix for a reliability group of `n`
/// data blocks and `k` ECC blocks.
///
/// `alpha(x) = x` for the `x`-th Cauchy row (`x` in `0..k-1`), and
/// `beta(j) = j + (k-1)` for data column `j`. Row `n` is the parity row
/// of all ones; rows `0..n` are the identity.
pub fn build_encoding_matrix(n: usize, k: usize) -> Matrix {
    let total = n + k;
    let mut m = Matrix::zeros(total, n);

    for i in 0..n {
        m.set(i, i, GfElement::ONE);
    }

    for j in 0..n {
        m.set(n, j, GfElement::ONE);
    }

    let cauchy_start = n + 1;
    let cauchy_rows = k - 1;
    for i in cauchy_start..total {
        let x = GfElement::new((i - cauchy_start) as u8);
        for j in 0..n {
            let y = GfElement::new((j + cauchy_rows) as u8);
            let denom = x + y;
            m.set(i, j, GfElement::ONE / denom);
        }
    }

    m
}
