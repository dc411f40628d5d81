//! Recovery-matrix construction ("IDA" in the original HoloStor source)
//!
//! Given a fault mask, picks the `N` lowest-numbered surviving rows of the
//! encoding matrix, inverts that selection, and left-multiplies the full
//! encoding matrix by the inverse. The result is a `(N+K) x N` matrix whose
//! row `i` expresses block `i` (present or absent) as a linear combination
//! of the chosen surviving blocks. Reading off the rows named by the
//! fault mask yields exactly the rebuild coefficients needed.
//!
//! Grounded in `IDA::GenerateCoding` from the original HoloStor source.

use crate::coding::matrix::Matrix;

/// The result of selecting survivors and re-deriving the coding matrix for
/// a given fault mask.
pub struct RecoveryMatrix {
    /// `(N+K) x N` matrix: row `i` rebuilds block `i` from the columns
    /// named by `col_id`.
    pub coding: Matrix,
    /// The `N` lowest-numbered surviving block indices used as the basis,
    /// in ascending order. Column `j` of `coding` corresponds to block
    /// `col_id[j]`.
    pub col_id: Vec<usize>,
}

/// Build the recovery matrix for `fault_mask` against an `(N+K) x N`
/// encoding matrix. Returns `None` if the surviving rows picked do not
/// form an invertible `N x N` basis (should not happen for a valid
/// Cauchy-extended encoding matrix with at most `K` faults, since it is
/// MDS by construction).
pub fn build_recovery_matrix(encoding_matrix: &Matrix, n: usize, fault_mask: u32) -> Option<RecoveryMatrix> {
    let total = encoding_matrix.rows();
    let mut col_id = Vec::with_capacity(n);
    for i in 0..total {
        if fault_mask & (1 << i) != 0 {
            continue;
        }
        col_id.push(i);
        if col_id.len() == n {
            break;
        }
    }
    if col_id.len() != n {
        return None;
    }

    let basis = encoding_matrix.select_rows(&col_id);
    let basis_inv = basis.inverse()?;
    let coding = encoding_matrix.mul(&basis_inv);

    Some(RecoveryMatrix { coding, col_id })
}
