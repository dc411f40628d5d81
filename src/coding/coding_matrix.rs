//! Per-fault-set coding matrix: `Rebuild` and `EncodeDelta`
//!
//! Grounded in `CodingMatrix.cpp`/`.hpp`: a coding matrix names which
//! blocks it rebuilds (`row_id`, in fault-tuple order), which surviving
//! blocks it reads from (`col_id`, ascending), and an `r x c` table of
//! bit-slice multipliers relating the two. `Rebuild` zeroes the target(s)
//! then XOR-accumulates; `EncodeDelta` is the degenerate single-row case
//! used when the only "fault" is a single ECC block being refreshed.

use crate::coding::fault_tuple::FaultTuple;
use crate::coding::galois::GfElement;
use crate::coding::matrix::Matrix;
use crate::coding::recovery_matrix::build_recovery_matrix;
use crate::coding::xor_kernel::{multiply_accumulate, zero_block, Backend};

/// A recovery matrix staged for one specific fault set.
#[derive(Debug, Clone)]
pub struct CodingMatrix {
    /// The faulted block indices this matrix rebuilds, in fault-tuple
    /// (strictly decreasing) order.
    row_id: Vec<usize>,
    /// The surviving block indices used as the basis, ascending.
    col_id: Vec<usize>,
    /// Row-major `row_id.len() x col_id.len()` table of multipliers.
    entries: Vec<GfElement>,
}

impl CodingMatrix {
    /// Build the coding matrix for `fault_mask` against an `(N+K) x N`
    /// encoding matrix. Returns `None` if the fault set cannot be
    /// recovered (more than `K` simultaneous faults, or an otherwise
    /// non-invertible survivor basis).
    pub fn build(fault_mask: u32, encoding_matrix: &Matrix, n: usize) -> Option<Self> {
        let tuple = FaultTuple::from_mask(fault_mask);
        let recovery = build_recovery_matrix(encoding_matrix, n, fault_mask)?;

        let row_id = tuple.as_slice().to_vec();
        let cols = n;
        let mut entries = vec![GfElement::ZERO; row_id.len() * cols];
        for (i, &row) in row_id.iter().enumerate() {
            for j in 0..cols {
                entries[i * cols + j] = recovery.coding.get(row, j);
            }
        }

        Some(CodingMatrix {
            row_id,
            col_id: recovery.col_id,
            entries,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.row_id.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.col_id.len()
    }

    #[inline]
    pub fn row_id(&self) -> &[usize] {
        &self.row_id
    }

    #[inline]
    pub fn col_id(&self) -> &[usize] {
        &self.col_id
    }

    #[inline]
    fn entry(&self, i: usize, j: usize) -> GfElement {
        self.entries[i * self.col_id.len() + j]
    }

    /// Rebuild faulted block(s) from the surviving ones named by
    /// `col_id`.
    ///
    /// If `which` is `Some(block)`, only that single faulted block is
    /// rebuilt (it must be one of `row_id`). If `None`, every block named
    /// by `row_id` is rebuilt.
    ///
    /// # Safety
    /// `blocks[i]` must be a valid, writable pointer to `block_size` bytes
    /// for every `i` that appears in `row_id`, and a valid readable
    /// pointer to `block_size` bytes for every `i` in `col_id`. `blocks`
    /// must have at least as many entries as the largest index used by
    /// either set. `block_size` must be a multiple of
    /// [`crate::coding::xor_kernel::ELEMENT_BYTES`].
    pub unsafe fn rebuild(
        &self,
        blocks: &[*mut u8],
        which: Option<usize>,
        block_size: usize,
        backend: Backend,
    ) {
        for (i, &row) in self.row_id.iter().enumerate() {
            if let Some(target) = which {
                if row != target {
                    continue;
                }
            }

            let dst = std::slice::from_raw_parts_mut(blocks[row], block_size);
            zero_block(dst);

            for (j, &col) in self.col_id.iter().enumerate() {
                let v = self.entry(i, j);
                if v.is_zero() {
                    continue;
                }
                let src = std::slice::from_raw_parts(blocks[col], block_size);
                let dst = std::slice::from_raw_parts_mut(blocks[row], block_size);
                multiply_accumulate(v, src, dst, backend);
            }
        }
    }

    /// Incrementally refresh a single ECC block from a single changed
    /// data block, without touching the other data blocks. Only valid on
    /// a single-row coding matrix (the fault set for this operation is
    /// always exactly one ECC block).
    ///
    /// `delta_block` is `old_data XOR new_data` for the changed data
    /// block at index `delta_index`; `old_ecc`/`new_ecc` are the ECC
    /// block's prior and updated contents.
    ///
    /// # Safety
    /// `delta_block`, `old_ecc` and `new_ecc` must each be `block_size`
    /// bytes and non-overlapping (except `old_ecc`/`new_ecc`, which may
    /// be the same buffer). `block_size` must be a multiple of
    /// [`crate::coding::xor_kernel::ELEMENT_BYTES`].
    pub fn encode_delta(
        &self,
        delta_index: usize,
        delta_block: &[u8],
        old_ecc: &[u8],
        new_ecc: &mut [u8],
        backend: Backend,
    ) {
        debug_assert_eq!(self.rows(), 1, "encode_delta requires a single-row coding matrix");
        debug_assert_eq!(old_ecc.len(), new_ecc.len());
        debug_assert_eq!(delta_block.len(), new_ecc.len());

        if !std::ptr::eq(old_ecc.as_ptr(), new_ecc.as_ptr()) {
            new_ecc.copy_from_slice(old_ecc);
        }
        let v = self.entry(0, delta_index);
        multiply_accumulate(v, delta_block, new_ecc, backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::encoding_matrix::build_encoding_matrix;

    const ELEM: usize = crate::coding::xor_kernel::ELEMENT_BYTES;

    fn block_of(fill: u8) -> Vec<u8> {
        vec![fill; ELEM]
    }

    #[test]
    fn rebuild_recovers_a_single_faulted_data_block() {
        let (n, k) = (3, 2);
        let enc = build_encoding_matrix(n, k);
        let total = n + k;

        let data: Vec<Vec<u8>> = (0..n).map(|i| block_of((i as u8 + 1) * 17)).collect();

        // Encode: compute ecc blocks from the data blocks directly via
        // the encoding matrix's own rows (bypassing the coding table,
        // since this test only exercises Rebuild).
        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(total);
        blocks.extend(data.iter().cloned());
        for ecc_row in n..total {
            let mut ecc = block_of(0);
            for j in 0..n {
                let v = enc.get(ecc_row, j);
                if !v.is_zero() {
                    multiply_accumulate(v, &data[j], &mut ecc, Backend::Simd128);
                }
            }
            blocks.push(ecc);
        }

        // Fault data block 0; rebuild it from the survivors.
        let fault_mask = 1u32 << 0;
        let cm = CodingMatrix::build(fault_mask, &enc, n).expect("recoverable");

        let mut block_ptrs: Vec<*mut u8> = blocks.iter_mut().map(|b| b.as_mut_ptr()).collect();
        let original = blocks[0].clone();
        // Corrupt block 0 before rebuilding to prove it actually gets
        // rewritten rather than trivially matching by accident.
        blocks[0].fill(0xFF);
        block_ptrs[0] = blocks[0].as_mut_ptr();

        unsafe {
            cm.rebuild(&block_ptrs, None, ELEM, Backend::Simd128);
        }
        assert_eq!(blocks[0], original);
    }

    #[test]
    fn encode_delta_matches_recompute_from_scratch() {
        let (n, k) = (3, 1);
        let enc = build_encoding_matrix(n, k);

        let old_data = [block_of(5), block_of(9), block_of(13)];
        let mut new_data = old_data.clone();
        new_data[1] = block_of(200);

        let ecc_row = n; // single ECC block, row n (the parity row)
        let mut old_ecc = block_of(0);
        for j in 0..n {
            let v = enc.get(ecc_row, j);
            multiply_accumulate(v, &old_data[j], &mut old_ecc, Backend::Simd128);
        }

        let mut delta = block_of(0);
        crate::coding::delta_kernel::write_delta(
            &old_data[1],
            &new_data[1],
            &mut delta,
            crate::coding::xor_kernel::Backend::Simd128,
        );

        let fault_mask = 1u32 << ecc_row;
        let cm = CodingMatrix::build(fault_mask, &enc, n).expect("recoverable");
        let mut new_ecc = block_of(0);
        cm.encode_delta(1, &delta, &old_ecc, &mut new_ecc, Backend::Simd128);

        let mut expected_ecc = block_of(0);
        for j in 0..n {
            let v = enc.get(ecc_row, j);
            multiply_accumulate(v, &new_data[j], &mut expected_ecc, Backend::Simd128);
        }
        assert_eq!(new_ecc, expected_ecc);
    }
}
