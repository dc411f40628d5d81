//! The erasure-coding core: `GF(2^4)` arithmetic, matrix construction, and
//! the bit-slice XOR kernels that turn a coding matrix into block I/O.
//!
//! Modules are ordered leaf-first: field arithmetic underlies matrices,
//! which underlie the encoding/recovery matrix builders, which underlie
//! the coding table, which [`crate::session::Session`] wraps together with
//! the XOR kernels.

pub mod bitslice;
pub mod coding_matrix;
pub mod coding_table;
pub mod combination;
pub mod delta_kernel;
pub mod encoding_matrix;
pub mod fault_tuple;
pub mod galois;
pub mod mask_index;
pub mod matrix;
pub mod recovery_matrix;
pub mod xor_kernel;
