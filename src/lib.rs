//! A Cauchy-extended Reed-Solomon erasure code over `GF(2^4)`, with scalar
//! multiplications lowered to fixed bit-slice XOR programs.
//!
//! Given a reliability group of `N` data blocks plus `K` ECC (parity)
//! blocks, this crate computes the `K` ECC blocks from the `N` data blocks
//! ([`facade::encode`]), reconstructs up to `K` missing blocks from the
//! survivors ([`facade::decode`] / [`facade::rebuild`]), and incrementally
//! refreshes ECC blocks when a single data block changes
//! ([`facade::write_delta`] + [`facade::encode_delta`]) without touching
//! the other data blocks.
//!
//! ## Layout
//!
//! [`coding`] is the leaf-first coding core: `GF(2^4)` scalar arithmetic,
//! dense matrices, the encoding- and recovery-matrix builders, the
//! bit-slice XOR kernels, and the per-session coding table. [`session`]
//! wraps one reliability group's coding table with validated entry points;
//! [`registry`] gives handles a fixed-capacity, lock-free home; [`facade`]
//! implements the documented public operations in terms of both.
//! [`config`] holds the `(BlockSize, N, K)` configuration type and its
//! validation; [`error`] holds the six user-facing error kinds.
//!
//! Multiplications are not vectorized with hand-written assembly per
//! backend the way the algorithm's original implementation does it;
//! instead three portable backends (32-bit scalar, 64-bit, 128-bit) share
//! one fixed XOR-program table, selected once per process by a CPU
//! feature probe in [`coding::xor_kernel`].
//!
//! This code implements the algorithm described in US Patent 7,472,334;
//! any downstream use inherits that patent's license terms.

pub mod coding;
pub mod config;
pub mod cpu_feature;
pub mod error;
pub mod facade;
pub mod registry;
pub mod session;

pub use config::BlockConfig;
pub use error::{Error, Result};
pub use registry::Handle;
pub use session::Session;
