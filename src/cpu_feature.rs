//! Re-exports of the process-wide backend selection used by both the
//! multiply and delta XOR kernels, kept at the crate root since it is a
//! session-level (not purely coding-internal) concern: sessions read the
//! current backend once at construction and stick with it.

pub use crate::coding::xor_kernel::{clamp_backend, current_backend, Backend};
