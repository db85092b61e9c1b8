#![forbid(unsafe_code)]

//! Core primitives: canonical types, state storage and the per-transaction context.

/// Per-transaction execution context.
pub mod context;
/// Key-value state, Merkle proofs and persistence.
pub mod state;
/// Canonical types and encoding.
pub mod types;
