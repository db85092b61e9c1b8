#![forbid(unsafe_code)]

//! State: store abstraction, sled persistence, Merkle commitments.

pub mod merkle;
pub mod persistent_state;
pub mod store;
