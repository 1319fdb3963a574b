// Rust guideline compliant 2026-10-16

//! Adapters (secondary ports) for the provider binary.
//!
//! Each sub-module implements a port trait defined in the `domain` crate.

pub mod in_memory_users;
