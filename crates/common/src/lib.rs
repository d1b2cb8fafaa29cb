//! Shared runtime helpers for the directory service crates.
//!
//! Logging bootstrap lives here so that the binary and the library crates
//! agree on a single subscriber setup.

pub mod utils;
