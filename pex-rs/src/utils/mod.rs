//! Shared utilities for the pex-rs CLI

pub mod table;

pub use table::*;
