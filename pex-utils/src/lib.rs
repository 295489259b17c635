//! Small helpers shared across the pex-rs crates.

#![forbid(unsafe_code)]

pub mod debug;
