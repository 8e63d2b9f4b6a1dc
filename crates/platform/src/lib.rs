//! Platform detection for ccc
//!
//! This crate provides the host OS and architecture identifiers used to
//! name build directories and select toolchain defaults.

mod platform;

pub use platform::{Arch, Os, Platform};
