//! External build backends.
//!
//! Backends are pre-existing tools (CMake, Conan) driven as subprocesses.
//! Command construction is kept separate from execution so the exact
//! invocations can be unit-tested; execution inherits stdio so backend
//! diagnostics reach the user unmodified.

pub mod cmake;
pub mod conan;
mod process;

pub use process::Invocation;
