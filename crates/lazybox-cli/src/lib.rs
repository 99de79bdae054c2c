//! `LazyBox` CLI library.
//!
//! Argument definitions and command execution, kept out of `main.rs` so
//! they can be driven from tests with in-memory input and output.

pub mod args;
pub mod cmd;

pub use args::{Cli, Commands};
