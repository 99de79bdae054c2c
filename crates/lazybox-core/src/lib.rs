//! `LazyBox` core library.
//!
//! Shared plumbing for the `lazybox` binaries: configuration resolution,
//! key material loading and tracing setup. All cryptography lives in
//! `lazybox-crypto`.

pub mod config;
pub mod error;
pub mod keys;
pub mod tracing_init;

pub use error::{Error, Result};
