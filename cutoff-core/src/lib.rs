//! Shared primitives for the cutoff workspace.
//!
//! `cutoff-core` provides the foundation the curve crate builds on:
//!
//! - **Error types** — [`CutoffError`] and [`Result`] for structured error handling
//! - **Probabilities** — [`Prior`], a class-1 prior validated to lie in `[0, 1]`

pub mod error;
pub mod prob;

pub use error::{CutoffError, Result};
pub use prob::Prior;
