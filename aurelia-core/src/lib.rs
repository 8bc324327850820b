//! Shared primitives, traits, and error types for the Aurelia binding-site
//! evaluation toolkit.
//!
//! `aurelia-core` provides the foundation that all other Aurelia crates build on:
//!
//! - **Error types** — [`AureliaError`] and [`Result`] for structured error handling
//! - **Traits** — Core abstractions like [`Sequence`], [`Summarizable`], [`ContentAddressable`]

pub mod error;
pub mod traits;

pub use error::{AureliaError, Result};
pub use traits::*;
