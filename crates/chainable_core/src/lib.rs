//! Core data types for the chainable prompt chaining library.
//!
//! This crate provides the values a chain run works with: the caller's context,
//! the raw output of each step, and the classification of that output into the
//! shape used for back-reference substitution.

mod context;
mod observability;
mod output;

pub use context::ChainContext;
pub use observability::{init_observability, init_observability_with_filter};
pub use output::{OutputShape, StepOutput, classify, render_value};
