//! Prompt chain resolution and execution.
//!
//! A chain is an ordered list of prompt templates. Each template is filled
//! with context variables and with back-references to the outputs of earlier
//! steps, sent to a model callback, and its output appended to the history
//! later templates resolve against.
//!
//! - [`resolve_template`] fills one template.
//! - [`run`] executes a whole chain with an async closure as the callback.
//! - [`ChainExecutor`] executes chains against a [`ChainDriver`].
//! - [`ChainDefinition`] loads a chain from TOML.
//! - [`DelimitedExporter`] writes prompts and outputs to delimited text files.

mod definition;
mod executor;
mod export;
mod resolver;
mod template;

pub use definition::{ChainDefinition, ChainDefinitionBuilder, ChainDefinitionBuilderError};
pub use executor::{ChainDriver, ChainExecutor};
pub use export::{
    DEFAULT_MARKER, DelimitedExporter, DelimitedExporterBuilder, DelimitedExporterBuilderError,
    ExportItem, export,
};
pub use resolver::{ChainRun, run};
pub use template::{BackReference, resolve_template};
