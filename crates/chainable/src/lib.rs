//! Minimal prompt chaining.
//!
//! Give a chain an ordered list of prompt templates, a context of named
//! variables and a model callback. Each template is filled with
//! `{{variable}}` values and with `{{output[-d]}}` / `{{output[-d].field}}`
//! references to the outputs of earlier steps, sent to the model, and its
//! output recorded for the templates that follow.
//!
//! ```
//! use chainable::{ChainContext, StepOutput, run};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let context = ChainContext::new().with("topic", "AI Agents");
//! let templates = [
//!     r#"Title about {{topic}} as JSON {"title": "..."}"#,
//!     "Hook for {{output[-1].title}}",
//! ];
//!
//! let chain = run(
//!     &context,
//!     "gpt-4o",
//!     |_model, prompt| async move {
//!         let output = if prompt.starts_with("Title") {
//!             StepOutput::from(json!({"title": "Agents at Work"}))
//!         } else {
//!             StepOutput::from("A hook")
//!         };
//!         Ok::<_, std::convert::Infallible>(output)
//!     },
//!     &templates,
//! )
//! .await
//! .unwrap();
//!
//! assert_eq!(chain.prompts()[1], "Hook for Agents at Work");
//! # }
//! ```
//!
//! This crate re-exports the workspace crates:
//!
//! - `chainable_core`: context, step outputs and shape classification.
//! - `chainable_chain`: template resolution, execution and export.
//! - `chainable_error`: error types.

pub use chainable_chain::{
    BackReference, ChainDefinition, ChainDefinitionBuilder, ChainDefinitionBuilderError,
    ChainDriver, ChainExecutor, ChainRun, DEFAULT_MARKER, DelimitedExporter,
    DelimitedExporterBuilder, DelimitedExporterBuilderError, ExportItem, export, resolve_template,
    run,
};
pub use chainable_core::{
    ChainContext, OutputShape, StepOutput, classify, init_observability,
    init_observability_with_filter, render_value,
};
pub use chainable_error::{
    ChainableError, ChainableErrorKind, ChainableResult, ConfigError, ExportError,
};
