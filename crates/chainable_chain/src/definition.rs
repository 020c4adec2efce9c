//! Chain definitions loaded from TOML.
//!
//! ```toml
//! name = "blog_post"
//! model = "gpt-4o"
//! prompts = [
//!     'Generate one blog post title about: {{topic}}. Respond in JSON: {"title": "<title>"}',
//!     "Generate one hook for the blog post title: {{output[-1].title}}",
//! ]
//!
//! [context]
//! topic = "AI Agents"
//!
//! [export]
//! directory = "out"
//! ```

use crate::DelimitedExporter;
use chainable_core::ChainContext;
use chainable_error::{ChainableError, ChainableResult, ConfigError};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// A named prompt chain with its model and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ChainDefinition {
    /// Chain name, also used as the default export file prefix
    name: String,

    /// Model identifier passed to every callback invocation
    model: String,

    /// Variables available to every prompt
    #[serde(default)]
    #[builder(default)]
    context: ChainContext,

    /// Prompt templates, executed in order
    #[serde(default)]
    #[builder(default)]
    prompts: Vec<String>,

    /// Where and how results are exported
    #[serde(default)]
    #[builder(default)]
    export: DelimitedExporter,
}

impl ChainDefinition {
    /// Create a new builder for constructing a chain definition.
    pub fn builder() -> ChainDefinitionBuilder {
        ChainDefinitionBuilder::default()
    }

    /// Load a chain definition from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// has an empty `name` or `model`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ChainableResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read chain file {}: {}",
                path.display(),
                e
            ))
        })?;

        content.parse()
    }

    /// Check the fields a run cannot do without.
    ///
    /// Prompts are not inspected; an empty prompt list is a valid, empty chain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_required(&self.name, &self.model)
    }
}

impl ChainDefinitionBuilder {
    /// Applies the same checks as [`ChainDefinition::validate`]; unset fields
    /// are reported by `build` itself.
    fn validate(&self) -> Result<(), String> {
        match (&self.name, &self.model) {
            (Some(name), Some(model)) => check_required(name, model).map_err(|e| e.message),
            _ => Ok(()),
        }
    }
}

#[track_caller]
fn check_required(name: &str, model: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::new("Chain name cannot be empty"));
    }
    if model.trim().is_empty() {
        return Err(ConfigError::new(format!(
            "Chain '{}' has an empty model identifier",
            name
        )));
    }
    Ok(())
}

impl FromStr for ChainDefinition {
    type Err = ChainableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let definition: ChainDefinition = toml::from_str(s)
            .map_err(|e| ConfigError::new(format!("Failed to parse chain definition: {}", e)))?;
        definition.validate()?;

        debug!(
            chain = %definition.name,
            prompts = definition.prompts.len(),
            context_vars = definition.context.len(),
            "Loaded chain definition"
        );
        Ok(definition)
    }
}
