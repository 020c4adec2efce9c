//! Delimited text export of chain results.
//!
//! Each item becomes one block:
//!
//! ```text
//! 🔗🔗 -------- Prompt Chain Result #2 -------------
//!
//! {"key":"value"}
//!
//! ```
//!
//! The marker repeats once per position, so the block for item `n` starts
//! with `n` markers. Blocks are appended to `{name}.txt`.

use crate::ChainRun;
use chainable_core::StepOutput;
use chainable_error::{ChainableResult, ExportError};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Marker glyph repeated at the start of each block.
pub const DEFAULT_MARKER: &str = "🔗";

/// An item that can be written as the body of an export block.
pub trait ExportItem {
    /// Text written between the block header and the trailing blank line.
    fn export_body(&self) -> Cow<'_, str>;
}

impl ExportItem for str {
    fn export_body(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ExportItem for String {
    fn export_body(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// Text is written verbatim; structured values as compact JSON.
impl ExportItem for StepOutput {
    fn export_body(&self) -> Cow<'_, str> {
        self.to_plain_text()
    }
}

impl<T: ExportItem + ?Sized> ExportItem for &T {
    fn export_body(&self) -> Cow<'_, str> {
        (**self).export_body()
    }
}

/// Writes chain results to delimited text files.
///
/// # Examples
///
/// ```
/// use chainable_chain::DelimitedExporter;
///
/// let exporter = DelimitedExporter::default();
/// assert_eq!(
///     exporter.render_block(0, "First result"),
///     "🔗 -------- Prompt Chain Result #1 -------------\n\nFirst result\n\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct DelimitedExporter {
    /// Directory export files are written to
    #[serde(default = "default_directory")]
    #[builder(default = "default_directory()")]
    directory: PathBuf,

    /// Glyph repeated at the start of each block
    #[serde(default = "default_marker")]
    #[builder(default = "default_marker()")]
    marker: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for DelimitedExporter {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            marker: default_marker(),
        }
    }
}

impl DelimitedExporter {
    /// Create a new builder for constructing an exporter.
    pub fn builder() -> DelimitedExporterBuilder {
        DelimitedExporterBuilder::default()
    }

    /// Path of the file `name` is exported to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.txt", name))
    }

    /// Render the block for the item at zero-based `index`.
    pub fn render_block(&self, index: usize, body: &str) -> String {
        let position = index + 1;
        format!(
            "{} -------- Prompt Chain Result #{} -------------\n\n{}\n\n",
            self.marker.repeat(position),
            position,
            body
        )
    }

    /// Append one block per item to `{name}.txt` and return the blocks joined.
    ///
    /// An empty `items` slice touches no file and returns an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or a block cannot be
    /// appended. Blocks already appended stay in the file.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub fn export<I: ExportItem>(&self, name: &str, items: &[I]) -> ChainableResult<String> {
        if items.is_empty() {
            debug!("Nothing to export");
            return Ok(String::new());
        }

        let path = self.path_for(name);
        let io_error = |e: std::io::Error| ExportError::new(path.display().to_string(), e.to_string());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_error)?;

        let mut combined = String::new();
        for (index, item) in items.iter().enumerate() {
            let block = self.render_block(index, &item.export_body());
            file.write_all(block.as_bytes()).map_err(io_error)?;
            combined.push_str(&block);
        }

        debug!(path = %path.display(), bytes = combined.len(), "Exported chain items");
        Ok(combined)
    }

    /// Export a run's prompts to `{prefix}_prompts.txt` and its outputs to
    /// `{prefix}_results.txt`.
    ///
    /// Returns `(prompts_text, results_text)`.
    ///
    /// # Errors
    ///
    /// Returns the first write failure.
    pub fn export_run(&self, prefix: &str, run: &ChainRun) -> ChainableResult<(String, String)> {
        let prompts = self.export(&format!("{}_prompts", prefix), run.prompts())?;
        let results = self.export(&format!("{}_results", prefix), run.outputs())?;
        Ok((prompts, results))
    }
}

/// Append `items` to `{name}.txt` in the current directory with the default
/// marker, returning the text written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export<I: ExportItem>(name: &str, items: &[I]) -> ChainableResult<String> {
    DelimitedExporter::default().export(name, items)
}
