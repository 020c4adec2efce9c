//! Sequential chain execution.
//!
//! A chain run resolves each template against the context and the outputs of
//! the steps before it, hands the resolved prompt to the model callback, and
//! records both. Steps run strictly in order; the callback is the only await
//! point.

use crate::resolve_template;
use chainable_core::{ChainContext, StepOutput};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

/// Outputs and resolved prompts of a completed chain run.
///
/// Both sequences have one entry per template, index-aligned: `prompts()[i]`
/// is the text that produced `outputs()[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct ChainRun {
    /// Raw callback outputs, in step order
    outputs: Vec<StepOutput>,
    /// Fully resolved prompts, in step order
    prompts: Vec<String>,
}

impl ChainRun {
    fn with_capacity(steps: usize) -> Self {
        Self {
            outputs: Vec::with_capacity(steps),
            prompts: Vec::with_capacity(steps),
        }
    }

    /// Number of completed steps.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Returns true if the chain had no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Iterates over `(resolved prompt, output)` pairs in step order.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &StepOutput)> {
        self.prompts
            .iter()
            .map(String::as_str)
            .zip(self.outputs.iter())
    }

    /// Splits the run into `(outputs, prompts)`.
    pub fn into_parts(self) -> (Vec<StepOutput>, Vec<String>) {
        (self.outputs, self.prompts)
    }
}

/// Runs a prompt chain.
///
/// For each template in order: substitutes context variables and
/// back-references to earlier outputs, calls `callback(model, prompt)`, and
/// appends the returned output to the history the next template resolves
/// against. `model` is passed through to every call unchanged.
///
/// # Errors
///
/// The first error returned by `callback` is returned unchanged and the
/// remaining templates are not processed. Outputs of earlier steps are
/// discarded.
///
/// # Examples
///
/// ```
/// use chainable_chain::run;
/// use chainable_core::{ChainContext, StepOutput};
///
/// # #[tokio::main]
/// # async fn main() {
/// let context = ChainContext::new().with("topic", "AI Agents");
/// let templates = ["Title for {{topic}}", "Hook for {{output[-1]}}"];
///
/// let chain = run(
///     &context,
///     "model-a",
///     |_model, prompt| async move {
///         Ok::<_, std::convert::Infallible>(StepOutput::from(format!("re: {}", prompt)))
///     },
///     &templates,
/// )
/// .await
/// .unwrap();
///
/// assert_eq!(chain.prompts()[1], r#"Hook for "re: Title for AI Agents""#);
/// # }
/// ```
#[instrument(skip_all, fields(steps = templates.len(), context_vars = context.len()))]
pub async fn run<M, F, Fut, E, T>(
    context: &ChainContext,
    model: M,
    mut callback: F,
    templates: &[T],
) -> Result<ChainRun, E>
where
    M: Clone,
    F: FnMut(M, String) -> Fut,
    Fut: Future<Output = Result<StepOutput, E>>,
    T: AsRef<str>,
{
    let mut chain = ChainRun::with_capacity(templates.len());

    for (step, template) in templates.iter().enumerate() {
        let prompt = resolve_template(template.as_ref(), context, &chain.outputs);
        debug!(step, prompt_len = prompt.len(), "Resolved prompt");

        let output = match callback(model.clone(), prompt.clone()).await {
            Ok(output) => output,
            Err(e) => {
                warn!(step, "Model callback failed, aborting chain");
                return Err(e);
            }
        };
        debug!(step, structured = output.shape().is_structured(), "Step completed");

        chain.prompts.push(prompt);
        chain.outputs.push(output);
    }

    info!(steps = chain.len(), "Chain completed");
    Ok(chain)
}
