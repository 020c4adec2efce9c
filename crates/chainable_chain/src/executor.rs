//! Driver-based chain execution.
//!
//! [`run`](crate::run) accepts any async closure as the model callback. This
//! module provides the object-style alternative: implement [`ChainDriver`] for a
//! model client and hand it to a [`ChainExecutor`].

use crate::{ChainDefinition, ChainRun, run};
use async_trait::async_trait;
use chainable_core::{ChainContext, StepOutput};
use tracing::instrument;

/// A model client that turns a prompt into a step output.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use chainable_chain::ChainDriver;
/// use chainable_core::StepOutput;
///
/// struct HttpDriver { client: MyClient }
///
/// #[async_trait]
/// impl ChainDriver for HttpDriver {
///     type Error = MyClientError;
///
///     async fn invoke(&self, model: &str, prompt: &str) -> Result<StepOutput, Self::Error> {
///         let text = self.client.complete(model, prompt).await?;
///         Ok(StepOutput::Text(text))
///     }
/// }
/// ```
#[async_trait]
pub trait ChainDriver: Send + Sync {
    /// Error returned by a failed model call.
    ///
    /// Chain execution returns it to the caller unchanged.
    type Error: Send;

    /// Send `prompt` to `model` and return its output.
    async fn invoke(&self, model: &str, prompt: &str) -> Result<StepOutput, Self::Error>;
}

/// Executes prompt chains against a [`ChainDriver`].
///
/// The executor holds no per-run state, so one executor may serve any number
/// of independent, concurrent runs.
pub struct ChainExecutor<D: ChainDriver> {
    driver: D,
}

impl<D: ChainDriver> ChainExecutor<D> {
    /// Create a new chain executor with the given driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Run `templates` in order against `model`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error from the first step that fails.
    #[instrument(skip(self, context, templates), fields(steps = templates.len()))]
    pub async fn execute<T>(
        &self,
        context: &ChainContext,
        model: &str,
        templates: &[T],
    ) -> Result<ChainRun, D::Error>
    where
        T: AsRef<str>,
    {
        let driver = &self.driver;
        run(
            context,
            model,
            |model, prompt| async move { driver.invoke(model, &prompt).await },
            templates,
        )
        .await
    }

    /// Run a loaded chain definition with its own model and context.
    ///
    /// # Errors
    ///
    /// Returns the driver's error from the first step that fails.
    #[instrument(skip_all, fields(chain = %definition.name()))]
    pub async fn execute_definition(
        &self,
        definition: &ChainDefinition,
    ) -> Result<ChainRun, D::Error> {
        self.execute(
            definition.context(),
            definition.model(),
            definition.prompts(),
        )
        .await
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
