//! Chain context variables.

use crate::render_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Named variables available to every template in a chain run.
///
/// Values are JSON values so that strings, numbers and booleans loaded from a
/// chain definition keep their type; they substitute through [`render_value`].
///
/// # Examples
///
/// ```
/// use chainable_core::ChainContext;
///
/// let context = ChainContext::new()
///     .with("topic", "AI Agents")
///     .with("count", 3);
///
/// assert_eq!(context.render("topic").as_deref(), Some("AI Agents"));
/// assert_eq!(context.render("count").as_deref(), Some("3"));
/// assert!(context.render("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainContext(BTreeMap<String, Value>);

impl ChainContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, consuming and returning the context.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a variable, returning the previous value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the raw value of a variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the substitution text of a variable.
    pub fn render(&self, name: &str) -> Option<Cow<'_, str>> {
        self.0.get(name).map(render_value)
    }

    /// Returns true if the context defines `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for ChainContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
