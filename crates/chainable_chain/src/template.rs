//! Placeholder scanning and template resolution.
//!
//! Templates reference values with three placeholder forms:
//!
//! - `{{name}}`: a context variable, matched by exact name.
//! - `{{output[-d]}}`: the scalar output of the step `d` positions back,
//!   substituted wrapped in double quotes.
//! - `{{output[-d].field}}`: a field of the structured output of the step `d`
//!   positions back, substituted without quotes.
//!
//! Placeholders that cannot be resolved are left in the text verbatim.

use chainable_core::{ChainContext, OutputShape, StepOutput, classify, render_value};
use std::borrow::Cow;
use tracing::{debug, instrument};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A back-reference expression parsed from between `{{` and `}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackReference<'a> {
    /// `output[-d]`, addressing a scalar output as a whole.
    Output {
        /// Number of steps back, at least 1
        distance: usize,
    },
    /// `output[-d].field`, addressing one field of a structured output.
    OutputField {
        /// Number of steps back, at least 1
        distance: usize,
        /// Field name
        field: &'a str,
    },
}

impl<'a> BackReference<'a> {
    /// Parses a placeholder expression (without delimiters) as a back-reference.
    ///
    /// The distance must be a positive decimal integer without sign or leading
    /// zeros, and the field must consist of ASCII letters, digits and
    /// underscores. No whitespace is tolerated anywhere in the expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainable_chain::BackReference;
    ///
    /// assert_eq!(
    ///     BackReference::parse("output[-2].title"),
    ///     Some(BackReference::OutputField { distance: 2, field: "title" })
    /// );
    /// assert_eq!(BackReference::parse("output[-1]"), Some(BackReference::Output { distance: 1 }));
    /// assert_eq!(BackReference::parse("output[1]"), None);
    /// ```
    pub fn parse(expression: &'a str) -> Option<Self> {
        let remainder = expression.strip_prefix("output[-")?;
        let close = remainder.find(']')?;
        let distance = parse_distance(&remainder[..close])?;
        let path = &remainder[close + 1..];

        if path.is_empty() {
            return Some(BackReference::Output { distance });
        }

        let field = path.strip_prefix('.')?;
        if is_field_name(field) {
            Some(BackReference::OutputField { distance, field })
        } else {
            None
        }
    }

    /// Number of steps back this reference addresses.
    pub fn distance(&self) -> usize {
        match self {
            BackReference::Output { distance } | BackReference::OutputField { distance, .. } => {
                *distance
            }
        }
    }
}

fn parse_distance(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

fn is_field_name(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Resolves every placeholder in `template` against the context and the
/// outputs of earlier steps.
///
/// `history` holds the outputs of all completed steps in order, so
/// `{{output[-1]}}` addresses its last element. The template is scanned once,
/// left to right: substituted text is never scanned again, and context
/// variables take precedence over back-references with the same spelling.
///
/// A placeholder normally ends at the first `}}`. When that text names nothing,
/// context keys that themselves contain `}` are tried against the longer
/// spans, so a key `x}` still matches `{{x}}}`.
///
/// # Examples
///
/// ```
/// use chainable_chain::resolve_template;
/// use chainable_core::{ChainContext, StepOutput};
///
/// let context = ChainContext::new().with("topic", "AI Agents");
/// let history = vec![StepOutput::from(r#"{"title":"Agents at Work"}"#), StepOutput::from("A hook")];
///
/// let resolved = resolve_template(
///     "{{topic}}: {{output[-2].title}} / {{output[-1]}} / {{output[-3]}}",
///     &context,
///     &history,
/// );
/// assert_eq!(resolved, r#"AI Agents: Agents at Work / "A hook" / {{output[-3]}}"#);
/// ```
#[instrument(skip_all, fields(template_len = template.len(), history_len = history.len()))]
pub fn resolve_template(template: &str, context: &ChainContext, history: &[StepOutput]) -> String {
    let mut resolver = Resolver::new(context, history);
    let mut resolved = String::with_capacity(template.len());
    let mut remainder = template;

    while let Some(start) = remainder.find(OPEN) {
        let after_open = &remainder[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        let expression = &after_open[..end];
        let matched = resolver
            .substitute(expression)
            .map(|text| (text, end))
            .or_else(|| resolver.braced_key_at(after_open));

        match matched {
            Some((text, expression_len)) => {
                resolved.push_str(&remainder[..start]);
                resolved.push_str(&text);
                remainder = &after_open[expression_len + CLOSE.len()..];
            }
            None => {
                debug!(expression, "Placeholder left unresolved");
                // Retry from the next brace so `{{{name}}}` still matches `{{name}}`.
                resolved.push_str(&remainder[..=start]);
                remainder = &remainder[start + 1..];
            }
        }
    }

    resolved.push_str(remainder);
    resolved
}

/// Per-template lookup state; classifies each referenced output at most once.
struct Resolver<'a> {
    context: &'a ChainContext,
    history: &'a [StepOutput],
    shapes: Vec<Option<OutputShape<'a>>>,
}

impl<'a> Resolver<'a> {
    fn new(context: &'a ChainContext, history: &'a [StepOutput]) -> Self {
        Self {
            context,
            history,
            shapes: vec![None; history.len()],
        }
    }

    fn substitute(&mut self, expression: &str) -> Option<Cow<'a, str>> {
        if let Some(value) = self.context.render(expression) {
            return Some(value);
        }

        let reference = BackReference::parse(expression)?;
        let shape = self.shape(reference.distance())?;
        match reference {
            BackReference::Output { .. } => shape
                .scalar()
                .map(|text| Cow::Owned(format!("\"{}\"", text))),
            BackReference::OutputField { field, .. } => {
                shape.field(field).map(|text| Cow::Owned(text.into_owned()))
            }
        }
    }

    /// Shortest context key containing `}` that `text` starts with, followed
    /// by `}}`. Returns the rendered value and the key length.
    fn braced_key_at(&self, text: &str) -> Option<(Cow<'a, str>, usize)> {
        let context = self.context;
        context
            .iter()
            .filter(|(key, _)| key.contains('}'))
            .filter(|(key, _)| text.starts_with(key) && text[key.len()..].starts_with(CLOSE))
            .min_by_key(|(key, _)| key.len())
            .map(|(key, value)| (render_value(value), key.len()))
    }

    fn shape(&mut self, distance: usize) -> Option<&OutputShape<'a>> {
        let history = self.history;
        let index = history.len().checked_sub(distance)?;
        let shape = self.shapes[index].get_or_insert_with(|| classify(&history[index]));
        Some(&*shape)
    }
}
