//! Step output types and shape classification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Raw value returned by the model callback for one step.
///
/// Stored in the output history exactly as returned. Serialized untagged, so a
/// history of outputs serializes as the plain strings and JSON values the model
/// produced.
///
/// # Examples
///
/// ```
/// use chainable_core::StepOutput;
/// use serde_json::json;
///
/// let text = StepOutput::from("plain answer");
/// let structured = StepOutput::from(json!({"title": "AI Agents"}));
///
/// assert_eq!(text.as_text(), Some("plain answer"));
/// assert!(structured.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum StepOutput {
    /// Plain text output, possibly containing a JSON document.
    Text(String),

    /// Structured output already decoded by the callback.
    Json(Value),
}

impl StepOutput {
    /// Returns the text when this output is [`StepOutput::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StepOutput::Text(text) => Some(text),
            StepOutput::Json(_) => None,
        }
    }

    /// Returns the effective shape of this output.
    ///
    /// Shorthand for [`classify`].
    pub fn shape(&self) -> OutputShape<'_> {
        classify(self)
    }

    /// Returns the plain-text form of this output.
    ///
    /// Text and JSON strings are returned verbatim; any other JSON value is
    /// rendered as compact JSON.
    pub fn to_plain_text(&self) -> Cow<'_, str> {
        match self {
            StepOutput::Text(text) => Cow::Borrowed(text),
            StepOutput::Json(value) => render_value(value),
        }
    }
}

impl From<&str> for StepOutput {
    fn from(text: &str) -> Self {
        StepOutput::Text(text.to_string())
    }
}

/// Effective shape of a step output for substitution purposes.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputShape<'a> {
    /// Opaque scalar, addressed as a whole with `{{output[-d]}}`.
    Scalar(Cow<'a, str>),

    /// Object, addressed field by field with `{{output[-d].field}}`.
    Structured(Cow<'a, Map<String, Value>>),
}

impl<'a> OutputShape<'a> {
    /// Returns true for [`OutputShape::Structured`].
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputShape::Structured(_))
    }

    /// Returns the scalar text, if this shape is a scalar.
    pub fn scalar(&self) -> Option<&str> {
        match self {
            OutputShape::Scalar(text) => Some(text),
            OutputShape::Structured(_) => None,
        }
    }

    /// Returns the rendered text of an object field.
    ///
    /// `None` for scalars and for fields the object does not contain.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self {
            OutputShape::Structured(map) => map.get(name).map(render_value),
            OutputShape::Scalar(_) => None,
        }
    }
}

/// Classifies a step output into its effective shape.
///
/// - Text (or a JSON string) that parses as a JSON object is structured.
/// - Text that is malformed JSON, or JSON of any other kind, is a scalar holding
///   the original text verbatim.
/// - A decoded JSON object is structured.
/// - Any other decoded JSON value is a scalar holding its compact JSON text.
///
/// # Examples
///
/// ```
/// use chainable_core::{StepOutput, classify};
///
/// let output = StepOutput::from(r#"{"key":"value1"}"#);
/// let shape = classify(&output);
/// assert_eq!(shape.field("key").as_deref(), Some("value1"));
///
/// let output = StepOutput::from("{not json");
/// let shape = classify(&output);
/// assert_eq!(shape.scalar(), Some("{not json"));
/// ```
pub fn classify(output: &StepOutput) -> OutputShape<'_> {
    match output {
        StepOutput::Text(text) | StepOutput::Json(Value::String(text)) => classify_text(text),
        StepOutput::Json(Value::Object(map)) => OutputShape::Structured(Cow::Borrowed(map)),
        StepOutput::Json(other) => {
            OutputShape::Scalar(Cow::Owned(render_value(other).into_owned()))
        }
    }
}

fn classify_text(text: &str) -> OutputShape<'_> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => OutputShape::Structured(Cow::Owned(map)),
        _ => OutputShape::Scalar(Cow::Borrowed(text)),
    }
}

/// Renders a JSON value as substitution text.
///
/// Strings are returned without quotes; booleans, null, arrays and objects use
/// their compact JSON form. Numbers print the shortest form, so a float with no
/// fractional part prints as an integer (`1.0` as `1`, `1e2` as `100`).
///
/// # Examples
///
/// ```
/// use chainable_core::render_value;
/// use serde_json::json;
///
/// assert_eq!(render_value(&json!("text")), "text");
/// assert_eq!(render_value(&json!(1.0)), "1");
/// assert_eq!(render_value(&json!(0.25)), "0.25");
/// assert_eq!(render_value(&json!([1, "a"])), r#"[1,"a"]"#);
/// ```
pub fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        Value::Number(number) => Cow::Owned(render_number(number)),
        other => Cow::Owned(other.to_string()),
    }
}

/// Floats at or above this magnitude keep exponent notation.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e21;

fn render_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() < INTEGRAL_FLOAT_LIMIT =>
        {
            if float == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", float)
            }
        }
        _ => number.to_string(),
    }
}
