//! Tests for ChainContext.

use chainable_core::ChainContext;
use serde_json::json;

#[test]
fn test_context_builder_and_render() {
    let context = ChainContext::new()
        .with("var1", "value1")
        .with("ratio", 0.5)
        .with("enabled", true);

    assert_eq!(context.len(), 3);
    assert_eq!(context.render("var1").as_deref(), Some("value1"));
    assert_eq!(context.render("ratio").as_deref(), Some("0.5"));
    assert_eq!(context.render("enabled").as_deref(), Some("true"));
}

#[test]
fn test_context_names_are_case_sensitive() {
    let context = ChainContext::new().with("Topic", "AI");
    assert!(context.contains_key("Topic"));
    assert!(!context.contains_key("topic"));
    assert!(context.render(" Topic").is_none());
}

#[test]
fn test_context_from_iterator() {
    let context: ChainContext = [("var1", "value1"), ("var2", "value2")].into_iter().collect();
    let names: Vec<&str> = context.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["var1", "var2"]);
}

#[test]
fn test_context_insert_returns_previous() {
    let mut context = ChainContext::new();
    assert!(context.insert("k", "first").is_none());
    assert_eq!(context.insert("k", "second"), Some(json!("first")));
    assert_eq!(context.get("k"), Some(&json!("second")));
}

#[test]
fn test_context_deserializes_from_toml_table() {
    let context: ChainContext = toml::from_str(
        r#"
        topic = "AI Agents"
        posts = 5
        draft = false
        "#,
    )
    .expect("parse context");

    assert_eq!(context.render("topic").as_deref(), Some("AI Agents"));
    assert_eq!(context.render("posts").as_deref(), Some("5"));
    assert_eq!(context.render("draft").as_deref(), Some("false"));
}

#[test]
fn test_empty_context() {
    let context = ChainContext::default();
    assert!(context.is_empty());
    assert_eq!(context.iter().count(), 0);
}
