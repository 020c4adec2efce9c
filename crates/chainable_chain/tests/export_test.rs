//! Tests for delimited text export.

use chainable_chain::{ChainExecutor, ChainDriver, DelimitedExporter, ExportItem};
use chainable_core::{ChainContext, StepOutput};
use async_trait::async_trait;
use serde_json::json;
use std::fs;

const FIRST_BLOCK: &str = "🔗 -------- Prompt Chain Result #1 -------------\n\nFirst result\n\n";
const SECOND_BLOCK: &str = "🔗🔗 -------- Prompt Chain Result #2 -------------\n\n{\"key\":\"value\"}\n\n";

fn exporter_in(dir: &tempfile::TempDir) -> DelimitedExporter {
    DelimitedExporter::builder()
        .directory(dir.path())
        .build()
        .expect("valid exporter")
}

#[test]
fn test_export_writes_blocks_in_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = exporter_in(&dir);
    let items = vec![StepOutput::from("First result"), StepOutput::from(json!({"key": "value"}))];

    let combined = exporter.export("testfile", &items).expect("export succeeds");

    assert_eq!(combined, format!("{}{}", FIRST_BLOCK, SECOND_BLOCK));
    let written = fs::read_to_string(dir.path().join("testfile.txt")).expect("read export");
    assert_eq!(written, combined);
}

#[test]
fn test_export_appends_to_existing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = exporter_in(&dir);
    let path = exporter.path_for("log");
    fs::write(&path, "existing\n").expect("seed file");

    let combined = exporter.export("log", &["First result"]).expect("export succeeds");

    assert_eq!(combined, FIRST_BLOCK);
    let written = fs::read_to_string(&path).expect("read export");
    assert_eq!(written, format!("existing\n{}", FIRST_BLOCK));
}

#[test]
fn test_repeated_exports_accumulate() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = exporter_in(&dir);

    let first = exporter.export("twice", &["First result"]).expect("first export");
    let second = exporter.export("twice", &["First result"]).expect("second export");

    assert_eq!(first, second);
    let written = fs::read_to_string(exporter.path_for("twice")).expect("read export");
    assert_eq!(written, format!("{}{}", FIRST_BLOCK, FIRST_BLOCK));
}

#[test]
fn test_empty_export_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = exporter_in(&dir);
    let items: Vec<String> = Vec::new();

    let combined = exporter.export("empty", &items).expect("export succeeds");

    assert_eq!(combined, "");
    assert!(!exporter.path_for("empty").exists());
}

#[test]
fn test_json_text_items_are_written_verbatim() {
    let item = StepOutput::from("{\n  \"key\": \"value\"\n}");
    assert_eq!(item.export_body(), "{\n  \"key\": \"value\"\n}");
}

#[test]
fn test_custom_marker() {
    let exporter = DelimitedExporter::builder()
        .marker("#")
        .build()
        .expect("valid exporter");

    assert_eq!(
        exporter.render_block(2, "body"),
        "### -------- Prompt Chain Result #3 -------------\n\nbody\n\n"
    );
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = DelimitedExporter::builder()
        .directory(dir.path().join("does/not/exist"))
        .build()
        .expect("valid exporter");

    let err = exporter.export("out", &["item"]).expect_err("export fails");
    assert!(err.to_string().contains("out.txt"));
}

struct EchoDriver;

#[async_trait]
impl ChainDriver for EchoDriver {
    type Error = std::convert::Infallible;

    async fn invoke(&self, _model: &str, prompt: &str) -> Result<StepOutput, Self::Error> {
        Ok(StepOutput::from(json!({"echo": prompt})))
    }
}

#[tokio::test]
async fn test_export_run_writes_prompts_and_results() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = exporter_in(&dir);
    let executor = ChainExecutor::new(EchoDriver);

    let chain = executor
        .execute(
            &ChainContext::new().with("topic", "AI"),
            "m",
            &["About {{topic}}", "More on {{output[-1].echo}}"],
        )
        .await
        .expect("chain runs");

    let (prompts, results) = exporter.export_run("poc", &chain).expect("export run");

    assert!(prompts.contains("\n\nAbout AI\n\n"));
    assert!(prompts.contains("🔗🔗 -------- Prompt Chain Result #2 -------------\n\nMore on About AI\n\n"));
    assert!(results.contains(r#"{"echo":"More on About AI"}"#));
    assert_eq!(
        fs::read_to_string(dir.path().join("poc_prompts.txt")).expect("read prompts"),
        prompts
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("poc_results.txt")).expect("read results"),
        results
    );
}
