//! Run the blog post chain against a canned driver and export the results.
//!
//! Run with: cargo run -p chainable --example blog_post
//!
//! Writes `blog_post_prompts.txt` and `blog_post_results.txt` to the export
//! directory of the chain file (the current directory by default).

use async_trait::async_trait;
use chainable::{ChainDefinition, ChainDriver, ChainExecutor, StepOutput, init_observability};
use serde_json::json;

const CHAIN_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/chains/blog_post.toml");

/// Stands in for a model client: answers JSON requests with JSON and
/// everything else with a line of text.
struct CannedDriver;

#[async_trait]
impl ChainDriver for CannedDriver {
    type Error = String;

    async fn invoke(&self, model: &str, prompt: &str) -> Result<StepOutput, Self::Error> {
        if prompt.contains("Respond strictly in JSON") {
            return Ok(StepOutput::from(json!({"title": "Agents That Ship"})));
        }
        let first_line = prompt.lines().next().unwrap_or_default();
        Ok(StepOutput::from(format!("[{}] answer to: {}", model, first_line)))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_observability()?;

    let definition = ChainDefinition::from_file(CHAIN_FILE)?;
    let executor = ChainExecutor::new(CannedDriver);
    let chain = executor.execute_definition(&definition).await?;

    println!("\n📖 Prompts");
    for (index, prompt) in chain.prompts().iter().enumerate() {
        println!("\n{}", definition.export().render_block(index, prompt));
    }

    println!("\n📊 Results");
    for (index, output) in chain.outputs().iter().enumerate() {
        println!("\n{}", definition.export().render_block(index, &output.to_plain_text()));
    }

    definition.export().export_run(definition.name(), &chain)?;
    println!(
        "💾 Saved {} and {}",
        definition.export().path_for(&format!("{}_prompts", definition.name())).display(),
        definition.export().path_for(&format!("{}_results", definition.name())).display()
    );
    Ok(())
}
