//! Run any chain file with a closure callback that echoes each prompt.
//!
//! Run with: cargo run -p chainable --example run_chain -- crates/chainable/chains/reddit_newsletter.toml
//!
//! Without an argument the code generator chain is used.

use chainable::{ChainDefinition, StepOutput, init_observability, run};

const DEFAULT_CHAIN: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/chains/code_generator.toml");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_observability()?;

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CHAIN.to_string());
    let definition = ChainDefinition::from_file(&path)?;
    println!("🔗 Running '{}' from {}", definition.name(), path);

    let chain = run(
        definition.context(),
        definition.model().as_str(),
        |model, prompt| async move {
            let words = prompt.split_whitespace().count();
            Ok::<_, std::convert::Infallible>(StepOutput::from(format!(
                "{} read a {}-word prompt",
                model, words
            )))
        },
        definition.prompts(),
    )
    .await?;

    for (prompt, output) in chain.steps() {
        println!("\n➡️  {}\n⬅️  {}", prompt, output.to_plain_text());
    }

    let (prompts, results) = definition.export().export_run(definition.name(), &chain)?;
    println!(
        "\n💾 Exported {} prompt bytes and {} result bytes",
        prompts.len(),
        results.len()
    );
    Ok(())
}
