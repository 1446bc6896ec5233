//! `iscoolgpt ask`: one-shot question through the answer service.

use anyhow::Result;
use console::style;

use iscoolgpt_types::ask::AskRequest;

use crate::state::AppState;

/// Ask a single question and print the answer.
pub async fn ask(
    state: &AppState,
    question: String,
    context: Option<String>,
    max_tokens: Option<u32>,
    json: bool,
) -> Result<()> {
    let request = AskRequest {
        question,
        context,
        max_tokens,
    };

    let response = state.answer_service.ask(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("?").cyan().bold(), style(&response.question).bold());
    println!();
    for line in response.answer.lines() {
        println!("  {line}");
    }
    println!();

    let model = response.model.as_deref().unwrap_or("unknown model");
    match response.tokens_used {
        Some(tokens) => println!("  {}", style(format!("{model} · {tokens} tokens")).dim()),
        None => println!("  {}", style(model).dim()),
    }
    println!();

    Ok(())
}
