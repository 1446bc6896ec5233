//! `iscoolgpt config`: print the resolved settings with API keys masked.

use anyhow::Result;
use console::style;
use secrecy::{ExposeSecret, SecretString};

use iscoolgpt_types::config::Settings;

use crate::state::AppState;

/// Show the settings the server would run with.
pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let settings = &state.settings;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings_json(settings))?);
        return Ok(());
    }

    let llm = &settings.llm;
    println!();
    println!(
        "  {} {} v{}",
        style("⚙").bold(),
        style(&settings.api_title).cyan(),
        settings.api_version
    );
    println!();
    println!("  {}", style("── LLM ──").dim());
    println!("  Provider:     {}", style(&llm.provider).bold());
    println!("  Max tokens:   {}", llm.max_tokens);
    println!("  Temperature:  {}", llm.temperature);
    println!();
    println!("  {}", style("── OpenAI ──").dim());
    println!("  API key:      {}", key_display(llm.openai.api_key.as_ref()));
    println!("  Model:        {}", llm.openai.model);
    println!("  Base URL:     {}", llm.openai.base_url());
    println!();
    println!("  {}", style("── Hugging Face ──").dim());
    println!("  API key:      {}", key_display(llm.huggingface.api_key.as_ref()));
    println!("  Model:        {}", llm.huggingface.model);
    println!("  API URL:      {}", llm.huggingface.api_url());
    println!();

    Ok(())
}

fn settings_json(settings: &Settings) -> serde_json::Value {
    let llm = &settings.llm;
    serde_json::json!({
        "api_title": settings.api_title,
        "api_version": settings.api_version,
        "llm": {
            "provider": llm.provider,
            "max_tokens": llm.max_tokens,
            "temperature": llm.temperature,
            "openai": {
                "api_key": llm.openai.api_key.as_ref().map(masked),
                "model": llm.openai.model,
                "base_url": llm.openai.base_url(),
            },
            "huggingface": {
                "api_key": llm.huggingface.api_key.as_ref().map(masked),
                "model": llm.huggingface.model,
                "api_url": llm.huggingface.api_url(),
            },
        },
    })
}

fn key_display(key: Option<&SecretString>) -> String {
    match key {
        Some(key) => format!("{}", style(masked(key)).green()),
        None => format!("{}", style("not set").yellow()),
    }
}

/// Mask a secret, keeping only its last four characters.
fn masked(secret: &SecretString) -> String {
    mask_secret(secret.expose_secret())
}

fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}
