//! IsCoolGPT CLI and REST API entry point.
//!
//! Binary name: `iscoolgpt`
//!
//! Parses CLI arguments, loads settings, wires the answer service, then
//! dispatches to the command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use iscoolgpt_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "iscoolgpt", &mut std::io::stdout());
        return Ok(());
    }

    let options = TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: cli.json,
        enable_otel: cli.otel,
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, provider = state.answer_service.provider_name(), "server listening");
            if !cli.json {
                println!(
                    "  {} {} listening on {}",
                    console::style("⚡").bold(),
                    state.settings.api_title,
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
        }

        Commands::Ask {
            question,
            context,
            max_tokens,
        } => {
            cli::ask::ask(&state, question, context, max_tokens, cli.json).await?;
        }

        Commands::Config => {
            cli::config::show_config(&state, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled before startup"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
