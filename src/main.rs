//! WayChat terminal client entry point.

use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use waychat::cli::terminal::{forward_stdin, EchoCounter, TerminalSurface, QUIT_COMMAND};
use waychat::cli::{format_error_help, Cli};
use waychat::config::ChatConfig;
use waychat::controller::ConversationController;
use waychat::transcript::TranscriptStore;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", format_error_help(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> waychat::error::Result<()> {
    let mut config = ChatConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    tracing::debug!(?config, "loaded config");

    let client = Arc::new(config.build_client()?);
    let transcript = TranscriptStore::new(config.system_prompt.clone());
    let echoes = EchoCounter::new();
    let surface = TerminalSurface::new(
        std::io::stdout(),
        std::io::stdin().is_terminal(),
        echoes.clone(),
    );
    let mut controller = ConversationController::new(transcript, client, surface);

    println!("WayChat ({}). Type {QUIT_COMMAND} to exit.\n", config.completion.model.as_str());

    let (events_tx, events_rx) = mpsc::channel(16);
    tokio::spawn(forward_stdin(events_tx, echoes));
    controller.run(events_rx).await;
    Ok(())
}
