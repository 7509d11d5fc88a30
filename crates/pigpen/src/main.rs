//! Pigpen - unified CLI
//!
//! Text play, auto-play and the advisory server.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use pigpen::{AppConfig, AutoPlayer, GameEvent, StopReason};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?.with_env_overrides();

    match cli.command {
        Command::Serve { host, port } => run_server(config, host, port).await,
        Command::Play { seed, advisor_url } => {
            run_play(with_url(config, advisor_url), seed).await
        }
        Command::Auto {
            seed,
            advisor_url,
            max_rounds,
        } => run_auto(with_url(config, advisor_url), seed, max_rounds).await,
    }
}

fn with_url(config: AppConfig, advisor_url: Option<String>) -> AppConfig {
    match advisor_url {
        Some(url) => config.with_advisor_url(url),
        None => config,
    }
}

/// Serve the built-in advisor on `/api/move`
#[instrument(skip(config))]
async fn run_server(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server().host().clone());
    let port = port.unwrap_or(*config.server().port());

    // Serving a remote advisor would only proxy it.
    let advisor = config.clone().without_advisor_url().build_advisor()?;

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!("Advisory service ready at http://{}:{}/api/move", host, port);
    pigpen_advisor::serve(listener, advisor).await?;
    Ok(())
}

/// Play in the terminal
#[instrument(skip(config))]
async fn run_play(config: AppConfig, seed: Option<u64>) -> Result<()> {
    let mut game = config.new_game(seed)?;
    let advisor = config.build_advisor()?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    pigpen::run_text(&mut game, advisor.as_ref(), stdin, &mut stdout).await
}

/// Let the advisor play and narrate the game
#[instrument(skip(config))]
async fn run_auto(config: AppConfig, seed: Option<u64>, max_rounds: u32) -> Result<()> {
    let game = config.new_game(seed)?;
    let advisor = config.build_advisor()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GameEvent::StateChanged(board) => print!("{board}"),
                GameEvent::AdvisorThinking { round } => println!("-- round {round} --"),
                GameEvent::BlockPlaced { cell, rationale } => {
                    for thought in rationale {
                        println!("  {thought}");
                    }
                    println!("Advisor blocked {cell}");
                }
                GameEvent::PigMoved { from, step } => match step.target() {
                    Some(to) => println!("Pig {from} -> {to}"),
                    None => println!("Pig stays at {from}"),
                },
                GameEvent::AdviceFailed(message) => println!("Advice failed: {message}"),
                GameEvent::GameOver { outcome } => println!("{outcome}"),
            }
        }
    });

    let mut player = AutoPlayer::new(game, advisor, max_rounds, event_tx);
    let summary = player.run().await?;
    drop(player);
    printer.await?;

    match summary.stopped {
        StopReason::Finished(outcome) => println!(
            "{} after {} round(s); advisor {}",
            outcome,
            summary.rounds,
            if outcome.blocker_won() { "won" } else { "lost" }
        ),
        StopReason::AdviceFailed(message) => println!("Stopped: {message}"),
        StopReason::RoundLimit => println!("Stopped after {} round(s)", summary.rounds),
    }
    Ok(())
}
