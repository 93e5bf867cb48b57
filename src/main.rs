// ColorCraft - Main Entry Point
//
// CLI client for the generation gate:
// - generate: run a request through the daily quota / passcode flow
// - status: show remaining generations for today

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colorcraft_gate::config::Config;
use colorcraft_gate::flow::{RequestFlow, Resume, Submission};
use colorcraft_gate::gate::{
    JsonFileStore, OverrideGate, QuotaTracker, SessionUnlock, SystemClock,
};
use colorcraft_gate::generator::{GenerationRequest, HttpGenerator};
use colorcraft_gate::prompt::{PasscodePrompt, PromptInput};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// ColorCraft: text description in, printable coloring page out
#[derive(Parser, Debug)]
#[command(name = "colorcraft")]
#[command(author = "ColorCraft Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Generate coloring pages within a daily quota", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a coloring page from a text description
    Generate {
        /// What the page should show
        description: String,

        /// Write the image data to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show remaining free generations for today
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(filter.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    match args.command {
        Commands::Generate {
            description,
            output,
        } => generate(&config, description, output).await,
        Commands::Status => status(&config),
    }
}

fn build_flow(config: &Config) -> Result<RequestFlow<JsonFileStore, SystemClock, HttpGenerator>> {
    let session = Arc::new(SessionUnlock::new());
    let store = JsonFileStore::new(config.gate.resolved_record_path());
    let quota = QuotaTracker::new(
        store,
        SystemClock,
        config.gate.daily_limit,
        Arc::clone(&session),
    );
    let gate = OverrideGate::new(config.gate.passcode.clone(), session);
    let generator = HttpGenerator::with_timeout(
        config.generator.endpoint.clone(),
        Duration::from_secs(config.generator.timeout_secs),
    )?;
    Ok(RequestFlow::new(quota, gate, generator))
}

async fn generate(config: &Config, description: String, output: Option<String>) -> Result<()> {
    let flow = build_flow(config)?;
    let prompt = PasscodePrompt::new();

    info!("Submitting generation request");
    let image = match flow.submit(GenerationRequest::new(description)).await? {
        Submission::Performed(image) => image,
        Submission::LimitReached(pending) => {
            // Quota exhausted: loop on the passcode prompt until the code
            // is accepted or the user gives up
            let mut input = prompt.ask(flow.limit())?;
            let mut pending = pending;
            loop {
                match input {
                    PromptInput::Cancelled => {
                        flow.cancel(pending);
                        println!("Cancelled. Your quota resets tomorrow.");
                        return Ok(());
                    }
                    PromptInput::Code(code) => match flow.resume(pending, &code).await? {
                        Resume::Performed(image) => break image,
                        Resume::Rejected(rejected) => {
                            pending = rejected;
                            input = prompt.ask_again()?;
                        }
                    },
                }
            }
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &image.image_data)
                .with_context(|| format!("Failed to write image to {path}"))?;
            println!("Saved coloring page to {path}");
        }
        None => println!("{}", image.image_data),
    }

    if flow.is_unlocked() {
        println!("Access: unlimited (for this session)");
    } else {
        println!("Remaining today: {}", flow.remaining());
    }

    Ok(())
}

fn status(config: &Config) -> Result<()> {
    let session = Arc::new(SessionUnlock::new());
    let store = JsonFileStore::new(config.gate.resolved_record_path());
    let quota = QuotaTracker::new(store, SystemClock, config.gate.daily_limit, session);

    // A fresh process always starts locked, so this reports the persisted
    // quota rather than any unlock state
    println!(
        "Remaining today: {} of {}",
        quota.remaining(),
        quota.limit()
    );

    Ok(())
}
