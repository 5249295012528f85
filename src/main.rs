//! Command-line consumer of the stress harness
//!
//! Reads three programs (generator, candidate B, candidate C) from files and
//! streams the run's messages to stdout in the plain-text wire protocol.
//! Ctrl+C requests a cooperative stop; the current case finishes first.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stressjudge::{
    Language, ProgramSpec, StressConfig, StressTester, constants,
};

fn usage() -> ! {
    eprintln!(
        "Usage: stressjudge <generator> <lang> <candidate-b> <lang> <candidate-c> <lang> [timeout-secs]\n\
         Supported languages: {}",
        constants::languages::ALL.join(", ")
    );
    std::process::exit(2);
}

fn load_program(path: &str, tag: &str) -> anyhow::Result<ProgramSpec> {
    let language = Language::parse(tag)?;
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {path}"))?;
    Ok(ProgramSpec::new(source, language))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stressjudge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 6 || args.len() > 7 {
        usage();
    }

    let timeout_secs = match args.get(6) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Invalid timeout: {raw}"))?,
        None => constants::DEFAULT_TIMEOUT_SECONDS,
    };

    let config = StressConfig::new(
        load_program(&args[0], &args[1])?,
        load_program(&args[2], &args[3])?,
        load_program(&args[4], &args[5])?,
        timeout_secs,
    );

    let (handle, mut messages) = StressTester::start(config)?;

    loop {
        tokio::select! {
            maybe = messages.recv() => match maybe {
                Some(message) => println!("{}", message.to_wire()),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stop requested, finishing the current case");
                handle.request_stop();
            }
        }
    }

    let phase = handle.wait().await;
    tracing::info!(?phase, "Run finished");
    Ok(())
}
