use std::time::Duration;

use chrono::Utc;
use clap::Args;
use flames_core::{AssetSource, CachingPrefetcher, Runtime};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::terminal::{TerminalAudio, TerminalFx, TerminalPresenter};

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Never start the background loop or ring the click bell
    #[arg(long)]
    pub mute: bool,
    /// Print stage events as JSON lines on stderr
    #[arg(long)]
    pub events: bool,
}

pub async fn run(
    args: PlayArgs,
    source: AssetSource,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut runtime = Runtime::builder(TerminalPresenter::new(std::io::stdout()))
        .with_audio(TerminalAudio::new(args.mute))
        .with_prefetcher(CachingPrefetcher::new(source.clone()))
        .with_fx(TerminalFx::new(std::io::stdout()))
        .with_seed(seed)
        .build();

    let loaded = runtime.load(&source).await;
    print_events(&mut runtime, args.events)?;
    loaded?;

    println!("Type a control number and press Enter. q quits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let wait = runtime
            .next_deadline()
            .map(|deadline| (deadline - Utc::now()).to_std().unwrap_or_default());

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") {
                    break;
                }
                match line.parse::<usize>() {
                    Ok(n) if n >= 1 && runtime.activate(n - 1) => {}
                    _ => println!("not available: {line}"),
                }
            }
            _ = wait_for(wait) => {
                runtime.tick();
            }
        }
        print_events(&mut runtime, args.events)?;
    }

    tracing::info!(stage = ?runtime.stage(), "leaving");
    Ok(())
}

/// Sleeps until the next timer is due, or forever when none is pending.
async fn wait_for(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => std::future::pending().await,
    }
}

fn print_events(runtime: &mut Runtime, enabled: bool) -> Result<(), serde_json::Error> {
    for event in runtime.drain_events() {
        if enabled {
            eprintln!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}
