use std::io;

use clap::Parser;
use tracing::info;

mod error;
mod models;
mod repl;
mod stats;
mod store;
mod validate;

#[derive(Parser)]
#[command(name = "learning-progress-tracker", version)]
#[command(about = "Interactive tracker for student enrollment and course progress", long_about = None)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("learning_progress_tracker=warn".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    info!("session started");
    println!("Learning Progress Tracker");

    let mut platform = store::Platform::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    repl::run(&mut platform, &mut input)
}
