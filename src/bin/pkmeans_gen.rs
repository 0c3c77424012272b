//! Generate a synthetic dataset with uniformly distributed features.

use anyhow::Context;
use clap::Parser;
use pkmeans::{generate, io};
use rand::prelude::*;
use std::{fs::File, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pkmeans-gen")]
#[command(version, about = "Generate a synthetic k-means dataset", long_about = None)]
struct Cli {
    /// Amount of samples
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    observations: usize,

    /// Amount of features per sample
    #[arg(short, long, default_value_t = 4)]
    features: usize,

    /// Features are drawn uniformly from [0, max-value)
    #[arg(long, default_value_t = 10.0)]
    max_value: f64,

    /// Output file
    #[arg(short, long, default_value = "data.txt")]
    output: PathBuf,

    /// Seed for the random generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.features > 0, "at least one feature is required");
    anyhow::ensure!(cli.max_value > 0.0, "max-value has to be positive");

    let mut rnd = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let samples = generate::uniform_samples(cli.observations, cli.features, cli.max_value, &mut rnd);

    let file = File::create(&cli.output).with_context(|| format!("failed to create {}", cli.output.display()))?;
    io::write_samples(file, &samples, cli.features, 4)?;
    info!(samples = cli.observations, features = cli.features, "dataset written");

    println!("Synthetic dataset {} created.", cli.output.display());
    Ok(())
}
