//! Cluster the samples of a text file, and report how long the clustering took.

use anyhow::Context;
use clap::Parser;
use pkmeans::{io, KMeansConfig, Termination};
use rand::prelude::*;
use std::{fs::File, io::{BufWriter, Write}, path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pkmeans")]
#[command(version, about = "Parallel Lloyd k-means clustering", long_about = None)]
struct Cli {
    /// Dataset file, one sample per line, features separated by commas or whitespace
    datafile: PathBuf,

    /// Amount of clusters
    k: usize,

    /// Amount of worker threads (0 = one per logical cpu)
    num_threads: usize,

    /// Seed for the random generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum amount of iterations
    #[arg(long, default_value_t = pkmeans::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Write the cluster of every sample (one per line) into this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let kmean = io::load_samples::<f64>(&cli.datafile)
        .with_context(|| format!("failed to load {}", cli.datafile.display()))?;
    info!(samples = kmean.sample_cnt(), features = kmean.sample_dims(), "dataset loaded");

    let rnd = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let conf = KMeansConfig::build()
        .random_generator(rnd)
        .num_threads(cli.num_threads)
        .max_iter(cli.max_iter)
        .build();

    let start = Instant::now();
    let result = kmean.kmeans_lloyd(cli.k, &conf)?;
    let elapsed = start.elapsed();

    info!(
        k = result.k,
        iterations = result.iterations,
        distsum = result.distsum,
        termination = ?result.termination,
        "clustering done"
    );
    if let Termination::IterationLimitReached { changed } = result.termination {
        eprintln!("warning: stopped after {} iterations with {} samples still moving", result.iterations, changed);
    }

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        for assignment in &result.assignments {
            writeln!(writer, "{}", assignment)?;
        }
        writer.flush()?;
    }

    println!("Elapsed time: {:.6} seconds", elapsed.as_secs_f64());
    Ok(())
}
