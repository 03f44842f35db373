use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aatree::harness::{self, DatasetOrder, HarnessConfig};
use aatree::AaTree;

#[derive(Parser, Debug)]
#[command(name = "aatree", about = "AA-tree workload harness and structure dump")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time insert, lookup and removal over a generated dataset.
    Bench {
        /// Number of values to generate.
        #[arg(long, default_value_t = 100_000)]
        size: usize,
        /// Insertion order: ascending, descending, shuffled or random.
        #[arg(long, default_value = "shuffled")]
        order: DatasetOrder,
        /// Seed for shuffled and random datasets.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Share of the dataset removed after the lookups, in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        removal_ratio: f64,
    },
    /// Build a tree from the given values and print it level by level.
    Dump {
        /// Values to insert, in order.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Values to remove after inserting.
        #[arg(long, num_args = 1.., allow_negative_numbers = true)]
        remove: Vec<i64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            size,
            order,
            seed,
            removal_ratio,
        } => run_bench(size, order, seed, removal_ratio)?,
        Commands::Dump { values, remove } => run_dump(values, remove)?,
    }

    Ok(())
}

fn run_bench(size: usize, order: DatasetOrder, seed: u64, removal_ratio: f64) -> Result<()> {
    let config = HarnessConfig::new(size)
        .with_order(order)
        .with_seed(seed)
        .with_removal_ratio(removal_ratio);

    let report = harness::run(&config)
        .with_context(|| format!("harness run failed for {} {} values", size, order))?;

    println!("{}", report);
    ensure!(
        report.satisfies_height_bound(),
        "height {} exceeds bound {}",
        report.height_after_insert,
        report.height_bound
    );

    Ok(())
}

fn run_dump(values: Vec<i64>, remove: Vec<i64>) -> Result<()> {
    let mut tree: AaTree<i64> = values.into_iter().collect();
    for value in &remove {
        if !tree.remove(value) {
            tracing::warn!(value, "value not present, nothing removed");
        }
    }

    tree.check_invariants()
        .context("tree failed its structural check")?;

    println!("{}", tree);
    println!("size={} height={}", tree.size(), tree.height());
    Ok(())
}
