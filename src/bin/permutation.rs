use anyhow::{Context, Result};
use clap::Parser;
use queuekit::permutation::{permutation, read_tokens};
use queuekit::RandomizedQueue;
use std::io::{self, BufWriter};

/// Reads whitespace separated tokens from standard input and prints
/// `K` of them, one per line, chosen uniformly at random without
/// repeats.
#[derive(Parser)]
#[command(name = "permutation")]
#[command(about = "Print K random tokens from standard input", long_about = None)]
struct Cli {
    /// How many tokens to print
    k: usize,

    /// Seed the generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let stdin = io::stdin();
    let tokens = read_tokens(stdin.lock()).context("Failed to read tokens from stdin")?;

    let queue = match cli.seed {
        Some(seed) => RandomizedQueue::with_seed(seed),
        None => RandomizedQueue::new(),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    permutation(tokens, cli.k, queue, &mut out)
        .with_context(|| format!("Failed to print {} tokens", cli.k))?;

    Ok(())
}
