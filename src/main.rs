use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use m2clean::{
    approx_size, default_repo_root, delete_candidates, IgnoreRule, PathResolver, ScanOptions,
    ScanResult, Scanner, StaleCutoff,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Find and optionally delete stale dependencies from a local Maven repository",
    long_about = None
)]
struct Args {
    /// Repository folder to scan (defaults to $M2_REPO, then ~/.m2/repository)
    #[arg(long, short)]
    repo: Option<PathBuf>,

    /// Number of months the last access of a dependency must predate for it
    /// to be reported for removal
    #[arg(long, short, default_value_t = 6)]
    months: u32,

    /// Also report folders left empty once everything inside them has been
    /// selected for removal
    #[arg(long, short)]
    prune: bool,

    /// Regular expression matched against repository-relative folder paths;
    /// matching folders are skipped entirely
    #[arg(long, short)]
    ignore: Option<String>,

    /// Show the per-file access times behind each candidate
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // A malformed pattern must abort before any scanning happens
    let ignore = IgnoreRule::from_pattern(args.ignore.as_deref())?;

    let root = match args.repo.or_else(default_repo_root) {
        Some(root) => root,
        None => bail!("no repository given and no home directory to derive one from"),
    };
    if !root.is_dir() {
        eprintln!("{}", format!("Repository {} not found", root.display()).red());
        process::exit(2);
    }

    let cutoff = StaleCutoff::months_before_now(args.months)?;
    let resolver = PathResolver::new(root);

    println!("m2clean");
    println!("  repo: {}", resolver.root().display());
    println!("  months: {}", args.months);
    println!();
    println!(
        "Dependencies older than {} from repository {}:",
        cutoff.date(),
        resolver.root().display()
    );

    let scanner = Scanner::new(
        &resolver,
        &ignore,
        &cutoff,
        ScanOptions {
            prune: args.prune,
            verbose: args.verbose,
        },
    );
    let result = scanner.scan()?;

    println!();
    println!(
        "Found {} candidates totalling {}",
        result.candidates.len(),
        approx_size(result.total_bytes).bold()
    );

    if result.candidates.is_empty() {
        return Ok(());
    }

    if !confirm(&format!(
        "Delete these {} folders?",
        result.candidates.len()
    ))? {
        println!("Nothing deleted.");
        return Ok(());
    }

    delete_confirmed(&resolver, &result)
}

fn delete_confirmed(resolver: &PathResolver, result: &ScanResult) -> Result<()> {
    let summary = delete_candidates(resolver, &result.candidates);

    println!(
        "Removed {} folders ({} reclaimed)",
        summary.removed,
        approx_size(summary.bytes_reclaimed).green()
    );
    for (path, err) in &summary.failures {
        eprintln!(
            "{}",
            format!("Failed to remove {}: {}", path.display(), err).red()
        );
    }
    if !summary.failures.is_empty() {
        bail!("{} folders could not be removed", summary.failures.len());
    }
    Ok(())
}

/// Ask a yes/no question on stdout and read the answer from stdin.
/// Anything other than y/yes/true (case-insensitive, trimmed) means no;
/// so does a closed stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let answer = input.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "true"))
}
