//! fuzzline - fuzzy phrase search over a text file
//!
//! Indexes every line of FILE and prints the phrases closest to QUERY,
//! best first, with the line numbers they occur on.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fuzzline::{FuzzlineConfig, ScoredResult, SearchConfig};

/// Fuzzy phrase search over a text file
#[derive(Parser, Debug)]
#[command(name = "fuzzline")]
#[command(about = "Rank the phrases of a text file by similarity to a query", long_about = None)]
#[command(version)]
struct Cli {
    /// Text file to index, one source line per file line
    file: PathBuf,

    /// Query words; joined with single spaces
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// YAML configuration file; flags below override its values
    #[arg(short, long, env = "FUZZLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Longest n-gram (in words) to index
    #[arg(short = 'n', long)]
    n_gram_upto: Option<usize>,

    /// Candidates kept per sub-query
    #[arg(short, long)]
    limit: Option<usize>,

    /// Minimum score a result must reach
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Weight of the positional Jaccard term, in [0, 1]
    #[arg(short, long)]
    weighting: Option<f64>,

    /// Match case-sensitively
    #[arg(long)]
    no_downcase: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn search_config(&self) -> anyhow::Result<SearchConfig> {
        let base = match &self.config {
            Some(path) => FuzzlineConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => FuzzlineConfig::default(),
        };

        let mut cfg = base.to_search_config();
        if let Some(n) = self.n_gram_upto {
            cfg = cfg.with_n_gram_upto(n);
        }
        if let Some(limit) = self.limit {
            cfg = cfg.with_limit(limit);
        }
        if let Some(threshold) = self.threshold {
            cfg = cfg.with_threshold(threshold);
        }
        if let Some(weighting) = self.weighting {
            cfg = cfg.with_weighting(weighting);
        }
        if self.no_downcase {
            cfg = cfg.with_downcase(false);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_rows(results: &[ScoredResult]) {
    for result in results {
        let lines: Vec<String> = result.lines.iter().map(u32::to_string).collect();
        println!("{:.4}  {}  {}", result.score, result.phrase, lines.join(","));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = cli.search_config()?;
    let query = cli.query.join(" ");

    let index = fuzzline::index_file(&cli.file, &cfg)
        .with_context(|| format!("indexing {}", cli.file.display()))?;
    info!(file = %cli.file.display(), entries = index.len(), "index_loaded");

    let results = fuzzline::search(&index, &query)
        .with_context(|| format!("searching for {query:?}"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_rows(&results);
    }

    Ok(())
}
