//! linkrank CLI — rank the pages of a static HTML corpus
//!
//! Crawls a corpus directory, then runs the sampling and iteration estimators over it.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use linkrank::{
    distribution, iterate_rank_run, load_config, load_graph, rank_graph, sample_rank_run,
    ConfigOverrides, LinkGraph, RankConfig, RankMap, RankReport, DEFAULT_PRECISION,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkrank", version, about = "Rank HTML pages by link structure")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Decimal places for ranks and probabilities
    #[arg(long, default_value_t = DEFAULT_PRECISION, global = true)]
    precision: usize,

    /// YAML file with damping_factor / sample_count / tolerance / max_passes / seed
    #[arg(long, global = true, env = "LINKRANK_CONFIG")]
    config: Option<PathBuf>,

    /// Probability of following a link instead of jumping to a random page
    #[arg(long, global = true, env = "LINKRANK_DAMPING")]
    damping: Option<f64>,

    /// Number of pages visited by the sampler
    #[arg(long, global = true, env = "LINKRANK_SAMPLES")]
    samples: Option<usize>,

    /// Absolute per-page change at which iteration stops
    #[arg(long, global = true, env = "LINKRANK_TOLERANCE")]
    tolerance: Option<f64>,

    /// Iteration passes allowed before reporting non-convergence
    #[arg(long, global = true, env = "LINKRANK_MAX_PASSES")]
    max_passes: Option<usize>,

    /// Seed for a reproducible sampler
    #[arg(long, global = true, env = "LINKRANK_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both estimators (sampling first, then iteration)
    Rank {
        /// Directory of .html pages
        corpus: PathBuf,
    },
    /// Estimate ranks with the random-surfer sampler only
    Sample {
        /// Directory of .html pages
        corpus: PathBuf,
    },
    /// Compute ranks by fixed-point iteration only
    Iterate {
        /// Directory of .html pages
        corpus: PathBuf,
    },
    /// Show where the surfer goes next from a page
    Transition {
        /// Directory of .html pages
        corpus: PathBuf,
        /// Current page (file name)
        page: String,
    },
    /// Show the crawled link graph
    Links {
        /// Directory of .html pages
        corpus: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = resolve_config(&cli).and_then(|config| {
        debug!(?config, "Resolved rank config");
        match &cli.command {
            Commands::Rank { corpus } => run_rank(corpus, &config, &cli.format, cli.precision),
            Commands::Sample { corpus } => run_sample(corpus, &config, &cli.format, cli.precision),
            Commands::Iterate { corpus } => {
                run_iterate(corpus, &config, &cli.format, cli.precision)
            }
            Commands::Transition { corpus, page } => {
                run_transition(corpus, page, &config, &cli.format, cli.precision)
            }
            Commands::Links { corpus } => run_links(corpus, &cli.format),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn resolve_config(cli: &Cli) -> Result<RankConfig, Box<dyn std::error::Error>> {
    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => RankConfig::default(),
    };
    let overrides = ConfigOverrides {
        damping_factor: cli.damping,
        sample_count: cli.samples,
        tolerance: cli.tolerance,
        max_passes: cli.max_passes,
        seed: cli.seed,
    };
    Ok(overrides.apply(base)?)
}

fn run_rank(
    corpus: &Path,
    config: &RankConfig,
    format: &OutputFormat,
    precision: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(corpus)?;
    let comparison = rank_graph(&graph, config)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        OutputFormat::Csv => {
            println!("page,sampling,iteration");
            for (page, sampled) in &comparison.sampling.ranks {
                let iterated = comparison.iteration.ranks.get(page).copied().unwrap_or(0.0);
                println!(
                    "{},{:.*},{:.*}",
                    csv_field(page),
                    precision,
                    sampled,
                    precision,
                    iterated
                );
            }
        }
        OutputFormat::Text => {
            println!("{}", comparison.render(precision));
        }
        OutputFormat::Table => {
            print_report(&comparison.sampling, format, precision)?;
            println!();
            print_report(&comparison.iteration, format, precision)?;
            println!(
                "Max divergence: {:.*} ({} iteration passes)",
                precision, comparison.max_divergence, comparison.passes
            );
        }
    }

    Ok(())
}

fn run_sample(
    corpus: &Path,
    config: &RankConfig,
    format: &OutputFormat,
    precision: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(corpus)?;
    let run = sample_rank_run(&graph, config)?;
    print_report(&RankReport::sampling(run.ranks, run.sample_count), format, precision)
}

fn run_iterate(
    corpus: &Path,
    config: &RankConfig,
    format: &OutputFormat,
    precision: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(corpus)?;
    let run = iterate_rank_run(&graph, config)?;
    print_report(&RankReport::iteration(run.ranks), format, precision)?;
    if let OutputFormat::Table = format {
        println!("Converged after {} passes", run.passes);
    }
    Ok(())
}

fn run_transition(
    corpus: &Path,
    page: &str,
    config: &RankConfig,
    format: &OutputFormat,
    precision: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(corpus)?;
    let dist = distribution(&graph, page, config.damping_factor)?;
    let report = RankReport::new(
        format!(
            "Transition distribution from {} (damping = {})",
            page, config.damping_factor
        ),
        dist,
    );
    print_report(&report, format, precision)
}

fn run_links(corpus: &Path, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(corpus)?;
    let links = graph.to_link_map();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&links)?);
        }
        OutputFormat::Csv => {
            println!("page,link");
            for (page, targets) in &links {
                for target in targets {
                    println!("{},{}", csv_field(page), csv_field(target));
                }
            }
        }
        OutputFormat::Text => {
            for (page, targets) in &links {
                let joined: Vec<&str> = targets.iter().map(String::as_str).collect();
                println!("{}: {}", page, joined.join(", "));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Page", "Out-degree", "Links"]);
            for (page, targets) in &links {
                let joined: Vec<&str> = targets.iter().map(String::as_str).collect();
                table.add_row(vec![
                    page.clone(),
                    targets.len().to_string(),
                    joined.join(", "),
                ]);
            }
            println!("{}", table);
            print_graph_summary(&graph);
        }
    }

    Ok(())
}

fn print_report(
    report: &RankReport,
    format: &OutputFormat,
    precision: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            println!("page,value");
            print_csv_rows(&report.ranks, precision);
        }
        OutputFormat::Text => {
            println!("{}", report.render(precision));
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Page", "Value"]);
            for (page, value) in &report.ranks {
                table.add_row(vec![page.clone(), format!("{:.*}", precision, value)]);
            }
            println!("{}", report.title);
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_csv_rows(ranks: &RankMap, precision: usize) {
    for (page, value) in ranks {
        println!("{},{:.*}", csv_field(page), precision, value);
    }
}

fn print_graph_summary(graph: &LinkGraph) {
    println!(
        "{} page(s), {} link(s), {} without outgoing links",
        graph.page_count(),
        graph.edge_count(),
        graph.dangling_pages().count()
    );
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
