//! Tricount CLI: count triangles in Matrix Market graphs or random graphs
//!
//! Logs go to stderr (`-v` for info, `-vv` for debug); results go to stdout.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::Level;
use tricount::{GraphSummary, IndexBase, Pipeline, Report, RunConfig, Strategy};

#[derive(Parser)]
#[command(name = "tricount", version, about = "Parallel sparse triangle counting")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Flags shared by every counting command
#[derive(Args)]
struct CountArgs {
    /// Worker threads (0 = all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// edge-merge, ordered or masked-product
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Include per-vertex triangle counts
    #[arg(long)]
    per_vertex: bool,

    /// Cross-check with the dense brute-force counter
    #[arg(long)]
    verify: bool,

    /// YAML run configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count triangles in a Matrix Market file (.mtx or .mtx.gz)
    Count {
        file: PathBuf,

        /// Input indices start at 0 instead of 1
        #[arg(long)]
        zero_based: bool,

        #[command(flatten)]
        args: CountArgs,
    },
    /// Count triangles in a random graph
    Random {
        /// Number of vertices
        n: usize,

        /// Edge probability
        #[arg(long)]
        probability: Option<f64>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the generated graph as Matrix Market
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: CountArgs,
    },
    /// Show header and structure of a Matrix Market file
    Inspect {
        file: PathBuf,

        /// Input indices start at 0 instead of 1
        #[arg(long)]
        zero_based: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", error_message(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Count { file, zero_based, args } => run_count(&file, zero_based, &args, &cli.format),
        Commands::Random { n, probability, seed, output, args } => {
            run_random(n, probability, seed, output.as_deref(), &args, &cli.format)
        }
        Commands::Inspect { file, zero_based } => run_inspect(&file, zero_based, &cli.format),
    }
}

/// One-line message with the whole context chain
fn error_message(e: &anyhow::Error) -> String {
    format!("Error: {:#}", e)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then the YAML file, then flags
fn build_config(args: &CountArgs) -> anyhow::Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    config.per_vertex |= args.per_vertex;
    config.verify |= args.verify;
    Ok(config)
}

fn run_count(
    file: &Path,
    zero_based: bool,
    args: &CountArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut config = build_config(args)?;
    if zero_based {
        config.index_base = IndexBase::Zero;
    }
    let pipeline = Pipeline::new(config)?;
    let report = pipeline
        .run_file(file)
        .with_context(|| format!("failed to count {}", file.display()))?;
    print_report(&report, format)
}

fn run_random(
    n: usize,
    probability: Option<f64>,
    seed: Option<u64>,
    output: Option<&Path>,
    args: &CountArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut config = build_config(args)?;
    if let Some(p) = probability {
        config.probability = p;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    let pipeline = Pipeline::new(config)?;

    let (source, edges) = pipeline.generate(n)?;
    if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        tricount::mtx::write_pattern(&edges, BufWriter::new(file))?;
        eprintln!("Wrote {} edges to {}", edges.nnz(), path.display());
    }

    let report = pipeline.run_edges(&source, &edges)?;
    print_report(&report, format)
}

fn run_inspect(file: &Path, zero_based: bool, format: &OutputFormat) -> anyhow::Result<()> {
    let config = RunConfig {
        index_base: if zero_based { IndexBase::Zero } else { IndexBase::One },
        ..Default::default()
    };
    let summary = Pipeline::new(config)?
        .inspect(file)
        .with_context(|| format!("failed to inspect {}", file.display()))?;
    print_summary(&summary, format)
}

fn print_report(report: &Report, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", report.to_json()?);
        }
        OutputFormat::Csv => {
            print_csv_pairs(&report.summary_rows());
            if report.per_vertex.is_some() {
                println!();
                println!("vertex,triangles");
                for (v, c) in report.nonzero_vertices() {
                    println!("{},{}", v, c);
                }
            }
        }
        OutputFormat::Table => {
            print_table_pairs(&report.summary_rows());

            if report.per_vertex.is_some() {
                let rows = report.nonzero_vertices();
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["Vertex", "Triangles"]);
                for (v, c) in &rows {
                    table.add_row(vec![v.to_string(), c.to_string()]);
                }
                println!("{}", table);
                println!("{} row(s)", rows.len());
            }
        }
    }
    Ok(())
}

fn print_summary(summary: &GraphSummary, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", summary.to_json()?),
        OutputFormat::Csv => print_csv_pairs(&summary.summary_rows()),
        OutputFormat::Table => print_table_pairs(&summary.summary_rows()),
    }
    Ok(())
}

fn print_table_pairs(rows: &[(&'static str, String)]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value.clone()]);
    }
    println!("{}", table);
}

fn print_csv_pairs(rows: &[(&'static str, String)]) {
    println!("field,value");
    for (name, value) in rows {
        println!("{},{}", name, format_csv_value(value));
    }
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv_value() {
        assert_eq!(format_csv_value("plain"), "plain");
        assert_eq!(format_csv_value("random(n=5, p=0.5)"), "\"random(n=5, p=0.5)\"");
        assert_eq!(format_csv_value("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "tricount", "count", "g.mtx", "--strategy", "ordered", "--threads", "4", "--per-vertex",
        ])
        .unwrap();
        match cli.command {
            Commands::Count { file, zero_based, args } => {
                assert_eq!(file, PathBuf::from("g.mtx"));
                assert!(!zero_based);
                assert_eq!(args.strategy, Some(Strategy::Ordered));
                assert_eq!(args.threads, Some(4));
                assert!(args.per_vertex);
            }
            _ => panic!("expected count"),
        }

        assert!(Cli::try_parse_from(["tricount", "count", "g.mtx", "--strategy", "bogus"]).is_err());
        assert!(Cli::try_parse_from(["tricount", "random"]).is_err());
    }

    #[test]
    fn test_errors_carry_context() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mtx");

        let cli = Cli::try_parse_from(["tricount", "count", missing.to_str().unwrap()]).unwrap();
        let msg = error_message(&run(cli).unwrap_err());
        assert!(msg.starts_with("Error: failed to count "), "{}", msg);
        assert!(msg.contains("missing.mtx"), "{}", msg);
        assert!(msg.contains("I/O error"), "{}", msg);

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "threads: lots\n").unwrap();
        let cli = Cli::try_parse_from([
            "tricount", "inspect", missing.to_str().unwrap(),
        ])
        .unwrap();
        assert!(error_message(&run(cli).unwrap_err()).starts_with("Error: failed to inspect "));

        let cli = Cli::try_parse_from([
            "tricount", "random", "10", "--config", bad.to_str().unwrap(),
        ])
        .unwrap();
        let msg = error_message(&run(cli).unwrap_err());
        assert!(msg.starts_with("Error: failed to load config "), "{}", msg);
        assert!(msg.contains("YAML error"), "{}", msg);

        let cli = Cli::try_parse_from(["tricount", "random", "0"]).unwrap();
        let msg = error_message(&run(cli).unwrap_err());
        assert!(msg.contains("vertex count must be within"), "{}", msg);
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, "strategy: masked-product\nthreads: 3\n").unwrap();

        let args = CountArgs {
            threads: Some(6),
            strategy: None,
            per_vertex: true,
            verify: false,
            config: Some(path),
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.strategy, Strategy::MaskedProduct);
        assert_eq!(config.threads, 6);
        assert!(config.per_vertex);
    }
}
