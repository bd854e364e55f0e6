use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sqldep_core::Config;
use sqldep_graph::{discover_artifacts, DependencyGraph, GraphBuilder, Relationship};
use sqldep_viz::VizDocument;

const DEFAULT_CONFIG_FILE: &str = "sqldep.toml";

/// sqldep - Dependency graphs for directories of SQL artifacts
#[derive(Parser)]
#[command(name = "sqldep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: sqldep.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every command that builds a graph
#[derive(clap::Args)]
struct GraphArgs {
    /// Path to the SQL directory, e.g. ../sql
    #[arg(long, default_value = ".")]
    sql_dir: PathBuf,

    /// Edge direction: "dependency" lists what an artifact reads from,
    /// "parent" lists what reads from it (requires --root-artifact)
    #[arg(long, default_value = "dependency")]
    relationship: Relationship,

    /// Root of the subgraph to show, e.g. project.dataset.table
    #[arg(long)]
    root_artifact: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dependency graph
    Graph {
        #[command(flatten)]
        args: GraphArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write the visualization document (elements, stylesheet, layout)
    Viz {
        #[command(flatten)]
        args: GraphArgs,

        /// Cytoscape layout name, or "default" to pick one from the query
        #[arg(long, default_value = "default")]
        graph_type: String,

        /// Output file for the document
        #[arg(short, long, default_value = "viz.json")]
        output: PathBuf,
    },

    /// List discovered artifacts and their types
    Artifacts {
        /// Path to the SQL directory
        #[arg(long, default_value = ".")]
        sql_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Graph { args, format } => graph_command(&args, format),
        Commands::Viz { args, graph_type, output } => {
            viz_command(&config, &args, &graph_type, &output, cli.verbose)
        }
        Commands::Artifacts { sql_dir } => artifacts_command(&config, &sql_dir),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load the explicit config, else ./sqldep.toml, else defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return Config::from_file(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()));
    }

    if verbose {
        eprintln!("{}", "No config file found, using defaults".yellow());
    }
    Ok(Config::default())
}

fn build_graph(args: &GraphArgs) -> Result<DependencyGraph> {
    let mut builder = GraphBuilder::new(&args.sql_dir).relationship(args.relationship);
    if let Some(root) = &args.root_artifact {
        builder = builder.root_artifact(root.as_str());
    }

    builder
        .build()
        .with_context(|| format!("Failed to build graph for {}", args.sql_dir.display()))
}

/// Graph command - print the graph
fn graph_command(args: &GraphArgs, format: OutputFormat) -> Result<()> {
    let graph = build_graph(args)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&graph.sorted_entries())?);
        }
        OutputFormat::Text => print_graph(&graph, args),
    }

    Ok(())
}

fn print_graph(graph: &DependencyGraph, args: &GraphArgs) {
    let arrow = match args.relationship {
        Relationship::Dependency => "depends on",
        Relationship::Parent => "used by",
    };

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "SQL Dependency Graph".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("{} {}", "Relationship:".bold(), args.relationship);
    if let Some(root) = &args.root_artifact {
        println!("{} {}", "Root artifact:".bold(), root.green());
    }
    println!("{} {}", "Artifacts:".bold(), graph.artifacts().len());
    println!();

    if graph.is_empty() {
        println!("{}", "No relationships found".yellow());
    }

    for (artifact, targets) in graph.to_sorted() {
        if targets.is_empty() {
            println!("{}", artifact.green());
            continue;
        }

        println!("{} {}", artifact.green(), arrow.dimmed());
        for target in targets {
            println!("  {}", target.yellow());
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}

/// Viz command - write the visualization document
fn viz_command(
    config: &Config,
    args: &GraphArgs,
    graph_type: &str,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("{} {}", "Scanning".cyan(), args.sql_dir.display());
    }

    let graph = build_graph(args)?;
    let document = VizDocument::build(
        &graph,
        config,
        args.relationship,
        args.root_artifact.as_deref(),
        graph_type,
    )?;

    document
        .save_to_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} ({} nodes, {} edges, layout {})",
        "Visualization saved to:".green(),
        output.display(),
        document.node_count(),
        document.edge_count(),
        document.layout.name
    );

    Ok(())
}

/// Artifacts command - list discovered artifacts
fn artifacts_command(config: &Config, sql_dir: &Path) -> Result<()> {
    let classifier = config.classifier()?;
    let artifacts = discover_artifacts(sql_dir)
        .with_context(|| format!("Failed to scan {}", sql_dir.display()))?;

    if artifacts.is_empty() {
        println!("{}", "No .sql files found".yellow());
        return Ok(());
    }

    for (artifact, path) in &artifacts {
        println!(
            "{:<40} {:<16} {}",
            artifact.green(),
            classifier.classify(artifact, None).cyan(),
            path.display().to_string().dimmed()
        );
    }

    println!();
    println!("{} artifacts", artifacts.len());

    Ok(())
}
