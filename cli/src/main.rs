//! Annograph CLI: inspect a graph described by an adjacency document
//!
//! Loads a JSON or YAML adjacency document, builds the graph and prints
//! counts, degrees, neighbours or edges.

use annograph::{AdjacencyDocument, BuiltGraph, Graph};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "annograph", version, about = "Inspect graphs built from adjacency documents")]
struct Cli {
    /// Adjacency document (.json, .yaml or .yml)
    file: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts
    Summary,
    /// In- and out-degree of every node
    Degrees,
    /// Neighbours of one node
    Neighbours {
        /// Node name
        node: String,
    },
    /// Every edge with its weight
    Edges,
}

/// Tabular result shared by every command
struct Report {
    columns: Vec<String>,
    records: Vec<Vec<Value>>,
}

impl Report {
    fn new(columns: &[&str]) -> Self {
        Report {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records: Vec::new(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let built = load(&cli.file)?;

    let report = match &cli.command {
        Commands::Summary => summary(&built),
        Commands::Degrees => degrees(built.as_graph())?,
        Commands::Neighbours { node } => neighbours(built.as_graph(), node)?,
        Commands::Edges => edges(built.as_graph()),
    };
    print_report(&report, &cli.format)
}

fn load(path: &Path) -> anyhow::Result<BuiltGraph> {
    let document = AdjacencyDocument::from_path(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    debug!(
        "Loaded {} with {} adjacency entries",
        path.display(),
        document.adjacency.len()
    );

    let built = document.build().context("failed to build graph")?;
    let graph = built.as_graph();
    info!(
        "Built {} graph with {} nodes and {} edges",
        if built.is_directed() { "directed" } else { "undirected" },
        graph.node_count(),
        graph.edge_count()
    );
    Ok(built)
}

fn summary(built: &BuiltGraph) -> Report {
    let graph = built.as_graph();
    let mut report = Report::new(&["kind", "nodes", "edges"]);
    let kind = if built.is_directed() { "directed" } else { "undirected" };
    report
        .records
        .push(vec![json!(kind), json!(graph.node_count()), json!(graph.edge_count())]);
    report
}

fn degrees(graph: &Graph) -> anyhow::Result<Report> {
    let mut report = Report::new(&["node", "in", "out"]);
    for node in graph.all_nodes() {
        let name = node.name();
        let in_degree = graph.in_degree(name)?;
        let out_degree = graph.out_degree(name)?;
        report
            .records
            .push(vec![json!(name.as_str()), json!(in_degree), json!(out_degree)]);
    }
    Ok(report)
}

fn neighbours(graph: &Graph, node: &str) -> anyhow::Result<Report> {
    let mut report = Report::new(&["neighbour", "edges"]);
    for neighbour in graph.neighbours(node)? {
        report.records.push(vec![
            json!(neighbour.name().as_str()),
            json!(graph.get_edges(node, neighbour).len()),
        ]);
    }
    Ok(report)
}

fn edges(graph: &Graph) -> Report {
    let mut report = Report::new(&["edge", "kind", "weight"]);
    for edge in graph.all_edges() {
        report.records.push(vec![
            json!(edge.to_string()),
            json!(edge.kind().to_string()),
            json!(edge.weight()),
        ]);
    }
    report
}

fn print_report(report: &Report, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = report
                .records
                .iter()
                .map(|row| {
                    let object = report
                        .columns
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect::<serde_json::Map<String, Value>>();
                    Value::Object(object)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            println!("{}", report.columns.join(","));
            for row in &report.records {
                let cells: Vec<String> = row.iter().map(format_csv_value).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if report.records.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&report.columns);

            for row in &report.records {
                let cells: Vec<String> = row.iter().map(format_table_value).collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", report.records.len());
        }
    }

    Ok(())
}

fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(_) | Value::Array(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}

fn format_csv_value(v: &Value) -> String {
    match v {
        Value::Null => "".to_string(),
        Value::String(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.clone()
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => {
            let json = serde_json::to_string(v).unwrap_or_default();
            format!("\"{}\"", json.replace('"', "\"\""))
        }
    }
}
