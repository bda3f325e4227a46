use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use frontier::config::{BfsConfig, GeneratorConfig};
use frontier::graph::{CsrGraph, Graph, NodeId, Value};
use frontier::{PartitionPolicy, Strategy};

/// Counts reachable nodes carrying a value with a selectable BFS strategy.
#[derive(Parser)]
#[command(name = "bfs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of nodes of the generated graph.
    nodes: Option<usize>,

    /// Worker threads.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Start node.
    #[arg(long)]
    start: Option<NodeId>,

    /// Value to count.
    #[arg(long)]
    search: Option<Value>,

    /// Largest generated node value.
    #[arg(long)]
    max: Option<Value>,

    /// Generator seed.
    #[arg(long)]
    seed: Option<u32>,

    /// Edge probability of the dense generator, in percent.
    #[arg(long)]
    percent: Option<u32>,

    /// Generate exactly this many edges with the sparse generator.
    #[arg(long)]
    edges: Option<usize>,

    /// Frontier entries per round-robin chunk.
    #[arg(long)]
    chunk: Option<usize>,

    /// Frontier partition policy of the thread strategy.
    #[arg(long, value_enum)]
    partition: Option<PartitionPolicy>,

    /// Traversal engine.
    #[arg(long, value_enum, default_value_t = Strategy::Threads)]
    strategy: Strategy,

    /// Load the graph from a JSON file instead of generating it.
    #[arg(long, conflicts_with = "nodes")]
    load: Option<PathBuf>,

    /// Save the graph as JSON before traversing it.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the graph in DOT syntax.
    #[arg(long)]
    dot: bool,

    /// JSON file with `bfs` and `generator` sections; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct FileConfig {
    bfs: BfsConfig,
    generator: GeneratorConfig,
}

impl Cli {
    fn resolve(&self) -> Result<(BfsConfig, GeneratorConfig)> {
        let FileConfig {
            mut bfs,
            mut generator,
        } = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => FileConfig::default(),
        };

        if let Some(v) = self.workers {
            bfs.workers = v;
        }
        if let Some(v) = self.start {
            bfs.start_node = v;
        }
        if let Some(v) = self.search {
            bfs.search_value = v;
        }
        if let Some(v) = self.chunk {
            bfs.chunk_size = v;
        }
        if let Some(v) = self.partition {
            bfs.partition = v;
        }
        if let Some(v) = self.nodes {
            generator.nodes = v;
        }
        if let Some(v) = self.max {
            generator.max_value = v;
        }
        if let Some(v) = self.seed {
            generator.seed = v;
        }
        if let Some(v) = self.percent {
            generator.percent = v;
        }
        if self.edges.is_some() {
            generator.edges = self.edges;
        }

        Ok((bfs, generator))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (bfs, generator) = cli.resolve()?;

    let graph = match &cli.load {
        Some(path) => CsrGraph::load_json(path)
            .with_context(|| format!("failed to load graph from {}", path.display()))?,
        None => {
            if generator.nodes == 0 {
                bail!("either a node count or --load is required");
            }
            generator.generate().context("failed to generate graph")?
        }
    };
    tracing::info!(nodes = graph.node_count(), edges = graph.edge_count(), "graph ready");

    if let Some(path) = &cli.save {
        graph
            .save_json(path)
            .with_context(|| format!("failed to save graph to {}", path.display()))?;
    }
    if cli.dot {
        print!("{}", graph.to_dot());
    }

    let started = Instant::now();
    let occurrences = cli.strategy.run(&graph, &bfs)?;
    let elapsed = started.elapsed();

    tracing::info!(
        strategy = ?cli.strategy,
        workers = bfs.workers,
        ?elapsed,
        "traversal finished"
    );
    println!("Occurrences: {occurrences}");
    Ok(())
}
