//! CLI command implementations.

use crate::GraphArgs;
use bramble_graph::{
    dijkstra, summarize, Graph, GraphConfig, GraphLoader, GraphSummary, LoadReport,
    VertexLabelIndex,
};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Merges the config file (if any) with command-line overrides.
fn graph_config(args: &GraphArgs) -> Result<GraphConfig> {
    let mut config = match &args.config {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::default(),
    };

    if args.directed {
        config.directed = true;
    }
    if args.weighted {
        config.weighted = true;
    }
    if let Some(capacity) = args.capacity {
        config.initial_capacity = capacity;
    }

    debug!("Graph config: {:?}", config);
    Ok(config)
}

/// Builds a graph from an edge-list file.
fn load(args: &GraphArgs, file: &Path) -> Result<(Graph, VertexLabelIndex, LoadReport)> {
    let config = graph_config(args)?;
    let mut graph = config.build_graph()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Loading {}...", file.display()));

    let mut loader = GraphLoader::new(&mut graph);
    let report = loader.load_from_file(file);
    spinner.finish_and_clear();
    let report = report?;
    let index = loader.into_index();

    println!(
        "{} Loaded {} vertices and {} edges in {}ms",
        "✓".green(),
        graph.vertex_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        report.duration_ms
    );
    if report.malformed_lines > 0 {
        println!(
            "{} Skipped {} malformed lines",
            "⚠".yellow(),
            report.malformed_lines
        );
    }

    Ok((graph, index, report))
}

fn resolve(index: &VertexLabelIndex, label: &str) -> Result<usize> {
    index
        .resolve(label)
        .ok_or_else(|| format!("vertex \"{}\" not found", label).into())
}

/// Load a graph and print every metric.
pub fn summary(args: &GraphArgs, file: &Path, skip_paths: bool, json: bool) -> Result<()> {
    let (graph, _, report) = load(args, file)?;

    let bar = ProgressBar::new(graph.vertex_count() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Shortest paths [{bar:30.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("=> "),
    );
    if skip_paths || json {
        bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let summary = summarize(&graph, !skip_paths, |done, _| bar.set_position(done as u64))?;
    bar.finish_and_clear();

    if json {
        let output = serde_json::json!({
            "load": report,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&summary);
    }

    graph.release();
    Ok(())
}

fn print_summary(summary: &GraphSummary) {
    let kind = match (summary.directed, summary.weighted) {
        (true, true) => "directed, weighted",
        (true, false) => "directed, unweighted",
        (false, true) => "undirected, weighted",
        (false, false) => "undirected, unweighted",
    };

    println!();
    println!("{} ({})", "Graph".bold(), kind.dimmed());
    println!("  Vertices:        {}", summary.vertex_count.to_string().cyan());
    println!("  Edges:           {}", summary.edge_count.to_string().cyan());

    match summary.average_degree {
        Some(avg) => println!("  Average degree:  {:.4}", avg),
        None => println!("  Average degree:  {}", "n/a".dimmed()),
    }
    match (summary.max_degree, &summary.max_degree_vertex) {
        (Some(max), Some(label)) => {
            println!("  Max degree:      {} (vertex {})", max, label.cyan())
        }
        _ => println!("  Max degree:      {}", "n/a".dimmed()),
    }
    match summary.assortativity {
        Some(r) => println!("  Assortativity:   {:.4}", r),
        None => println!("  Assortativity:   {}", "undefined".dimmed()),
    }

    if let Some(paths) = &summary.paths {
        println!();
        println!("{}", "Shortest paths".bold());
        println!("  Average length:  {:.4}", paths.average);
        println!("  Reachable pairs: {}", paths.reachable_pairs);
        println!("  Diameter:        {}", paths.diameter);
    }
}

/// Print the degree of one vertex.
pub fn degree(args: &GraphArgs, file: &Path, label: &str) -> Result<()> {
    let (graph, index, _) = load(args, file)?;
    let v = resolve(&index, label)?;

    let degree = graph.degree(v).unwrap_or(0);
    if graph.is_directed() {
        let in_degree = graph.in_degree(v).unwrap_or(0);
        println!(
            "Vertex {}: out-degree {}, in-degree {}",
            label.cyan(),
            degree.to_string().green(),
            in_degree.to_string().green()
        );
    } else {
        println!("Vertex {}: degree {}", label.cyan(), degree.to_string().green());
    }

    Ok(())
}

/// Print a shortest path between two vertices.
pub fn path(args: &GraphArgs, file: &Path, from: &str, to: &str) -> Result<()> {
    let (graph, index, _) = load(args, file)?;
    let source = resolve(&index, from)?;
    let target = resolve(&index, to)?;

    let paths = dijkstra(&graph, source)?;
    match paths.path_to(target) {
        Some(hops) => {
            let rendered: Vec<String> = hops
                .iter()
                .filter_map(|&v| graph.label(v))
                .map(|label| label.to_string())
                .collect();
            println!(
                "Shortest {} -> {}: cost {}, {} hops",
                from.cyan(),
                to.cyan(),
                paths.distance(target),
                hops.len() - 1
            );
            println!("  {}", rendered.join(" -> "));
        }
        None => {
            println!("No path from {} to {}", from.cyan(), to.cyan());
        }
    }

    Ok(())
}
