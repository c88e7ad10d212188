//! treescape CLI - partition plots and contribution tables for fitted models
//!
//! - `render`: draw a decision tree's partition and its data points as SVG
//! - `explain`: print (and optionally draw) a linear prediction breakdown
//! - `inspect`: tree statistics and per-node paths and boxes

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use ndarray::Array1;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use treescape::compat::sklearn::{load_linear_model, load_plot_document, read_json};
use treescape::partition::{tree_depth, Ancestry, Rect};
use treescape::plot::{render, RenderOptions};
use treescape::repr::{LinearModel, NodeId, Side, TreeView};

#[derive(Parser)]
#[command(name = "treescape")]
#[command(version, about = "Partition plots and contribution tables for fitted regression models", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a tree partition plot to SVG
    Render(RenderArgs),

    /// Explain a linear regression prediction for one sample
    Explain(ExplainArgs),

    /// Print tree statistics, or the path and box of one node
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Plot document: `{ "tree": {...}, "samples": [[x, y], ...], "labels": [...] }`
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output SVG path
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Truncate the display at this depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Do not draw split lines
    #[arg(long)]
    no_breaks: bool,

    /// Do not draw leaf regions
    #[arg(long)]
    no_prediction: bool,

    /// Do not draw data points
    #[arg(long)]
    no_points: bool,

    /// JSON file with render options; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Linear regression export: `{ "feature_names": [...], "coef": [...], "intercept": x }`
    #[arg(long, short = 'm')]
    model: PathBuf,

    /// Sample as a JSON array in model column order, or an object keyed by column name
    #[arg(long, short = 's')]
    sample: PathBuf,

    /// Collapse one-hot columns `<PREFIX>_<category>` into one row (repeatable)
    #[arg(long = "one-hot")]
    one_hot: Vec<String>,

    /// Also draw the table to this SVG path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Plot document holding the tree
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Show the root path and bounding box of this node
    #[arg(long)]
    node: Option<NodeId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SampleFile {
    Values(Vec<f64>),
    Named(BTreeMap<String, f64>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "treescape=debug" } else { "treescape=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => cmd_render(args),
        Commands::Explain(args) => cmd_explain(args),
        Commands::Inspect(args) => cmd_inspect(args),
    }
}

/// Apply command-line overrides on top of options read from `--config`.
///
/// `--max-depth` replaces the configured cutoff. The `--no-*` flags can only
/// hide a layer, so a layer hidden in the config stays hidden.
fn merge_render_options(mut options: RenderOptions, args: &RenderArgs) -> RenderOptions {
    if args.max_depth.is_some() {
        options.max_depth = args.max_depth;
    }
    options.show_breaks &= !args.no_breaks;
    options.show_prediction &= !args.no_prediction;
    options.show_points &= !args.no_points;
    options
}

/// Sample values in model column order.
fn sample_values(model: &LinearModel, sample: SampleFile) -> Result<Array1<f64>> {
    let named = match sample {
        SampleFile::Values(values) => return Ok(Array1::from_vec(values)),
        SampleFile::Named(named) => named,
    };

    let mut values = vec![None; model.n_features()];
    for (name, value) in named {
        let index = model
            .feature_index(&name)
            .with_context(|| format!("sample column `{name}` is not a model feature"))?;
        values[index] = Some(value);
    }
    model
        .feature_names()
        .iter()
        .zip(values)
        .map(|(name, value)| value.with_context(|| format!("sample has no value for column `{name}`")))
        .collect()
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let (doc, tree) = load_plot_document(&args.input)?;
    let points = doc.points()?;
    let labels = doc.labels();

    let file_options: RenderOptions = match &args.config {
        Some(path) => read_json(path)?,
        None => RenderOptions::default(),
    };
    let options = merge_render_options(file_options, &args);
    options
        .validate()
        .with_context(|| format!("invalid render options in {:?}", args.config))?;

    let canvas = render(&tree, points.view(), labels.view(), &options)?;
    canvas
        .save_svg(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Wrote {} ({} shapes)", args.output.display(), canvas.len());
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> Result<()> {
    let model = load_linear_model(&args.model)?;
    let sample = sample_values(&model, read_json(&args.sample)?)?;

    let prefixes: Vec<&str> = args.one_hot.iter().map(String::as_str).collect();
    let explanation = treescape::explain(&model, sample.view(), &prefixes)?;
    println!("{explanation}");

    if let Some(output) = &args.output {
        explanation
            .to_canvas((1400, 1000))
            .save_svg(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> Result<()> {
    let (doc, tree) = load_plot_document(&args.input)?;

    let Some(node) = args.node else {
        println!("nodes:   {}", tree.n_nodes());
        println!("leaves:  {}", tree.n_leaves());
        match tree_depth(&tree)? {
            Some(depth) => println!("depth:   {depth}"),
            None => println!("depth:   - (empty tree)"),
        }
        println!("samples: {}", doc.samples.len());
        return Ok(());
    };

    if node as usize >= tree.n_nodes() {
        bail!("node {node} out of range, tree has {} nodes", tree.n_nodes());
    }

    let ancestry = Ancestry::new(&tree);
    println!("node {node} (depth {})", ancestry.depth(node));
    for (ancestor, side) in ancestry.path(node) {
        let axis = tree.split_axis(ancestor);
        let op = match side {
            Side::Left => "<=",
            Side::Right => ">",
        };
        println!(
            "  node {ancestor}: {:?} {op} {}",
            axis,
            tree.split_threshold(ancestor)
        );
    }

    let bbox = ancestry.node_box(&tree, node, Rect::UNIT);
    println!(
        "box: x in [{}, {}], y in [{}, {}]",
        bbox.xmin, bbox.xmax, bbox.ymin, bbox.ymax
    );
    if tree.is_leaf(node) {
        println!("leaf value: {}", tree.value(node));
    } else {
        println!(
            "split: {:?} at {} (node value {})",
            tree.split_axis(node),
            tree.split_threshold(node),
            tree.value(node)
        );
    }
    Ok(())
}
