// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
neuroviz command-line tool

Renders the teaching diagrams to SVG and prints principal-component semantics.

Usage:
  cargo run --bin neuroviz -- projection --w-angle 0 --f1-angle 0 --f2-angle 180 --signed
  cargo run --bin neuroviz -- layers --variant alternate --output layers.svg
  cargo run --bin neuroviz -- scatter --vit data_dev/scores_vit_full.json --neuron data_dev/neuron_scores.json
  cargo run --bin neuroviz -- semantics --pca vit_pca.json --labels imagenet1000_clsidx_to_labels.txt --top-k 10

Configuration is read from neuroviz_configuration.toml (or NEUROVIZ_CONFIG_PATH),
then NEUROVIZ_* environment variables, then the flags given here.
*/

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::{debug, info};

use neuroviz::config::{load_config_or_default, validate_config, NeurovizConfig};
use neuroviz::data::{load_labels, semantic_signature, PcaResult, ScoreDataset};
use neuroviz::observability::{debug_flags_help, init_logging};
use neuroviz::{load_updates, ProjectionFlags};
use neuroviz::render::{
    render_scatter, LayerDiagram, ProjectionStyle, ProjectionVisualizer, ScatterStyle,
};

/// Teaching visualizations for neural projections
#[derive(Parser, Debug)]
#[command(name = "neuroviz", version, author, long_about = None)]
struct Cli {
    /// Configuration file (defaults to discovery of neuroviz_configuration.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Default log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Console log format (text or json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Enable debug logging for a crate (repeatable), e.g. --debug neuroviz-render
    #[arg(long = "debug", value_name = "CRATE", global = true)]
    debug_crates: Vec<String>,

    /// Enable debug logging for every crate
    #[arg(long, global = true, default_value_t = false)]
    debug_all: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the weight/feature projection diagram
    Projection(ProjectionArgs),
    /// Render the three-layer network sketch
    Layers(LayersArgs),
    /// Render the ViT PC1 vs neuron response scatter plot
    Scatter(ScatterArgs),
    /// Print the semantic signature of principal components
    Semantics(SemanticsArgs),
}

#[derive(Args, Debug)]
struct ProjectionArgs {
    #[command(flatten)]
    flags: ProjectionFlags,

    /// JSON array of parameter updates applied in order after start-up,
    /// e.g. [{"param": "w_angle", "value": 90}]
    #[arg(long)]
    updates: Option<PathBuf>,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LayersArgs {
    /// Preset: primary or alternate
    #[arg(long)]
    variant: Option<String>,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScatterArgs {
    /// JSON array of ViT PC1 scores
    #[arg(long)]
    vit: Option<PathBuf>,

    /// JSON array of neuron responses
    #[arg(long)]
    neuron: Option<PathBuf>,

    /// Directory of scene_NNN.png thumbnails referenced by tooltips
    #[arg(long)]
    image_dir: Option<String>,

    /// Seed of the horizontal jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SemanticsArgs {
    /// PCA result JSON with an "eigenvectors" matrix
    #[arg(long)]
    pca: Option<PathBuf>,

    /// Label file, one class label per line
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Labels reported on each side
    #[arg(long)]
    top_k: Option<usize>,

    /// Number of leading components reported
    #[arg(long)]
    components: Option<usize>,

    /// Emit the signatures as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn insert<T: ToString>(overrides: &mut HashMap<String, String>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        overrides.insert(key.to_string(), v.to_string());
    }
}

/// Collect every flag that maps onto a configuration key
fn cli_overrides(cli: &Cli) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    insert(&mut overrides, "log_level", cli.log_level.as_ref());
    insert(&mut overrides, "log_format", cli.log_format.as_ref());

    match &cli.command {
        Command::Projection(args) => overrides.extend(args.flags.overrides()),
        Command::Layers(args) => insert(&mut overrides, "layers_variant", args.variant.as_ref()),
        Command::Scatter(args) => {
            insert(&mut overrides, "vit_path", args.vit.as_ref().map(|p| p.display()));
            insert(&mut overrides, "neuron_path", args.neuron.as_ref().map(|p| p.display()));
            insert(&mut overrides, "image_dir", args.image_dir.as_ref());
            insert(&mut overrides, "jitter_seed", args.seed);
        }
        Command::Semantics(args) => {
            insert(&mut overrides, "pca_path", args.pca.as_ref().map(|p| p.display()));
            insert(&mut overrides, "labels_path", args.labels.as_ref().map(|p| p.display()));
            insert(&mut overrides, "top_k", args.top_k);
            insert(&mut overrides, "components", args.components);
        }
    }
    overrides
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn run_projection(config: &NeurovizConfig, args: &ProjectionArgs) -> Result<()> {
    let mut viz = ProjectionVisualizer::new(config.projection, ProjectionStyle::from_config(config));

    if let Some(path) = &args.updates {
        let updates = load_updates(path)?;
        let changed = viz.apply_all(updates.iter().copied());
        debug!("Applied {} updates ({} changed a value)", updates.len(), changed);
    }

    let frame = viz.frame();
    write_output(args.output.as_deref(), &frame.to_svg())?;

    // keep stdout clean for the SVG when no output file is given
    for line in &frame.summary {
        if args.output.is_some() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
    Ok(())
}

fn run_layers(config: &NeurovizConfig, args: &LayersArgs) -> Result<()> {
    let diagram = LayerDiagram::from_config(&config.layers)?;
    write_output(args.output.as_deref(), &diagram.to_svg())
}

fn run_scatter(config: &NeurovizConfig, args: &ScatterArgs) -> Result<()> {
    let scatter = &config.scatter;
    let dataset = ScoreDataset::load(&scatter.vit_path, &scatter.neuron_path, &scatter.image_dir)?;
    let frame = render_scatter(&dataset, &ScatterStyle::from_config(scatter))?;
    info!(
        "Highlighted images: {:?}",
        frame.highlighted.iter().collect::<Vec<_>>()
    );
    write_output(args.output.as_deref(), &frame.to_svg())
}

fn run_semantics(config: &NeurovizConfig, args: &SemanticsArgs) -> Result<()> {
    let semantics = &config.semantics;
    let pca = PcaResult::load(&semantics.pca_path)?;
    let labels = load_labels(&semantics.labels_path)?;

    let count = semantics.components.min(pca.component_count());
    if count == 0 {
        bail!("{} contains no components", semantics.pca_path.display());
    }

    let signatures = (0..count)
        .map(|p| semantic_signature(&pca, &labels, p, semantics.top_k))
        .collect::<Result<Vec<_>, _>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&signatures)?);
    } else {
        for signature in &signatures {
            print!("{}", signature);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = Cli::command().after_help(debug_flags_help()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let overrides = cli_overrides(&cli);
    let config = load_config_or_default(cli.config.as_deref(), Some(&overrides))
        .context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    let mut crates = cli.debug_crates.clone();
    if cli.debug_all {
        crates.push("all".to_string());
    }
    let flags = neuroviz::debug_flags(&config, &crates);
    let settings = neuroviz::logging_settings(&config)?;
    let guard = init_logging(&flags, &settings)?;
    if let Some(dir) = guard.log_dir() {
        info!("Writing log files to {}", dir.display());
    }

    if flags.any_enabled() {
        debug!("Debug logging enabled for {:?}", flags.enabled_crates());
    }
    debug!("Effective configuration: {:?}", config);

    match &cli.command {
        Command::Projection(args) => run_projection(&config, args),
        Command::Layers(args) => run_layers(&config, args),
        Command::Scatter(args) => run_scatter(&config, args),
        Command::Semantics(args) => run_semantics(&config, args),
    }
}
