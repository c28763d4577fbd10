use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tangram::api::{classify_all, decompose_all, solve_scene};
use tangram::Config;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;
mod scene;

#[derive(Parser)]
#[command(name = "tangram-cli")]
#[command(about = "Classify blocks, decompose silhouettes and solve tangram scenes")]
struct Cmd {
    /// Configuration JSON; missing fields fall back to defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a scene and write the report plus a provenance sidecar
    Solve {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print classified blocks and rejected contours
    Classify {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print decomposed shadow pieces and rejected silhouettes
    Decompose {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print version, git revision and the default configuration
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cmd = Cmd::parse();
    let cfg = scene::read_config(cmd.config.as_deref())?;
    match cmd.action {
        Action::Solve { input, out } => solve(input, out, cmd.config, &cfg),
        Action::Classify { input } => classify(input, &cfg),
        Action::Decompose { input } => decompose(input, &cfg),
        Action::Report => report(),
    }
}

fn solve(input: PathBuf, out: PathBuf, config: Option<PathBuf>, cfg: &Config) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "solve");
    let scene = scene::read_scene(&input)?;
    let report = solve_scene(&scene, cfg)
        .with_context(|| format!("solving scene {}", input.display()))?;
    scene::write_json(&out, &report)?;

    let payload = provenance::Payload::new(json!({
        "input": input.to_string_lossy(),
        "config_file": config.map(|p| p.to_string_lossy().into_owned()),
        "config": cfg,
    }))
    .with_counts(json!({
        "block_contours": scene.blocks.len(),
        "silhouettes": scene.silhouettes.len(),
        "blocks": report.blocks.len(),
        "shadows": report.shadows.len(),
        "placements": report.solution.placements.len(),
        "unsolved": report.solution.unsolved.len(),
        "nodes_expanded": report.solution.stats.nodes_expanded,
    }));
    let sidecar = provenance::write_sidecar(&out, payload)?;
    tracing::info!(
        complete = report.solution.is_complete(),
        sidecar = %sidecar.display(),
        "wrote report"
    );
    Ok(())
}

fn classify(input: PathBuf, cfg: &Config) -> Result<()> {
    let scene = scene::read_scene(&input)?;
    let (blocks, rejected) = classify_all(&scene.blocks, cfg);
    let blocks: Vec<_> = blocks
        .into_iter()
        .map(|(index, block)| json!({ "index": index, "block": block }))
        .collect();
    let doc = json!({ "blocks": blocks, "rejected": rejected });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn decompose(input: PathBuf, cfg: &Config) -> Result<()> {
    let scene = scene::read_scene(&input)?;
    let (shadows, rejected) = decompose_all(&scene.silhouettes, cfg);
    let shadows: Vec<_> = shadows
        .into_iter()
        .map(|(index, shadow)| json!({ "silhouette": index, "shadow": shadow }))
        .collect();
    let doc = json!({ "shadows": shadows, "rejected": rejected });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "version": tangram::VERSION,
        "code_rev": provenance::current_git_rev(),
        "config": Config::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
