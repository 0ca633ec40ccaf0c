use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use serde::Serialize;
use sprite_forge_core::batch::{AtlasRunReport, SheetRunReport, write_atlas, write_sheets};
use sprite_forge_core::source::{LoadReport, load_sources, load_sources_with};
use sprite_forge_core::{ForgeConfig, PackStats};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "sprite-forge",
    about = "Render character sprite sheets and pack sprites into an atlas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the idle and walk sheets into the sprite directory
    Sheets(ForgeArgs),
    /// Pack the sprite directory into the atlas image + JSON manifest
    Atlas(ForgeArgs),
    /// Render the sheets, then pack the atlas
    Build(ForgeArgs),
}

#[derive(Parser, Debug, Clone)]
struct ForgeArgs {
    // Input/Output
    /// YAML config file path; flags below override its values
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Directory receiving sheets and holding atlas sources
    #[arg(long, help_heading = "Input/Output")]
    sprite_dir: Option<PathBuf>,
    /// Directory receiving the atlas image and manifest
    #[arg(long, help_heading = "Input/Output")]
    atlas_dir: Option<PathBuf>,
    /// Atlas base name (files will be name.webp/.json)
    #[arg(long, help_heading = "Input/Output")]
    atlas_name: Option<String>,
    /// Source file-name pattern (glob), matched inside the sprite directory
    #[arg(long, help_heading = "Input/Output")]
    pattern: Option<String>,

    // Layout
    /// Atlas width
    #[arg(long, help_heading = "Layout")]
    atlas_width: Option<u32>,
    /// Atlas height
    #[arg(long, help_heading = "Layout")]
    atlas_height: Option<u32>,
    /// Render cells and decode sources in parallel (requires feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    parallel: bool,

    // Export
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Sheets(args) => {
            let Some(cfg) = prepare(args)? else {
                return Ok(());
            };
            run_sheets(&cfg)?;
        }
        Commands::Atlas(args) => {
            let Some(cfg) = prepare(args)? else {
                return Ok(());
            };
            let report = run_atlas(&cfg, progress)?;
            export_stats(args, &report)?;
        }
        Commands::Build(args) => {
            let Some(cfg) = prepare(args)? else {
                return Ok(());
            };
            run_sheets(&cfg)?;
            let report = run_atlas(&cfg, progress)?;
            export_stats(args, &report)?;
        }
    }
    Ok(())
}

/// Merged configuration, or `None` after `--print-config` has printed it.
fn prepare(args: &ForgeArgs) -> anyhow::Result<Option<ForgeConfig>> {
    let cfg = load_config(args)?;
    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(None);
    }
    cfg.validate().context("invalid configuration")?;
    Ok(Some(cfg))
}

fn load_config(args: &ForgeArgs) -> anyhow::Result<ForgeConfig> {
    // Config file sets any subset of sections; flags then override individual fields
    let mut cfg = if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_yaml::from_str::<ForgeConfig>(&file)
            .with_context(|| format!("parse config {}", path.display()))?
    } else {
        ForgeConfig::default()
    };
    if let Some(v) = &args.sprite_dir {
        cfg.output.sprite_dir = v.clone();
    }
    if let Some(v) = &args.atlas_dir {
        cfg.output.atlas_dir = v.clone();
    }
    if let Some(v) = &args.atlas_name {
        cfg.output.atlas_name = v.clone();
    }
    if let Some(v) = &args.pattern {
        cfg.output.source_pattern = v.clone();
    }
    if let Some(v) = args.atlas_width {
        cfg.atlas.width = v;
    }
    if let Some(v) = args.atlas_height {
        cfg.atlas.height = v;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    Ok(cfg)
}

fn run_sheets(cfg: &ForgeConfig) -> anyhow::Result<SheetRunReport> {
    let report = write_sheets(cfg).with_context(|| {
        format!("write sheets into {}", cfg.output.sprite_dir.display())
    })?;
    for f in &report.failures {
        warn!(path = %f.path.display(), error = %f.error, "sheet not written");
    }
    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "sheets done"
    );
    Ok(report)
}

fn run_atlas(cfg: &ForgeConfig, progress: bool) -> anyhow::Result<AtlasRunReport> {
    let paths = gather_paths(&cfg.output.sprite_dir, &cfg.output.source_pattern)?;
    info!(count = paths.len(), dir = %cfg.output.sprite_dir.display(), "discovered sources");
    let sources = load_sources_with_progress(&paths, progress, cfg.parallel);
    info!(count = sources.sources.len(), "loaded sources");

    let report = write_atlas(sources, cfg)
        .with_context(|| format!("write atlas into {}", cfg.output.atlas_dir.display()))?;
    for r in &report.rejected {
        warn!(name = %r.name, w = r.width, h = r.height, "atlas full, sprite skipped");
    }
    for f in &report.failures {
        warn!(path = %f.path.display(), error = %f.error, "atlas output not written");
    }
    info!("{}", report.stats.summary());
    Ok(report)
}

/// Files directly inside `dir` whose name matches `pattern`, sorted by file name.
/// A missing directory yields an empty list.
fn gather_paths(dir: &Path, pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "source directory missing, nothing to pack");
        return Ok(Vec::new());
    }
    let mut b = GlobSetBuilder::new();
    b.add(Glob::new(pattern).with_context(|| format!("bad pattern {pattern}"))?);
    let set = b.build()?;

    let mut list: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if p.is_file() && set.is_match(entry.file_name()) {
            list.push(p.to_path_buf());
        }
    }
    Ok(list)
}

fn load_sources_with_progress(paths: &[PathBuf], progress: bool, parallel: bool) -> LoadReport {
    use indicatif::{ProgressBar, ProgressStyle};
    if !progress {
        return load_sources(paths, parallel);
    }
    let bar = ProgressBar::new(paths.len() as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}")
    {
        bar.set_style(style);
    }
    let report = load_sources_with(paths, parallel, |p| {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        bar.set_message(msg.to_string());
        bar.inc(1);
    });
    bar.finish_and_clear();
    report
}

#[derive(Serialize)]
struct StatsExport<'a> {
    stats: &'a PackStats,
    loaded: usize,
    input_failures: Vec<String>,
    ineligible: Vec<&'a str>,
    rejected: Vec<&'a str>,
    written: Vec<String>,
}

fn export_stats(args: &ForgeArgs, report: &AtlasRunReport) -> anyhow::Result<()> {
    let Some(stats_path) = &args.export_stats else {
        return Ok(());
    };
    let value = StatsExport {
        stats: &report.stats,
        loaded: report.loaded,
        input_failures: report
            .input_failures
            .iter()
            .map(|f| f.path.display().to_string())
            .collect(),
        ineligible: report.ineligible.iter().map(|i| i.name.as_str()).collect(),
        rejected: report.rejected.iter().map(|r| r.name.as_str()).collect(),
        written: report
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    };
    fs::write(stats_path, serde_json::to_string_pretty(&value)?)
        .with_context(|| format!("write {}", stats_path.display()))?;
    info!(?stats_path, "stats exported");
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
