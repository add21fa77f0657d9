mod cli;

use takeoutfix::{config, preflight, reconcile};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use takeoutfix_exif::{check_exiftool, init_global, ExifTool};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "takeoutfix=trace,takeoutfix_exif=trace,takeoutfix_common=debug".to_string()
        } else {
            "takeoutfix=info,takeoutfix_exif=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Preflight { dir } => run_preflight(&dir, cli.config.as_deref()),
        Commands::Fix {
            dir,
            dry_run,
            workers,
            json,
        } => run_fix(&dir, cli.config.as_deref(), dry_run, workers, json),
        Commands::Writable { json } => list_writable(cli.config.as_deref(), json),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("takeoutfix {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_preflight(dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let walker = preflight::FsWalker {
        follow_links: config.scan.follow_links,
    };
    let processable = preflight::has_processable_takeout_with(dir, &walker)
        .with_context(|| format!("Failed to scan {:?}", dir))?;

    if processable {
        println!("{}: contains photos or videos", dir.display());
    } else {
        println!("{}: no photos or videos found", dir.display());
    }

    Ok(())
}

fn run_fix(
    dir: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
    workers: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let mut options = config.reconcile_options();
    options.dry_run |= dry_run;
    if let Some(workers) = workers {
        options.workers = workers;
    }

    let walker = preflight::FsWalker {
        follow_links: options.follow_links,
    };
    if !preflight::has_processable_takeout_with(dir, &walker)
        .with_context(|| format!("Failed to scan {:?}", dir))?
    {
        anyhow::bail!("No photos or videos found in {:?}", dir);
    }

    let exiftool = ExifTool::discover(config.tools.exiftool.as_deref())?;
    tracing::info!("Using exiftool at {:?}", exiftool.program());

    let reconciler = reconcile::Reconciler::with_exiftool(exiftool, options);
    // Every rename decision depends on this list; stop early if it is missing.
    reconciler
        .registry()
        .extensions()
        .context("Cannot continue without exiftool's writable format list")?;

    let report = reconciler.reconcile_tree(dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for change in &report.changes {
        match change {
            reconcile::Outcome::Renamed { from, to } => {
                println!("renamed  {} -> {}", from.display(), to.display())
            }
            reconcile::Outcome::WouldRename { from, to } => {
                println!("[DRY RUN] {} -> {}", from.display(), to.display())
            }
            _ => {}
        }
    }
    for failure in &report.failures {
        println!("failed   {}: {}", failure.path.display(), failure.error);
    }

    println!();
    println!("Scanned:      {}", report.scanned);
    println!("Unchanged:    {}", report.unchanged);
    if options.dry_run {
        println!("Would rename: {}", report.would_rename);
    } else {
        println!("Renamed:      {}", report.renamed);
    }
    println!("Undetermined: {}", report.undetermined);
    println!("Not writable: {}", report.not_writable);
    println!("Failed:       {}", report.failed);

    Ok(())
}

fn list_writable(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let exiftool = ExifTool::discover(config.tools.exiftool.as_deref())?;
    let registry = init_global(Arc::new(exiftool));

    let mut extensions: Vec<&String> = registry.extensions()?.iter().collect();
    extensions.sort();

    if json {
        println!("{}", serde_json::to_string_pretty(&extensions)?);
    } else {
        for ext in extensions {
            println!("{}", ext);
        }
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tool = check_exiftool(config.tools.exiftool.as_deref());

    let status = if tool.available { "✓" } else { "✗" };
    print!("{} {}", status, tool.name);
    if let Some(ref version) = tool.version {
        print!(" ({})", version);
    }
    if let Some(ref path) = tool.path {
        print!(" - {}", path.display());
    }
    println!();

    println!();
    if tool.available {
        println!("All required tools are available!");
    } else {
        println!("exiftool is missing. Install it or set EXIFTOOL_PATH.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            print_config(&config);
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    match &config.tools.exiftool {
        Some(path) => println!("  exiftool: {}", path.display()),
        None => println!("  exiftool: (auto)"),
    }
    println!("  Rename attempts: {}", config.rename.max_attempts);
    println!("  Dry run: {}", config.rename.dry_run);
    println!("  Workers: {}", config.scan.workers);
    println!("  Follow links: {}", config.scan.follow_links);
}
