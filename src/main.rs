//! ogshot - render the site's preview images
//!
//! Usage: ogshot [--out-dir DIR] [--only PATH]... [--list]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::warn;
use ogshot::{catalog, ChromeDriver, Error, ImageSpec, RenderConfig, CATALOG};

/// Render social-share preview images through headless Chrome
#[derive(Parser, Debug)]
#[command(name = "ogshot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the images are written under [default: <crate>/images/og]
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Chrome/Chromium binary to launch instead of the auto-detected one
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Timeout for each browser operation
    #[arg(long, value_name = "MS", default_value_t = 30000)]
    timeout_ms: u64,

    /// Disable Chrome's sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Render only these catalog entries (by output path)
    #[arg(long, value_name = "PATH")]
    only: Vec<String>,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    list: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_output_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("images").join("og")
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn select(only: &[String]) -> ogshot::Result<Vec<ImageSpec<'static>>> {
    if only.is_empty() {
        return Ok(CATALOG.to_vec());
    }
    let mut specs: Vec<ImageSpec<'static>> = Vec::with_capacity(only.len());
    for path in only {
        let spec = catalog::find(path)
            .copied()
            .ok_or_else(|| Error::ConfigError(format!("no catalog entry for {}", path)))?;
        if specs.contains(&spec) {
            warn!("{} requested more than once, rendering it once", path);
            continue;
        }
        specs.push(spec);
    }
    Ok(specs)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.list {
        println!("{}", serde_json::to_string_pretty(CATALOG)?);
        return Ok(());
    }

    let specs = select(&cli.only)?;
    let output_root = cli.out_dir.unwrap_or_else(default_output_root);
    let config = RenderConfig {
        timeout_ms: cli.timeout_ms,
        chrome_path: cli.chrome,
        sandbox: !cli.no_sandbox,
        ..Default::default()
    };

    println!("Generating OG images into {}...\n", output_root.display());

    let mut driver = ChromeDriver::start(config, output_root.clone()).context("could not start headless Chrome")?;
    let written = driver.run(&specs, |path| println!("✓ Generated: {}", path.display()))?;
    driver.stop()?;

    println!("\n✓ All OG images generated successfully!");
    println!("\nGenerated {} images in {}", written.len(), output_root.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
