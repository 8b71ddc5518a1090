use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crate-bundler")]
#[command(
    version,
    about = "Download crates.io dependencies recursively into a single zip"
)]
struct Cli {
    /// Path to a file holding the [dependencies] fragment, or `-` for stdin
    fragment: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fragment = if cli.fragment.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.fragment)
            .with_context(|| format!("failed to read {}", cli.fragment.display()))?
    };

    let archive = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(crate_bundler::bundle_from_fragment(&fragment))?;

    println!("{}", archive.display());
    Ok(())
}
