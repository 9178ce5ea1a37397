use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webstage::paths::Layout;
use webstage::pipeline;

/// Stage the wasm front end and native server builds for deployment.
///
/// The pipeline itself takes no options; everything it needs comes from the
/// fixed project layout.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _cli = Cli::parse();

    let layout = Layout::discover()?;
    pipeline::run(&layout)
}
