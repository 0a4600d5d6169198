use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skew_angle::{correction_angle_for_path, find_correction_angle, Cli, Grid};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "skew_angle=debug" } else { "skew_angle=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let options = cli.load_options();
    let labelled = cli.inputs.len() > 1;

    for input in &cli.inputs {
        let degrees = if cli.strict {
            let grid = Grid::load(input, &options)
                .with_context(|| format!("Failed to load grid: {:?}", input))?;
            let correction = find_correction_angle(&grid)
                .with_context(|| format!("Failed to estimate correction angle: {:?}", input))?;
            info!(path = %input.display(), ?correction, "estimated");
            correction.degrees()
        } else {
            correction_angle_for_path(input, &options)
        };

        if labelled {
            println!("{}: {}", input.display(), degrees);
        } else {
            println!("{}", degrees);
        }
    }

    Ok(())
}
