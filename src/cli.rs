use clap::Parser;
use std::path::PathBuf;

use crate::grid::LoadOptions;

#[derive(Parser, Debug)]
#[command(name = "skew-angle")]
#[command(version, about = "Estimate the correction angle of a skewed rectangle in a binary grid or image")]
pub struct Cli {
    /// Input CSV grids or images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// CSV cell text marking a foreground cell
    #[arg(short, long, default_value = "1")]
    pub foreground: String,

    /// CSV field delimiter
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Grey level separating image foreground from background [default: Otsu]
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Treat bright image pixels as the shape
    #[arg(long)]
    pub light_foreground: bool,

    /// Fail on unreadable input or a degenerate fit instead of printing 0
    #[arg(long)]
    pub strict: bool,

    /// Show detection details
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            foreground: self.foreground.clone(),
            delimiter: self.delimiter,
            threshold: self.threshold,
            light_foreground: self.light_foreground,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    let s = if s == "\\t" { "\t" } else { s };
    match s.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("Invalid delimiter '{}', expected a single ASCII character", s)),
    }
}
