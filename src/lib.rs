pub mod cli;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod grid;

pub use cli::Cli;
pub use detection::{
    correction_angle_for_path, correction_angle_or_zero, extract_left_edge,
    find_correction_angle, Correction, LeftEdge,
};
pub use error::{Result, SkewError};
pub use geometry::{compute_slope, resolve_angle, round_degrees, Fit, RegressionSummary};
pub use grid::{Grid, LoadOptions};
