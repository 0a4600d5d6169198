use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{compute_slope, resolve_angle, Fit};
use crate::grid::{Grid, LoadOptions};

/// Left-edge points of the shape in scan order, as parallel row/column lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeftEdge {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    /// Grid row whose first foreground cell moved right of the previous
    /// point, ending the scan
    pub stopped_at: Option<usize>,
}

impl LeftEdge {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of the estimation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Rotation in whole degrees, within (-90, 90)
    Angle(i32),
    /// The left edge is a single column: nothing to correct
    Aligned,
    /// No foreground cell below the header row
    NoEdge,
}

impl Correction {
    /// Degrees to report, with both non-angle outcomes mapped to 0
    pub fn degrees(self) -> i32 {
        match self {
            Correction::Angle(degrees) => degrees,
            Correction::Aligned | Correction::NoEdge => 0,
        }
    }
}

/// Collect the first foreground cell of each data row, top to bottom.
///
/// Row 0 is the header and is skipped; rows without foreground are skipped
/// as well. The edge column may only stay put or move left: the first row
/// whose column moves right is taken as the corner of the rectangle and the
/// scan stops there.
pub fn extract_left_edge(grid: &Grid) -> LeftEdge {
    let mut edge = LeftEdge::default();
    // Sentinel beyond any valid column
    let mut prev_col = grid.width();
    let mut on_left_side = true;

    let mut row = 1;
    while on_left_side && row < grid.height() {
        if let Some(col) = grid.row(row).iter().position(|&cell| cell) {
            if col > prev_col {
                on_left_side = false;
                edge.stopped_at = Some(row);
            } else {
                edge.rows.push(row);
                edge.cols.push(col);
                prev_col = col;
            }
        }
        row += 1;
    }

    debug!(
        points = edge.len(),
        stopped_at = ?edge.stopped_at,
        "extracted left edge"
    );
    edge
}

/// Estimate the correction angle of the rectangle in `grid`.
///
/// A rotated edge gives [`Correction::Angle`]; an upright edge or an empty
/// grid are reported as their own outcomes. Fails only when the edge points
/// cannot be fitted.
pub fn find_correction_angle(grid: &Grid) -> Result<Correction> {
    let edge = extract_left_edge(grid);
    if edge.is_empty() {
        return Ok(Correction::NoEdge);
    }

    let summary = match compute_slope(&edge.rows, &edge.cols)? {
        Fit::Vertical => return Ok(Correction::Aligned),
        Fit::Slope(summary) => summary,
    };

    debug!(
        slope = summary.slope,
        correlation = summary.correlation,
        row_std_dev = summary.row_std_dev,
        col_std_dev = summary.col_std_dev,
        "fitted left edge"
    );

    Ok(Correction::Angle(resolve_angle(summary.slope)?))
}

/// Like [`find_correction_angle`], but every failure is reported as 0
pub fn correction_angle_or_zero(grid: &Grid) -> i32 {
    match find_correction_angle(grid) {
        Ok(correction) => correction.degrees(),
        Err(err) => {
            warn!(error = %err, "could not estimate correction angle, using 0");
            0
        }
    }
}

/// Load `path` and estimate its correction angle, reporting 0 when the
/// source is missing or unreadable as well as when estimation fails
pub fn correction_angle_for_path(path: &Path, options: &LoadOptions) -> i32 {
    match Grid::load(path, options) {
        Ok(grid) => correction_angle_or_zero(&grid),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not load grid, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header row plus one data row per entry, each with its first
    /// foreground cell at the given column (filled to the right edge)
    fn grid_with_edge(width: usize, first_cols: &[Option<usize>]) -> Grid {
        let header = vec![false; width];
        let data = first_cols.iter().map(|first| {
            (0..width)
                .map(|col| first.is_some_and(|first| col >= first))
                .collect::<Vec<_>>()
        });
        Grid::from_rows(std::iter::once(header).chain(data)).unwrap()
    }

    #[test]
    fn test_header_row_ignored() {
        let grid = Grid::from_rows(vec![vec![true, true], vec![false, true]]).unwrap();
        let edge = extract_left_edge(&grid);
        assert_eq!(edge.rows, vec![1]);
        assert_eq!(edge.cols, vec![1]);
    }

    #[test]
    fn test_decreasing_edge_collected() {
        let grid = grid_with_edge(5, &[Some(4), Some(3), Some(2), Some(1)]);
        let edge = extract_left_edge(&grid);
        assert_eq!(edge.rows, vec![1, 2, 3, 4]);
        assert_eq!(edge.cols, vec![4, 3, 2, 1]);
        assert_eq!(edge.stopped_at, None);
    }

    #[test]
    fn test_scan_stops_when_edge_moves_right() {
        let grid = grid_with_edge(5, &[Some(1), Some(3), Some(0), Some(0)]);
        let edge = extract_left_edge(&grid);
        assert_eq!(edge.len(), 1);
        assert_eq!(edge.cols, vec![1]);
        assert_eq!(edge.stopped_at, Some(2));
    }

    #[test]
    fn test_blank_rows_skipped() {
        let grid = grid_with_edge(5, &[None, Some(3), None, Some(2)]);
        let edge = extract_left_edge(&grid);
        assert_eq!(edge.rows, vec![2, 4]);
        assert_eq!(edge.cols, vec![3, 2]);
    }

    #[test]
    fn test_blank_row_then_rightward_step_stops() {
        let grid = grid_with_edge(5, &[Some(2), None, Some(3), Some(1)]);
        let edge = extract_left_edge(&grid);
        assert_eq!(edge.rows, vec![1]);
        assert_eq!(edge.stopped_at, Some(3));
    }

    #[test]
    fn test_leaning_edge_angle() {
        let grid = grid_with_edge(5, &[Some(4), Some(3), Some(2), Some(1)]);
        assert_eq!(find_correction_angle(&grid).unwrap(), Correction::Angle(-45));
    }

    #[test]
    fn test_upright_edge_is_aligned() {
        let grid = grid_with_edge(5, &[Some(2), Some(2), Some(2), Some(2)]);
        assert_eq!(find_correction_angle(&grid).unwrap(), Correction::Aligned);
        assert_eq!(correction_angle_or_zero(&grid), 0);
    }

    #[test]
    fn test_no_foreground() {
        let grid = grid_with_edge(5, &[None, None, None]);
        assert_eq!(find_correction_angle(&grid).unwrap(), Correction::NoEdge);
        assert_eq!(correction_angle_or_zero(&grid), 0);
    }

    #[test]
    fn test_single_data_row() {
        let grid = grid_with_edge(5, &[Some(3)]);
        assert_eq!(find_correction_angle(&grid).unwrap(), Correction::Aligned);
    }

    #[test]
    fn test_repeated_runs_agree() {
        let grid = grid_with_edge(6, &[Some(5), Some(5), Some(4), Some(4), Some(3)]);
        let first = find_correction_angle(&grid).unwrap();
        let second = find_correction_angle(&grid).unwrap();
        assert_eq!(first, second);
        assert!(matches!(first, Correction::Angle(deg) if deg < 0));
    }

    #[test]
    fn test_correction_degrees() {
        assert_eq!(Correction::Angle(-12).degrees(), -12);
        assert_eq!(Correction::Aligned.degrees(), 0);
        assert_eq!(Correction::NoEdge.degrees(), 0);
    }
}
