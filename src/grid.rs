use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::ReaderBuilder;
use image::{DynamicImage, ImageFormat, ImageReader};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use tracing::debug;

use crate::error::{Result, SkewError};

/// Settings for turning a source file into a binary grid
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// CSV cell text that marks a foreground cell
    pub foreground: String,
    /// CSV field delimiter
    pub delimiter: u8,
    /// Grey level separating image foreground from background (Otsu if `None`)
    pub threshold: Option<u8>,
    /// Treat bright pixels as the shape instead of dark ones
    pub light_foreground: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            foreground: "1".to_string(),
            delimiter: b',',
            threshold: None,
            light_foreground: false,
        }
    }
}

/// Rectangular grid of binary cells, stored row-major.
///
/// Row 0 is a header row and never holds shape data; loaders keep it so that
/// grid row indices match the source's line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Build a grid from rows of foreground flags, rejecting ragged input.
    ///
    /// The first row fixes the width.
    pub fn from_rows<R, C>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = bool>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row);
            let found = cells.len() - before;

            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(SkewError::RaggedGrid {
                    row: index,
                    expected,
                    found,
                });
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }

    /// Parse comma-separated (or `options.delimiter`-separated) text.
    ///
    /// A cell is foreground when its text equals `options.foreground`
    /// exactly; every other token is background.
    pub fn from_csv_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| cell == options.foreground)
                    .collect::<Vec<_>>(),
            );
        }

        Self::from_rows(rows)
    }

    /// Binarise an image. Pixel row `y` becomes grid row `y + 1` beneath an
    /// empty header row.
    pub fn from_image(img: &DynamicImage, options: &LoadOptions) -> Self {
        let gray = img.to_luma8();
        let level = options.threshold.unwrap_or_else(|| otsu_level(&gray));
        let kind = if options.light_foreground {
            ThresholdType::Binary
        } else {
            ThresholdType::BinaryInverted
        };
        let mask = threshold(&gray, level, kind);

        debug!(
            width = mask.width(),
            height = mask.height(),
            threshold = level,
            "binarised image"
        );

        let width = mask.width() as usize;
        let height = mask.height() as usize + 1;
        let mut cells = vec![false; width * height];
        for (x, y, pixel) in mask.enumerate_pixels() {
            cells[(y as usize + 1) * width + x as usize] = pixel[0] > 0;
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Load a grid from an image when the file extension names an image
    /// format; any other file, extensionless ones included, is read as CSV.
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        if !path.exists() {
            return Err(SkewError::SourceNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let grid = match extension.as_deref() {
            Some(ext) if ImageFormat::from_extension(ext).is_some() => {
                let img = ImageReader::open(path)
                    .map_err(|err| unreadable(path, err))?
                    .decode()?;
                Self::from_image(&img, options)
            }
            _ => {
                let file = File::open(path).map_err(|err| unreadable(path, err))?;
                Self::from_csv_reader(file, options)?
            }
        };

        debug!(
            path = %path.display(),
            width = grid.width,
            height = grid.height,
            "loaded grid"
        );
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows, header included
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Cells of one row, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.height()`.
    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }
}

fn unreadable(path: &Path, err: io::Error) -> SkewError {
    if err.kind() == io::ErrorKind::NotFound {
        SkewError::SourceNotFound(path.to_path_buf())
    } else {
        SkewError::SourceUnreadable {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
