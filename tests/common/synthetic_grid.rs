use image::{GrayImage, Luma};

/// Builds a binary mask (header row excluded) with one row per entry of
/// `first_cols`: foreground from that column to `right` inclusive, or an
/// empty row for `None`.
pub fn mask_with_left_edge(
    width: usize,
    right: usize,
    first_cols: &[Option<usize>],
) -> Vec<Vec<bool>> {
    assert!(right < width, "right edge must lie inside the grid");
    first_cols
        .iter()
        .map(|first| {
            (0..width)
                .map(|col| first.is_some_and(|first| col >= first && col <= right))
                .collect()
        })
        .collect()
}

/// Renders a mask as reference CSV text: a header line, then "1"/"0" cells.
pub fn mask_to_csv(mask: &[Vec<bool>]) -> String {
    let width = mask.first().map_or(0, Vec::len);
    let header: Vec<String> = (0..width).map(|col| format!("c{col}")).collect();

    let mut text = header.join(",");
    text.push('\n');
    for row in mask {
        let cells: Vec<&str> = row.iter().map(|&fg| if fg { "1" } else { "0" }).collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

/// Renders a mask as black shape on white background, one pixel per cell.
pub fn mask_to_image(mask: &[Vec<bool>]) -> GrayImage {
    let height = mask.len() as u32;
    let width = mask.first().map_or(0, Vec::len) as u32;
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    for (y, row) in mask.iter().enumerate() {
        for (x, &fg) in row.iter().enumerate() {
            if fg {
                img.put_pixel(x as u32, y as u32, Luma([0]));
            }
        }
    }
    img
}

/// Black rectangle with half extents `half_w` x `half_h`, rotated by
/// `degrees` about the image centre, on a white `size` x `size` canvas.
pub fn rotated_rectangle(size: u32, half_w: f64, half_h: f64, degrees: f64) -> GrayImage {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let centre = size as f64 / 2.0;
    GrayImage::from_fn(size, size, |x, y| {
        let dx = x as f64 + 0.5 - centre;
        let dy = y as f64 + 0.5 - centre;
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;
        if u.abs() <= half_w && v.abs() <= half_h {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}
