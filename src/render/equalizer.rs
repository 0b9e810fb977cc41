//! the vertical equalizer.

use {
    super::{Cell, Grid},
    crate::band::Band,
};

pub const FILL: char = '█';

/// renders one column per percentage, each a bar filled from the bottom.
///
/// at most `width` columns are drawn. if there are more values than that, the newest are kept.
/// each column is colored by its own value.
pub fn render(values: &[f64], height: usize, width: usize) -> Grid {
    let columns = values.len().min(width);
    let values = &values[values.len() - columns..];

    let mut grid = Grid::new(height, columns);
    for (col, &percentage) in values.iter().enumerate() {
        let filled = Cell::filled(FILL, Band::classify(percentage));
        for row in height - bar_height(percentage, height)..height {
            grid.set(row, col, filled);
        }
    }

    grid
}

/// the number of rows a percentage fills, rounded to the nearest row.
///
/// this always lies in `[0, height]`, whatever the percentage.
pub fn bar_height(percentage: f64, height: usize) -> usize {
    let rows = (percentage / 100.0 * height as f64).round();

    // nan fails both comparisons and falls through to zero.
    if rows >= height as f64 {
        height
    } else if rows > 0.0 {
        rows as usize
    } else {
        0
    }
}
