//! the labeled histogram.

use {
    super::{Cell, Grid, Label, equalizer::bar_height},
    crate::band::Band,
};

pub const FILL: char = 'X';

/// the band of every filled cell.
///
/// unlike the equalizer, the histogram does not classify its bars: the whole filled area is drawn
/// in one accent.
pub const ACCENT: Band = Band::Critical;

/// the band of the axis labels.
pub const LABELS: Band = Band::Normal;

/// renders bars like the equalizer, with a percentage label on every row.
///
/// labels step down from the top in tens: a 10-row graph reads 100% at the top and 10% at the
/// bottom.
pub fn render(values: &[f64], height: usize, width: usize) -> Grid {
    let columns = values.len().min(width);
    let values = &values[values.len() - columns..];

    let mut grid = Grid::new(height, columns);
    for row in 0..height {
        grid.set_label(
            row,
            Label {
                text: format!("{:>3}%", (height - row) * 10),
                band: Some(LABELS),
            },
        );
    }

    let filled = Cell::filled(FILL, ACCENT);
    for (col, &percentage) in values.iter().enumerate() {
        for row in height - bar_height(percentage, height)..height {
            grid.set(row, col, filled);
        }
    }

    grid
}
