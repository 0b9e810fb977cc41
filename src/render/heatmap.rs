//! the compact heatmap.

use {
    super::{Cell, Grid},
    crate::band::{Band, Policy},
};

/// the number of columns one value takes up.
pub const CELL_WIDTH: usize = 3;

/// renders a single row with one bracketed glyph per value, e.g. `[ ][#][@]`.
///
/// values are classified with [`Policy::Heat`], not the gauge thresholds.
pub fn render(values: &[f64]) -> Grid {
    let mut grid = Grid::new(1, values.len() * CELL_WIDTH);

    for (i, &percentage) in values.iter().enumerate() {
        let band = Policy::Heat.classify(percentage);
        let col = i * CELL_WIDTH;
        for (offset, glyph) in ['[', glyph(band), ']'].into_iter().enumerate() {
            grid.set(0, col + offset, Cell::filled(glyph, band));
        }
    }

    grid
}

pub fn glyph(band: Band) -> char {
    match band {
        Band::Normal => ' ',
        Band::Warning => '#',
        Band::Critical => '@',
    }
}
