//! transforms from linearized windows to grids of cells.
//!
//! renderers are pure. they take plain percentages, oldest first, and produce a [`Grid`] that
//! [`paint()`] then copies onto a [`Target`].

use {
    crate::{band::Band, terminal::Target},
    std::io,
};

pub mod equalizer;
pub mod heatmap;
pub mod histogram;


/// one character cell of a rendered graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub band: Option<Band>,
}

/// text drawn to the left of a grid row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Label {
    pub text: String,
    pub band: Option<Band>,
}

/// a rectangle of cells, addressed by `(row, col)` from the top left.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    labels: Vec<Option<Label>>,
}

// === impl Cell ===

impl Cell {
    pub const BLANK: Self = Self {
        glyph: ' ',
        band: None,
    };

    pub fn filled(glyph: char, band: Band) -> Self {
        Self {
            glyph,
            band: Some(band),
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

// === impl Grid ===

impl Grid {
    /// a grid of blank cells.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::BLANK; height * width],
            labels: vec![None; height],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// overwrites a cell. writes outside of the grid are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    pub fn label(&self, row: usize) -> Option<&Label> {
        self.labels.get(row).and_then(Option::as_ref)
    }

    pub fn set_label(&mut self, row: usize, label: Label) {
        if let Some(slot) = self.labels.get_mut(row) {
            *slot = Some(label);
        }
    }

    /// one row's glyphs, left to right.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.width)
            .filter_map(|col| self.get(row, col))
            .map(|cell| cell.glyph)
            .collect()
    }

    /// iterates over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (i / self.width, i % self.width, *cell))
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }
}

/// copies a grid onto a target, with its top left corner at `(top, left)`.
///
/// row labels end one column before `left`. bands are dropped if the target cannot show them.
pub fn paint(target: &mut impl Target, grid: &Grid, top: usize, left: usize) -> io::Result<()> {
    for (row, col, cell) in grid.cells() {
        let band = tint(target, cell.band);
        target.write_cell(top + row, left + col, cell.glyph, band)?;
    }

    for row in 0..grid.height() {
        let Some(Label { text, band }) = grid.label(row) else {
            continue;
        };
        let col = left.saturating_sub(text.chars().count() + 1);
        let band = tint(target, *band);
        target.write_text(top + row, col, text, band)?;
    }

    Ok(())
}

/// degrades a band to plain glyphs on targets without color.
pub fn tint(target: &impl Target, band: Option<Band>) -> Option<Band> {
    band.filter(|_| target.supports_color())
}

/// formats a byte count for humans, e.g. `"7.30 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{size:.2} {}", UNITS[unit])
}
