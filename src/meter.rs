use {
    crate::{band::Band, render::tint, terminal::Target},
    std::{
        io,
        iter::{once, repeat_n},
    },
};

/// a linear gauge for an instantaneous value, e.g. `swap: [████      ]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Meter {
    pub name: String,
    /// how many of the meter's cells are filled.
    pub value: usize,
    pub width: usize,
    /// the band the filled cells are drawn in.
    pub band: Band,
}

/// === impl Meter ===

impl Meter {
    const ACTIVE: char = '█';
    const IDLE: char = ' ';
    const BORDER_L: char = '[';
    const BORDER_R: char = ']';

    /// a meter for a percentage, classified like any other gauge.
    pub fn percentage(name: impl Into<String>, percentage: f64, width: usize) -> Self {
        Self {
            name: name.into(),
            value: Self::fill(percentage, 100.0, width),
            width,
            band: Band::classify(percentage),
        }
    }

    /// a meter for an absolute quantity with no natural scale, drawn relative to `max`.
    ///
    /// its band is that of the value's share of `max`.
    pub fn proportional(name: impl Into<String>, value: f64, max: f64, width: usize) -> Self {
        let share = if max > 0.0 { value / max * 100.0 } else { 0.0 };
        Self {
            name: name.into(),
            value: Self::fill(value, max, width),
            width,
            band: Band::classify(share),
        }
    }

    /// the number of filled cells: `round(value / max * width)`, clamped to `[0, width]`.
    ///
    /// a scale that is not positive fills nothing.
    pub fn fill(value: f64, max: f64, width: usize) -> usize {
        if max.is_nan() || max <= 0.0 {
            return 0;
        }

        let cells = (value / max * width as f64).round();
        if cells >= width as f64 {
            width
        } else if cells > 0.0 {
            cells as usize
        } else {
            0
        }
    }

    /// the meter as plain text.
    pub fn text(&self) -> String {
        let Self {
            name, value, width, ..
        } = self;

        let idle = width.saturating_sub(*value);
        let meter = repeat_n(Self::ACTIVE, *value).chain(repeat_n(Self::IDLE, idle));
        format!("{name}: ")
            .chars()
            .chain(once(Self::BORDER_L))
            .chain(meter)
            .chain(once(Self::BORDER_R))
            .collect()
    }

    /// draws the meter, returning the column just past its closing border.
    pub fn draw(&self, target: &mut impl Target, row: usize, col: usize) -> io::Result<usize> {
        let Self {
            name,
            value,
            width,
            band,
        } = self;

        // print the label.
        let label = format!("{name}: {}", Self::BORDER_L);
        target.write_text(row, col, &label, None)?;
        let mut col = col + label.chars().count();

        // print the meter.
        let band = tint(target, Some(*band));
        for _ in 0..*value {
            target.write_cell(row, col, Self::ACTIVE, band)?;
            col += 1;
        }
        for _ in *value..*width {
            target.write_cell(row, col, Self::IDLE, None)?;
            col += 1;
        }
        target.write_cell(row, col, Self::BORDER_R, None)?;

        Ok(col + 1)
    }
}
