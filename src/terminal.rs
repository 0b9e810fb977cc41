//! where the dashboard is drawn, and where its commands come from.

use {
    crate::{band::Band, dashboard::Command},
    crossterm::{
        ExecutableCommand, QueueableCommand, cursor,
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
        style::{self, Print, PrintStyledContent, Stylize},
        terminal,
    },
    std::{
        env,
        io::{self, BufWriter, Stdout, Write},
        time::Duration,
    },
    tracing::warn,
};

/// a grid of character cells the dashboard draws onto.
///
/// writes that fall outside of the target's [`Size`] are clipped.
pub trait Target {
    fn size(&self) -> Size;

    /// whether bands can be shown as colors. when they cannot, only glyphs are drawn.
    fn supports_color(&self) -> bool;

    /// blanks the whole target, picking up any change in size.
    fn clear(&mut self) -> io::Result<()>;

    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        band: Option<Band>,
    ) -> io::Result<()>;

    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        glyph: char,
        band: Option<Band>,
    ) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// the source of the dashboard's commands.
pub trait Controls {
    /// returns the next pending command, without waiting for one.
    fn poll(&mut self) -> io::Result<Option<Command>>;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

/// the controlling terminal, switched to an alternate screen in raw mode.
///
/// the terminal is restored when this is dropped.
pub struct Terminal {
    out: BufWriter<Stdout>,
    size: Size,
    color: bool,
}

/// an in-memory target.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: Size,
    color: bool,
    cells: Vec<(char, Option<Band>)>,
    flushes: usize,
}

/// reads commands from the keyboard: `q` quits, `r` resets the history.
#[derive(Default)]
pub struct Keyboard;

// === impl Terminal ===

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        // from here on, dropping the terminal puts things back.
        let mut this = Self {
            out: BufWriter::new(io::stdout()),
            size: Size::default(),
            color: env::var_os("NO_COLOR").is_none() && style::available_color_count() >= 8,
        };
        this.out
            .execute(terminal::EnterAlternateScreen)?
            .execute(cursor::Hide)?;
        this.resize()?;

        Ok(this)
    }

    fn resize(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.size = Size {
            rows: rows.into(),
            cols: cols.into(),
        };
        Ok(())
    }

    /// moves to a cell, returning how many columns are left on its row.
    fn goto(&mut self, row: usize, col: usize) -> io::Result<Option<usize>> {
        let Size { rows, cols } = self.size;
        if row >= rows || col >= cols {
            return Ok(None);
        }

        // the size came from u16s, so these fit.
        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        Ok(Some(cols - col))
    }
}

impl Target for Terminal {
    fn size(&self) -> Size {
        self.size
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn clear(&mut self) -> io::Result<()> {
        self.resize()?;
        self.out
            .queue(terminal::Clear(terminal::ClearType::All))
            .map(drop)
    }

    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        band: Option<Band>,
    ) -> io::Result<()> {
        let Some(room) = self.goto(row, col)? else {
            return Ok(());
        };

        let text = text.chars().take(room).collect::<String>();
        match band {
            Some(band) => self.out.queue(PrintStyledContent(text.with(band.color())))?,
            None => self.out.queue(Print(text))?,
        };

        Ok(())
    }

    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        glyph: char,
        band: Option<Band>,
    ) -> io::Result<()> {
        if self.goto(row, col)?.is_none() {
            return Ok(());
        }

        match band {
            Some(band) => self.out.queue(PrintStyledContent(glyph.with(band.color())))?,
            None => self.out.queue(Print(glyph))?,
        };

        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let restored = self
            .out
            .execute(cursor::Show)
            .and_then(|out| out.execute(terminal::LeaveAlternateScreen))
            .and_then(|_| terminal::disable_raw_mode());

        if let Err(error) = restored {
            warn!(%error, "failed to restore the terminal");
        }
    }
}

// === impl Canvas ===

impl Canvas {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            size: Size { rows, cols },
            color: true,
            cells: vec![(' ', None); rows * cols],
            flushes: 0,
        }
    }

    /// a canvas that cannot show colors.
    pub fn monochrome(rows: usize, cols: usize) -> Self {
        Self {
            color: false,
            ..Self::new(rows, cols)
        }
    }

    /// the glyphs on one row, without trailing blanks.
    pub fn line(&self, row: usize) -> String {
        let Size { cols, .. } = self.size;
        self.cells[row * cols..(row + 1) * cols]
            .iter()
            .map(|(glyph, _)| glyph)
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.size.rows).map(|row| self.line(row)).collect()
    }

    /// finds the first occurrence of `needle`, as a `(row, col)` pair.
    pub fn find(&self, needle: &str) -> Option<(usize, usize)> {
        self.lines().iter().enumerate().find_map(|(row, line)| {
            line.find(needle)
                .map(|byte| (row, line[..byte].chars().count()))
        })
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }

    pub fn band(&self, row: usize, col: usize) -> Option<Band> {
        self.index(row, col).and_then(|i| self.cells[i].1)
    }

    pub fn glyph(&self, row: usize, col: usize) -> Option<char> {
        self.index(row, col).map(|i| self.cells[i].0)
    }

    /// how many frames have been flushed onto this canvas.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let Size { rows, cols } = self.size;
        (row < rows && col < cols).then_some(row * cols + col)
    }
}

impl Target for Canvas {
    fn size(&self) -> Size {
        self.size
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn clear(&mut self) -> io::Result<()> {
        self.cells.fill((' ', None));
        Ok(())
    }

    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        band: Option<Band>,
    ) -> io::Result<()> {
        for (offset, glyph) in text.chars().enumerate() {
            self.write_cell(row, col + offset, glyph, band)?;
        }
        Ok(())
    }

    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        glyph: char,
        band: Option<Band>,
    ) -> io::Result<()> {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = (glyph, band);
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

// === impl Keyboard ===

impl Controls for Keyboard {
    fn poll(&mut self) -> io::Result<Option<Command>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = command(key) {
                    return Ok(Some(command));
                }
            }
        }

        Ok(None)
    }
}

/// maps a key press to a [`Command`].
///
/// raw mode swallows the interrupt signal, so ctrl-c is treated as a quit.
pub fn command(
    KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }: KeyEvent,
) -> Option<Command> {
    if kind != KeyEventKind::Press {
        return None;
    }

    match code {
        KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('r' | 'R') => Some(Command::Reset),
        _ => None,
    }
}
