//! Terminal output seam
//!
//! The canvas only asks for positioned text: move the cursor, write some
//! characters, flush at the end of a pass. `AnsiTerminal` turns that into
//! escape sequences; `TextScreen` keeps it in memory.

use std::fmt;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

/// Positioned character output, 0-based (col, row) from the top left
pub trait Terminal {
    fn move_to(&mut self, col: u16, row: u16) -> io::Result<()>;
    fn write_str(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Escape-sequence terminal over any writer (usually stdout)
pub struct AnsiTerminal<W: Write> {
    out: W,
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the whole screen and home the cursor
    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn move_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row))
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// In-memory character grid; writes past the edge are dropped
#[derive(Debug, Clone)]
pub struct TextScreen {
    cols: u16,
    rows: u16,
    chars: Vec<char>,
    cursor: (u16, u16),
    /// `write_str` calls since creation
    pub writes: usize,
    /// `flush` calls since creation
    pub flushes: usize,
}

impl TextScreen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            chars: vec![' '; cols as usize * rows as usize],
            cursor: (0, 0),
            writes: 0,
            flushes: 0,
        }
    }

    pub fn char_at(&self, col: u16, row: u16) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.chars[row as usize * self.cols as usize + col as usize])
        } else {
            None
        }
    }

    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols).filter_map(|c| self.char_at(c, row)).collect()
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }
}

impl Terminal for TextScreen {
    fn move_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.cursor = (col, row);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.writes += 1;
        let (mut col, row) = self.cursor;
        for ch in text.chars() {
            if col < self.cols && row < self.rows {
                self.chars[row as usize * self.cols as usize + col as usize] = ch;
            }
            col = col.saturating_add(1);
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

impl fmt::Display for TextScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_text(row).trim_end())?;
        }
        Ok(())
    }
}
