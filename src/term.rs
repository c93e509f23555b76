use std::io::{self, stdout, Stdout, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::{Cell, GridInt};

// Each grid cell spans two terminal columns so the board reads square.
const CELL_WIDTH: u16 = 2;

const BODY_STR: &str = "██";
const HEAD_STR: &str = "██";
const FOOD_STR: &str = "● ";
const EMPTY_STR: &str = "  ";

const BODY_COLOR: Color = Color::Green;
const HEAD_COLOR: Color = Color::DarkGreen;
const FOOD_COLOR: Color = Color::Yellow;
const BORDER_COLOR: Color = Color::DarkGrey;

#[derive(Copy, Clone)]
pub enum CellLook {
    Empty,
    Body,
    Head,
    Food,
}

/// Owns the terminal: raw mode and alternate screen lifecycle, plus all
/// queued drawing. Board cell (x, y) maps to screen column `1 + 2x`,
/// row `1 + y`, inside a one-character border.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.clear()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn draw_border(&mut self, n: GridInt) -> io::Result<()> {
        let inner = n as u16 * CELL_WIDTH;
        let bottom = n as u16 + 1;

        queue!(self.stdout, SetForegroundColor(BORDER_COLOR))?;

        let horizontal = format!("+{}+", "-".repeat(inner as usize));
        queue!(self.stdout, cursor::MoveTo(0, 0), Print(&horizontal))?;
        queue!(self.stdout, cursor::MoveTo(0, bottom), Print(&horizontal))?;

        for y in 1..bottom {
            queue!(self.stdout, cursor::MoveTo(0, y), Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(inner + 1, y), Print('|'))?;
        }

        queue!(self.stdout, ResetColor)
    }

    pub fn draw_cell(&mut self, cell: Cell, look: CellLook) -> io::Result<()> {
        let col = 1 + cell.0 as u16 * CELL_WIDTH;
        let row = 1 + cell.1 as u16;

        let (text, color) = match look {
            CellLook::Empty => (EMPTY_STR, None),
            CellLook::Body => (BODY_STR, Some(BODY_COLOR)),
            CellLook::Head => (HEAD_STR, Some(HEAD_COLOR)),
            CellLook::Food => (FOOD_STR, Some(FOOD_COLOR)),
        };

        queue!(self.stdout, cursor::MoveTo(col, row))?;
        match color {
            Some(c) => queue!(self.stdout, SetForegroundColor(c), Print(text), ResetColor),
            None => queue!(self.stdout, Print(text)),
        }
    }

    /// Rewrites a full text row below the board (HUD and status lines).
    pub fn draw_line(&mut self, row: u16, text: &str) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}
