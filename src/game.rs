use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;

use crate::config::GameConfig;
use crate::score::HighScoreStore;
use crate::snake::Direction::{self, *};
use crate::state::{GamePhase, GameState};
use crate::term::{CellLook, TermManager};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// What a key press means. Every input source decodes to one of these, so
/// they all feed the same pending-direction buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Quit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }
        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
            KeyCode::Char(' ') => Some(Command::TogglePause),
            KeyCode::Enter => Some(Command::Restart),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

pub struct SnakeGame {
    state: GameState,
    term: TermManager,
    store: HighScoreStore,
    saved_high: u32,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        let store = HighScoreStore::open_default();
        let saved_high = store.load();
        info!("starting with stored high score {}", saved_high);

        let mut state = GameState::new(config);
        state.set_high_score(saved_high);

        SnakeGame {
            state,
            term: TermManager::new(),
            store,
            saved_high,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.check_terminal_size()?;
        self.term.setup().context("could not set up the terminal")?;

        let res = self.event_loop();
        let restored = self.term.restore().context("could not restore the terminal");
        res?;
        restored
    }

    ///////////////////////////////////////////////////////////////////////////

    fn check_terminal_size(&self) -> Result<()> {
        let n = self.state.config().grid_size as u16;
        let (cols, rows) = self
            .term
            .size()
            .context("could not read the terminal size")?;
        let (need_cols, need_rows) = (2 * n + 2, n + 4);
        if cols < need_cols || rows < need_rows {
            bail!(
                "terminal is {}x{}, but a {n}x{n} board needs at least {}x{}",
                cols,
                rows,
                need_cols,
                need_rows
            );
        }
        Ok(())
    }

    fn event_loop(&mut self) -> Result<()> {
        self.term.draw_border(self.state.config().grid_size)?;
        let mut last_frame = Instant::now();

        loop {
            // Wait out the frame on the event queue, then drain it. Only the
            // last valid steer before a tick sticks.
            if event::poll(FRAME_INTERVAL)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(ev) = event::read()? {
                        if ev.kind != KeyEventKind::Press {
                            continue;
                        }
                        match Command::from_key_event(&ev) {
                            Some(Command::Quit) => return Ok(()),
                            Some(cmd) => self.apply(cmd),
                            None => {}
                        }
                    }
                }
            }

            let now = Instant::now();
            self.state.advance(now - last_frame);
            last_frame = now;

            self.persist_high_score();
            self.render()?;
        }
    }

    fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Steer(dir) => self.state.steer(dir),
            Command::TogglePause => self.state.toggle_pause(),
            Command::Restart => self.state.restart(),
            Command::Quit => {}
        }
    }

    fn persist_high_score(&mut self) {
        let high = self.state.high_score();
        if high > self.saved_high {
            self.store.save(high);
            self.saved_high = high;
        }
    }

    fn render(&mut self) -> Result<()> {
        let n = self.state.config().grid_size;

        for y in 0..n {
            for x in 0..n {
                self.term.draw_cell((x, y), CellLook::Empty)?;
            }
        }

        if self.state.blink_visible() {
            self.term.draw_cell(self.state.food(), CellLook::Food)?;
        }

        for (i, cell) in self.state.snake().cells().enumerate() {
            let look = if i == 0 { CellLook::Head } else { CellLook::Body };
            self.term.draw_cell(cell, look)?;
        }

        let hud_row = n as u16 + 2;
        let hud = format!(
            "Score: {}   High: {}   Speed: {:.1}x",
            self.state.score(),
            self.state.high_score(),
            self.state.speed_multiplier()
        );
        self.term.draw_line(hud_row, &hud)?;

        let status = match self.state.phase() {
            GamePhase::Running => "Arrows/WASD to steer, space to pause, q to quit",
            GamePhase::Paused => "Paused",
            GamePhase::GameOver if self.state.won() => "You won! Press Enter to play again",
            GamePhase::GameOver => "Game over! Press Enter to play again",
        };
        self.term.draw_line(hud_row + 1, status)?;

        self.term.flush()?;
        Ok(())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
