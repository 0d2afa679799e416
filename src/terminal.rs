/*
 * Terminal Module
 *
 * Text frontend for the driver. Each frame clears the screen, prints a
 * banner and then one line per grid row, `*` for an occupied cell and a
 * blank otherwise, cells separated by spaces.
 *
 * The terminal runs in raw mode on the alternate screen, so Ctrl-C arrives
 * as a key event: `q`, `Esc` and `Ctrl-C` stop the loop after the current
 * tick. The terminal is restored when the frontend is dropped.
 */

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::driver::{Control, Frontend};
use crate::world::Grid;

const TITLE: &str = "Boid Simulation";
const STATE_TO_CHAR: [char; 2] = [' ', '*'];

/// Banner line shown above the grid.
pub fn banner(width: usize) -> String {
    let rule = "-".repeat(width.saturating_sub(7));
    format!("{rule}{TITLE}{rule}")
}

/// Render a grid as text, one line per row.
pub fn render_rows(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|&count| STATE_TO_CHAR[usize::from(count > 0)].to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn is_stop_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub struct TerminalFrontend<W: Write> {
    out: W,
    active: bool,
}

impl TerminalFrontend<io::Stdout> {
    pub fn stdout() -> io::Result<Self> {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalFrontend<W> {
    /// Switch the terminal to the alternate screen and raw mode.
    ///
    /// On failure the frontend is dropped, which undoes whatever part of the
    /// setup already happened.
    pub fn new(out: W) -> io::Result<Self> {
        let mut frontend = Self { out, active: true };
        execute!(frontend.out, EnterAlternateScreen, cursor::Hide)?;
        enable_raw_mode()?;
        Ok(frontend)
    }

    /// Leave raw mode and the alternate screen. Both steps are attempted even
    /// if the first fails; the first error is returned.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let raw = disable_raw_mode();
        let screen = execute!(self.out, LeaveAlternateScreen, cursor::Show);
        raw.and(screen)
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn present(&mut self, grid: &Grid, tick: u64) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        // Raw mode: every line needs an explicit carriage return
        write!(self.out, "{}\r\n\r\n", banner(grid.width()))?;
        for line in render_rows(grid) {
            write!(self.out, "{line}\r\n")?;
        }
        write!(self.out, "\r\ntick {tick}  (q to quit)\r\n")?;
        self.out.flush()
    }

    fn wait(&mut self, interval: Duration) -> io::Result<Control> {
        let deadline = Instant::now() + interval;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Control::Continue);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_stop_key(&key) {
                    tracing::info!("stop requested from keyboard");
                    return Ok(Control::Stop);
                }
            }
        }
    }
}

impl<W: Write> Drop for TerminalFrontend<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
