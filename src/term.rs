use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, panic, time::Duration};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::warn;

/// Where the games draw. Nothing ever reads back from it.
pub trait Renderer {
    fn clear_screen(&mut self) -> Result<()>;
    fn set_cell(&mut self, pos: Coords, glyph: char) -> Result<()>;
    fn flush(&mut self) -> Result<()>;

    fn print_str(&mut self, pos: Coords, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.set_cell((pos.0 + i as TermInt, pos.1), ch)?;
        }
        Ok(())
    }
}

pub trait InputSource {
    /// Next pending key press, without waiting for one.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>>;
}

// Set while some TermManager has the terminal in raw mode
static TERMINAL_TAKEN: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// Releases the terminal before the default hook prints, so the panic
/// message lands on the normal screen instead of vanishing with the
/// alternate one.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            release_after_panic();
            default_hook(info);
        }));
    });
}

fn release_after_panic() -> bool {
    if !TERMINAL_TAKEN.swap(false, Ordering::SeqCst) {
        return false;
    }
    // Best effort, the process is going down anyway
    let _ = terminal::disable_raw_mode();
    let _ = execute!(stdout(), cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen);
    true
}

/// Owns the terminal while a screen is up: alternate screen, raw mode and
/// a hidden cursor. `restore` puts everything back and is safe to call more
/// than once; dropping the manager calls it too.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        install_panic_hook();

        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.active = true;
        TERMINAL_TAKEN.store(true, Ordering::SeqCst);
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        TERMINAL_TAKEN.store(false, Ordering::SeqCst);

        terminal::disable_raw_mode().context("Error resetting raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("terminal teardown failed: {:#}", e);
        }
    }
}

impl Renderer for TermManager {
    fn clear_screen(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        Ok(())
    }

    fn set_cell(&mut self, pos: Coords, glyph: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(glyph))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl InputSource for TermManager {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }
}
