use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::config::GAME_PREFIX;
use crate::input::{menu_action, MenuAction};
use crate::term::{InputSource, Renderer};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Play,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Redraw,
    Launch(String),
    Quit,
    Ignored,
}

/// Game names in `dir`: regular files starting with `game_` that the owner
/// may execute, sorted by name.
pub fn find_games(dir: &Path) -> Result<Vec<String>> {
    let mut games = vec![];

    for entry in fs::read_dir(dir).with_context(|| format!("Unable to open directory {}", dir.display()))? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };

        if name.starts_with(GAME_PREFIX) && is_executable(&entry.path()) {
            games.push(name);
        }
    }

    games.sort();
    Ok(games)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o100 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

/// Runs `dir/name` with no arguments on the current terminal and waits for
/// it. The exit status is only logged.
pub fn launch(dir: &Path, name: &str) -> Result<ExitStatus> {
    let path = dir.join(name);
    info!("launching {}", path.display());

    let status = Command::new(&path)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Unable to run {}", path.display()))?;

    info!("{} exited with {}", name, status);
    Ok(status)
}

pub struct MainScreen {
    games: Vec<String>,
    current_game: usize,
    button: Button,
}

impl MainScreen {
    pub fn new(games: Vec<String>) -> Self {
        MainScreen { games, current_game: 0, button: Button::Play }
    }

    pub fn games(&self) -> &[String] {
        &self.games
    }

    pub fn current_game(&self) -> Option<&str> {
        self.games.get(self.current_game).map(String::as_str)
    }

    pub fn button(&self) -> Button {
        self.button
    }

    pub fn slide(&mut self, step: isize) {
        let n = self.games.len() as isize;
        if n == 0 {
            return;
        }
        self.current_game = (self.current_game as isize + step).rem_euclid(n) as usize;
    }

    pub fn select(&mut self, button: Button) {
        self.button = button;
    }

    pub fn handle(&mut self, action: MenuAction) -> MenuOutcome {
        match action {
            MenuAction::NextGame => self.slide(1),
            MenuAction::PrevGame => self.slide(-1),
            MenuAction::SelectPlay => self.select(Button::Play),
            MenuAction::SelectQuit => self.select(Button::Quit),
            MenuAction::Quit => return MenuOutcome::Quit,
            MenuAction::Confirm => {
                return match self.button {
                    Button::Quit => MenuOutcome::Quit,
                    Button::Play => match self.current_game() {
                        Some(name) => MenuOutcome::Launch(name.to_owned()),
                        None => MenuOutcome::Ignored,
                    },
                };
            }
        }
        MenuOutcome::Redraw
    }

    pub fn draw<R: Renderer + ?Sized>(&self, out: &mut R) -> Result<()> {
        let game = format!("        Current game: {}", self.current_game().unwrap_or("(no games found)"));
        let buttons = match self.button {
            Button::Play => "   [play]   quit ",
            Button::Quit => "    play   [quit]",
        };

        let lines = [
            "=== Virtual Game Console ===",
            "Use keys a and d to select button",
            "Use keys w and s to change game",
            "Press enter to select",
            "Press q to quit",
            "",
            game.as_str(),
            buttons,
        ];

        out.clear_screen()?;
        for (y, line) in lines.iter().enumerate() {
            out.print_str((0, y as u16), line)?;
        }
        out.flush()
    }
}

/// Menu loop. `launch` gets the terminal and the chosen game, and is
/// expected to hand the terminal over to the game and take it back.
pub fn run<T, L>(term: &mut T, screen: &mut MainScreen, shutdown: &AtomicBool, poll: Duration, mut launch: L) -> Result<()>
where
    T: Renderer + InputSource + ?Sized,
    L: FnMut(&mut T, &str) -> Result<()>,
{
    screen.draw(term)?;

    loop {
        if shutdown.load(Ordering::SeqCst) {
            info!("shutdown requested");
            return Ok(());
        }

        let outcome = term.poll_key()?.and_then(|ev| menu_action(&ev)).map(|act| screen.handle(act));
        match outcome {
            Some(MenuOutcome::Redraw) => screen.draw(term)?,
            Some(MenuOutcome::Launch(name)) => {
                launch(term, &name)?;
                screen.draw(term)?;
            }
            Some(MenuOutcome::Quit) => return Ok(()),
            Some(MenuOutcome::Ignored) | None => {}
        }

        sleep(poll);
    }
}
