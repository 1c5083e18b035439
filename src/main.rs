use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use game_console::config::INPUT_POLL_MS;
use game_console::launcher::{self, MainScreen};
use game_console::term::TermManager;
use game_console::{lifecycle, logging};

fn main() {
    lifecycle::exit_on_error("console", run());
}

fn run() -> Result<()> {
    logging::init()?;
    let shutdown = lifecycle::shutdown_flag()?;

    let dir = Path::new(".");
    let games = launcher::find_games(dir)?;
    info!("found {} games: {:?}", games.len(), games);

    let mut term = TermManager::new();
    term.setup()?;

    let mut screen = MainScreen::new(games);
    let poll = Duration::from_millis(INPUT_POLL_MS);

    launcher::run(&mut term, &mut screen, &shutdown, poll, |term, name| {
        // The game sets the terminal up for itself
        term.restore()?;
        if let Err(e) = launcher::launch(dir, name) {
            warn!("{:#}", e);
        }
        term.setup()
    })?;

    term.restore()?;
    info!("console closed");
    Ok(())
}
