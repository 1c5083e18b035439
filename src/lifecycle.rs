//! Process lifecycle for the game binaries. SIGINT and SIGTERM only raise a
//! flag that the polling loops check, so every exit goes back through
//! `TermManager`'s normal teardown.

use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

use crate::config::INPUT_POLL_MS;
use crate::game::Game;
use crate::logging;
use crate::scheduler::Scheduler;
use crate::term::TermManager;

pub fn shutdown_flag() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));

    for &sig in [SIGINT, SIGTERM].iter() {
        flag::register(sig, Arc::clone(&shutdown))
            .with_context(|| format!("Error registering handler for signal {}", sig))?;
    }

    Ok(shutdown)
}

/// Takes the terminal, plays `game` until quit or a signal, and gives the
/// terminal back. The terminal is released when `term` drops, whichever way
/// this returns.
pub fn run_game<G: Game>(name: &str, game: &mut G, fps: u32, redraw_on_input: bool) -> Result<()> {
    logging::init()?;
    let shutdown = shutdown_flag()?;

    let mut term = TermManager::new();
    term.setup()?;
    info!("{} started", name);

    let mut scheduler = Scheduler::new(fps, Duration::from_millis(INPUT_POLL_MS), redraw_on_input);
    let exit = scheduler.run(game, &mut term, &shutdown)?;

    term.restore()?;
    info!("{} finished: {:?}", name, exit);
    Ok(())
}

/// Ends the process on error, after the terminal has been released.
pub fn exit_on_error(name: &str, res: Result<()>) {
    if let Err(e) = res {
        error!("{}: {:#}", name, e);
        eprintln!("{}: {:#}", name, e);
        process::exit(1);
    }
}
