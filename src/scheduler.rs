use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};

use crate::direction::Direction;
use crate::game::Game;
use crate::input::{action, Action};
use crate::term::{InputSource, Renderer};

/// Decides when the next fixed-interval frame is due.
#[derive(Copy, Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        let interval = Duration::from_millis(1000 / u64::from(fps.max(1)));
        FrameClock { interval, last_frame: now }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_frame) >= self.interval
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_frame = now;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Shutdown,
}

/// Polls input, latches the last accepted direction and ticks the game on
/// its frame clock.
pub struct Scheduler {
    clock: FrameClock,
    poll_interval: Duration,
    redraw_on_input: bool,
    latched: Option<Direction>,
}

impl Scheduler {
    /// With `redraw_on_input` a direction key ticks the game straight away
    /// instead of waiting for the next frame.
    pub fn new(fps: u32, poll_interval: Duration, redraw_on_input: bool) -> Self {
        Scheduler { clock: FrameClock::new(fps, Instant::now()), poll_interval, redraw_on_input, latched: None }
    }

    pub fn latched(&self) -> Option<Direction> {
        self.latched
    }

    /// Runs until quit or until `shutdown` is raised. A finished game keeps
    /// its last frame on screen and only waits for quit.
    pub fn run<G, T>(&mut self, game: &mut G, term: &mut T, shutdown: &AtomicBool) -> Result<Exit>
    where
        G: Game,
        T: Renderer + InputSource + ?Sized,
    {
        game.draw(term)?;
        self.clock.reset(Instant::now());

        loop {
            if shutdown.load(Ordering::SeqCst) {
                info!("shutdown requested");
                return Ok(Exit::Shutdown);
            }

            let mut moved = false;
            match term.poll_key()?.and_then(|ev| action(&ev)) {
                Some(Action::Quit) => return Ok(Exit::Quit),
                Some(Action::Move(dir)) if game.accepts(dir) => {
                    self.latched = Some(dir);
                    moved = true;
                }
                Some(Action::Move(dir)) => debug!("ignoring {:?}", dir),
                None => {}
            }

            if !game.is_over() {
                let now = Instant::now();
                if self.clock.is_due(now) || (self.redraw_on_input && moved) {
                    game.tick(self.latched.take(), term)?;
                    self.clock.reset(now);
                }
            }

            sleep(self.poll_interval);
        }
    }
}
