use game_console::config::RACING_FPS;
use game_console::game::RacingGame;
use game_console::lifecycle;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut game = RacingGame::new(StdRng::from_entropy());
    lifecycle::exit_on_error("game_racing", lifecycle::run_game("game_racing", &mut game, RACING_FPS, false));
}
