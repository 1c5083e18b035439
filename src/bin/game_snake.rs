use game_console::config::SNAKE_FPS;
use game_console::game::SnakeGame;
use game_console::lifecycle;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut game = SnakeGame::new(StdRng::from_entropy());

    // Direction keys move the snake right away instead of waiting for the next frame
    lifecycle::exit_on_error("game_snake", lifecycle::run_game("game_snake", &mut game, SNAKE_FPS, true));
}
