use anyhow::Result;
use log::info;
use rand::rngs::StdRng;

use crate::config::*;
use crate::direction::Direction;
use crate::racing::{Pixel, Road};
use crate::snake::{Board, Cell, MoveResult, Status};
use crate::term::Renderer;
use crate::{Coords, TermInt};

/// A game the scheduler can drive.
pub trait Game {
    /// Whether `dir` means anything here. Rejected directions are never latched.
    fn accepts(&self, _dir: Direction) -> bool {
        true
    }

    /// Full redraw, used once at start.
    fn draw<R: Renderer + ?Sized>(&mut self, out: &mut R) -> Result<()>;

    /// One simulation step with the latched direction, if any.
    fn tick<R: Renderer + ?Sized>(&mut self, dir: Option<Direction>, out: &mut R) -> Result<()>;

    fn is_over(&self) -> bool;
}

pub struct SnakeGame {
    board: Board,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(mut rng: StdRng) -> Self {
        let board = Board::new(SNAKE_WIDTH, SNAKE_HEIGHT, SNAKE_INITIAL_LENGTH, SNAKE_COLLISION_POLICY, &mut rng);
        SnakeGame { board, rng }
    }

    pub fn with_board(board: Board, rng: StdRng) -> Self {
        SnakeGame { board, rng }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn status_row(&self) -> TermInt {
        self.board.grid().height() as TermInt + 1
    }

    fn print_score<R: Renderer + ?Sized>(&self, out: &mut R) -> Result<()> {
        let line = format!("Score: {}    q to quit", self.board.score());
        out.print_str((0, self.status_row()), &line)
    }

    fn game_over<R: Renderer + ?Sized>(&self, out: &mut R) -> Result<()> {
        let won = self.board.status() == Status::Filled;
        let s = if won {"You won!"} else {"Game over!"};
        info!("snake finished ({:?}) with score {}", self.board.status(), self.board.score());

        show_message(out, (0, self.status_row() + 2), &[
            s,
            &*format!("Score: {}", self.board.score()),
            "Press q to quit",
        ])
    }
}

impl Game for SnakeGame {
    fn accepts(&self, dir: Direction) -> bool {
        !dir.is_opposite(self.board.direction())
    }

    fn draw<R: Renderer + ?Sized>(&mut self, out: &mut R) -> Result<()> {
        out.clear_screen()?;
        self.board.grid_mut().render_all(out, (0, 0), SNAKE_CELL_WIDTH, snake_glyph)?;
        self.print_score(out)?;
        out.flush()
    }

    fn tick<R: Renderer + ?Sized>(&mut self, dir: Option<Direction>, out: &mut R) -> Result<()> {
        if self.board.is_over() {
            return Ok(());
        }

        let res = self.board.tick(dir, &mut self.rng);
        self.board.grid_mut().render_changes(out, (0, 0), SNAKE_CELL_WIDTH, snake_glyph)?;

        if let MoveResult::Moved { ate: true, .. } = res {
            self.print_score(out)?;
        }
        if self.board.is_over() {
            self.game_over(out)?;
        }

        out.flush()
    }

    fn is_over(&self) -> bool {
        self.board.is_over()
    }
}

pub struct RacingGame {
    road: Road,
    rng: StdRng,
}

impl RacingGame {
    pub fn new(rng: StdRng) -> Self {
        RacingGame { road: Road::new(ROAD_WIDTH, ROAD_HEIGHT), rng }
    }

    pub fn with_road(road: Road, rng: StdRng) -> Self {
        RacingGame { road, rng }
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    fn status_row(&self) -> TermInt {
        self.road.grid().height() as TermInt + 1
    }

    fn print_distance<R: Renderer + ?Sized>(&self, out: &mut R) -> Result<()> {
        let line = format!("Distance: {}", self.road.frames());
        out.print_str((0, self.status_row()), &line)
    }
}

impl Game for RacingGame {
    fn accepts(&self, dir: Direction) -> bool {
        dir.is_horizontal()
    }

    fn draw<R: Renderer + ?Sized>(&mut self, out: &mut R) -> Result<()> {
        out.clear_screen()?;

        let right_border = self.road.grid().width() as TermInt + 1;
        for y in 0..self.road.grid().height() as TermInt {
            out.set_cell((0, y), ROAD_BORDER_CHAR)?;
            out.set_cell((right_border, y), ROAD_BORDER_CHAR)?;
        }

        // +1 to skip the left border
        self.road.grid_mut().render_all(out, (1, 0), 1, road_glyph)?;
        self.print_distance(out)?;
        out.flush()
    }

    fn tick<R: Renderer + ?Sized>(&mut self, dir: Option<Direction>, out: &mut R) -> Result<()> {
        if self.road.is_crashed() {
            return Ok(());
        }

        let crashed = self.road.step(dir, &mut self.rng);
        self.road.grid_mut().render_changes(out, (1, 0), 1, road_glyph)?;
        self.print_distance(out)?;

        if crashed {
            show_message(out, (0, self.status_row() + 2), &[
                "Game over!",
                &*format!("Distance: {}", self.road.frames()),
                "Press q to quit",
            ])?;
        }

        out.flush()
    }

    fn is_over(&self) -> bool {
        self.road.is_crashed()
    }
}

fn snake_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => SNAKE_EMPTY_CHAR,
        Cell::Head => SNAKE_HEAD_CHAR,
        Cell::Body => SNAKE_BODY_CHAR,
        Cell::Food => FOOD_CHAR,
    }
}

fn road_glyph(pixel: Pixel) -> char {
    match pixel {
        Pixel::Empty => ROAD_EMPTY_CHAR,
        Pixel::Car => CAR_CHAR,
        Pixel::Obstacle => OBSTACLE_CHAR,
        Pixel::Crash => CRASH_CHAR,
    }
}

/// Prints `lines` one under the other starting at `top_left`, padded to a
/// common width so shorter lines blank out whatever was there before.
pub fn show_message<R: Renderer + ?Sized>(out: &mut R, top_left: Coords, lines: &[&str]) -> Result<()> {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (i, line) in lines.iter().enumerate() {
        let padded = format!("{line: <width$}", line = line, width = width);
        out.print_str((top_left.0, top_left.1 + i as TermInt), &padded)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::CollisionPolicy;
    use crate::testutil::RecordingRenderer;
    use rand::SeedableRng;
    use Direction::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn snake_draws_whole_board() {
        let mut game = SnakeGame::new(rng());
        let mut out = RecordingRenderer::default();

        game.draw(&mut out).unwrap();

        assert_eq!(out.clears, 1);
        assert_eq!(out.flushes, 1);
        assert_eq!(out.glyph_at((10 * SNAKE_CELL_WIDTH, 12)), Some(SNAKE_HEAD_CHAR));
        assert_eq!(out.glyph_at((9 * SNAKE_CELL_WIDTH, 12)), Some(SNAKE_BODY_CHAR));
        assert!(out.contains_text("Score: 0"));
    }

    #[test]
    fn snake_tick_redraws_only_changed_cells() {
        let board = Board::with_snake(SNAKE_WIDTH, SNAKE_HEIGHT, (10, 12), 2, Right, CollisionPolicy::Hold);
        let mut game = SnakeGame::with_board(board, rng());
        let mut out = RecordingRenderer::default();
        game.draw(&mut out).unwrap();
        let writes = out.writes;

        game.tick(None, &mut out).unwrap();

        // New head, old head and vacated tail
        assert_eq!(out.writes - writes, 3);
        assert_eq!(out.glyph_at((11 * SNAKE_CELL_WIDTH, 12)), Some(SNAKE_HEAD_CHAR));
        assert_eq!(out.glyph_at((10 * SNAKE_CELL_WIDTH, 12)), Some(SNAKE_BODY_CHAR));
        assert_eq!(out.glyph_at((9 * SNAKE_CELL_WIDTH, 12)), Some(SNAKE_EMPTY_CHAR));
        assert_eq!(out.flushes, 2);
    }

    #[test]
    fn blocked_snake_draws_nothing() {
        let board = Board::with_snake(SNAKE_WIDTH, SNAKE_HEIGHT, (0, 3), 1, Left, CollisionPolicy::Hold);
        let mut game = SnakeGame::with_board(board, rng());
        let mut out = RecordingRenderer::default();
        game.draw(&mut out).unwrap();
        let writes = out.writes;

        game.tick(None, &mut out).unwrap();

        assert_eq!(out.writes, writes);
        assert!(!game.is_over());
    }

    #[test]
    fn snake_win_shows_message() {
        let mut board = Board::with_snake(3, 1, (1, 0), 2, Right, CollisionPolicy::Hold);
        assert!(board.place_food(2));
        let mut game = SnakeGame::with_board(board, rng());
        let mut out = RecordingRenderer::default();

        game.tick(None, &mut out).unwrap();

        assert!(game.is_over());
        assert!(out.contains_text("You won!"));
        assert!(out.contains_text("Score: 1"));
    }

    #[test]
    fn snake_refuses_reversal() {
        let board = Board::with_snake(SNAKE_WIDTH, SNAKE_HEIGHT, (10, 12), 2, Right, CollisionPolicy::Hold);
        let game = SnakeGame::with_board(board, rng());

        assert!(!game.accepts(Left));
        assert!(game.accepts(Right));
        assert!(game.accepts(Up));
        assert!(game.accepts(Down));
    }

    #[test]
    fn racing_only_accepts_sideways() {
        let game = RacingGame::new(rng());

        assert!(game.accepts(Left));
        assert!(game.accepts(Right));
        assert!(!game.accepts(Up));
        assert!(!game.accepts(Down));
    }

    #[test]
    fn racing_draws_road_between_borders() {
        let mut game = RacingGame::new(rng());
        let mut out = RecordingRenderer::default();

        game.draw(&mut out).unwrap();

        assert_eq!(out.glyph_at((0, 0)), Some(ROAD_BORDER_CHAR));
        assert_eq!(out.glyph_at((ROAD_WIDTH as TermInt + 1, 24)), Some(ROAD_BORDER_CHAR));
        assert_eq!(out.glyph_at((4, 24)), Some(CAR_CHAR));
    }

    #[test]
    fn racing_crash_freezes_and_shows_message() {
        let mut road = Road::new(3, 3);
        assert!(road.place_obstacle(1, 1));
        let mut game = RacingGame::with_road(road, rng());
        let mut out = RecordingRenderer::default();

        game.tick(None, &mut out).unwrap();

        assert!(game.is_over());
        assert_eq!(out.glyph_at((2, 2)), Some(CRASH_CHAR));
        assert!(out.contains_text("Game over!"));

        let writes = out.writes;
        game.tick(Some(Left), &mut out).unwrap();
        assert_eq!(out.writes, writes);
    }

    #[test]
    fn message_lines_are_padded() {
        let mut out = RecordingRenderer::default();
        show_message(&mut out, (2, 5), &["long line", "x"]).unwrap();

        assert_eq!(out.row(5), "  long line");
        assert_eq!(out.row(6), "  x        ");
    }
}
