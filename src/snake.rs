use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::body::BodyTracker;
use crate::direction::Direction;
use crate::grid::Grid;
use Cell::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockReason {
    OutOfBounds,
    Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// `old_tail` is the cell vacated this tick, `None` when the snake ate.
    /// `food` is where food respawned, if it had to.
    Moved { old_head: usize, new_head: usize, old_tail: Option<usize>, ate: bool, food: Option<usize> },
    Blocked(BlockReason),
}

/// What a blocked move does to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The snake holds its position until it gets a direction it can take.
    Hold,
    /// The first blocked move ends the game.
    EndGame,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Crashed,
    /// Food was eaten and there is no empty cell left to respawn it into.
    Filled,
}

pub struct Board {
    grid: Grid<Cell>,
    body: BodyTracker,
    direction: Direction,
    food: Option<usize>,
    policy: CollisionPolicy,
    status: Status,
    initial_length: usize,
}

impl Board {
    /// Snake of `length` centred on the grid, heading right, with food
    /// somewhere random.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, length: usize, policy: CollisionPolicy, rng: &mut R) -> Self {
        let mut board = Board::with_snake(width, height, (width / 2, height / 2), length, Direction::Right, policy);
        board.food = board.spawn_food(rng);
        board
    }

    /// Snake with its head at `head` and its body trailing straight behind it.
    /// The body is cut short where it would leave the grid. No food is placed.
    pub fn with_snake(
        width: usize,
        height: usize,
        head: (usize, usize),
        length: usize,
        direction: Direction,
        policy: CollisionPolicy,
    ) -> Self {
        let mut grid = Grid::new(width, height, Empty);
        let head_idx = grid.index_of(head.0, head.1);

        let mut cells = vec![head_idx];
        while cells.len() < length {
            let last = cells[cells.len() - 1];
            match grid.step(last, direction.opposite()) {
                Some(idx) => cells.push(idx),
                None => break,
            }
        }
        cells.reverse();

        let mut body = BodyTracker::new(grid.len(), cells[0]);
        grid.set_at(cells[0], Body);
        for &idx in &cells[1..] {
            body.advance(idx);
            body.grow();
            grid.set_at(idx, Body);
        }
        grid.set_at(head_idx, Head);

        Board { grid, body, direction, food: None, policy, status: Status::Running, initial_length: cells.len() }
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<Cell> {
        &mut self.grid
    }

    pub fn body(&self) -> &BodyTracker {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<usize> {
        self.food
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Running
    }

    pub fn score(&self) -> usize {
        self.body.len() - self.initial_length
    }

    /// Turns the snake unless `new_direction` would reverse it.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Moves food to `idx`. Only empty cells accept it.
    pub fn place_food(&mut self, idx: usize) -> bool {
        if self.grid.get_at(idx) != Empty {
            return false;
        }
        if let Some(old) = self.food.take() {
            self.grid.set_at(old, Empty);
        }
        self.grid.set_at(idx, Food);
        self.food = Some(idx);
        true
    }

    /// One simulation step. A blocked step leaves grid and body untouched.
    pub fn tick<R: Rng + ?Sized>(&mut self, requested: Option<Direction>, rng: &mut R) -> MoveResult {
        if let Some(dir) = requested {
            self.set_direction(dir);
        }

        let old_head = self.body.head_index();
        let new_head = match self.grid.step(old_head, self.direction) {
            Some(idx) => idx,
            None => return self.block(BlockReason::OutOfBounds),
        };

        let ate = match self.grid.get_at(new_head) {
            Body | Head => return self.block(BlockReason::Body),
            Food => true,
            Empty => false,
        };

        // Must be read before `advance`, while the length still describes the old body
        let old_tail = self.body.tail_index();

        self.grid.set_at(old_head, Body);
        self.body.advance(new_head);
        self.grid.set_at(new_head, Head);

        if ate {
            self.body.grow();
            self.food = self.spawn_food(rng);
            if self.food.is_none() {
                self.status = Status::Filled;
            }
            Moved { old_head, new_head, old_tail: None, ate, food: self.food }
        } else {
            self.grid.set_at(old_tail, Empty);
            Moved { old_head, new_head, old_tail: Some(old_tail), ate, food: None }
        }
    }

    fn block(&mut self, reason: BlockReason) -> MoveResult {
        debug!("snake blocked ({:?}) heading {:?}", reason, self.direction);
        if self.policy == CollisionPolicy::EndGame {
            self.status = Status::Crashed;
        }
        Blocked(reason)
    }

    fn spawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let choices = self.grid.indices_of(Empty);
        let res = choices.choose(rng).copied();

        if let Some(idx) = res {
            self.grid.set_at(idx, Food);
            debug!("food spawned at {:?}", self.grid.coords_of(idx));
        }
        res
    }
}
