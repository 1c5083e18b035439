use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::direction::Direction;
use crate::grid::Grid;
use Pixel::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pixel {
    Empty,
    Car,
    Obstacle,
    Crash,
}

/// Lane-dodging road. The car lives on the bottom row and only moves
/// sideways while obstacles fall one row per frame.
pub struct Road {
    grid: Grid<Pixel>,
    car_x: usize,
    car_y: usize,
    num_obstacles: usize,
    max_obstacles: usize,
    crashed: bool,
    frames: u64,
}

impl Road {
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Grid::new(width, height, Empty);
        let (car_x, car_y) = (width / 2, height - 1);
        grid.set(car_x, car_y, Car);

        // At most one obstacle per row on average
        let max_obstacles = height;

        Road { grid, car_x, car_y, num_obstacles: 0, max_obstacles, crashed: false, frames: 0 }
    }

    pub fn grid(&self) -> &Grid<Pixel> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<Pixel> {
        &mut self.grid
    }

    pub fn car(&self) -> (usize, usize) {
        (self.car_x, self.car_y)
    }

    pub fn num_obstacles(&self) -> usize {
        self.num_obstacles
    }

    pub fn is_crashed(&self) -> bool {
        self.crashed
    }

    /// Frames survived so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drops an obstacle at (x, y). Returns false if the cell isn't empty.
    pub fn place_obstacle(&mut self, x: usize, y: usize) -> bool {
        if self.grid.get(x, y) != Empty {
            return false;
        }
        self.grid.set(x, y, Obstacle);
        self.num_obstacles += 1;
        true
    }

    /// Runs one frame: steer, lower every obstacle, then maybe spawn new
    /// ones. Returns true on a crash, after which the road is frozen.
    pub fn step<R: Rng + ?Sized>(&mut self, steer: Option<Direction>, rng: &mut R) -> bool {
        if self.crashed {
            return true;
        }

        if let Some(dir) = steer.filter(|d| d.is_horizontal()) {
            self.steer(dir);
        }

        self.crashed = self.lower_obstacles();
        if self.crashed {
            info!("car crashed after {} frames", self.frames);
            return true;
        }

        self.spawn_obstacles(rng);
        self.frames += 1;
        false
    }

    fn steer(&mut self, dir: Direction) {
        let car = self.grid.index_of(self.car_x, self.car_y);
        if let Some(next) = self.grid.step(car, dir) {
            if self.grid.get_at(next) != Obstacle {
                self.grid.set_at(car, Empty);
                self.grid.set_at(next, Car);
                self.car_x = self.grid.coords_of(next).0;
            }
        }
    }

    // Walks from the last cell backwards so an obstacle is never moved twice
    fn lower_obstacles(&mut self) -> bool {
        let mut collision = false;

        for idx in (0..self.grid.len()).rev() {
            if self.grid.get_at(idx) != Obstacle {
                continue;
            }

            self.grid.set_at(idx, Empty);
            match self.grid.step(idx, Direction::Down) {
                None => self.num_obstacles -= 1,
                Some(next) if self.grid.get_at(next) == Car => {
                    self.grid.set_at(next, Crash);
                    self.num_obstacles -= 1;
                    collision = true;
                }
                Some(next) => self.grid.set_at(next, Obstacle),
            }
        }

        collision
    }

    fn spawn_obstacles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let width = self.grid.width();
        let density = 1.0 / width as f64;

        for _ in 0..width {
            if self.num_obstacles >= self.max_obstacles {
                return;
            }

            let free: Vec<usize> = (0..width).filter(|&x| self.grid.get(x, 0) == Empty).collect();
            let x = match free.choose(rng) {
                Some(&x) => x,
                None => return,
            };

            if rng.gen_bool(density) {
                self.grid.set(x, 0, Obstacle);
                self.num_obstacles += 1;
                debug!("obstacle spawned in lane {}", x);
            }
        }
    }
}
