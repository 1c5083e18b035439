use anyhow::Result;

use crate::direction::Direction;
use crate::term::Renderer;
use crate::{Coords, TermInt};

/// Fixed-size board stored as a flat vector. All (x, y) math goes through
/// `index_of` / `coords_of`.
///
/// Every `set` that actually changes a cell is remembered until
/// `take_changes` is called, which is how the games know what to redraw.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
    changes: Vec<usize>,
}

impl<T: Copy + PartialEq> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Grid { width, height, cells: vec![fill; width * height], changes: vec![] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index_of(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    pub fn coords_of(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> T {
        self.get_at(self.index_of(x, y))
    }

    pub fn get_at(&self, idx: usize) -> T {
        self.cells[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index_of(x, y);
        self.set_at(idx, value);
    }

    pub fn set_at(&mut self, idx: usize, value: T) {
        if self.cells[idx] != value {
            self.cells[idx] = value;
            self.changes.push(idx);
        }
    }

    /// Neighbour of `idx` one step in `dir`, or `None` past the edge.
    pub fn step(&self, idx: usize, dir: Direction) -> Option<usize> {
        let (x, y) = self.coords_of(idx);
        let (dx, dy) = dir.offset();
        let (nx, ny) = (x as isize + dx, y as isize + dy);

        if self.in_bounds(nx, ny) {
            Some(self.index_of(nx as usize, ny as usize))
        } else {
            None
        }
    }

    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    pub fn indices_of(&self, value: T) -> Vec<usize> {
        self.cells.iter()
            .enumerate()
            .filter(|(_, &c)| c == value)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn take_changes(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.changes)
    }

    /// Screen position of a cell, given where the grid's top left corner
    /// sits and how many columns a cell occupies.
    pub fn screen_pos(&self, idx: usize, origin: Coords, cell_width: TermInt) -> Coords {
        let (x, y) = self.coords_of(idx);
        (origin.0 + x as TermInt * cell_width, origin.1 + y as TermInt)
    }

    /// Draws the cells changed since the last call, without flushing.
    pub fn render_changes<R, F>(&mut self, out: &mut R, origin: Coords, cell_width: TermInt, glyph: F) -> Result<()>
    where
        R: Renderer + ?Sized,
        F: Fn(T) -> char,
    {
        for idx in self.take_changes() {
            out.set_cell(self.screen_pos(idx, origin, cell_width), glyph(self.cells[idx]))?;
        }
        Ok(())
    }

    pub fn render_all<R, F>(&mut self, out: &mut R, origin: Coords, cell_width: TermInt, glyph: F) -> Result<()>
    where
        R: Renderer + ?Sized,
        F: Fn(T) -> char,
    {
        self.changes.clear();
        for idx in 0..self.cells.len() {
            out.set_cell(self.screen_pos(idx, origin, cell_width), glyph(self.cells[idx]))?;
        }
        Ok(())
    }
}
