//! In-memory stand-ins for the terminal.

use std::collections::{HashMap, VecDeque};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::term::{InputSource, Renderer};
use crate::Coords;

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent { code, modifiers: KeyModifiers::NONE }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub cells: HashMap<Coords, char>,
    pub writes: usize,
    pub clears: usize,
    pub flushes: usize,
}

impl RecordingRenderer {
    pub fn glyph_at(&self, pos: Coords) -> Option<char> {
        self.cells.get(&pos).copied()
    }

    /// Row `y` as text, up to the last drawn column.
    pub fn row(&self, y: u16) -> String {
        let end = self.cells.keys().filter(|p| p.1 == y).map(|p| p.0 + 1).max().unwrap_or(0);
        (0..end).map(|x| self.glyph_at((x, y)).unwrap_or(' ')).collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        let rows = self.cells.keys().map(|p| p.1).max().unwrap_or(0);
        (0..=rows).any(|y| self.row(y).contains(text))
    }
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self) -> Result<()> {
        self.cells.clear();
        self.clears += 1;
        Ok(())
    }

    fn set_cell(&mut self, pos: Coords, glyph: char) -> Result<()> {
        self.cells.insert(pos, glyph);
        self.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Hands out one scripted poll result per call, then nothing forever.
#[derive(Default)]
pub struct ScriptedInput {
    polls: VecDeque<Option<KeyEvent>>,
    pub polled: usize,
}

impl ScriptedInput {
    pub fn new(polls: Vec<Option<KeyEvent>>) -> Self {
        ScriptedInput { polls: polls.into(), polled: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.polls.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        self.polled += 1;
        Ok(self.polls.pop_front().flatten())
    }
}

/// Both halves of the terminal in one value, for code that takes a single
/// handle to draw on and read from.
#[derive(Default)]
pub struct FakeTerminal {
    pub out: RecordingRenderer,
    pub input: ScriptedInput,
}

impl FakeTerminal {
    pub fn with_keys(polls: Vec<Option<KeyEvent>>) -> Self {
        FakeTerminal { out: RecordingRenderer::default(), input: ScriptedInput::new(polls) }
    }
}

impl Renderer for FakeTerminal {
    fn clear_screen(&mut self) -> Result<()> {
        self.out.clear_screen()
    }

    fn set_cell(&mut self, pos: Coords, glyph: char) -> Result<()> {
        self.out.set_cell(pos, glyph)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }
}

impl InputSource for FakeTerminal {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        self.input.poll_key()
    }
}
