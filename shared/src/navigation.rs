//! Keyboard traversal of the rendered grid.
//!
//! Row 0 is the dropdown header. Arrow keys only cycle through the content
//! rows 1..=row_count; row 0 is where the hover sits before any day has been
//! hovered and is never re-entered by wrapping.

use serde::{Deserialize, Serialize};

use crate::grid::{CalendarGrid, DAYS_PER_WEEK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Normalised keys the picker reacts to; anything else is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Arrow(Direction),
    Enter,
    Esc,
    Tab,
    /// Step the cursor back one month
    PageUp,
    PageDown,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(Key::Arrow(Direction::Up)),
            "ArrowDown" | "Down" => Some(Key::Arrow(Direction::Down)),
            "ArrowLeft" | "Left" => Some(Key::Arrow(Direction::Left)),
            "ArrowRight" | "Right" => Some(Key::Arrow(Direction::Right)),
            "Enter" => Some(Key::Enter),
            "Escape" | "Esc" => Some(Key::Esc),
            "Tab" => Some(Key::Tab),
            "PageUp" => Some(Key::PageUp),
            "PageDown" => Some(Key::PageDown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HoverPosition {
    pub row: usize,
    pub col: usize,
}

impl HoverPosition {
    pub const HEADER: HoverPosition = HoverPosition { row: 0, col: 0 };

    pub fn is_header(&self) -> bool {
        self.row == 0
    }

    /// Move one step, wrapping columns over 0..7 and rows over 1..=row_count
    pub fn step(self, direction: Direction, row_count: usize) -> Self {
        let last_col = DAYS_PER_WEEK - 1;
        let mut next = self;
        match direction {
            Direction::Up => {
                next.row = if self.row <= 1 { row_count } else { self.row - 1 };
            }
            Direction::Down => {
                next.row = if self.row >= row_count { 1 } else { self.row + 1 };
            }
            Direction::Left => {
                next.col = if self.col == 0 { last_col } else { self.col - 1 };
            }
            Direction::Right => {
                next.col = if self.col >= last_col { 0 } else { self.col + 1 };
            }
        }
        next.clamp(row_count)
    }

    /// Pull the row back inside a grid that may have shrunk
    pub fn clamp(self, row_count: usize) -> Self {
        Self {
            row: self.row.min(row_count),
            col: self.col.min(DAYS_PER_WEEK - 1),
        }
    }
}

/// Hover state over a particular grid
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub position: HoverPosition,
    pub row_count: usize,
}

impl NavigationState {
    pub fn new(row_count: usize) -> Self {
        Self {
            position: HoverPosition::HEADER,
            row_count,
        }
    }

    /// Re-seat the hover after a render: on the selected day when it is
    /// visible, otherwise the prior position clamped to the new grid.
    pub fn reset_for(&mut self, grid: &CalendarGrid) {
        self.row_count = grid.row_count();
        self.position = match grid.selected {
            Some(position) => position,
            None => self.position.clamp(self.row_count),
        };
    }

    pub fn move_hover(&mut self, direction: Direction) -> HoverPosition {
        self.position = self.position.step(direction, self.row_count);
        self.position
    }

    /// The single cell that should carry the hover style, if any
    pub fn hovered_cell(&self) -> Option<HoverPosition> {
        if self.position.is_header() {
            None
        } else {
            Some(self.position)
        }
    }
}
