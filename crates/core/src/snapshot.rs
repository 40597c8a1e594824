//! Read-only occupancy view for renderers and tests.

use tui_gems_types::GemKind;

use crate::board::Board;
use crate::gems::{GemArena, GemId};

/// What a cell's occupant looks like from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemInfo {
    pub id: GemId,
    pub kind: GemKind,
    pub matched: bool,
}

/// A frozen copy of the board mapping. Captured per query; mutating the
/// engine afterwards does not touch it.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    width: u8,
    height: u8,
    cells: Vec<Option<GemInfo>>,
}

impl BoardSnapshot {
    pub(crate) fn capture(board: &Board, gems: &GemArena) -> BoardSnapshot {
        let (width, height) = (board.width(), board.height());
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                cells.push(board.get(col, row).map(|id| {
                    let gem = gems.get(id).expect("board cell references a released gem");
                    GemInfo {
                        id,
                        kind: gem.kind,
                        matched: gem.matched,
                    }
                }));
            }
        }
        BoardSnapshot {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn get(&self, col: u8, row: u8) -> Option<GemInfo> {
        assert!(
            col < self.width && row < self.height,
            "cell ({}, {}) outside {}x{} snapshot",
            col,
            row,
            self.width,
            self.height
        );
        self.cells[row as usize * self.width as usize + col as usize]
    }

    pub fn kind_at(&self, col: u8, row: u8) -> Option<GemKind> {
        self.get(col, row).map(|info| info.kind)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// The board as text, top row first, one char per gem kind and `.`
    /// for empty cells.
    pub fn layout(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|row| {
                (0..self.width)
                    .map(|col| self.kind_at(col, row).map_or('.', GemKind::as_char))
                    .collect()
            })
            .collect()
    }
}
