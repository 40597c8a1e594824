//! The board grid: cell → gem mapping.
//!
//! The grid is the single source of truth for board topology. Cells hold at
//! most one [`GemId`]; empty is a distinct, valid state. Coordinates are
//! bounds-asserted: passing an out-of-range cell to `get`/`set` is a
//! programming error, and public entry points are expected to validate
//! player input before touching the grid.

use tui_gems_types::Cell;

use crate::gems::GemId;

/// W×H grid of optional gem references, flat row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Option<GemId>>,
}

impl Board {
    pub fn new(width: u8, height: u8) -> Board {
        Board {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, col: i16, row: i16) -> bool {
        col >= 0 && col < self.width as i16 && row >= 0 && row < self.height as i16
    }

    #[inline]
    fn idx(&self, col: u8, row: u8) -> usize {
        assert!(
            self.in_bounds(col as i16, row as i16),
            "cell ({}, {}) outside {}x{} board",
            col,
            row,
            self.width,
            self.height
        );
        row as usize * self.width as usize + col as usize
    }

    pub fn get(&self, col: u8, row: u8) -> Option<GemId> {
        self.cells[self.idx(col, row)]
    }

    pub fn set(&mut self, col: u8, row: u8, gem: Option<GemId>) {
        let i = self.idx(col, row);
        self.cells[i] = gem;
    }

    pub fn is_empty_at(&self, col: u8, row: u8) -> bool {
        self.get(col, row).is_none()
    }

    /// True when every cell holds a gem. Shuffle requires this.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// Swap the contents of two cells. Used by the deadlock probe, which
    /// must not touch gem coordinates.
    pub(crate) fn swap_cells(&mut self, a: Cell, b: Cell) {
        let ia = self.idx(a.col, a.row);
        let ib = self.idx(b.col, b.row);
        self.cells.swap(ia, ib);
    }
}
