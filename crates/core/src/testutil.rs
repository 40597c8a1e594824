//! Test helpers: build boards from drawn layouts and render them back.

use tui_gems_types::{Cell, GemKind};

use crate::board::Board;
use crate::gems::GemArena;

/// Build a board and arena from rows drawn top-first, one char per cell:
/// a gem kind letter (see [`GemKind::from_char`]) or `.` for empty.
pub(crate) fn board_from(rows: &[&str]) -> (Board, GemArena) {
    let height = rows.len() as u8;
    let width = rows[0].chars().count() as u8;
    let mut board = Board::new(width, height);
    let mut arena = GemArena::new();

    for (i, line) in rows.iter().enumerate() {
        assert_eq!(
            line.chars().count() as u8,
            width,
            "ragged layout row {i:?}"
        );
        let row = height - 1 - i as u8;
        for (col, ch) in line.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let kind = GemKind::from_char(ch)
                .unwrap_or_else(|| panic!("unknown kind char {ch:?}"));
            let cell = Cell::new(col as u8, row);
            let id = arena.acquire(kind, cell);
            board.set(cell.col, cell.row, Some(id));
        }
    }

    (board, arena)
}

/// Render the board back to layout rows (top-first), `.` for empty.
pub(crate) fn layout(board: &Board, gems: &GemArena) -> Vec<String> {
    let mut rows = Vec::with_capacity(board.height() as usize);
    for row in (0..board.height()).rev() {
        let mut line = String::with_capacity(board.width() as usize);
        for col in 0..board.width() {
            let ch = match board.get(col, row) {
                Some(id) => gems
                    .get(id)
                    .map(|g| g.kind.as_char())
                    .unwrap_or('?'),
                None => '.',
            };
            line.push(ch);
        }
        rows.push(line);
    }
    rows
}
