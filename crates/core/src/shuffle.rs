//! Deadlock detection and board reshuffling.
//!
//! `has_no_moves_left` probes every rightward and upward swap against a
//! pure run scan, undoing each probe before the next. A deadlocked board
//! gets `shuffle`: one column permutation drawn once, a fresh row
//! permutation per column, and the whole grid rebuilt in place so no
//! intermediate state is ever observable.

use tui_gems_types::{Cell, Direction};

use crate::board::Board;
use crate::gems::GemArena;
use crate::matcher;
use crate::rng::BoardRng;

/// First rightward or upward swap that would produce a run, probing cells
/// column-major with the right swap tried before the up swap. Each probe
/// swaps the two cells on the grid, runs the pure scan and swaps back, so
/// gem flags and the board are left exactly as found.
pub fn find_playable_move(board: &mut Board, gems: &GemArena) -> Option<(Cell, Direction)> {
    for col in 0..board.width() {
        for row in 0..board.height() {
            let here = Cell::new(col, row);
            for dir in [Direction::Right, Direction::Up] {
                let Some(other) = here.neighbor(dir, board.width(), board.height()) else {
                    continue;
                };
                board.swap_cells(here, other);
                let found = matcher::has_any_run(board, gems);
                board.swap_cells(here, other);
                if found {
                    return Some((here, dir));
                }
            }
        }
    }
    None
}

/// True when no single adjacent swap anywhere can produce a run.
pub fn has_no_moves_left(board: &mut Board, gems: &GemArena) -> bool {
    find_playable_move(board, gems).is_none()
}

/// Rebuild the grid under a random permutation: destination column `c`
/// draws from source column `col_perm[c]`, and each destination column
/// draws its rows through a fresh row permutation. Gem coordinates and
/// the mapping are rewritten together, so the board is consistent the
/// moment this returns; only the sprites still have to travel.
pub fn shuffle(board: &mut Board, gems: &mut GemArena, rng: &mut BoardRng) {
    let (w, h) = (board.width(), board.height());
    let col_perm = rng.permutation(w as usize);
    let mut next = Board::new(w, h);
    for col in 0..w {
        let row_perm = rng.permutation(h as usize);
        for row in 0..h {
            let src_col = col_perm[col as usize] as u8;
            let src_row = row_perm[row as usize] as u8;
            let Some(id) = board.get(src_col, src_row) else {
                continue;
            };
            let gem = gems.get_mut(id).expect("shuffling a released gem");
            gem.col = col;
            gem.row = row;
            next.set(col, row, Some(id));
        }
    }
    *board = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{board_from, layout};
    use tui_gems_types::GemKind;

    fn kind_counts(gems: &GemArena, board: &Board) -> [usize; GemKind::COUNT] {
        let mut counts = [0usize; GemKind::COUNT];
        for col in 0..board.width() {
            for row in 0..board.height() {
                if let Some(id) = board.get(col, row) {
                    counts[gems.get(id).unwrap().kind as usize] += 1;
                }
            }
        }
        counts
    }

    #[test]
    fn playable_board_is_not_deadlocked() {
        // Swapping (2, 0) up completes the amber run along the bottom.
        let (mut board, gems) = board_from(&[
            "TSR", //
            "SRA", //
            "AAT", //
        ]);
        assert!(!has_no_moves_left(&mut board, &gems));
    }

    #[test]
    fn playable_move_hint_names_the_probe_that_matched() {
        let (mut board, gems) = board_from(&[
            "TSR", //
            "SRA", //
            "AAT", //
        ]);
        assert_eq!(
            find_playable_move(&mut board, &gems),
            Some((Cell::new(2, 0), Direction::Up))
        );
    }

    #[test]
    fn board_without_three_of_a_kind_is_deadlocked() {
        let (mut board, gems) = board_from(&[
            "RAT", //
            "ESM", //
            "TAR", //
        ]);
        assert!(has_no_moves_left(&mut board, &gems));
    }

    #[test]
    fn scattered_triple_can_still_be_deadlocked() {
        // Three ambers, none of which any single swap can line up.
        let (mut board, gems) = board_from(&[
            "ART", //
            "ASM", //
            "TRA", //
        ]);
        assert!(has_no_moves_left(&mut board, &gems));
    }

    #[test]
    fn probing_leaves_the_board_and_flags_untouched() {
        let (mut board, gems) = board_from(&[
            "TSR", //
            "SRA", //
            "AAT", //
        ]);
        let before = layout(&board, &gems);
        has_no_moves_left(&mut board, &gems);
        assert_eq!(layout(&board, &gems), before);
        for col in 0..3 {
            for row in 0..3 {
                let id = board.get(col, row).unwrap();
                assert!(!gems.get(id).unwrap().matched);
            }
        }
    }

    #[test]
    fn shuffle_keeps_every_gem_and_its_mapping_consistent() {
        let (mut board, mut gems) = board_from(&[
            "ART", //
            "ASM", //
            "TRA", //
        ]);
        let counts = kind_counts(&gems, &board);
        let mut rng = BoardRng::seeded(4);
        shuffle(&mut board, &mut gems, &mut rng);

        assert!(board.is_full());
        assert_eq!(kind_counts(&gems, &board), counts);
        for col in 0..board.width() {
            for row in 0..board.height() {
                let id = board.get(col, row).unwrap();
                let gem = gems.get(id).unwrap();
                assert_eq!((gem.col, gem.row), (col, row));
            }
        }
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let make = |seed| {
            let (mut board, mut gems) = board_from(&[
                "ART", //
                "ASM", //
                "TRA", //
            ]);
            let mut rng = BoardRng::seeded(seed);
            shuffle(&mut board, &mut gems, &mut rng);
            layout(&board, &gems)
        };
        assert_eq!(make(11), make(11));
        assert_ne!(make(11), make(12));
    }

    #[test]
    fn repeated_shuffles_escape_a_deadlock() {
        let (mut board, mut gems) = board_from(&[
            "ART", //
            "ASM", //
            "TRA", //
        ]);
        assert!(has_no_moves_left(&mut board, &gems));
        let mut rng = BoardRng::seeded(0);
        let mut rounds = 0;
        while has_no_moves_left(&mut board, &gems) {
            shuffle(&mut board, &mut gems, &mut rng);
            rounds += 1;
            assert!(rounds < 1000, "shuffle never produced a playable board");
        }
        assert!(!has_no_moves_left(&mut board, &gems));
    }
}
