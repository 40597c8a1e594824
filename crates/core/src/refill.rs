//! Spawning: initial board population and post-gravity refills.
//!
//! Initial population re-rolls any kind that would complete a run with
//! the pair to its left or below, so a fresh board never opens with a
//! match. Refills deliberately skip that check: a refill landing into a
//! run is what produces cascades.

use tui_gems_types::{Cell, GemKind};

use crate::board::Board;
use crate::gems::{GemArena, GemId};
use crate::matcher;
use crate::rng::BoardRng;

/// A freshly spawned gem headed for its resting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub id: GemId,
    pub kind: GemKind,
    pub cell: Cell,
}

/// Fill every empty cell with a gem whose kind is re-rolled until it
/// completes no run. Population proceeds column-major ascending, so only
/// the left and below neighbors can already exist. With a palette of
/// three or more kinds a safe roll always exists.
pub fn populate(board: &mut Board, gems: &mut GemArena, rng: &mut BoardRng, palette: u8) {
    for col in 0..board.width() {
        for row in 0..board.height() {
            if board.get(col, row).is_some() {
                continue;
            }
            let cell = Cell::new(col, row);
            let mut kind = rng.gem_kind(palette);
            while matcher::will_match_on_spawn(board, gems, cell, kind) {
                kind = rng.gem_kind(palette);
            }
            let id = gems.acquire(kind, cell);
            board.set(col, row, Some(id));
        }
    }
}

/// Spawn a gem for every empty cell, claiming its board slot at once, and
/// return the batch so the host can animate the drops. Kinds are rolled
/// freely here; chain matches from refills are intentional.
pub fn compute_spawns(
    board: &mut Board,
    gems: &mut GemArena,
    rng: &mut BoardRng,
    palette: u8,
) -> Vec<Spawn> {
    let mut spawns = Vec::new();
    for col in 0..board.width() {
        for row in 0..board.height() {
            if board.get(col, row).is_some() {
                continue;
            }
            let cell = Cell::new(col, row);
            let kind = rng.gem_kind(palette);
            let id = gems.acquire(kind, cell);
            board.set(col, row, Some(id));
            spawns.push(Spawn { id, kind, cell });
        }
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{board_from, layout};
    use tui_gems_types::{GemKind, DEFAULT_PALETTE};

    #[test]
    fn population_fills_the_board_without_runs() {
        for seed in 0..50 {
            let mut board = Board::new(5, 8);
            let mut gems = GemArena::new();
            let mut rng = BoardRng::seeded(seed);
            populate(&mut board, &mut gems, &mut rng, DEFAULT_PALETTE);

            assert!(board.is_full(), "seed {seed} left holes");
            assert!(
                !matcher::has_any_run(&board, &gems),
                "seed {seed} opened with a run:\n{}",
                layout(&board, &gems).join("\n")
            );
        }
    }

    #[test]
    fn population_is_deterministic_per_seed() {
        let make = || {
            let mut board = Board::new(5, 8);
            let mut gems = GemArena::new();
            let mut rng = BoardRng::seeded(77);
            populate(&mut board, &mut gems, &mut rng, DEFAULT_PALETTE);
            layout(&board, &gems)
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn population_rerolls_a_kind_that_would_complete_a_run() {
        for seed in 0..20 {
            let (mut board, mut gems) = board_from(&[
                "...", //
                "...", //
                "AA.", //
            ]);
            let mut rng = BoardRng::seeded(seed);
            populate(&mut board, &mut gems, &mut rng, 3);

            let id = board.get(2, 0).unwrap();
            assert_ne!(gems.get(id).unwrap().kind, GemKind::Amber, "seed {seed}");
        }
    }

    #[test]
    fn population_respects_the_palette() {
        let mut board = Board::new(4, 4);
        let mut gems = GemArena::new();
        let mut rng = BoardRng::seeded(3);
        populate(&mut board, &mut gems, &mut rng, 3);

        let narrow = [GemKind::Ruby, GemKind::Amber, GemKind::Topaz];
        for col in 0..4 {
            for row in 0..4 {
                let id = board.get(col, row).unwrap();
                assert!(narrow.contains(&gems.get(id).unwrap().kind));
            }
        }
    }

    #[test]
    fn refill_claims_exactly_the_empty_cells() {
        let (mut board, mut gems) = board_from(&[
            ".R.", //
            ".AT", //
            "SAT", //
        ]);
        let mut rng = BoardRng::seeded(9);
        let spawns = compute_spawns(&mut board, &mut gems, &mut rng, DEFAULT_PALETTE);

        assert_eq!(spawns.len(), 3);
        let mut cells: Vec<Cell> = spawns.iter().map(|s| s.cell).collect();
        cells.sort_by_key(|c| (c.col, c.row));
        assert_eq!(
            cells,
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(2, 2)]
        );
        assert!(board.is_full());
        for spawn in &spawns {
            assert_eq!(board.get(spawn.cell.col, spawn.cell.row), Some(spawn.id));
            assert_eq!(gems.get(spawn.id).unwrap().cell(), spawn.cell);
        }
    }

    #[test]
    fn refill_of_a_full_board_spawns_nothing() {
        let (mut board, mut gems) = board_from(&[
            "RAT", //
            "TRA", //
            "ART", //
        ]);
        let mut rng = BoardRng::seeded(1);
        assert!(compute_spawns(&mut board, &mut gems, &mut rng, DEFAULT_PALETTE).is_empty());
    }
}
