//! Swap resolution through the public facade: committed runs, fruitless
//! reverts, and the destroyed-count report the score sink consumes.

use tui_gems::core::{BoardEngine, BoardEvent};
use tui_gems::types::{Cell, Direction, GemKind};

// Full 5x8 board with no runs. Swapping (2,2) right completes an emerald
// column at col 3, rows 0..=2; swapping (0,0) right matches nothing.
const BOARD: &[&str] = &[
    "RATSM", //
    "ATRMS", //
    "TRASM", //
    "RATMS", //
    "ATRSM", //
    "TREAS", //
    "RATEM", //
    "ATRES", //
];

fn drive_to_idle(engine: &mut BoardEngine) -> Vec<BoardEvent> {
    let mut seen = Vec::new();
    for _ in 0..10_000 {
        let events = engine.drain_events();
        if events.is_empty() && engine.is_idle() {
            return seen;
        }
        for event in &events {
            match *event {
                BoardEvent::Moved { id, .. } | BoardEvent::Fell { id, .. } => {
                    engine.notify_arrived(id)
                }
                BoardEvent::Spawned { id, drop_rows, .. } if drop_rows > 0 => {
                    engine.notify_arrived(id)
                }
                _ => {}
            }
        }
        seen.extend(events);
        engine.tick(500);
    }
    panic!("board never settled");
}

fn has_run(layout: &[String]) -> bool {
    let h = layout.len();
    let w = layout[0].len();
    let at = |col: usize, row: usize| layout[row].as_bytes()[col];
    for row in 0..h {
        for col in 0..w.saturating_sub(2) {
            let k = at(col, row);
            if k != b'.' && at(col + 1, row) == k && at(col + 2, row) == k {
                return true;
            }
        }
    }
    for col in 0..w {
        for row in 0..h.saturating_sub(2) {
            let k = at(col, row);
            if k != b'.' && at(col, row + 1) == k && at(col, row + 2) == k {
                return true;
            }
        }
    }
    false
}

#[test]
fn committed_swap_reports_the_destroyed_run() {
    let mut engine = BoardEngine::from_layout(BOARD, 5);
    engine.drain_events();

    assert!(engine.swipe(Cell::new(2, 2), Direction::Right));
    let seen = drive_to_idle(&mut engine);

    // The first resolution batch is the swap's own run: three emeralds
    // down column 3, reported bottom-up.
    let destroyed: Vec<_> = seen
        .iter()
        .filter_map(|e| match e {
            BoardEvent::Destroyed { kind, cell, .. } => Some((*kind, *cell)),
            _ => None,
        })
        .collect();
    assert!(destroyed.len() >= 3);
    assert_eq!(destroyed[0], (GemKind::Emerald, Cell::new(3, 0)));
    assert_eq!(destroyed[1], (GemKind::Emerald, Cell::new(3, 1)));
    assert_eq!(destroyed[2], (GemKind::Emerald, Cell::new(3, 2)));

    let first_resolved = seen
        .iter()
        .find_map(|e| match e {
            BoardEvent::Resolved { destroyed } => Some(*destroyed),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_resolved, 3);
}

#[test]
fn every_destroyed_gem_is_accounted_for_in_resolved_counts() {
    let mut engine = BoardEngine::from_layout(BOARD, 5);
    engine.drain_events();
    engine.swipe(Cell::new(2, 2), Direction::Right);
    let seen = drive_to_idle(&mut engine);

    let destroyed_events = seen
        .iter()
        .filter(|e| matches!(e, BoardEvent::Destroyed { .. }))
        .count() as u32;
    let resolved_total: u32 = seen
        .iter()
        .filter_map(|e| match e {
            BoardEvent::Resolved { destroyed } => Some(*destroyed),
            _ => None,
        })
        .sum();
    assert_eq!(destroyed_events, resolved_total);
}

#[test]
fn resolution_refills_to_a_full_runless_board() {
    let mut engine = BoardEngine::from_layout(BOARD, 5);
    engine.drain_events();
    engine.swipe(Cell::new(2, 2), Direction::Right);
    drive_to_idle(&mut engine);

    assert!(engine.is_idle());
    assert_eq!(engine.pending_arrivals(), 0);
    let snap = engine.snapshot();
    assert_eq!(snap.occupied_count(), 40);
    assert!(!has_run(&snap.layout()));
}

#[test]
fn fruitless_swap_reverts_to_the_exact_layout() {
    let mut engine = BoardEngine::from_layout(BOARD, 5);
    engine.drain_events();
    let before = engine.snapshot().layout();

    assert!(engine.swipe(Cell::new(0, 0), Direction::Right));
    let seen = drive_to_idle(&mut engine);

    assert_eq!(engine.snapshot().layout(), before);
    assert!(seen
        .iter()
        .all(|e| !matches!(e, BoardEvent::Destroyed { .. } | BoardEvent::Resolved { .. })));
    // Two movements out, two movements back.
    let moved = seen
        .iter()
        .filter(|e| matches!(e, BoardEvent::Moved { .. }))
        .count();
    assert_eq!(moved, 4);
}
