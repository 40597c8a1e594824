use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_gems::core::{matcher, refill, shuffle, Board, BoardEngine, BoardEvent, BoardRng, GemArena};
use tui_gems::types::{Cell, Direction, DEFAULT_PALETTE};

fn populated_board(seed: u64) -> (Board, GemArena) {
    let mut board = Board::new(5, 8);
    let mut gems = GemArena::new();
    let mut rng = BoardRng::seeded(seed);
    refill::populate(&mut board, &mut gems, &mut rng, DEFAULT_PALETTE);
    (board, gems)
}

fn bench_match_scan(c: &mut Criterion) {
    let (board, mut gems) = populated_board(12345);

    c.bench_function("match_scan_5x8", |b| {
        b.iter(|| black_box(matcher::has_matches_anywhere(&board, &mut gems)))
    });
}

fn bench_deadlock_probe(c: &mut Criterion) {
    let (mut board, gems) = populated_board(12345);

    c.bench_function("deadlock_probe_5x8", |b| {
        b.iter(|| black_box(shuffle::has_no_moves_left(&mut board, &gems)))
    });
}

// Full pipeline: swap commit, destruction, gravity, refill, and every
// cascade wave after it, with arrivals acked instantly.
fn bench_full_cascade(c: &mut Criterion) {
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

    c.bench_function("cascade_from_swap_5x8", |b| {
        b.iter(|| {
            let mut engine = BoardEngine::from_layout(BOARD, black_box(5));
            engine.drain_events();
            engine.swipe(Cell::new(2, 2), Direction::Right);
            for _ in 0..10_000 {
                let events = engine.drain_events();
                if events.is_empty() && engine.is_idle() {
                    break;
                }
                for event in events {
                    match event {
                        BoardEvent::Moved { id, .. } | BoardEvent::Fell { id, .. } => {
                            engine.notify_arrived(id)
                        }
                        BoardEvent::Spawned { id, drop_rows, .. } if drop_rows > 0 => {
                            engine.notify_arrived(id)
                        }
                        _ => {}
                    }
                }
                engine.tick(500);
            }
            black_box(engine.snapshot().occupied_count())
        })
    });
}

criterion_group!(
    benches,
    bench_match_scan,
    bench_deadlock_probe,
    bench_full_cascade
);
criterion_main!(benches);
