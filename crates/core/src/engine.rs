//! The turn state machine tying the board pieces together.
//!
//! The engine never blocks: it advances on two host signals, `tick`
//! (elapsed time, for the settle delays) and `notify_arrived` (a gem's
//! animation converged). Each suspension names what it waits for:
//!
//! ```text
//! Idle -swipe-> SwapMove -+- match -> [destroy] -> FallMove -> RefillMove
//!                         |                           ^            |
//!                         +- none --> SwapRevert      |            v
//!                                         |      CascadePause <- MatchSettle
//!                                         v           ^               |
//!                                       Idle          +---- [settle]--+
//! RefillMove --> settle check: matches -> MatchSettle
//!                              no move  -> ShuffleMove -> settle check
//!                              playable -> Idle
//! ```
//!
//! Exactly one pipeline runs at a time; swipes are only accepted in
//! `Idle`. A stale arrival (a gem the engine is not waiting on) is
//! dropped without effect.

use tui_gems_types::{
    BoardConfig, Cell, Direction, GemKind, CASCADE_PAUSE_MS, DEFAULT_PALETTE, MATCH_SETTLE_MS,
};

use crate::board::Board;
use crate::events::{BoardEvent, EventQueue};
use crate::gems::{GemArena, GemId};
use crate::gravity::{self, Fall};
use crate::matcher;
use crate::refill;
use crate::rng::BoardRng;
use crate::shuffle;
use crate::snapshot::{BoardSnapshot, GemInfo};
use crate::swap::{self, SwapPair};

#[derive(Debug)]
enum Phase {
    Idle,
    SwapMove { pair: SwapPair },
    SwapRevert,
    FallMove { falls: Vec<Fall> },
    RefillMove,
    MatchSettle { remaining_ms: u32 },
    CascadePause { remaining_ms: u32 },
    ShuffleMove,
}

pub struct BoardEngine {
    config: BoardConfig,
    board: Board,
    gems: GemArena,
    rng: BoardRng,
    phase: Phase,
    awaiting: Vec<GemId>,
    events: EventQueue,
}

impl BoardEngine {
    /// Build and populate a board. The same seed reproduces the whole
    /// session, refills and shuffles included.
    pub fn new(config: BoardConfig, seed: u64) -> BoardEngine {
        let mut engine = BoardEngine {
            board: Board::new(config.width, config.height),
            gems: GemArena::with_capacity(config.width as usize * config.height as usize),
            rng: BoardRng::seeded(seed),
            config,
            phase: Phase::Idle,
            awaiting: Vec::new(),
            events: EventQueue::new(),
        };
        engine.populate_initial();
        engine
    }

    /// Build a board from explicit rows (top row first, one kind char
    /// per cell, `.` for empty). For tests and demos; spawned gems start
    /// at rest.
    pub fn from_layout(rows: &[&str], seed: u64) -> BoardEngine {
        assert!(!rows.is_empty(), "layout needs at least one row");
        let height = rows.len() as u8;
        let width = rows[0].len() as u8;
        let config = BoardConfig::new(width, height, DEFAULT_PALETTE);
        let mut engine = BoardEngine {
            board: Board::new(width, height),
            gems: GemArena::with_capacity(width as usize * height as usize),
            rng: BoardRng::seeded(seed),
            config,
            phase: Phase::Idle,
            awaiting: Vec::new(),
            events: EventQueue::new(),
        };
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), width as usize, "ragged layout row {i}");
            let row = height - 1 - i as u8;
            for (col, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = GemKind::from_char(ch)
                    .unwrap_or_else(|| panic!("unknown gem kind {ch:?} in layout"));
                let cell = Cell::new(col as u8, row);
                let id = engine.gems.acquire(kind, cell);
                engine.board.set(cell.col, cell.row, Some(id));
                engine.events.push(BoardEvent::Spawned {
                    id,
                    kind,
                    cell,
                    drop_rows: 0,
                });
            }
        }
        engine
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> u8 {
        self.board.width()
    }

    pub fn height(&self) -> u8 {
        self.board.height()
    }

    /// Swipes are accepted only at quiescence.
    pub fn allow_swipe(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Current suspension, for the HUD state line.
    pub fn phase_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "idle",
            Phase::SwapMove { .. } => "swap",
            Phase::SwapRevert => "revert",
            Phase::FallMove { .. } => "fall",
            Phase::RefillMove => "refill",
            Phase::MatchSettle { .. } => "settle",
            Phase::CascadePause { .. } => "pause",
            Phase::ShuffleMove => "shuffle",
        }
    }

    pub fn pending_arrivals(&self) -> usize {
        self.awaiting.len()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, &self.gems)
    }

    pub fn gem_info(&self, id: GemId) -> Option<GemInfo> {
        self.gems.get(id).map(|gem| GemInfo {
            id,
            kind: gem.kind,
            matched: gem.matched,
        })
    }

    /// Pending presentation events, oldest first. Clears the queue.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.events.drain()
    }

    /// Request a swap of the gem at `at` toward `dir`. Returns whether a
    /// swap actually started; anything unusable (busy pipeline, cell
    /// outside the board, edge of board, empty cell) is absorbed as a
    /// no-op.
    pub fn swipe(&mut self, at: Cell, dir: Direction) -> bool {
        if !self.allow_swipe() {
            return false;
        }
        let Some(pair) = swap::begin_swap(&self.board, &mut self.gems, at, dir) else {
            return false;
        };
        self.await_move(pair);
        self.phase = Phase::SwapMove { pair };
        true
    }

    /// Raw-angle variant of [`BoardEngine::swipe`]. An angle of exactly
    /// zero is the tracker's below-dead-zone sentinel and is dropped
    /// before quantization.
    pub fn swipe_angle(&mut self, at: Cell, angle_deg: f32) -> bool {
        if angle_deg == 0.0 {
            return false;
        }
        let Some(dir) = Direction::from_angle_deg(angle_deg) else {
            return false;
        };
        self.swipe(at, dir)
    }

    /// Throw away any in-flight pipeline, clear the board and repopulate.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.awaiting.clear();
        self.board.clear_all();
        self.gems.clear();
        self.events.push(BoardEvent::Cleared);
        self.populate_initial();
    }

    /// Advance the settle timers. Phases waiting on arrivals ignore time.
    pub fn tick(&mut self, dt_ms: u32) {
        let expired = match &mut self.phase {
            Phase::MatchSettle { remaining_ms } | Phase::CascadePause { remaining_ms } => {
                *remaining_ms = remaining_ms.saturating_sub(dt_ms);
                *remaining_ms == 0
            }
            _ => false,
        };
        if !expired {
            return;
        }
        match self.phase {
            Phase::MatchSettle { .. } => {
                self.destroy_matched();
                self.phase = Phase::CascadePause {
                    remaining_ms: CASCADE_PAUSE_MS,
                };
            }
            Phase::CascadePause { .. } => self.enter_gravity(),
            _ => {}
        }
    }

    /// The host reports one gem's animation has converged. Arrivals the
    /// engine is not waiting on are dropped. When the last awaited gem
    /// arrives, the pipeline moves to its next step.
    pub fn notify_arrived(&mut self, id: GemId) {
        let Some(pos) = self.awaiting.iter().position(|&a| a == id) else {
            return;
        };
        self.awaiting.swap_remove(pos);

        match &self.phase {
            // A swap's mapping follows each gem individually; the partner
            // overwrites the stale half when it lands.
            Phase::SwapMove { .. } => {
                if let Some(gem) = self.gems.get(id) {
                    self.board.set(gem.col, gem.row, Some(id));
                }
            }
            Phase::FallMove { falls } => {
                if let Some(fall) = falls.iter().find(|f| f.id == id).copied() {
                    gravity::settle_fall(&mut self.board, &fall);
                }
            }
            // Reverts restore the mapping up front, refills claim their
            // cell at spawn, shuffles rewrite the grid wholesale.
            _ => {}
        }

        if self.awaiting.is_empty() {
            self.on_batch_settled();
        }
    }

    fn on_batch_settled(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::SwapMove { pair } => {
                if swap::evaluate(&self.board, &mut self.gems, pair) {
                    self.destroy_matched();
                    swap::finalize_survivors(&mut self.board, &self.gems, pair);
                    self.enter_gravity();
                } else {
                    swap::revert(&mut self.board, &mut self.gems, pair);
                    self.await_move(pair);
                    self.phase = Phase::SwapRevert;
                }
            }
            Phase::SwapRevert => {}
            Phase::FallMove { .. } => self.enter_refill(),
            Phase::RefillMove | Phase::ShuffleMove => self.after_settle_check(),
            // Nothing is awaited in the remaining phases; keep them.
            phase => self.phase = phase,
        }
    }

    /// Queue both gems of a pair as awaited movements.
    fn await_move(&mut self, pair: SwapPair) {
        for id in pair.ids() {
            let gem = self.gems.get(id).expect("moving a released gem");
            self.events.push(BoardEvent::Moved {
                id,
                to: gem.cell(),
            });
            self.awaiting.push(id);
        }
    }

    /// Release every matched gem, clear its cell and report the batch
    /// size to the score sink feed.
    fn destroy_matched(&mut self) -> u32 {
        let mut destroyed = 0u32;
        for col in 0..self.board.width() {
            for row in 0..self.board.height() {
                let Some(id) = self.board.get(col, row) else {
                    continue;
                };
                let Some(gem) = self.gems.get(id) else {
                    continue;
                };
                if !gem.matched {
                    continue;
                }
                let kind = gem.kind;
                self.board.set(col, row, None);
                self.gems.release(id);
                self.events.push(BoardEvent::Destroyed {
                    id,
                    kind,
                    cell: Cell::new(col, row),
                });
                destroyed += 1;
            }
        }
        self.events.push(BoardEvent::Resolved { destroyed });
        destroyed
    }

    fn enter_gravity(&mut self) {
        let falls = gravity::compute_falls(&self.board, &mut self.gems);
        if falls.is_empty() {
            self.enter_refill();
            return;
        }
        for (order, fall) in falls.iter().enumerate() {
            self.awaiting.push(fall.id);
            self.events.push(BoardEvent::Fell {
                id: fall.id,
                to: Cell::new(fall.col, fall.to_row),
                order: order as u16,
            });
        }
        self.phase = Phase::FallMove { falls };
    }

    fn enter_refill(&mut self) {
        let spawns = refill::compute_spawns(
            &mut self.board,
            &mut self.gems,
            &mut self.rng,
            self.config.palette,
        );
        if spawns.is_empty() {
            self.after_settle_check();
            return;
        }
        let drop_base = self.config.height / 2;
        for spawn in &spawns {
            self.awaiting.push(spawn.id);
            self.events.push(BoardEvent::Spawned {
                id: spawn.id,
                kind: spawn.kind,
                cell: spawn.cell,
                drop_rows: (spawn.cell.row + 1) * drop_base,
            });
        }
        self.phase = Phase::RefillMove;
    }

    /// The settled-board decision shared by refills and shuffles: a found
    /// match starts the settle delay, a dead board shuffles, anything
    /// else is quiescence.
    fn after_settle_check(&mut self) {
        if matcher::has_matches_anywhere(&self.board, &mut self.gems) {
            self.phase = Phase::MatchSettle {
                remaining_ms: MATCH_SETTLE_MS,
            };
        } else if shuffle::has_no_moves_left(&mut self.board, &self.gems) {
            self.do_shuffle();
        } else {
            self.phase = Phase::Idle;
        }
    }

    fn do_shuffle(&mut self) {
        shuffle::shuffle(&mut self.board, &mut self.gems, &mut self.rng);
        self.events.push(BoardEvent::Shuffled);
        for col in 0..self.board.width() {
            for row in 0..self.board.height() {
                if let Some(id) = self.board.get(col, row) {
                    self.awaiting.push(id);
                    self.events.push(BoardEvent::Moved {
                        id,
                        to: Cell::new(col, row),
                    });
                }
            }
        }
        self.phase = Phase::ShuffleMove;
    }

    fn populate_initial(&mut self) {
        refill::populate(
            &mut self.board,
            &mut self.gems,
            &mut self.rng,
            self.config.palette,
        );
        for col in 0..self.board.width() {
            for row in 0..self.board.height() {
                if let Some(id) = self.board.get(col, row) {
                    let kind = self
                        .gems
                        .get(id)
                        .expect("populated cell holds a released gem")
                        .kind;
                    self.events.push(BoardEvent::Spawned {
                        id,
                        kind,
                        cell: Cell::new(col, row),
                        drop_rows: 0,
                    });
                }
            }
        }
    }
}
