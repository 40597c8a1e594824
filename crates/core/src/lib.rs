//! Match-3 board engine - pure, deterministic, and testable
//!
//! This crate owns the full board simulation: grid state, match
//! detection, swap resolution, gravity, refills, deadlock recovery and
//! the orchestrating state machine. It has **zero dependencies** on UI
//! or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions (boards,
//!   refills and shuffles included)
//! - **Testable**: Every rule is exercised by unit tests against
//!   explicit board layouts
//! - **Portable**: Runs under the terminal host, a benchmark harness or
//!   a headless test driver alike
//!
//! # Module Structure
//!
//! - [`board`]: the W x H cell grid, the single mapping authority
//! - [`gems`]: generational slot arena behind [`GemId`] handles
//! - [`matcher`]: first-run-wins row/column scans and the spawn probe
//! - [`swap`]: swipe validation, pair evaluation, revert and commit
//! - [`gravity`]: per-column gap compaction with deferred settling
//! - [`refill`]: safe initial population and cascade-legal respawns
//! - [`shuffle`]: deadlock probe and whole-board permutation
//! - [`score`]: stage targets, combo increments and the countdown
//! - [`engine`]: the suspension state machine the host drives
//!
//! # Board Rules
//!
//! - A swipe trades two adjacent gems; it sticks only if the settled
//!   pair's row or column carries a run of three or more
//! - Destroyed cells pull everything above them down, refills drop in
//!   from above the board, and any new run cascades the cycle
//! - A board with no playable swap anywhere is reshuffled until one
//!   exists
//! - Row 0 is the bottom row; gravity decreases row
//!
//! # Example
//!
//! ```
//! use tui_gems_core::types::{BoardConfig, Cell, Direction};
//! use tui_gems_core::{BoardEngine, BoardEvent};
//!
//! let mut engine = BoardEngine::new(BoardConfig::default(), 7);
//! assert!(engine.is_idle());
//! assert_eq!(engine.snapshot().occupied_count(), 40);
//!
//! // The host feeds swipes in and reports animation arrivals back.
//! engine.swipe(Cell::new(0, 0), Direction::Right);
//! for event in engine.drain_events() {
//!     if let BoardEvent::Moved { id, .. } = event {
//!         engine.notify_arrived(id);
//!     }
//! }
//! // The settled pair either commits (cascade runs) or flies back.
//! assert!(!engine.is_idle());
//! ```
//!
//! # Timing
//!
//! The engine is tick-driven and never blocks: call
//! [`BoardEngine::tick`](engine::BoardEngine::tick) every frame with
//! elapsed milliseconds, and [`BoardEngine::notify_arrived`] whenever a
//! gem's animation converges. The settle delays between a match lighting
//! up, its destruction and the following gravity pass are the only
//! time-based waits.

pub mod board;
pub mod engine;
pub mod events;
pub mod gems;
pub mod gravity;
pub mod matcher;
pub mod refill;
pub mod rng;
pub mod score;
pub mod shuffle;
pub mod snapshot;
pub mod swap;

#[cfg(test)]
pub(crate) mod testutil;

pub use tui_gems_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use engine::BoardEngine;
pub use events::{BoardEvent, EventQueue};
pub use gems::{Gem, GemArena, GemId};
pub use gravity::Fall;
pub use refill::Spawn;
pub use rng::BoardRng;
pub use score::StageScore;
pub use snapshot::{BoardSnapshot, GemInfo};
pub use swap::SwapPair;
