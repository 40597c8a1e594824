//! TUI Gems (workspace facade crate).
//!
//! This package keeps the `tui_gems::{core,input,term,types}` public API
//! stable while the implementation lives in dedicated crates under `crates/`.

pub use tui_gems_core as core;
pub use tui_gems_input as input;
pub use tui_gems_term as term;
pub use tui_gems_types as types;
