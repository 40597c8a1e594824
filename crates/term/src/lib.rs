//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids ratatui widgets/layout and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Drive gem movement from engine events, never from engine internals
//! - Allow precise control over aspect ratio (e.g. 4 chars wide per cell)
//!
//! The framebuffer's own cell type stays module-qualified (`fb::Cell`) so it
//! cannot be mistaken for the board coordinate `types::Cell`.

pub mod animate;
pub mod fb;
pub mod renderer;
pub mod view;

pub use tui_gems_core as core;
pub use tui_gems_types as types;

pub use animate::{Animator, Burst, GemSprite, BURST_MS};
pub use fb::{CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{AnchorY, BoardLayout, BoardView, Hud, Viewport};
