//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::HostAction`] and tracks
//! mouse-drag swipes as board-unit displacements, leaving angle
//! quantization to [`crate::types::Direction::from_angle_deg`].

pub mod map;
pub mod swipe;

pub use tui_gems_types as types;

pub use map::{handle_key_event, should_quit};
pub use swipe::{swipe_angle, SwipeTracker};
