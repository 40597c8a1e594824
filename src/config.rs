//! External configuration loader.
//!
//! Reads `gems.toml` from the current working directory. Every field has a
//! default, so a missing or incomplete file is fine; a malformed one warns
//! on stderr (before the terminal enters raw mode) and falls back wholesale.

use serde::Deserialize;

use tui_gems::types::{
    BoardConfig, GemKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_PALETTE,
    MAX_BOARD_DIM, MIN_BOARD_DIM, MIN_PALETTE, STAGE_DURATION_MS,
};

const CONFIG_FILE: &str = "gems.toml";

/// Resolved, validated session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// Fixed session seed; `None` rolls a fresh one per run.
    pub seed: Option<u64>,
    pub stage_duration_ms: u32,
    /// Board cell size in terminal columns/rows.
    pub cell_w: u16,
    pub cell_h: u16,
}

impl GameConfig {
    /// Load `gems.toml`, falling back to defaults when absent or broken.
    pub fn load() -> GameConfig {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => resolve(cfg),
                Err(e) => {
                    eprintln!("Warning: {CONFIG_FILE} parse error: {e}");
                    eprintln!("Using default settings.");
                    GameConfig::default()
                }
            },
            Err(_) => GameConfig::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        resolve(TomlConfig::default())
    }
}

// TOML schema, with serde defaults per field.

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    board: TomlBoard,
    #[serde(default)]
    session: TomlSession,
    #[serde(default)]
    view: TomlView,
}

#[derive(Deserialize, Debug)]
struct TomlBoard {
    #[serde(default = "default_width")]
    width: u8,
    #[serde(default = "default_height")]
    height: u8,
    #[serde(default = "default_palette")]
    palette: u8,
}

#[derive(Deserialize, Debug, Default)]
struct TomlSession {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_stage_seconds")]
    stage_seconds: u32,
}

#[derive(Deserialize, Debug)]
struct TomlView {
    #[serde(default = "default_cell_w")]
    cell_w: u16,
    #[serde(default = "default_cell_h")]
    cell_h: u16,
}

fn default_width() -> u8 {
    DEFAULT_BOARD_WIDTH
}
fn default_height() -> u8 {
    DEFAULT_BOARD_HEIGHT
}
fn default_palette() -> u8 {
    DEFAULT_PALETTE
}
fn default_stage_seconds() -> u32 {
    STAGE_DURATION_MS / 1000
}
fn default_cell_w() -> u16 {
    4
}
fn default_cell_h() -> u16 {
    2
}

impl Default for TomlBoard {
    fn default() -> Self {
        TomlBoard {
            width: default_width(),
            height: default_height(),
            palette: default_palette(),
        }
    }
}

impl Default for TomlView {
    fn default() -> Self {
        TomlView {
            cell_w: default_cell_w(),
            cell_h: default_cell_h(),
        }
    }
}

/// Clamp the raw schema into a [`GameConfig`] the engine will accept.
fn resolve(cfg: TomlConfig) -> GameConfig {
    let width = clamp_field("board.width", cfg.board.width, MIN_BOARD_DIM, MAX_BOARD_DIM);
    let height = clamp_field(
        "board.height",
        cfg.board.height,
        MIN_BOARD_DIM,
        MAX_BOARD_DIM,
    );
    let palette = clamp_field(
        "board.palette",
        cfg.board.palette,
        MIN_PALETTE,
        GemKind::COUNT as u8,
    );
    let stage_seconds = clamp_field("session.stage_seconds", cfg.session.stage_seconds, 5, 3600);
    let cell_w = clamp_field("view.cell_w", cfg.view.cell_w, 1, 8);
    let cell_h = clamp_field("view.cell_h", cfg.view.cell_h, 1, 4);

    GameConfig {
        board: BoardConfig::new(width, height, palette),
        seed: cfg.session.seed,
        stage_duration_ms: stage_seconds * 1000,
        cell_w,
        cell_h,
    }
}

fn clamp_field<T: Ord + Copy + std::fmt::Display>(name: &str, value: T, min: T, max: T) -> T {
    let clamped = value.clamp(min, max);
    if clamped != value {
        eprintln!("Warning: {name} = {value} out of range, using {clamped}");
    }
    clamped
}
