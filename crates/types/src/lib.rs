//! Shared types and tuning constants for the gem board engine.
//!
//! This crate is dependency-free and presentation-free: everything here is
//! plain data shared between the core engine, the input layer and the
//! terminal frontend.
//!
//! # Coordinates
//!
//! Board cells are addressed as `(column, row)` with `(0, 0)` at the
//! **bottom-left** corner. Gravity decreases a gem's row; refills drop in
//! from above the top row. The terminal view flips rows when drawing, so
//! screen space never leaks into the engine.
//!
//! # Swipe sectors
//!
//! A raw swipe angle (degrees, `atan2(dy, dx)` style, range −180..=180) is
//! quantized into four 90° sectors, tested in a fixed order:
//!
//! | Sector | Range                    |
//! |--------|--------------------------|
//! | Right  | `(-45, 45]`              |
//! | Up     | `(45, 135]`              |
//! | Left   | `>135` or `<= -135`      |
//! | Down   | `[-135, -45)`            |
//!
//! An angle of exactly `-45` falls in no sector and yields no direction.
//! An angle of exactly `0` is reserved by the input layer as the
//! "sub-threshold swipe" sentinel and is dropped before quantization.

/// Default board width in columns.
pub const DEFAULT_BOARD_WIDTH: u8 = 5;

/// Default board height in rows.
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Number of gem kinds available to spawn by default (the full palette).
pub const DEFAULT_PALETTE: u8 = 6;

/// Smallest palette the engine accepts. Below three kinds the initial
/// population's re-randomization loop is not guaranteed to terminate.
pub const MIN_PALETTE: u8 = 3;

/// Smallest board dimension the engine accepts. Runs need three cells.
pub const MIN_BOARD_DIM: u8 = 3;

/// Largest board dimension the engine accepts. Keeps scan buffers on the
/// stack and the board comfortably inside a terminal.
pub const MAX_BOARD_DIM: u8 = 16;

/// Frame tick in milliseconds (~60 FPS).
pub const TICK_MS: u32 = 16;

/// Pause before destroying matched gems found by a cascade wave, so the
/// matched highlight is visible. Swap-committed matches skip this pause.
pub const MATCH_SETTLE_MS: u32 = 500;

/// Pause after a cascade wave's destruction before gravity runs.
pub const CASCADE_PAUSE_MS: u32 = 500;

/// Per-gem delay between fall starts within one gravity batch.
pub const FALL_STAGGER_MS: u32 = 10;

/// Minimum pointer displacement (board units, per axis) for a swipe to
/// produce an angle at all.
pub const SWIPE_DEAD_ZONE: f32 = 1.0;

/// Distance (board units) below which a moving gem snaps to its target and
/// reports arrival.
pub const ARRIVE_THRESHOLD: f32 = 0.1;

/// Exponential approach factor applied per animation tick.
pub const MOVE_LERP: f32 = 0.4;

/// Points granted per score increment (one increment per 3 destroyed gems).
pub const MATCH_SCORE_VALUE: u32 = 10;

/// Multiplier applied per combo step when a combo is reported.
pub const COMBO_SCORE_MULTIPLIER: u32 = 2;

/// Stage score required to clear stage 1.
pub const INITIAL_SCORE_TARGET: u32 = 100;

/// Growth rate of the stage target: each stage adds
/// `INITIAL_SCORE_TARGET * (1 + SCORE_INCREASE_RATE)` to the target.
pub const SCORE_INCREASE_RATE: f32 = 0.3;

/// Stage countdown duration in milliseconds.
pub const STAGE_DURATION_MS: u32 = 60_000;

/// The gem palette. Spawn rolls draw from a prefix of [`GemKind::ALL`]
/// whose length is the configured palette size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemKind {
    Ruby,
    Amber,
    Topaz,
    Emerald,
    Sapphire,
    Amethyst,
}

impl GemKind {
    /// All kinds, in palette order.
    pub const ALL: [GemKind; 6] = [
        GemKind::Ruby,
        GemKind::Amber,
        GemKind::Topaz,
        GemKind::Emerald,
        GemKind::Sapphire,
        GemKind::Amethyst,
    ];

    /// Total number of kinds.
    pub const COUNT: usize = GemKind::ALL.len();

    /// One-letter tag, used by board layouts and debug output.
    pub fn as_char(self) -> char {
        match self {
            GemKind::Ruby => 'R',
            GemKind::Amber => 'A',
            GemKind::Topaz => 'T',
            GemKind::Emerald => 'E',
            GemKind::Sapphire => 'S',
            GemKind::Amethyst => 'M',
        }
    }

    /// Inverse of [`GemKind::as_char`].
    pub fn from_char(c: char) -> Option<GemKind> {
        match c {
            'R' => Some(GemKind::Ruby),
            'A' => Some(GemKind::Amber),
            'T' => Some(GemKind::Topaz),
            'E' => Some(GemKind::Emerald),
            'S' => Some(GemKind::Sapphire),
            'M' => Some(GemKind::Amethyst),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GemKind::Ruby => "ruby",
            GemKind::Amber => "amber",
            GemKind::Topaz => "topaz",
            GemKind::Emerald => "emerald",
            GemKind::Sapphire => "sapphire",
            GemKind::Amethyst => "amethyst",
        }
    }
}

/// A swap direction, produced by angle quantization or key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Column delta. Right is +1.
    pub fn dx(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }

    /// Row delta. Up is +1 (row 0 is the bottom).
    pub fn dy(self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Left | Direction::Right => 0,
        }
    }

    /// Quantize a raw swipe angle (degrees) into a direction.
    ///
    /// Sectors are tested in the order right, up, left, down; see the crate
    /// docs for the exact bounds. Exactly −45° matches no sector. `NaN`
    /// yields `None`.
    pub fn from_angle_deg(angle: f32) -> Option<Direction> {
        if angle > -45.0 && angle <= 45.0 {
            Some(Direction::Right)
        } else if angle > 45.0 && angle <= 135.0 {
            Some(Direction::Up)
        } else if angle > 135.0 || angle <= -135.0 {
            Some(Direction::Left)
        } else if angle < -45.0 && angle >= -135.0 {
            Some(Direction::Down)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// A board coordinate. `row` 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: u8,
    pub row: u8,
}

impl Cell {
    pub const fn new(col: u8, row: u8) -> Cell {
        Cell { col, row }
    }

    /// The adjacent cell in `dir`, or `None` at a board edge.
    pub fn neighbor(self, dir: Direction, width: u8, height: u8) -> Option<Cell> {
        let col = self.col as i16 + dir.dx() as i16;
        let row = self.row as i16 + dir.dy() as i16;
        if col < 0 || col >= width as i16 || row < 0 || row >= height as i16 {
            return None;
        }
        Some(Cell::new(col as u8, row as u8))
    }
}

/// Immutable board configuration, fixed at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Number of gem kinds spawns draw from (a prefix of [`GemKind::ALL`]).
    pub palette: u8,
}

impl BoardConfig {
    /// Panics if the dimensions or palette are outside the supported range;
    /// out-of-range configuration is a programming error, not an input.
    pub fn new(width: u8, height: u8, palette: u8) -> BoardConfig {
        assert!(
            (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&width)
                && (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&height),
            "board dimensions {}x{} outside {}..={}",
            width,
            height,
            MIN_BOARD_DIM,
            MAX_BOARD_DIM
        );
        assert!(
            (MIN_PALETTE as usize..=GemKind::COUNT).contains(&(palette as usize)),
            "palette size {} outside {}..={}",
            palette,
            MIN_PALETTE,
            GemKind::COUNT
        );
        BoardConfig {
            width,
            height,
            palette,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT, DEFAULT_PALETTE)
    }
}

/// A host-level action produced by the key mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Move the keyboard cursor one cell.
    Cursor(Direction),
    /// Swipe the gem under the cursor.
    Swipe(Direction),
    Reset,
    Pause,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_bounds_follow_the_fixed_test_order() {
        assert_eq!(Direction::from_angle_deg(0.0), Some(Direction::Right));
        assert_eq!(Direction::from_angle_deg(45.0), Some(Direction::Right));
        assert_eq!(Direction::from_angle_deg(-44.9), Some(Direction::Right));
        assert_eq!(Direction::from_angle_deg(45.1), Some(Direction::Up));
        assert_eq!(Direction::from_angle_deg(135.0), Some(Direction::Up));
        assert_eq!(Direction::from_angle_deg(135.1), Some(Direction::Left));
        assert_eq!(Direction::from_angle_deg(180.0), Some(Direction::Left));
        assert_eq!(Direction::from_angle_deg(-180.0), Some(Direction::Left));
        assert_eq!(Direction::from_angle_deg(-135.0), Some(Direction::Left));
        assert_eq!(Direction::from_angle_deg(-134.9), Some(Direction::Down));
        assert_eq!(Direction::from_angle_deg(-45.1), Some(Direction::Down));
    }

    #[test]
    fn exactly_minus_45_matches_no_sector() {
        assert_eq!(Direction::from_angle_deg(-45.0), None);
    }

    #[test]
    fn nan_angle_matches_no_sector() {
        assert_eq!(Direction::from_angle_deg(f32::NAN), None);
    }

    #[test]
    fn neighbor_respects_board_edges() {
        let w = 5;
        let h = 8;
        assert_eq!(
            Cell::new(0, 0).neighbor(Direction::Right, w, h),
            Some(Cell::new(1, 0))
        );
        assert_eq!(
            Cell::new(0, 0).neighbor(Direction::Up, w, h),
            Some(Cell::new(0, 1))
        );
        assert_eq!(Cell::new(0, 0).neighbor(Direction::Left, w, h), None);
        assert_eq!(Cell::new(0, 0).neighbor(Direction::Down, w, h), None);
        assert_eq!(Cell::new(4, 7).neighbor(Direction::Right, w, h), None);
        assert_eq!(Cell::new(4, 7).neighbor(Direction::Up, w, h), None);
    }

    #[test]
    fn kind_chars_round_trip() {
        for kind in GemKind::ALL {
            assert_eq!(GemKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(GemKind::from_char('x'), None);
    }

    #[test]
    fn default_config_matches_reference_board() {
        let config = BoardConfig::default();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 8);
        assert_eq!(config.palette, 6);
    }

    #[test]
    #[should_panic(expected = "board dimensions")]
    fn tiny_board_is_rejected() {
        BoardConfig::new(2, 8, 6);
    }

    #[test]
    #[should_panic(expected = "palette size")]
    fn degenerate_palette_is_rejected() {
        BoardConfig::new(5, 8, 2);
    }
}
