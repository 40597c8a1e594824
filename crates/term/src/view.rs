//! BoardView: maps engine state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Gems are drawn from the animator's sprite positions, not from the board
//! mapping, so mid-flight gems appear between cells. The same layout math
//! runs in reverse for mouse input via [`BoardLayout`].

use crate::animate::{Animator, Burst, BURST_MS};
use crate::core::{BoardSnapshot, GemId, StageScore};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GemKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the HUD shows besides the board itself.
pub struct Hud<'a> {
    pub score: &'a StageScore,
    /// Engine phase label for the state line.
    pub phase: &'static str,
    pub paused: bool,
    /// Keyboard cursor, drawn as cell corners.
    pub cursor: Option<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the gem board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps gems roughly square and leaves room for fall frames.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of the board for one frame. Shared by drawing and by
/// mouse hit-testing so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Interior top-left (inside the border).
    origin_x: u16,
    origin_y: u16,
    cols: u8,
    rows: u8,
    cell_w: u16,
    cell_h: u16,
}

impl BoardLayout {
    /// The board cell under a screen position, if any.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Cell> {
        if x < self.origin_x || y < self.origin_y {
            return None;
        }
        let col = (x - self.origin_x) / self.cell_w;
        let row_from_top = (y - self.origin_y) / self.cell_h;
        if col >= self.cols as u16 || row_from_top >= self.rows as u16 {
            return None;
        }
        Some(Cell::new(col as u8, self.rows - 1 - row_from_top as u8))
    }

    /// A screen position in board units (fractional columns/rows, row 0 at
    /// the bottom). Unclamped: drags may leave the board and still measure.
    pub fn board_units(&self, x: u16, y: u16) -> (f32, f32) {
        let ux = (x as f32 - self.origin_x as f32) / self.cell_w as f32;
        let from_top = (y as f32 - self.origin_y as f32) / self.cell_h as f32;
        let uy = (self.rows as f32 - 1.0) - from_top;
        (ux, uy)
    }

    fn frame_origin(&self) -> (u16, u16) {
        (self.origin_x - 1, self.origin_y - 1)
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            self.cols as u16 * self.cell_w + 2,
            self.rows as u16 * self.cell_h + 2,
        )
    }

    /// Screen rect of a sprite at fractional board position, or `None` when
    /// it is still above the frame.
    fn sprite_px(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let px = self.origin_x as f32 + x * self.cell_w as f32;
        let py = self.origin_y as f32 + ((self.rows as f32 - 1.0) - y) * self.cell_h as f32;
        let px = px.round() as i32;
        let py = py.round() as i32;
        if py < self.origin_y as i32 {
            return None;
        }
        Some((px as u16, py as u16))
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Compute this frame's board placement for a viewport.
    pub fn layout(&self, cols: u8, rows: u8, viewport: Viewport) -> BoardLayout {
        let frame_w = cols as u16 * self.cell_w + 2;
        let frame_h = rows as u16 * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cols,
            rows,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        animator: &Animator,
        hud: &Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.width(), snap.height(), viewport);
        let (frame_x, frame_y) = layout.frame_origin();
        let (frame_w, frame_h) = layout.frame_size();

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            reverse: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            reverse: false,
        };

        // Background for the play area.
        fb.fill_rect(
            layout.origin_x,
            layout.origin_y,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );

        // Border.
        self.draw_border(fb, frame_x, frame_y, frame_w, frame_h, border);

        // Grid dots under everything.
        for row in 0..snap.height() {
            for col in 0..snap.width() {
                self.draw_empty_cell(fb, &layout, col, row);
            }
        }

        // Gems at their animated positions.
        for sprite in animator.sprites() {
            let (x, y) = sprite.pos();
            let Some((px, py)) = layout.sprite_px(x, y) else {
                continue;
            };
            let highlighted = self.is_matched(snap, sprite.id, x, y);
            let style = CellStyle {
                fg: gem_color(sprite.kind),
                bg: Rgb::new(30, 30, 40),
                bold: true,
                reverse: highlighted,
            };
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }

        // Destruction bursts fade over the vacated cells.
        for burst in animator.bursts() {
            self.draw_burst(fb, &layout, burst);
        }

        // Keyboard cursor corners.
        if let Some(cursor) = hud.cursor {
            self.draw_cursor(fb, &layout, cursor);
        }

        // Side panel.
        self.draw_panel(fb, hud, viewport, frame_x, frame_y, frame_w);

        // Overlays.
        if hud.paused {
            self.draw_overlay_text(fb, frame_x, frame_y, frame_w, frame_h, 0, "PAUSED");
        } else if hud.score.game_over() {
            self.draw_overlay_text(fb, frame_x, frame_y, frame_w, frame_h, 0, "GAME OVER");
            self.draw_overlay_text(fb, frame_x, frame_y, frame_w, frame_h, 1, "r: again  q: quit");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &BoardSnapshot,
        animator: &Animator,
        hud: &Hud<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, animator, hud, viewport, &mut fb);
        fb
    }

    // A sprite is highlighted while the board still maps its id to the
    // matched flag. Mid-flight sprites never match the lookup.
    fn is_matched(&self, snap: &BoardSnapshot, id: GemId, x: f32, y: f32) -> bool {
        let col = x.round() as i32;
        let row = y.round() as i32;
        if col < 0 || col >= snap.width() as i32 || row < 0 || row >= snap.height() as i32 {
            return false;
        }
        match snap.get(col as u8, row as u8) {
            Some(info) => info.id == id && info.matched,
            None => false,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &BoardLayout, col: u8, row: u8) {
        let style = CellStyle {
            fg: Rgb::new(60, 60, 72),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            reverse: false,
        };
        // Safe: integral cells are never above the frame.
        if let Some((px, py)) = layout.sprite_px(col as f32, row as f32) {
            let cx = px + self.cell_w / 2;
            let cy = py + self.cell_h / 2;
            fb.put_char(cx, cy, '·', style);
        }
    }

    fn draw_burst(&self, fb: &mut FrameBuffer, layout: &BoardLayout, burst: &Burst) {
        let Some((px, py)) = layout.sprite_px(burst.x, burst.y) else {
            return;
        };
        let phase = burst.age_ms * 3 / BURST_MS;
        let ch = match phase {
            0 => '▓',
            1 => '▒',
            _ => '░',
        };
        let style = CellStyle {
            fg: gem_color(burst.kind),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            reverse: false,
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: &BoardLayout, cursor: Cell) {
        let Some((px, py)) = layout.sprite_px(cursor.col as f32, cursor.row as f32) else {
            return;
        };
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(30, 30, 40),
            bold: true,
            reverse: false,
        };
        let right = px + self.cell_w - 1;
        let bottom = py + self.cell_h - 1;
        fb.put_char(px, py, '┌', style);
        fb.put_char(right, py, '┐', style);
        fb.put_char(px, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        hud: &Hud<'_>,
        viewport: Viewport,
        frame_x: u16,
        frame_y: u16,
        frame_w: u16,
    ) {
        let panel_x = frame_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            reverse: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            reverse: false,
        };

        let score = hud.score;
        let mut y = frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, score.total(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STAGE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, score.stage(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TARGET", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, score.stage_score(), value);
        let off = digits(score.stage_score());
        fb.put_char(panel_x + off, y, '/', value);
        fb.put_u32(panel_x + off + 1, y, score.target(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        self.draw_time_bar(fb, panel_x, y, score.time_fraction());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        let state = if hud.paused { "paused" } else { hud.phase };
        fb.put_str(panel_x, y, state, value);
    }

    fn draw_time_bar(&self, fb: &mut FrameBuffer, x: u16, y: u16, fraction: f32) {
        const BAR_W: u16 = 10;
        let filled = (fraction * BAR_W as f32).round() as u16;
        let fg = if fraction < 0.25 {
            Rgb::new(220, 80, 80)
        } else {
            Rgb::new(100, 220, 120)
        };
        let on = CellStyle {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            reverse: false,
        };
        let off = CellStyle {
            fg: Rgb::new(70, 70, 80),
            ..on
        };
        for i in 0..BAR_W {
            let style = if i < filled { on } else { off };
            fb.put_char(x + i, y, if i < filled { '█' } else { '░' }, style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        frame_w: u16,
        frame_h: u16,
        line: u16,
        text: &str,
    ) {
        let mid_y = frame_y.saturating_add(frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = frame_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            reverse: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn gem_color(kind: GemKind) -> Rgb {
    match kind {
        GemKind::Ruby => Rgb::new(220, 70, 70),
        GemKind::Amber => Rgb::new(255, 165, 0),
        GemKind::Topaz => Rgb::new(240, 220, 80),
        GemKind::Emerald => Rgb::new(100, 220, 120),
        GemKind::Sapphire => Rgb::new(80, 130, 230),
        GemKind::Amethyst => Rgb::new(200, 120, 220),
    }
}

fn digits(v: u32) -> u16 {
    let mut n = 1;
    let mut v = v / 10;
    while v > 0 {
        n += 1;
        v /= 10;
    }
    n
}
