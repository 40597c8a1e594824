//! Animation driver: moves gem sprites toward their board cells.
//!
//! The engine never waits on wall-clock time for movement; it hands out
//! [`BoardEvent`]s and expects `notify_arrived` once the display catches up.
//! This module owns that display state: per-gem positions in board units,
//! an exponential approach toward the target cell, fall staggers and the
//! short burst left behind by a destroyed gem.
//!
//! Positions are board units (column, row with row 0 at the bottom); the
//! view scales them to terminal cells when drawing.

use crate::core::{BoardEvent, GemId};
use crate::types::{Cell, GemKind, ARRIVE_THRESHOLD, FALL_STAGGER_MS, MOVE_LERP};

/// Burst lifetime in milliseconds.
pub const BURST_MS: u32 = 300;

/// A gem's display state.
#[derive(Debug, Clone, Copy)]
pub struct GemSprite {
    pub id: GemId,
    pub kind: GemKind,
    x: f32,
    y: f32,
    target_x: f32,
    target_y: f32,
    delay_ms: u32,
    moving: bool,
}

impl GemSprite {
    /// Display position in board units.
    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}

/// A one-shot destruction burst at a board cell.
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub kind: GemKind,
    pub x: f32,
    pub y: f32,
    pub age_ms: u32,
}

/// Drives sprite movement and reports arrivals back to the host.
///
/// Sprites are stored by [`GemId::index`]; the full id is kept alongside so
/// a reused slot never resurrects a stale sprite.
#[derive(Debug, Default)]
pub struct Animator {
    sprites: Vec<Option<GemSprite>>,
    bursts: Vec<Burst>,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }

    /// Fold one engine event into display state.
    pub fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::Spawned {
                id,
                kind,
                cell,
                drop_rows,
            } => {
                let start_y = cell.row as f32 + drop_rows as f32;
                self.put(GemSprite {
                    id,
                    kind,
                    x: cell.col as f32,
                    y: start_y,
                    target_x: cell.col as f32,
                    target_y: cell.row as f32,
                    delay_ms: 0,
                    moving: drop_rows > 0,
                });
            }
            BoardEvent::Moved { id, to } => self.send(id, to, 0),
            BoardEvent::Fell { id, to, order } => {
                self.send(id, to, FALL_STAGGER_MS * order as u32)
            }
            BoardEvent::Destroyed { id, kind, cell } => {
                if self.take(id).is_some() {
                    self.bursts.push(Burst {
                        kind,
                        x: cell.col as f32,
                        y: cell.row as f32,
                        age_ms: 0,
                    });
                }
            }
            BoardEvent::Resolved { .. } | BoardEvent::Shuffled => {}
            BoardEvent::Cleared => {
                self.sprites.clear();
                self.bursts.clear();
            }
        }
    }

    /// Advance one frame. Returns the ids whose sprites reached their target
    /// this tick; the host forwards them to `BoardEngine::notify_arrived`.
    ///
    /// The approach factor applies once per call, so tick at the frame rate
    /// the constants were tuned for. `dt_ms` only drives stagger delays and
    /// burst aging.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<GemId> {
        let mut arrived = Vec::new();

        for slot in &mut self.sprites {
            let Some(sprite) = slot else { continue };
            if !sprite.moving {
                continue;
            }
            if sprite.delay_ms > 0 {
                sprite.delay_ms = sprite.delay_ms.saturating_sub(dt_ms);
                continue;
            }

            approach(&mut sprite.x, sprite.target_x);
            approach(&mut sprite.y, sprite.target_y);
            if sprite.x == sprite.target_x && sprite.y == sprite.target_y {
                sprite.moving = false;
                arrived.push(sprite.id);
            }
        }

        for burst in &mut self.bursts {
            burst.age_ms += dt_ms;
        }
        self.bursts.retain(|b| b.age_ms < BURST_MS);

        arrived
    }

    /// Live sprites, unordered.
    pub fn sprites(&self) -> impl Iterator<Item = &GemSprite> {
        self.sprites.iter().filter_map(|s| s.as_ref())
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Whether any sprite still has distance to cover.
    pub fn busy(&self) -> bool {
        self.sprites().any(|s| s.moving)
    }

    fn send(&mut self, id: GemId, to: Cell, delay_ms: u32) {
        if let Some(sprite) = self.get_mut(id) {
            sprite.target_x = to.col as f32;
            sprite.target_y = to.row as f32;
            sprite.delay_ms = delay_ms;
            // Even a zero-distance move must report an arrival.
            sprite.moving = true;
        }
    }

    fn put(&mut self, sprite: GemSprite) {
        let idx = sprite.id.index();
        if idx >= self.sprites.len() {
            self.sprites.resize(idx + 1, None);
        }
        self.sprites[idx] = Some(sprite);
    }

    fn get_mut(&mut self, id: GemId) -> Option<&mut GemSprite> {
        match self.sprites.get_mut(id.index()) {
            Some(Some(sprite)) if sprite.id == id => Some(sprite),
            _ => None,
        }
    }

    fn take(&mut self, id: GemId) -> Option<GemSprite> {
        let slot = self.sprites.get_mut(id.index())?;
        if slot.as_ref().is_some_and(|s| s.id == id) {
            return slot.take();
        }
        None
    }
}

fn approach(pos: &mut f32, target: f32) {
    let delta = target - *pos;
    if delta.abs() < ARRIVE_THRESHOLD {
        *pos = target;
    } else {
        *pos += delta * MOVE_LERP;
    }
}
