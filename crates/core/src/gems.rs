//! Gem storage: a generational slot arena doubling as the gem pool.
//!
//! Slots are reused across destroy/spawn cycles; `release` bumps the slot
//! generation so a stale [`GemId`] resolves to nothing rather than to the
//! slot's next occupant. `acquire` tolerates a free-list entry that turns
//! out to be live (it skips and retries) and falls back to growing the
//! arena when the free list is exhausted, so acquisition never fails.

use tui_gems_types::{Cell, GemKind};

/// Stable handle to a gem. Resolving a handle after its gem was destroyed
/// yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GemId {
    slot: u32,
    gen: u32,
}

impl GemId {
    /// Slot index, for id-keyed side tables (display state, animations).
    /// Indices are reused; pair with the full id to detect staleness.
    pub fn index(self) -> usize {
        self.slot as usize
    }
}

/// A gem's logical state. Display position lives with the animation driver,
/// not here; the engine only tracks cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gem {
    pub kind: GemKind,
    pub col: u8,
    pub row: u8,
    /// Coordinates to restore when an unmatched swap reverts.
    pub last_col: u8,
    pub last_row: u8,
    /// Set by match detection, consumed by resolution.
    pub matched: bool,
}

impl Gem {
    fn new(kind: GemKind, cell: Cell) -> Gem {
        Gem {
            kind,
            col: cell.col,
            row: cell.row,
            last_col: cell.col,
            last_row: cell.row,
            matched: false,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.col, self.row)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    gen: u32,
    gem: Option<Gem>,
}

#[derive(Debug, Clone, Default)]
pub struct GemArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl GemArena {
    pub fn new() -> GemArena {
        GemArena::default()
    }

    pub fn with_capacity(capacity: usize) -> GemArena {
        GemArena {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Number of live gems.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Spawn a gem at `cell`. Reuses a free slot when one is available,
    /// otherwise grows the arena.
    pub fn acquire(&mut self, kind: GemKind, cell: Cell) -> GemId {
        while let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            if entry.gem.is_some() {
                // Free-list entry went live behind our back; skip it.
                continue;
            }
            entry.gem = Some(Gem::new(kind, cell));
            self.live += 1;
            return GemId {
                slot,
                gen: entry.gen,
            };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            gen: 0,
            gem: Some(Gem::new(kind, cell)),
        });
        self.live += 1;
        GemId { slot, gen: 0 }
    }

    /// Destroy the gem behind `id`. A stale or already-released id is a
    /// no-op; returns whether a gem was actually released.
    pub fn release(&mut self, id: GemId) -> bool {
        let Some(entry) = self.slots.get_mut(id.slot as usize) else {
            return false;
        };
        if entry.gen != id.gen || entry.gem.is_none() {
            return false;
        }
        entry.gem = None;
        entry.gen = entry.gen.wrapping_add(1);
        self.free.push(id.slot);
        self.live -= 1;
        true
    }

    pub fn get(&self, id: GemId) -> Option<&Gem> {
        let entry = self.slots.get(id.slot as usize)?;
        if entry.gen != id.gen {
            return None;
        }
        entry.gem.as_ref()
    }

    pub fn get_mut(&mut self, id: GemId) -> Option<&mut Gem> {
        let entry = self.slots.get_mut(id.slot as usize)?;
        if entry.gen != id.gen {
            return None;
        }
        entry.gem.as_mut()
    }

    pub fn contains(&self, id: GemId) -> bool {
        self.get(id).is_some()
    }

    /// Release every live gem. Generations advance so all outstanding ids
    /// go stale.
    pub fn clear(&mut self) {
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if entry.gem.take().is_some() {
                entry.gen = entry.gen.wrapping_add(1);
                self.free.push(slot as u32);
            }
        }
        self.live = 0;
    }
}
