//! Events the engine records for the host.
//!
//! Everything the presentation layer needs to know (what to animate,
//! what to burst, what to score) is queued here and drained once per
//! frame. Events carry ids, kinds and board cells; display units are the
//! host's business.

use tui_gems_types::{Cell, GemKind};

use crate::gems::GemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A gem came into existence at `cell`. `drop_rows` is how many rows
    /// above the cell its sprite should start; zero means it spawns at
    /// rest and nothing needs to travel.
    Spawned {
        id: GemId,
        kind: GemKind,
        cell: Cell,
        drop_rows: u8,
    },
    /// A gem was sent toward a new cell by a swap, a revert or a shuffle.
    Moved { id: GemId, to: Cell },
    /// A gem was dropped by gravity. `order` is its index within the fall
    /// batch; the host staggers movement start by it.
    Fell { id: GemId, to: Cell, order: u16 },
    /// A matched gem was removed from `cell`.
    Destroyed { id: GemId, kind: GemKind, cell: Cell },
    /// One resolution batch finished; `destroyed` gems went with it. This
    /// is the score sink's feed.
    Resolved { destroyed: u32 },
    /// The whole board was repermuted.
    Shuffled,
    /// The board was cleared for a fresh start.
    Cleared,
}

/// FIFO queue of pending events, drained by the host each frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<BoardEvent>,
}

impl EventQueue {
    pub fn new() -> EventQueue {
        EventQueue::default()
    }

    pub fn push(&mut self, event: BoardEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand over everything queued so far, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue_in_order() {
        let mut queue = EventQueue::new();
        queue.push(BoardEvent::Shuffled);
        queue.push(BoardEvent::Resolved { destroyed: 3 });
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![BoardEvent::Shuffled, BoardEvent::Resolved { destroyed: 3 }]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
