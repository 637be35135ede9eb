use image::RgbaImage;
use std::collections::VecDeque;
use std::sync::Arc;

/// Number of undoable changes kept by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 25;

/// Upper bound on undoable changes; every entry is a full raster copy
pub const MAX_HISTORY_CAPACITY: usize = 500;

/// Immutable full copy of the raster at one point in time
pub type SnapshotRef = Arc<RgbaImage>;

/// Bounded undo/redo log of raster snapshots.
///
/// Entries up to and including the cursor are committed states; entries after it
/// are undone states available to redo. The log holds at most `capacity + 1`
/// snapshots (the base state plus `capacity` changes) and evicts the oldest one
/// when a commit would exceed that, so an undo can never land on a stale slot.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<SnapshotRef>,
    cursor: usize,
    capacity: usize,
}

pub fn clamp_history_capacity(capacity: usize) -> usize {
    capacity.clamp(1, MAX_HISTORY_CAPACITY)
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Creates an empty history with `capacity` clamped to `1..=MAX_HISTORY_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let capacity = clamp_history_capacity(capacity);
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            capacity,
        }
    }

    /// Maximum number of undoable changes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops everything and makes `base` the only entry
    pub fn reset(&mut self, base: RgbaImage) {
        self.entries.clear();
        self.entries.push_back(Arc::new(base));
        self.cursor = 0;
    }

    /// Records a new state. Any undone states are discarded.
    pub fn commit(&mut self, snapshot: RgbaImage) {
        if self.entries.is_empty() {
            self.reset(snapshot);
            return;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(Arc::new(snapshot));
        self.cursor += 1;

        while self.entries.len() > self.capacity + 1 {
            self.entries.pop_front();
            self.cursor -= 1;
        }
        log::debug!(
            "History commit: {} undoable, {} snapshots held",
            self.changes_made(),
            self.entries.len()
        );
    }

    /// Steps back one state and returns the snapshot to restore, or `None` when
    /// there is nothing to undo
    pub fn undo(&mut self) -> Option<SnapshotRef> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current().cloned()
    }

    /// Steps forward one state and returns the snapshot to restore, or `None` when
    /// there is nothing to redo
    pub fn redo(&mut self) -> Option<SnapshotRef> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current().cloned()
    }

    /// Snapshot matching the live raster
    pub fn current(&self) -> Option<&SnapshotRef> {
        self.entries.get(self.cursor)
    }

    /// Committed changes reachable by undo
    pub fn changes_made(&self) -> usize {
        self.cursor
    }

    /// Undone changes reachable by redo
    pub fn changes_reverted(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }

    pub fn can_undo(&self) -> bool {
        self.changes_made() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.changes_reverted() > 0
    }
}
