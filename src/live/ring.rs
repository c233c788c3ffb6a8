use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::types::live::LiveEntry;

/// Fixed capacity of the live view buffer.
pub const LIVE_CAPACITY: usize = 1000;

/// Bounded, insertion-ordered buffer of the most recent live entries.
///
/// Single producer (the capture loop), any number of consumers. Entries carry
/// an ever-increasing logical sequence number so each consumer keeps its own
/// cursor; once the buffer is full the oldest entry is evicted, and a
/// consumer whose cursor has fallen behind the eviction horizon silently
/// skips ahead. That lossiness is the accepted tradeoff of the live view;
/// the durable log is the complete record.
pub struct LiveBuffer {
    capacity: usize,
    state: Mutex<RingState>,
}

struct RingState {
    entries: VecDeque<LiveEntry>,
    /// Sequence number the next pushed entry will receive. The oldest entry
    /// currently held has sequence `next_seq - entries.len()`.
    next_seq: u64,
}

impl LiveBuffer {
    /// Creates a buffer with the standard live view capacity.
    pub fn new() -> Self {
        Self::with_capacity(LIVE_CAPACITY)
    }

    /// Creates a buffer holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        LiveBuffer {
            capacity,
            state: Mutex::new(RingState {
                entries: VecDeque::with_capacity(capacity),
                next_seq: 0,
            }),
        }
    }

    /// Appends one entry, evicting the oldest when the buffer is full.
    pub fn push(&self, entry: LiveEntry) {
        let mut state = self.lock_state();
        if state.entries.len() == self.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(entry);
        state.next_seq += 1;
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.lock_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().entries.is_empty()
    }

    /// Sequence number one past the newest entry; the starting cursor for a
    /// subscriber that only wants entries produced after it attached.
    pub fn end_seq(&self) -> u64 {
        self.lock_state().next_seq
    }

    /// Copies out every entry with sequence ≥ `cursor`, oldest first, and
    /// returns it together with the advanced cursor.
    ///
    /// A cursor older than the eviction horizon is clamped forward: the
    /// evicted entries are gone and are not reported as an error.
    pub fn collect_from(&self, cursor: u64) -> (Vec<LiveEntry>, u64) {
        let state = self.lock_state();
        let oldest = state.next_seq - state.entries.len() as u64;
        let start = cursor.max(oldest).min(state.next_seq);
        let skip = (start - oldest) as usize;
        let batch: Vec<LiveEntry> = state.entries.iter().skip(skip).cloned().collect();
        (batch, state.next_seq)
    }

    fn lock_state(&self) -> MutexGuard<'_, RingState> {
        // a poisoned lock only means a panicking reader; the ring is still valid
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LiveBuffer {
    fn default() -> Self {
        Self::new()
    }
}
