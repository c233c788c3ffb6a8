use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::live::ring::LiveBuffer;
use crate::types::live::LiveEntry;

/// Poll interval of the stream publisher: 20 Hz.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Cursor-based consumer of the live buffer.
///
/// Each subscriber tracks its own position in the buffer's logical sequence,
/// starting at the current end: entries that existed before the subscriber
/// attached are not replayed, only entries produced afterwards are delivered.
/// Subscribers only ever sleep on their own poll cadence; they never block
/// the capture loop.
pub struct StreamSubscriber {
    buffer: Arc<LiveBuffer>,
    cursor: u64,
}

impl StreamSubscriber {
    /// Attaches a new subscriber positioned at the buffer's current end.
    pub fn new(buffer: Arc<LiveBuffer>) -> Self {
        let cursor = buffer.end_seq();
        StreamSubscriber { buffer, cursor }
    }

    /// Drains every entry appended since the last poll and advances the
    /// cursor. Returns an empty batch when nothing new arrived.
    ///
    /// A subscriber that fell behind by more than the buffer capacity misses
    /// the evicted entries silently; see
    /// [`LiveBuffer::collect_from`](crate::live::ring::LiveBuffer::collect_from).
    pub fn poll(&mut self) -> Vec<LiveEntry> {
        let (batch, cursor) = self.buffer.collect_from(self.cursor);
        self.cursor = cursor;
        batch
    }

    /// Blocks at the 20 Hz publisher cadence until at least one new entry is
    /// available, then returns the batch.
    pub fn wait_batch(&mut self) -> Vec<LiveEntry> {
        loop {
            let batch = self.poll();
            if !batch.is_empty() {
                return batch;
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}
