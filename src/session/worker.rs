use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::decode;
use crate::live::ring::LiveBuffer;
use crate::log::writer::RecordWriter;
use crate::session::lock;
use crate::source::FrameSource;
use crate::types::live::LiveEntry;
use crate::types::record::LogRecord;

/// Receive timeout of one loop iteration. This is the cooperative poll
/// point: the loop never blocks longer than this without rechecking its stop
/// signal, which is what makes the 2 s join bound in `stop()` safe.
pub(crate) const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Pause after a transient receive error before retrying.
pub(crate) const ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Spawns the capture loop on a dedicated worker thread.
pub(crate) fn spawn(
    source: Box<dyn FrameSource>,
    writer: Arc<Mutex<RecordWriter>>,
    live: Arc<LiveBuffer>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || capture_loop(source, writer, live, running))
}

/// The capture loop.
///
/// While the stop signal is unset: read one frame (bounded by
/// [`RECV_TIMEOUT`]), append it to the durable log with an immediate flush,
/// run the diagnostic decoder, and push a live entry: every parsed frame
/// reaches the live view, decoded or not. Timeouts just loop again; transient
/// read errors are logged and retried after [`ERROR_BACKOFF`], except when a
/// stop was already requested, in which case the loop exits quietly. The loop
/// performs no cleanup of its own; `stop()` owns the file lifecycle after the
/// join.
fn capture_loop(
    mut source: Box<dyn FrameSource>,
    writer: Arc<Mutex<RecordWriter>>,
    live: Arc<LiveBuffer>,
    running: Arc<AtomicBool>,
) {
    debug!("capture loop started");
    while running.load(Ordering::Acquire) {
        match source.recv(RECV_TIMEOUT) {
            Ok(Some(frame)) => {
                if let Err(e) = lock(&writer).write(&LogRecord::from_frame(&frame)) {
                    warn!(error = %e, "failed to append CAN record");
                }
                let decoded = decode::diagnostic(frame.id, &frame.data);
                live.push(LiveEntry::from_frame(&frame, decoded));
            }
            // timeout with no frame: recheck the stop signal and poll again
            Ok(None) => {}
            Err(e) => {
                if !running.load(Ordering::Acquire) {
                    // errors after a stop request are not worth reporting
                    break;
                }
                warn!(error = %e, "CAN receive failed, retrying");
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    debug!("capture loop exited");
}
