//! # session
//!
//! The capture session state machine: at most one capture worker process-wide,
//! started and stopped idempotently, owning the log file and the live buffer.
//! The background capture loop itself lives in `session::worker`.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::live::ring::LiveBuffer;
use crate::live::stream::StreamSubscriber;
use crate::log::tail::{TAIL_LIMIT, tail_lines};
use crate::log::writer::RecordWriter;
use crate::source::SourceOpener;
use crate::types::errors::StartError;
use crate::types::record::LogRecord;
use crate::types::status::SessionStatus;

pub(crate) mod worker;

/// Longest `stop()` waits for the capture worker before abandoning it.
pub const JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Static configuration of a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Bus channel to capture from, e.g. `can0`.
    pub channel: String,
    /// Path of the durable capture log.
    pub log_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            channel: "can0".to_string(),
            log_path: PathBuf::from("canlogs/current_log.csv"),
        }
    }
}

/// Result of a successful `start()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    /// A new capture session is now running.
    Started,
    /// A session was already running; nothing changed.
    AlreadyRunning,
}

/// Result of a `stop()` call. Stopping never fails: the session always
/// reaches idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopOutcome {
    /// The running session was stopped.
    Stopped,
    /// No session was running; nothing changed.
    NotRunning,
}

/// Resources owned by one run: dropped together when the session stops.
struct ActiveCapture {
    /// Per-run stop signal observed by the capture loop. A fresh flag per run
    /// means a worker abandoned by a timed-out join can never be revived by a
    /// later `start()`.
    running: Arc<AtomicBool>,
    writer: Arc<Mutex<RecordWriter>>,
    worker: JoinHandle<()>,
}

/// The capture session state machine.
///
/// Exactly one instance exists per process. Two states: idle (no open
/// resources, no worker) and running (bus handle, log file and capture loop
/// alive). All transitions go through one mutex, so concurrent `start()` and
/// `stop()` calls can never produce two capture workers or two writers on the
/// same file.
///
/// # Operations
/// - [`start`](Self::start): idle → running; idempotent (`AlreadyRunning`
///   is a benign outcome, not an error).
/// - [`stop`](Self::stop): running → idle; idempotent, never fails.
/// - [`tag_event`](Self::tag_event): append a manual event tag while
///   running; silently discarded while idle.
/// - [`status`](Self::status): lock-free snapshot.
/// - [`live_tail`](Self::live_tail) / [`subscribe`](Self::subscribe): the
///   two live views over the capture stream.
pub struct CaptureSession {
    config: SessionConfig,
    opener: Box<dyn SourceOpener>,
    live: Arc<LiveBuffer>,
    /// Mirrors `inner.is_some()` for lock-free status reads.
    active: AtomicBool,
    inner: Mutex<Option<ActiveCapture>>,
}

impl CaptureSession {
    /// Creates an idle session; no resource is touched until `start()`.
    pub fn new(config: SessionConfig, opener: Box<dyn SourceOpener>) -> Self {
        CaptureSession {
            config,
            opener,
            live: Arc::new(LiveBuffer::new()),
            active: AtomicBool::new(false),
            inner: Mutex::new(None),
        }
    }

    /// Creates an idle session capturing from a Linux SocketCAN interface.
    #[cfg(feature = "socketcan")]
    pub fn socketcan(config: SessionConfig) -> Self {
        Self::new(config, Box::new(crate::source::SocketCanOpener))
    }

    /// Starts capturing.
    ///
    /// Ensures the log directory exists, opens the bus channel, opens the log
    /// file in append mode (writing the header when the file is fresh),
    /// appends and flushes a `start_log` event, then spawns the capture loop
    /// and transitions to running. The event goes in before the worker spawns
    /// so that it always precedes the first captured frame.
    ///
    /// # Returns
    /// - `Ok(Started)` on a fresh start.
    /// - `Ok(AlreadyRunning)` when a session is already active; no-op.
    ///
    /// # Errors
    /// Any failure while acquiring resources (directory creation, bus open,
    /// file open, event write) releases whatever was already acquired and
    /// leaves the session idle.
    pub fn start(&self) -> Result<StartOutcome, StartError> {
        let mut inner = lock(&self.inner);
        if inner.is_some() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        if let Some(parent) = self.config.log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StartError::CreateDirectory {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let source = self.opener.open(&self.config.channel)?;

        let mut writer =
            RecordWriter::open(&self.config.log_path).map_err(|source| StartError::OpenLogFile {
                path: self.config.log_path.display().to_string(),
                source,
            })?;
        writer
            .write(&LogRecord::event("start_log"))
            .map_err(|source| StartError::WriteLogFile {
                path: self.config.log_path.display().to_string(),
                source,
            })?;

        let writer = Arc::new(Mutex::new(writer));
        let running = Arc::new(AtomicBool::new(true));
        let worker = worker::spawn(source, writer.clone(), self.live.clone(), running.clone());

        self.active.store(true, Ordering::Release);
        *inner = Some(ActiveCapture {
            running,
            writer,
            worker,
        });
        info!(
            channel = %self.config.channel,
            log_file = %self.config.log_path.display(),
            "capture session started"
        );
        Ok(StartOutcome::Started)
    }

    /// Stops capturing.
    ///
    /// Appends and flushes a `stop_log` event while the writer is still
    /// valid, flips the worker's stop signal, then waits up to
    /// [`JOIN_TIMEOUT`] for the capture loop to exit. A worker that does not
    /// exit in time is abandoned, never forcefully killed; the log file
    /// closes once its last owner drops it. Either way the session is idle
    /// afterwards.
    pub fn stop(&self) -> StopOutcome {
        let mut inner = lock(&self.inner);
        let Some(capture) = inner.take() else {
            return StopOutcome::NotRunning;
        };

        if let Err(e) = lock(&capture.writer).write(&LogRecord::event("stop_log")) {
            warn!(error = %e, "failed to append stop_log event");
        }

        capture.running.store(false, Ordering::Release);
        self.active.store(false, Ordering::Release);

        // The transition lock is held across the bounded join so a racing
        // start() cannot open a second writer while this worker still runs.
        if !join_with_timeout(capture.worker, JOIN_TIMEOUT) {
            warn!("capture worker did not exit in time, abandoning it");
        }
        info!("capture session stopped");
        StopOutcome::Stopped
    }

    /// Appends a manual event tag to the log.
    ///
    /// Tags issued while no session is running are discarded silently; that
    /// is not an error.
    pub fn tag_event(&self, label: &str) {
        let inner = lock(&self.inner);
        if let Some(capture) = inner.as_ref() {
            if let Err(e) = lock(&capture.writer).write(&LogRecord::event(label)) {
                warn!(error = %e, label, "failed to append event tag");
            }
        }
    }

    /// Current session snapshot, read without blocking on the capture loop.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            logging_active: self.active.load(Ordering::Acquire),
            can_interface: self.config.channel.clone(),
            log_file: self.config.log_path.display().to_string(),
        }
    }

    /// Last 100 raw lines of the log file, in original order. Empty when the
    /// file does not exist yet.
    pub fn live_tail(&self) -> io::Result<Vec<String>> {
        tail_lines(&self.config.log_path, TAIL_LIMIT)
    }

    /// Attaches a live stream subscriber positioned at the current end of
    /// the buffer: only entries captured after this call are delivered.
    pub fn subscribe(&self) -> StreamSubscriber {
        StreamSubscriber::new(self.live.clone())
    }

    /// The session's live buffer.
    pub fn live_buffer(&self) -> Arc<LiveBuffer> {
        self.live.clone()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Locks a mutex, recovering the guard when a panicking holder poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Waits for `worker` to finish, bounded by `limit`. Returns `false` when the
/// bound was exceeded and the thread was left to finish on its own.
fn join_with_timeout(worker: JoinHandle<()>, limit: Duration) -> bool {
    let deadline = Instant::now() + limit;
    while !worker.is_finished() {
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(10));
    }
    worker.join().is_ok()
}
