use std::io;
use thiserror::Error;

/// Errors produced by a CAN frame source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to open CAN channel '{channel}'. \nError: {source}")]
    Open {
        channel: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while receiving from '{channel}'. \nError: {source}")]
    Recv {
        channel: String,
        #[source]
        source: io::Error,
    },
}

/// Errors produced while starting a capture session.
///
/// Any of these leaves the session `Idle` with every partially acquired
/// resource released. Being already running is not an error; it is reported
/// as [`StartOutcome::AlreadyRunning`](crate::session::StartOutcome).
#[derive(Debug, Error)]
pub enum StartError {
    #[error("Failed to create log directory '{path}'. \nError: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("Failed to open log file '{path}'. \nError: {source}")]
    OpenLogFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing '{path}'. \nError: {source}")]
    WriteLogFile {
        path: String,
        #[source]
        source: io::Error,
    },
}
