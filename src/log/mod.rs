//! # log
//!
//! Durable capture log: append-only CSV writer (`log::writer`) and the
//! last-N-lines tail used by the live view (`log::tail`).

pub mod tail;
pub mod writer;
