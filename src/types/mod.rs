//! # types
//!
//! `types` is the module containing all the useful public structs of the crate

pub mod errors;
pub mod frame;
pub mod live;
pub mod record;
pub mod status;
