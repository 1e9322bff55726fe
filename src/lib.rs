//! Torrentmate - release metadata engine
//!
//! Turns a release folder into a normalized metadata record and a canonical
//! naming token, then writes the NFO, BBCode and torrent files named after it.
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod generators;
pub mod naming;
pub mod pipeline;
pub mod reconcile;
