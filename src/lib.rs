//! Pidash library crate
//!
//! This crate provides a CLI binary and a library API for the remote
//! Raspberry Pi dashboard: SSH metric collection, text parsers and the
//! full-screen TUI.

pub mod cli;
pub mod collector;
pub mod error;
pub mod metrics;
pub mod parsers;
pub mod ssh;
pub mod state;
pub mod tui;
