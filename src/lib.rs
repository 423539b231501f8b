//! ascii-lens library crate.
//!
//! This module exposes the frame pipeline and the CLI components for integration testing.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod renderer;
pub mod source;
