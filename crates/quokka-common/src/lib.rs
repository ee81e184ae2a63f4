//! Common utilities for the Quokka style engine.
//!
//! This crate provides shared infrastructure used by the style components:
//! - **Warning System** - colored terminal output for ignored input

pub mod warning;
