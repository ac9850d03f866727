//! Syntax module for CMake source-listing statements
//!
//! The grammar recognizes `set()`, `add_library()`, `add_executable()` and
//! `target_sources()` and nothing else. Two modes are offered: [`parse`] reads
//! one statement at the start of a text, [`scan`] finds every statement in it.

pub mod parser;

pub use parser::{parse, scan};
