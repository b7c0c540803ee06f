//! quill - localisable string generator for Swift
//!
//! quill reads the structure exports of Swift source files, finds the types
//! conforming to a marker protocol (`LocalisableString` by default), generates
//! the Swift source implementing that protocol for each of them and keeps a
//! `.strings` translation table in sync with the declared entries.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, reporting, exit codes)
//! - `config`: Configuration file loading and parsing
//! - `core`: Generation engine (decoding, extraction, generation, table merge)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
