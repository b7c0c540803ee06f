//! File parsers for structure exports and translation tables.
//!
//! This module provides parsers for the two file types quill reads:
//! - `structure`: JSON structure exports produced by SourceKit (one per Swift file)
//! - `strings`: Apple `.strings` translation tables

pub mod strings;
pub mod structure;
