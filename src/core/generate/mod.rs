//! Swift source generation.
//!
//! ## Module Structure
//!
//! - `source`: Indented source tree and its renderer
//! - `conformance`: `identifier`/`arguments` extensions per conforming type
//! - `protocol`: The marker protocol and its localisation extension
//!
//! [`assemble`] lays the generated sources out as files. An output path with
//! a `.swift` extension receives everything in one file; any other path is a
//! directory receiving the protocol file and one file per conforming type.

pub mod conformance;
pub mod protocol;
pub mod source;

use std::path::{Path, PathBuf};

pub use conformance::{ConformanceGenerator, GeneratedConformance};
pub use protocol::protocol_source;
pub use source::{GeneratedSource, render_all};

/// First line of every generated file.
pub const BANNER: &str = "// This file has been generated by quill. Do not edit this file manually.";

/// A file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// How generated sources are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// Everything in a single `.swift` file.
    SingleFile,
    /// A directory with one file per conforming type.
    Directory,
}

impl OutputLayout {
    pub fn for_path(output: &Path) -> Self {
        match output.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("swift") => OutputLayout::SingleFile,
            _ => OutputLayout::Directory,
        }
    }
}

/// Lay out the protocol and conformance sources as files under `output`.
///
/// Pure: nothing is written.
pub fn assemble(
    output: &Path,
    marker_interface: &str,
    table_name: &str,
    conformances: &[GeneratedConformance],
) -> Vec<GeneratedFile> {
    let protocol = render_all(&protocol_source(marker_interface, table_name));
    let prelude = format!("{}\n\nimport Foundation\nimport os\n\n{}\n", BANNER, protocol);

    match OutputLayout::for_path(output) {
        OutputLayout::SingleFile => {
            let mut contents = prelude;
            for conformance in conformances {
                contents.push('\n');
                contents.push_str(&conformance.source().render());
                contents.push('\n');
            }
            vec![GeneratedFile {
                path: output.to_path_buf(),
                contents,
            }]
        }
        OutputLayout::Directory => {
            let mut files = Vec::with_capacity(conformances.len() + 1);
            files.push(GeneratedFile {
                path: output.join(format!("{}.swift", marker_interface)),
                contents: prelude,
            });
            files.extend(conformances.iter().map(|conformance| GeneratedFile {
                path: output.join(conformance.file_name()),
                contents: format!("{}\n\n{}\n", BANNER, conformance.source().render()),
            }));
            files
        }
    }
}
