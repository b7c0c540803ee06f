use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal sub-paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning a source root for structure exports.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Export files, sorted by path.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// An excluded sub-path, resolved against the source root.
enum Exclusion {
    Literal(PathBuf),
    Glob(Pattern),
}

impl Exclusion {
    fn matches(&self, path: &Path) -> bool {
        match self {
            Exclusion::Literal(prefix) => path.starts_with(prefix),
            Exclusion::Glob(pattern) => pattern.matches_path(path),
        }
    }
}

/// Find the structure exports under `source_root`.
///
/// A root that is itself a file is the only unit. Otherwise every file with
/// `extension` below the root is a unit, unless it is hidden or lies under
/// `exclude`.
pub fn scan_exports(
    source_root: &Path,
    extension: &str,
    exclude: Option<&str>,
    verbose: bool,
) -> ScanResult {
    if source_root.is_file() {
        return ScanResult {
            files: vec![source_root.to_path_buf()],
            skipped_count: 0,
        };
    }

    let exclusion = exclude.and_then(|p| {
        let resolved = source_root.join(p);
        if !is_glob_pattern(p) {
            return Some(Exclusion::Literal(resolved));
        }
        match Pattern::new(&resolved.to_string_lossy()) {
            Ok(pattern) => Some(Exclusion::Glob(pattern)),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid exclude pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
                None
            }
        }
    });

    let mut files = Vec::new();
    let mut skipped_count = 0;

    // Hidden entries (`.git`, `.quillrc.json`, ...) are never units.
    let walker = WalkDir::new(source_root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();

        if exclusion.as_ref().is_some_and(|e| e.matches(path)) {
            continue;
        }

        if path.is_file() && has_extension(path, extension) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
