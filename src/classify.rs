//! Static classification tables and the extension-only text/binary rule.
//!
//! Nothing here inspects file contents. A file's extension is the only signal,
//! so a PNG renamed to `figure.dat` is treated as text.

use std::path::Path;

/// Extensions (lowercase, without the dot) whose files are base64-encoded.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "eps", "ps", "pbm", "pgm", "ppm",
    "pnm", "ico", "svg", "svgz", "zip", "tar", "gz", "bz2",
];

/// Extensions known to be text sources.
///
/// Informational only: anything outside [`BINARY_EXTENSIONS`] is text whether
/// or not it appears here.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "tex", "cls", "sty", "bst", "bib", "def", "cfg", "ltx", "dtx", "ins", "fd", "clo", "txt", "md",
    "log", "aux",
];

/// Directory names pruned at every level of the walk.
pub const EXCLUDED_DIRS: &[&str] = &["__pycache__", "node_modules", "build", "dist"];

/// File names never encoded.
pub const EXCLUDED_FILES: &[&str] = &["texput.log"];

/// How a file's bytes are carried in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Binary,
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Classifies a file by extension, case-insensitively. Unknown extensions are text.
pub fn classify(filename: &str) -> FileKind {
    match extension(filename) {
        Some(ext) if BINARY_EXTENSIONS.contains(&ext.as_str()) => FileKind::Binary,
        _ => FileKind::Text,
    }
}

/// Whether the extension is one of the recognised text source types.
pub fn is_known_text(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Directories that are never descended into.
pub fn is_excluded_dir(name: &str) -> bool {
    is_hidden(name) || EXCLUDED_DIRS.contains(&name)
}

/// Files that are never encoded.
pub fn is_excluded_file(name: &str) -> bool {
    is_hidden(name) || EXCLUDED_FILES.contains(&name)
}
