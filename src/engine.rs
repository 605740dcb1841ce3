use crate::classify::{FileKind, classify, is_excluded_dir, is_excluded_file};
use crate::error::EncodeError;
use crate::options::{EncoderOptions, ReadErrorPolicy, TextDecoding};
use crate::types::{EncodedProject, Encoding, FileRecord, Payload, SkippedFile};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(root: &Path, options: &EncoderOptions) -> Result<Self, EncodeError> {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(options.follow_links);
        if options.sort_by_name {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }
        let matcher = build_matcher(&options.exclude_patterns)?;
        let prefix = root.to_path_buf();
        builder.filter_entry(move |entry| keep_entry(entry, &prefix, matcher.as_ref()));
        Ok(Self {
            inner: builder.build(),
        })
    }
}
fn build_matcher(patterns: &[String]) -> Result<Option<GlobSet>, EncodeError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| EncodeError::InvalidPattern(format!("'{}': {}", pattern, e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| EncodeError::InvalidPattern(e.to_string()))
}
fn keep_entry(entry: &DirEntry, root: &Path, matcher: Option<&GlobSet>) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    let excluded = if is_dir {
        is_excluded_dir(&name)
    } else {
        is_excluded_file(&name)
    };
    if excluded {
        #[cfg(feature = "logging")]
        tracing::debug!("Excluding {}", entry.path().display());
        return false;
    }
    match (matcher, posix_relative(entry.path(), root)) {
        (Some(matcher), Some(relative)) => !matcher.is_match(relative.as_str()),
        _ => true,
    }
}
/// `path` relative to `root`, joined with `/`. `None` when `path` is not below `root`.
fn posix_relative(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}
fn resolve_root(root: &Path) -> Result<PathBuf, EncodeError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EncodeError::NotFound(root.to_path_buf()),
        _ => EncodeError::io(root, e),
    })?;
    if !metadata.is_dir() {
        return Err(EncodeError::NotADirectory(root.to_path_buf()));
    }
    fs::canonicalize(root).map_err(|e| EncodeError::io(root, e))
}
fn read_bytes(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}
fn decode_text(bytes: Vec<u8>, decoding: TextDecoding) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let bytes = err.into_bytes();
            match decoding {
                TextDecoding::Replace => String::from_utf8_lossy(&bytes).into_owned(),
                TextDecoding::Ignore => bytes.utf8_chunks().map(|chunk| chunk.valid()).collect(),
            }
        }
    }
}
/// Encodes one file of a project.
///
/// `path` may be absolute or relative to `project_root`; either way it must
/// resolve lexically below the root (a relative root is taken against the
/// current directory when `path` is absolute), otherwise [`EncodeError::OutsideRoot`] is
/// returned. Binary files (by extension) are base64-encoded, everything else is
/// decoded as UTF-8 using `decoding` for invalid bytes.
///
/// # Errors
///
/// [`EncodeError::FileRead`] carrying the root-relative path when the file
/// cannot be opened or read.
pub fn encode_file(
    path: impl AsRef<Path>,
    project_root: impl AsRef<Path>,
    decoding: TextDecoding,
) -> Result<FileRecord, EncodeError> {
    let root = project_root.as_ref();
    let path = path.as_ref();
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let base = if full.is_absolute() && !root.is_absolute() {
        std::path::absolute(root).map_err(|e| EncodeError::io(root, e))?
    } else {
        root.to_path_buf()
    };
    let relative = posix_relative(&full, &base).ok_or_else(|| EncodeError::OutsideRoot {
        path: full.clone(),
        root: root.to_path_buf(),
    })?;
    let bytes = read_bytes(&full).map_err(|e| EncodeError::file_read(relative.as_str(), e))?;
    let record = match classify(&relative) {
        FileKind::Binary => FileRecord {
            content: STANDARD.encode(&bytes),
            path: relative,
            encoding: Some(Encoding::Base64),
        },
        FileKind::Text => FileRecord {
            content: decode_text(bytes, decoding),
            path: relative,
            encoding: None,
        },
    };
    Ok(record)
}
fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
/// Regular files and symlinks that do not lead to a directory. A dangling link
/// is kept so its read failure is reported.
fn is_encodable(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(ft) => ft.is_file(),
        None => false,
    }
}
/// Lazily encodes the files of a project in traversal order.
///
/// Each item is either a record or the error for one entry; the iterator keeps
/// going after per-file errors and ends after yielding
/// [`EncodeError::Cancelled`].
pub struct ProjectRecords {
    root: PathBuf,
    walk: ignore::Walk,
    decoding: TextDecoding,
    cancel: Option<Arc<AtomicBool>>,
    finished: bool,
}
impl ProjectRecords {
    pub fn new(options: &EncoderOptions) -> Result<Self, EncodeError> {
        let root = resolve_root(&options.root)?;
        let walker = Walker::new(&root, options)?;
        Ok(Self {
            root,
            walk: walker.inner,
            decoding: options.text_decoding,
            cancel: options.cancel.clone(),
            finished: false,
        })
    }
    /// The canonical root being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
    fn walk_error(&self, err: ignore::Error) -> EncodeError {
        let path = walk_error_path(&err)
            .and_then(|p| posix_relative(p, &self.root))
            .unwrap_or_default();
        EncodeError::Walk {
            path,
            message: err.to_string(),
        }
    }
}
impl Iterator for ProjectRecords {
    type Item = Result<FileRecord, EncodeError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if self.is_cancelled() {
                self.finished = true;
                return Some(Err(EncodeError::Cancelled));
            }
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(self.walk_error(e))),
            };
            if !is_encodable(&entry) {
                continue;
            }
            return Some(encode_file(entry.path(), &self.root, self.decoding));
        }
    }
}
/// Shorthand for [`ProjectRecords::new`].
pub fn records(options: &EncoderOptions) -> Result<ProjectRecords, EncodeError> {
    ProjectRecords::new(options)
}
fn skipped_file(err: &EncodeError) -> SkippedFile {
    match err {
        EncodeError::FileRead { path, source } => SkippedFile {
            path: path.clone(),
            reason: source.to_string(),
        },
        EncodeError::Walk { path, message } => SkippedFile {
            path: path.clone(),
            reason: message.clone(),
        },
        other => SkippedFile {
            path: String::new(),
            reason: other.to_string(),
        },
    }
}
/// Walks `options.root` and encodes every file that survives the exclusion rules.
///
/// Under [`ReadErrorPolicy::Skip`] unreadable files and directories are listed in
/// [`EncodedProject::skipped`]; under [`ReadErrorPolicy::Abort`] the first such
/// error is returned. Records already collected are never altered by a failure.
///
/// # Errors
///
/// [`EncodeError::NotFound`] and [`EncodeError::NotADirectory`] for a bad root,
/// [`EncodeError::EmptyProject`] when nothing could be encoded, and
/// [`EncodeError::Cancelled`] when the cancel flag was raised.
pub fn encode_project(options: EncoderOptions) -> Result<EncodedProject, EncodeError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Encoding project at {}", options.root.display());
    let records = ProjectRecords::new(&options)?;
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for result in records {
        match result {
            Ok(record) => {
                #[cfg(feature = "logging")]
                tracing::debug!(
                    "Encoded {} ({})",
                    record.path,
                    if record.is_binary() {
                        "binary"
                    } else if crate::classify::is_known_text(&record.path) {
                        "text"
                    } else {
                        "unrecognised extension, read as text"
                    }
                );
                files.push(record);
            }
            Err(err @ (EncodeError::FileRead { .. } | EncodeError::Walk { .. }))
                if options.on_read_error == ReadErrorPolicy::Skip =>
            {
                #[cfg(feature = "logging")]
                tracing::warn!("Skipping: {}", err);
                skipped.push(skipped_file(&err));
            }
            Err(err) => return Err(err),
        }
    }
    if files.is_empty() {
        return Err(EncodeError::EmptyProject {
            root: options.root.clone(),
            skipped: skipped.len(),
        });
    }
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Encoded {} files, skipped {}",
        files.len(),
        skipped.len()
    );
    Ok(EncodedProject {
        payload: Payload { files },
        skipped,
    })
}
