//! Counts and entry-point detection over an encoded payload.
//!
//! The compilation service picks its main file the same way: the first `.tex`
//! text record declaring `\documentclass`, falling back to the first `.tex`
//! record. Running the same rule locally lets a caller warn before uploading.

use crate::types::{FileRecord, Payload};
use serde::Serialize;

/// The record the compiler is expected to treat as the document entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainFile {
    pub path: String,
    /// `false` when the file was chosen only because it is the first `.tex` record.
    pub has_documentclass: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadSummary {
    pub total: usize,
    pub text: usize,
    pub binary: usize,
    /// Sum of `content` lengths, i.e. base64 length for binary records.
    pub content_bytes: usize,
    pub main_file: Option<MainFile>,
}

impl PayloadSummary {
    pub fn from_payload(payload: &Payload) -> Self {
        let binary = payload.files.iter().filter(|f| f.is_binary()).count();
        Self {
            total: payload.files.len(),
            text: payload.files.len() - binary,
            binary,
            content_bytes: payload.files.iter().map(|f| f.content.len()).sum(),
            main_file: find_main_file(&payload.files),
        }
    }
}

/// Finds the entry point among text `.tex` records.
pub fn find_main_file(files: &[FileRecord]) -> Option<MainFile> {
    let mut fallback = None;
    for file in files {
        if file.is_binary() || !file.path.ends_with(".tex") {
            continue;
        }
        if file.content.contains("\\documentclass") {
            return Some(MainFile {
                path: file.path.clone(),
                has_documentclass: true,
            });
        }
        if fallback.is_none() {
            fallback = Some(MainFile {
                path: file.path.clone(),
                has_documentclass: false,
            });
        }
    }
    fallback
}
