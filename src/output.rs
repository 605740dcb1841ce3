//! Serialization of a [`Payload`] and helpers for handing it to the compiler.
//!
//! Pretty output uses two-space indentation; non-ASCII text is written as-is
//! rather than escaped.

use crate::{EncodeError, Payload};
use std::fs;
use std::path::{Path, PathBuf};

/// Compile endpoint used in the upload hint when none is given.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3001/compile";

/// Serializes the payload to JSON.
pub fn format_payload(payload: &Payload, pretty: bool) -> Result<String, EncodeError> {
    let json = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    Ok(json)
}

/// Writes the payload to `path` and returns the number of bytes written.
pub fn write_payload_to_file(
    payload: &Payload,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<u64, EncodeError> {
    let json = format_payload(payload, pretty)?;
    fs::write(&path, &json).map_err(|e| EncodeError::io(path.as_ref(), e))?;
    Ok(json.len() as u64)
}

/// `<project name>.json` in the current directory.
pub fn default_output_path(root: impl AsRef<Path>) -> PathBuf {
    let root = root.as_ref();
    let name = fs::canonicalize(root)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .or_else(|| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "payload".to_string());
    PathBuf::from(format!("{}.json", name))
}

/// A `curl` invocation that posts the payload file to `endpoint`.
pub fn upload_command(endpoint: &str, payload_path: impl AsRef<Path>) -> String {
    format!(
        "curl -X POST {} \\\n  -H 'Content-Type: application/json' \\\n  -d @{} \\\n  -o output.pdf",
        endpoint,
        payload_path.as_ref().display()
    )
}
