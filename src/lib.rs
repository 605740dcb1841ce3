//! # texpack
//!
//! `texpack` walks a document project directory and encodes every file into a
//! single JSON payload for a remote compilation service:
//!
//! ```json
//! { "files": [ { "path": "main.tex", "content": "..." },
//!              { "path": "fig/plot.png", "content": "iVBOR...", "encoding": "base64" } ] }
//! ```
//!
//! Files are classified by extension only. Known binary types (images, PDF,
//! archives) are base64-encoded; everything else is read as UTF-8 with invalid
//! bytes handled by the configured [`TextDecoding`] policy. Hidden entries and
//! the `__pycache__`, `node_modules`, `build` and `dist` directories are pruned,
//! and `texput.log` is never included.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use texpack::{EncoderBuilder, ReadErrorPolicy, encode_project, output};
//!
//! let options = EncoderBuilder::new("./my-paper")
//!     .on_read_error(ReadErrorPolicy::Skip)
//!     .build();
//!
//! let encoded = encode_project(options).expect("Failed to encode project");
//! for skipped in &encoded.skipped {
//!     eprintln!("skipped {}: {}", skipped.path, skipped.reason);
//! }
//! let json = output::format_payload(&encoded.payload, true).unwrap();
//! println!("{}", json);
//! ```

pub mod classify;
mod engine;
mod error;
mod options;
pub mod output;
pub mod summary;
mod types;

pub use classify::{FileKind, classify};
pub use engine::{ProjectRecords, encode_file, encode_project, records};
pub use error::EncodeError;
pub use options::{EncoderBuilder, EncoderOptions, ReadErrorPolicy, TextDecoding};
pub use summary::{MainFile, PayloadSummary};
pub use types::{EncodedProject, Encoding, FileRecord, Payload, SkippedFile};
