use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
/// What to do when a single file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadErrorPolicy {
    /// Record the file as skipped and keep walking.
    #[default]
    Skip,
    /// Stop and return the read error.
    Abort,
}
/// How bytes that are not valid UTF-8 are handled in text files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextDecoding {
    /// Each invalid sequence becomes U+FFFD.
    #[default]
    Replace,
    /// Invalid bytes are dropped.
    Ignore,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderOptions {
    pub root: PathBuf,
    pub on_read_error: ReadErrorPolicy,
    pub text_decoding: TextDecoding,
    pub exclude_patterns: Vec<String>,
    pub follow_links: bool,
    pub sort_by_name: bool,
    #[serde(skip)]
    pub cancel: Option<Arc<AtomicBool>>,
}
impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            on_read_error: ReadErrorPolicy::Skip,
            text_decoding: TextDecoding::Replace,
            exclude_patterns: Vec::new(),
            follow_links: false,
            sort_by_name: true,
            cancel: None,
        }
    }
}
#[derive(Debug, Default)]
pub struct EncoderBuilder {
    options: EncoderOptions,
}
impl EncoderBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: EncoderOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn on_read_error(mut self, policy: ReadErrorPolicy) -> Self {
        self.options.on_read_error = policy;
        self
    }
    pub fn text_decoding(mut self, decoding: TextDecoding) -> Self {
        self.options.text_decoding = decoding;
        self
    }
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude_patterns = patterns;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn sort_by_name(mut self, yes: bool) -> Self {
        self.options.sort_by_name = yes;
        self
    }
    /// Traversal stops with [`EncodeError::Cancelled`](crate::EncodeError::Cancelled)
    /// once the flag is set.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.options.cancel = Some(flag);
        self
    }
    pub fn build(self) -> EncoderOptions {
        self.options
    }
}
