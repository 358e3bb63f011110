pub mod inference;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

use crate::error::Result;

pub use inference::InferenceClient;

static SPECIAL_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?s>|<pad>|<unk>|<mask>").unwrap());
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\r?\n){2,}").unwrap());

/// Beam-search decoding knobs passed through to the model runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationParams {
    pub num_beams: u32,
    pub max_length: u32,
    pub early_stopping: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            num_beams: 4,
            max_length: 100,
            early_stopping: true,
        }
    }
}

/// Anything that turns one paragraph into a shorter text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, paragraph: &str) -> Result<String>;

    /// Identifier shown in logs.
    fn name(&self) -> &str;
}

pub fn strip_special_tokens(text: &str) -> String {
    let stripped = SPECIAL_TOKEN_RE.replace_all(text, "");
    collapse_paragraph_breaks(&stripped)
}

/// A summary must stay a single paragraph, so blank lines inside it become spaces.
pub fn collapse_paragraph_breaks(text: &str) -> String {
    PARAGRAPH_BREAK_RE.replace_all(text, " ").trim().to_string()
}
