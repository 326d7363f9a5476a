//! Hashtag category extraction.
//!
//! # Invariants
//! - The rightmost hashtag wins; earlier tags are still stripped from the text.
//! - Input without hashtags maps to [`DEFAULT_CATEGORY`].
//! - Pure and allocation-light: safe to run on every keystroke.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DEFAULT_CATEGORY;

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[^\s#]+").expect("valid hashtag regex"));

/// Result of splitting raw input into display text and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Input with every hashtag removed, trimmed.
    pub text: String,
    /// Rightmost hashtag without its `#`, or [`DEFAULT_CATEGORY`].
    pub category: String,
}

impl Extraction {
    /// Whether the cleaned text can become an `item_name`.
    pub fn is_submittable(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Splits `input` into cleaned text and category.
pub fn extract(input: &str) -> Extraction {
    let category = HASHTAG_RE
        .find_iter(input)
        .last()
        .map(|token| token.as_str()[1..].to_string())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let text = HASHTAG_RE.replace_all(input, "").trim().to_string();
    Extraction { text, category }
}
