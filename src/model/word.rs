//! Word identifiers and per-word label options.
//!
//! A [`Word`] is the identity of a label: two entries with the same text are
//! the same word. [`LabelOptions`] is the open-ended style bag that travels
//! with it to the footprint provider.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a label in the cloud.
///
/// Always non-empty. Use [`Word::new`] to construct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Smart constructor: validates non-empty text
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidWord> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidWord::Empty);
        }
        Ok(Self(raw))
    }

    /// The word's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rejected word text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWord {
    /// Word text was the empty string.
    #[error("Word cannot be empty")]
    Empty,
}

/// A single style override value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value (sizes, paddings).
    Number(f64),
    /// Free-form text (color names, font names).
    Text(String),
}

impl OptionValue {
    /// Numeric view of the value, if it is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Ordered bag of style overrides applied to a label.
///
/// Keys are interpreted by the footprint provider; the layout core only
/// compares bags for equality to decide whether a cached footprint is stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelOptions(BTreeMap<String, OptionValue>);

impl LabelOptions {
    /// Empty option bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// True when no overrides are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Layer `overrides` on top of `self`; keys in `overrides` win.
    pub fn merged(&self, overrides: &LabelOptions) -> LabelOptions {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        LabelOptions(merged)
    }
}

/// A word as submitted to a layout pass, with its own style overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    /// Label identity.
    pub word: Word,
    /// Per-word overrides layered over the global label options.
    pub options: LabelOptions,
}

impl WordEntry {
    /// Entry with no per-word overrides.
    pub fn new(word: Word) -> Self {
        Self {
            word,
            options: LabelOptions::default(),
        }
    }

    /// Entry with per-word overrides.
    pub fn with_options(word: Word, options: LabelOptions) -> Self {
        Self { word, options }
    }

    /// Parse a plain text into an entry without overrides.
    pub fn parse(text: impl Into<String>) -> Result<Self, InvalidWord> {
        Word::new(text).map(Self::new)
    }
}

impl From<Word> for WordEntry {
    fn from(word: Word) -> Self {
        Self::new(word)
    }
}

// ===== Tests =====
