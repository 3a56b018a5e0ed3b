//! Answer store keyed by question id.
//!
//! Keys appear only once a question has been edited. An absent key and an
//! empty string are different values here; [`AnswerMap::display`] is where
//! they collapse to the same text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display text for a question without a usable answer.
pub const NOT_ANSWERED: &str = "(not answered)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap {
    values: HashMap<String, String>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the answer for `question_id`.
    pub fn set(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(question_id.into(), value.into());
    }

    /// Stored answer, or `None` if the question was never edited.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.values.get(question_id).map(String::as_str)
    }

    /// Mutable access for in-place editing, creating an empty entry on first touch.
    pub fn entry_mut(&mut self, question_id: &str) -> &mut String {
        self.values.entry(question_id.to_string()).or_default()
    }

    /// Answer text as rendered in the digest and the document.
    pub fn display(&self, question_id: &str) -> &str {
        match self.get(question_id) {
            Some(value) if !value.is_empty() => value,
            _ => NOT_ANSWERED,
        }
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.values.contains_key(question_id)
    }

    /// Number of touched questions, including ones cleared back to empty.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of questions with a non-empty answer.
    pub fn answered_count(&self) -> usize {
        self.values.values().filter(|v| !v.is_empty()).count()
    }
}
