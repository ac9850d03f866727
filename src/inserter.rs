//! Computing and applying text insertions.
//!
//! An [`InsertAction`] is a position in the original source plus the text to
//! splice in there. Actions are plain values computed against one AST
//! snapshot. To apply several to the same text, apply them in descending
//! `position` order; each splice shifts every later offset.

use crate::errors::InsertError;

pub mod class;
pub mod source;
pub mod whitespace;

pub use class::{
    insert_class_next_to_other_class, insert_class_next_to_other_class_with_whitespace_enhancement,
    ClassInsertActions, ClassInserter, ExtensionCandidates,
};
pub use source::{
    insert_source_considering_existing_whitespace, insert_source_item_directly_in_target,
    insert_source_item_in_variable, insert_source_item_in_variable_from_target,
    insert_source_item_next_to_other_source, Inserter,
};

/// Separator placed before a new item when nothing better is known.
pub const DEFAULT_SEPARATOR: &str = " ";

/// How the separator before an inserted item is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing<'s> {
    /// Always a single space.
    SingleSpace,
    /// Reuse the separator between the last two items of the anchor list in
    /// `source`, falling back to a single space.
    MatchExisting { source: &'s str },
}

/// Text to splice into a source at `position`.
///
/// The inserted text is `separator` followed by `payload`; the two are kept
/// apart so the separator can be replaced without touching the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertAction {
    pub position: usize,
    pub separator: String,
    pub payload: String,
}

impl InsertAction {
    /// An action inserting `payload` after a single space.
    pub fn new(position: usize, payload: impl Into<String>) -> Self {
        Self {
            position,
            separator: DEFAULT_SEPARATOR.to_string(),
            payload: payload.into(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The full inserted text.
    pub fn content(&self) -> String {
        format!("{}{}", self.separator, self.payload)
    }

    /// Returns `source` with the content spliced in at `position`.
    pub fn apply(&self, source: &str) -> Result<String, InsertError> {
        if !source.is_char_boundary(self.position) {
            return Err(InsertError::PositionOutOfBounds {
                position: self.position,
                len: source.len(),
            });
        }
        let (before, after) = source.split_at(self.position);
        let mut result =
            String::with_capacity(source.len() + self.separator.len() + self.payload.len());
        result.push_str(before);
        result.push_str(&self.separator);
        result.push_str(&self.payload);
        result.push_str(after);
        Ok(result)
    }
}
