//! Interpretation of list item strings as `/`-separated path fragments.
//!
//! Only `/` separates components; `\` is an ordinary character.

use std::fmt;
use std::ops::Add;


use crate::ast::{ListItem, ListItemString};
use crate::errors::PathError;

pub const SEPARATOR: char = '/';

/// A list item string viewed as a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemStringPath<'a> {
    text: &'a str,
}

impl<'a> ListItemStringPath<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Everything after the last separator, or the whole text.
    pub fn source_file_name(&self) -> &'a str {
        match self.text.rfind(SEPARATOR) {
            Some(index) => &self.text[index + SEPARATOR.len_utf8()..],
            None => self.text,
        }
    }

    /// Everything up to and including the last separator, or `""`.
    pub fn parent_path(&self) -> &'a str {
        match self.text.rfind(SEPARATOR) {
            Some(index) => &self.text[..index + SEPARATOR.len_utf8()],
            None => "",
        }
    }
}

/// Views a list item as a path. Quotes around the text are dropped.
pub fn interpret_list_item_as_path(item: &ListItem) -> Result<ListItemStringPath<'_>, PathError> {
    match item {
        ListItem::String(string) => Ok(interpret_list_item_string_as_path(string)),
        ListItem::VariableUse(variable) => Err(PathError::NotAListItemString {
            name: variable.name.clone(),
        }),
    }
}

pub fn interpret_list_item_string_as_path(string: &ListItemString) -> ListItemStringPath<'_> {
    ListItemStringPath::new(string.unquoted())
}

/// Whether `text` contains a separator once leading and trailing separators
/// are removed. `"/file.h"` is not a path, `"dir/file.h"` is.
pub fn is_cmake_path(text: &str) -> bool {
    text.trim_matches(SEPARATOR).contains(SEPARATOR)
}

/// Collapses any number of trailing separators.
pub fn strip_trailing_separator(text: &str) -> &str {
    text.trim_end_matches(SEPARATOR)
}

/// A file reference that compares equal to any path with the same file name.
///
/// `PathAwareListItemString::new("header.h") == "include/lib/header.h"` holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathAwareListItemString(String);

impl PathAwareListItemString {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn source_file_name(&self) -> &str {
        ListItemStringPath::new(&self.0).source_file_name()
    }

    /// Compares file names only.
    pub fn matches(&self, path: &str) -> bool {
        self.source_file_name() == ListItemStringPath::new(path).source_file_name()
    }
}

impl PartialEq<str> for PathAwareListItemString {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<&str> for PathAwareListItemString {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<String> for PathAwareListItemString {
    fn eq(&self, other: &String) -> bool {
        self.matches(other)
    }
}

impl Add<&str> for PathAwareListItemString {
    type Output = PathAwareListItemString;

    fn add(mut self, suffix: &str) -> Self::Output {
        self.0.push_str(suffix);
        self
    }
}

impl fmt::Display for PathAwareListItemString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
