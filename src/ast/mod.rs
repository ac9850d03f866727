//! AST module for CMake source-listing statements
//!
//! Nodes are produced once by the parser and never mutated. Every list item
//! carries its byte offsets in the parsed text so that insertions can be spliced
//! into the original source.
//!
//! Equality between nodes is structural: `==` compares names and list contents
//! and ignores all location data, so a node built by hand in a test compares
//! equal to the same node parsed from text.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::Serialize;

mod display;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code as byte offsets, `end` exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shifts both offsets by `offset`.
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// A symbolic `${name}` reference. Never resolved.
///
/// `span.end` is the offset just past the closing `}`, or past the closing
/// quote for the `"${name}"` form.
#[derive(Debug, Clone, Serialize)]
pub struct VariableUse {
    pub name: String,
    pub span: Span,
}

impl VariableUse {
    /// A reference as if written `${name}` at offset 0.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let end = name.len() + "${}".len();
        Self {
            name,
            span: Span::new(0, end),
        }
    }

    pub fn located(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn start_location(&self) -> usize {
        self.span.start
    }

    pub fn end_location(&self) -> usize {
        self.span.end
    }
}

impl PartialEq for VariableUse {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for VariableUse {}

/// A literal list entry, kept verbatim including any surrounding quotes.
#[derive(Debug, Clone, Serialize)]
pub struct ListItemString {
    pub text: String,
    pub start: usize,
}

impl ListItemString {
    pub fn new(text: impl Into<String>) -> Self {
        Self::located(text, 0)
    }

    pub fn located(text: impl Into<String>, start: usize) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }

    pub fn start_location(&self) -> usize {
        self.start
    }

    pub fn end_location(&self) -> usize {
        self.start + self.text.len()
    }

    /// The text with surrounding double quotes removed.
    pub fn unquoted(&self) -> &str {
        self.text.trim_matches('"')
    }
}

impl PartialEq for ListItemString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ListItemString {}

/// One entry of a source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListItem {
    VariableUse(VariableUse),
    String(ListItemString),
}

impl ListItem {
    pub fn start_location(&self) -> usize {
        match self {
            ListItem::VariableUse(variable) => variable.start_location(),
            ListItem::String(string) => string.start_location(),
        }
    }

    pub fn end_location(&self) -> usize {
        match self {
            ListItem::VariableUse(variable) => variable.end_location(),
            ListItem::String(string) => string.end_location(),
        }
    }

    pub fn as_string(&self) -> Option<&ListItemString> {
        match self {
            ListItem::String(string) => Some(string),
            ListItem::VariableUse(_) => None,
        }
    }

    pub fn as_variable_use(&self) -> Option<&VariableUse> {
        match self {
            ListItem::VariableUse(variable) => Some(variable),
            ListItem::String(_) => None,
        }
    }
}

impl From<VariableUse> for ListItem {
    fn from(variable: VariableUse) -> Self {
        ListItem::VariableUse(variable)
    }
}

impl From<ListItemString> for ListItem {
    fn from(string: ListItemString) -> Self {
        ListItem::String(string)
    }
}

/// Ordered, heterogeneous list of items. Items need not be contiguous in the
/// source since comments may sit between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct CMakeStringList {
    pub items: Vec<ListItem>,
}

impl CMakeStringList {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }

    /// Offset just past the last item, `None` for an empty list.
    pub fn end_location(&self) -> Option<usize> {
        self.items.last().map(ListItem::end_location)
    }

    pub fn uses_variable(&self, name: &str) -> bool {
        self.items
            .iter()
            .filter_map(ListItem::as_variable_use)
            .any(|variable| variable.name == name)
    }

    /// First literal item accepted by `matches`, compared on its unquoted text.
    pub fn find_string_item(&self, matches: impl Fn(&str) -> bool) -> Option<&ListItem> {
        self.items.iter().find(|item| {
            item.as_string()
                .is_some_and(|string| matches(string.unquoted()))
        })
    }
}

impl<'a> IntoIterator for &'a CMakeStringList {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// `set(<var_name> <list> [PARENT_SCOPE])`
#[derive(Debug, Clone, Serialize)]
pub struct SetNormalVariable {
    pub var_name: String,
    pub list: CMakeStringList,
    pub span: Span,
}

/// `add_library(<library_name> [type] [EXCLUDE_FROM_ALL] <list>)`
#[derive(Debug, Clone, Serialize)]
pub struct AddLibrary {
    pub library_name: String,
    pub list: CMakeStringList,
    pub span: Span,
}

/// `add_executable(<executable_name> [WIN32] [MACOSX_BUNDLE] [EXCLUDE_FROM_ALL] <list>)`
#[derive(Debug, Clone, Serialize)]
pub struct AddExecutable {
    pub executable_name: String,
    pub list: CMakeStringList,
    pub span: Span,
}

/// `target_sources(<target_name> (PRIVATE|PUBLIC|INTERFACE <list>)+)`
///
/// `list` is the concatenation of every scoped sub-list in source order.
#[derive(Debug, Clone, Serialize)]
pub struct TargetSources {
    pub target_name: String,
    pub list: CMakeStringList,
    pub span: Span,
}

macro_rules! impl_statement_node {
    ($node:ident, $name:ident) => {
        impl $node {
            pub fn new(name: impl Into<String>, list: CMakeStringList) -> Self {
                Self {
                    $name: name.into(),
                    list,
                    span: Span::default(),
                }
            }

            pub fn located(name: impl Into<String>, list: CMakeStringList, span: Span) -> Self {
                Self {
                    $name: name.into(),
                    list,
                    span,
                }
            }
        }

        impl PartialEq for $node {
            fn eq(&self, other: &Self) -> bool {
                self.$name == other.$name && self.list == other.list
            }
        }

        impl Eq for $node {}
    };
}

impl_statement_node!(SetNormalVariable, var_name);
impl_statement_node!(AddLibrary, library_name);
impl_statement_node!(AddExecutable, executable_name);
impl_statement_node!(TargetSources, target_name);

/// The kind of a top-level statement, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    SetNormalVariable,
    AddLibrary,
    AddExecutable,
    TargetSources,
}

impl StatementKind {
    pub fn command(&self) -> &'static str {
        match self {
            StatementKind::SetNormalVariable => "set",
            StatementKind::AddLibrary => "add_library",
            StatementKind::AddExecutable => "add_executable",
            StatementKind::TargetSources => "target_sources",
        }
    }
}

/// A recognized top-level statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    SetNormalVariable(SetNormalVariable),
    AddLibrary(AddLibrary),
    AddExecutable(AddExecutable),
    TargetSources(TargetSources),
}

/// The flat, source-ordered result of a parse or scan.
pub type CMakeAst = Vec<Statement>;

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::SetNormalVariable(_) => StatementKind::SetNormalVariable,
            Statement::AddLibrary(_) => StatementKind::AddLibrary,
            Statement::AddExecutable(_) => StatementKind::AddExecutable,
            Statement::TargetSources(_) => StatementKind::TargetSources,
        }
    }

    /// The declared variable or target name.
    pub fn name(&self) -> &str {
        match self {
            Statement::SetNormalVariable(set) => &set.var_name,
            Statement::AddLibrary(library) => &library.library_name,
            Statement::AddExecutable(executable) => &executable.executable_name,
            Statement::TargetSources(sources) => &sources.target_name,
        }
    }

    pub fn list(&self) -> &CMakeStringList {
        match self {
            Statement::SetNormalVariable(set) => &set.list,
            Statement::AddLibrary(library) => &library.list,
            Statement::AddExecutable(executable) => &executable.list,
            Statement::TargetSources(sources) => &sources.list,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::SetNormalVariable(set) => set.span,
            Statement::AddLibrary(library) => library.span,
            Statement::AddExecutable(executable) => executable.span,
            Statement::TargetSources(sources) => sources.span,
        }
    }

    /// Short form used in diagnostics, e.g. `add_library(Core)`.
    pub fn describe(&self) -> String {
        format!("{}({})", self.kind().command(), self.name())
    }

    pub fn is_target_declaration(&self) -> bool {
        matches!(self, Statement::AddLibrary(_) | Statement::AddExecutable(_))
    }
}

impl From<SetNormalVariable> for Statement {
    fn from(node: SetNormalVariable) -> Self {
        Statement::SetNormalVariable(node)
    }
}

impl From<AddLibrary> for Statement {
    fn from(node: AddLibrary) -> Self {
        Statement::AddLibrary(node)
    }
}

impl From<AddExecutable> for Statement {
    fn from(node: AddExecutable) -> Self {
        Statement::AddExecutable(node)
    }
}

impl From<TargetSources> for Statement {
    fn from(node: TargetSources) -> Self {
        Statement::TargetSources(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_string_end_is_start_plus_length() {
        let item = ListItemString::located("\"file name.cpp\"", 14);
        assert_eq!(item.end_location(), 14 + 15);
    }

    #[test]
    fn test_equality_ignores_locations() {
        let located = ListItem::from(ListItemString::located("main.cpp", 40));
        let plain = ListItem::from(ListItemString::new("main.cpp"));
        assert_eq!(located, plain);

        let located = ListItem::from(VariableUse::located("Sources", Span::new(3, 13)));
        assert_eq!(located, ListItem::from(VariableUse::new("Sources")));
        assert_ne!(located, ListItem::from(ListItemString::new("${Sources}")));
    }

    #[test]
    fn test_position_after_last_list_item() {
        let list = CMakeStringList::new(vec![
            ListItemString::located("item1.cpp", 0).into(),
            VariableUse::located("Sources", Span::new(10, 20)).into(),
            ListItemString::located("item2", 14).into(),
        ]);
        assert_eq!(list.end_location(), Some(19));
        assert_eq!(CMakeStringList::default().end_location(), None);
    }

    #[test]
    fn test_unquoted_strips_surrounding_quotes() {
        assert_eq!(ListItemString::new("\"a.cpp\"").unquoted(), "a.cpp");
        assert_eq!(ListItemString::new("a.cpp").unquoted(), "a.cpp");
    }

    #[test]
    fn test_statement_equality_ignores_span() {
        let list = CMakeStringList::new(vec![ListItemString::new("a.cpp").into()]);
        let parsed = Statement::from(AddLibrary::located("Core", list.clone(), Span::new(5, 30)));
        assert_eq!(parsed, AddLibrary::new("Core", list.clone()).into());
        assert_ne!(parsed, AddExecutable::new("Core", list).into());
        assert_eq!(parsed.describe(), "add_library(Core)");
    }
}
