//! Locating an anchor statement and computing where a new source goes.
//!
//! An [`Inserter`] is an anchor statement plus, when it was found through a
//! reference item, that item. Every insertion lands right after the last item
//! of the anchor's list.

use tracing::debug;

use crate::ast::{CMakeStringList, ListItem, Statement};
use crate::errors::InsertError;
use crate::path::{
    interpret_list_item_as_path, is_cmake_path, strip_trailing_separator,
    PathAwareListItemString, SEPARATOR,
};

use super::whitespace::enhance_insert_action_with_whitespace_used_in_list;
use super::{InsertAction, Spacing};

// ============================================================================
// INSERTER
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Inserter<'a> {
    statement: &'a Statement,
    matched_reference: Option<&'a ListItem>,
}

impl<'a> Inserter<'a> {
    /// Anchors on the unique `add_library`/`add_executable` declaring `target`.
    pub fn for_target(ast: &'a [Statement], target: &str) -> Result<Self, InsertError> {
        let candidates: Vec<&Statement> = ast
            .iter()
            .filter(|s| s.is_target_declaration() && s.name() == target)
            .collect();

        match candidates.as_slice() {
            [] => Err(InsertError::TargetNotFound {
                target: target.to_string(),
            }),
            [statement] => Ok(Self::anchored(*statement)),
            _ => Err(InsertError::AmbiguousTarget {
                target: target.to_string(),
                candidates: describe_all(&candidates),
            }),
        }
    }

    /// Anchors on the unique `set()` declaring `variable`.
    pub fn for_variable(ast: &'a [Statement], variable: &str) -> Result<Self, InsertError> {
        let candidates: Vec<&Statement> = ast
            .iter()
            .filter(|s| matches!(s, Statement::SetNormalVariable(_)) && s.name() == variable)
            .collect();

        match candidates.as_slice() {
            [] => Err(InsertError::VariableNotFound {
                variable: variable.to_string(),
            }),
            [statement] => Ok(Self::anchored(*statement)),
            _ => Err(InsertError::AmbiguousVariable {
                variable: variable.to_string(),
                candidates: describe_all(&candidates),
            }),
        }
    }

    /// Like [`Inserter::for_variable`], but first checks that `target` lists
    /// `${variable}` among its sources.
    pub fn for_variable_from_target(
        ast: &'a [Statement],
        target: &str,
        variable: &str,
    ) -> Result<Self, InsertError> {
        let target_inserter = Self::for_target(ast, target)?;
        if !target_inserter.list().uses_variable(variable) {
            return Err(InsertError::VariableNotUsedInTarget {
                variable: variable.to_string(),
                target: target.to_string(),
            });
        }
        Self::for_variable(ast, variable)
    }

    /// Anchors on the statement listing `reference`.
    ///
    /// Target declarations are searched first, then variable declarations,
    /// then `target_sources` statements. The first stage with a match wins; a
    /// stage with matches in several statements is an error.
    pub fn next_to_reference(ast: &'a [Statement], reference: &str) -> Result<Self, InsertError> {
        let matches_reference = reference_matcher(reference);

        for stage in SearchStage::ALL {
            let found: Vec<(&Statement, &ListItem)> = ast
                .iter()
                .filter(|s| stage.accepts(s))
                .filter_map(|s| s.list().find_string_item(&matches_reference).map(|item| (s, item)))
                .collect();

            match found.as_slice() {
                [] => continue,
                [(statement, item)] => {
                    debug!(reference, anchor = %statement.describe(), %stage, "reference found");
                    return Ok(Self {
                        statement: *statement,
                        matched_reference: Some(*item),
                    });
                }
                _ => {
                    let statements: Vec<&Statement> = found.iter().map(|(s, _)| *s).collect();
                    return Err(InsertError::AmbiguousReference {
                        reference: reference.to_string(),
                        stage: stage.to_string(),
                        candidates: describe_all(&statements),
                    });
                }
            }
        }

        Err(InsertError::ReferenceNotFound {
            reference: reference.to_string(),
        })
    }

    fn anchored(statement: &'a Statement) -> Self {
        Self {
            statement,
            matched_reference: None,
        }
    }

    pub fn statement(&self) -> &'a Statement {
        self.statement
    }

    pub fn list(&self) -> &'a CMakeStringList {
        self.statement.list()
    }

    pub fn matched_reference(&self) -> Option<&'a ListItem> {
        self.matched_reference
    }

    /// Inserts `source_item` after the last list item, separated by a space.
    ///
    /// When anchored through a reference with a directory part, the new item
    /// is placed in that same directory.
    pub fn insert_source(&self, source_item: &str) -> Result<InsertAction, InsertError> {
        let position = self
            .list()
            .end_location()
            .ok_or_else(|| InsertError::EmptyList {
                statement: self.statement.describe(),
            })?;

        let payload = match self.matched_reference {
            Some(reference) => with_reference_directory(reference, source_item)?,
            None => source_item.to_string(),
        };

        debug!(anchor = %self.statement.describe(), position, %payload, "insert source");
        Ok(InsertAction::new(position, payload))
    }

    /// Like [`Inserter::insert_source`], reusing the separator between the
    /// last two items of the anchor list in `full_source`.
    pub fn insert_source_considering_existing_whitespace(
        &self,
        source_item: &str,
        full_source: &str,
    ) -> Result<InsertAction, InsertError> {
        let action = self.insert_source(source_item)?;
        Ok(enhance_insert_action_with_whitespace_used_in_list(
            full_source,
            action,
            self.list(),
        )?)
    }

    pub fn insert_source_with(
        &self,
        source_item: &str,
        spacing: Spacing<'_>,
    ) -> Result<InsertAction, InsertError> {
        match spacing {
            Spacing::SingleSpace => self.insert_source(source_item),
            Spacing::MatchExisting { source } => {
                self.insert_source_considering_existing_whitespace(source_item, source)
            }
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Adds a source directly to the `add_library`/`add_executable` of `target`.
pub fn insert_source_item_directly_in_target(
    ast: &[Statement],
    source_item: &str,
    target: &str,
) -> Result<InsertAction, InsertError> {
    Inserter::for_target(ast, target)?.insert_source(source_item)
}

/// Adds a source to the `set()` of `variable`, checking that `target` uses it.
pub fn insert_source_item_in_variable_from_target(
    ast: &[Statement],
    source_item: &str,
    target: &str,
    variable: &str,
) -> Result<InsertAction, InsertError> {
    Inserter::for_variable_from_target(ast, target, variable)?.insert_source(source_item)
}

/// Adds a source to the `set()` of `variable`.
pub fn insert_source_item_in_variable(
    ast: &[Statement],
    source_item: &str,
    variable: &str,
) -> Result<InsertAction, InsertError> {
    Inserter::for_variable(ast, variable)?.insert_source(source_item)
}

/// Adds a source to whichever statement already lists `reference`.
pub fn insert_source_item_next_to_other_source(
    ast: &[Statement],
    source_item: &str,
    reference: &str,
) -> Result<InsertAction, InsertError> {
    Inserter::next_to_reference(ast, reference)?.insert_source(source_item)
}

pub fn insert_source_considering_existing_whitespace(
    inserter: &Inserter<'_>,
    source_item: &str,
    full_source: &str,
) -> Result<InsertAction, InsertError> {
    inserter.insert_source_considering_existing_whitespace(source_item, full_source)
}

// ============================================================================
// REFERENCE SEARCH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStage {
    TargetDeclarations,
    VariableDeclarations,
    TargetSources,
}

impl SearchStage {
    const ALL: [SearchStage; 3] = [
        SearchStage::TargetDeclarations,
        SearchStage::VariableDeclarations,
        SearchStage::TargetSources,
    ];

    fn accepts(&self, statement: &Statement) -> bool {
        match (self, statement) {
            (SearchStage::TargetDeclarations, Statement::AddLibrary(_))
            | (SearchStage::TargetDeclarations, Statement::AddExecutable(_))
            | (SearchStage::VariableDeclarations, Statement::SetNormalVariable(_))
            | (SearchStage::TargetSources, Statement::TargetSources(_)) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for SearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStage::TargetDeclarations => write!(f, "targets"),
            SearchStage::VariableDeclarations => write!(f, "variable declarations"),
            SearchStage::TargetSources => write!(f, "target_sources statements"),
        }
    }
}

/// A reference with a directory part must match exactly; a bare file name
/// matches any item with that file name.
fn reference_matcher(reference: &str) -> impl Fn(&str) -> bool {
    let reference = reference.trim_matches('"').to_string();
    let exact = is_cmake_path(&reference);
    let path_aware = PathAwareListItemString::new(reference.clone());

    move |text: &str| {
        if exact {
            text == reference
        } else {
            path_aware == text
        }
    }
}

/// Prefixes `source_item` with the directory of `reference`, if any.
fn with_reference_directory(reference: &ListItem, source_item: &str) -> Result<String, InsertError> {
    let parent_path = interpret_list_item_as_path(reference)?.parent_path();
    if parent_path.is_empty() {
        return Ok(source_item.to_string());
    }
    Ok(format!(
        "{}{}{}",
        strip_trailing_separator(parent_path),
        SEPARATOR,
        source_item
    ))
}

fn describe_all(statements: &[&Statement]) -> Vec<String> {
    statements.iter().map(|s| s.describe()).collect()
}
