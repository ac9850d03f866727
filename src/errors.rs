//! Error types for parsing, lookup and insertion.
//!
//! Every failure the core can report is one of the enums below. They all derive
//! `miette::Diagnostic` so the command-line layer can render them with source
//! snippets, and they carry stable diagnostic codes for tests and tooling.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

// ============================================================================
// CATEGORIES
// ============================================================================

/// Coarse classification of an insertion failure.
///
/// Composite operations use this to decide whether a failure is control flow
/// (try the next candidate) or must be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A named target, variable or reference does not exist.
    NotFound,
    /// More than one statement satisfies a uniqueness requirement.
    Ambiguous,
    /// The request does not make sense for the node it was applied to.
    Structural,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "NotFound",
            ErrorCategory::Ambiguous => "Ambiguous",
            ErrorCategory::Structural => "Structural",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// The input does not start with a supported statement.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("Parse error: {message}")]
    #[diagnostic(
        code(cmake::parse::syntax),
        help("supported statements are set(), add_library(), add_executable() and target_sources()")
    )]
    Syntax {
        message: String,
        #[source_code]
        source_code: String,
        #[label("{message}")]
        span: SourceSpan,
    },

    /// The grammar matched but the matched text could not be turned into a node.
    #[error("Malformed {construct}")]
    #[diagnostic(code(cmake::parse::malformed))]
    Malformed {
        construct: String,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn malformed(construct: impl Into<String>, span: Span) -> Self {
        ParseError::Malformed {
            construct: construct.into(),
            span: to_source_span(span),
        }
    }
}

// ============================================================================
// PATH ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PathError {
    #[error("Only a list item string can be interpreted as a path, found variable use `${{{name}}}`")]
    #[diagnostic(code(cmake::path::not_a_list_item_string))]
    NotAListItemString { name: String },
}

// ============================================================================
// WHITESPACE ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum WhitespaceError {
    /// Recoverable: callers keep the default separator.
    #[error("At least two list items are needed to infer a separator, found {found}")]
    #[diagnostic(code(cmake::whitespace::too_few_items))]
    LessThanTwoItems { found: usize },

    #[error("The separator range {start}..{end} does not lie within the source text")]
    #[diagnostic(code(cmake::whitespace::invalid_range))]
    InvalidRange { start: usize, end: usize },
}

// ============================================================================
// INSERT ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InsertError {
    #[error("The target `{target}` is not found in any add_library() or add_executable() statement")]
    #[diagnostic(code(cmake::insert::target_not_found))]
    TargetNotFound { target: String },

    #[error("There are too many statements declaring target `{target}`: {}", .candidates.join(", "))]
    #[diagnostic(code(cmake::insert::target_ambiguous))]
    AmbiguousTarget {
        target: String,
        candidates: Vec<String>,
    },

    #[error("The variable declaration `{variable}` is not found")]
    #[diagnostic(code(cmake::insert::variable_not_found))]
    VariableNotFound { variable: String },

    #[error("There is more than one set() statement for variable `{variable}`: {}", .candidates.join(", "))]
    #[diagnostic(code(cmake::insert::variable_ambiguous))]
    AmbiguousVariable {
        variable: String,
        candidates: Vec<String>,
    },

    #[error("The variable `{variable}` is not used in target `{target}`")]
    #[diagnostic(
        code(cmake::insert::variable_not_used),
        help("the target's source list must contain ${{{variable}}}")
    )]
    VariableNotUsedInTarget { variable: String, target: String },

    #[error("The reference item `{reference}` is not declared in any supported statement")]
    #[diagnostic(code(cmake::insert::reference_not_found))]
    ReferenceNotFound { reference: String },

    #[error("The reference item `{reference}` is declared in multiple {stage}: {}", .candidates.join(", "))]
    #[diagnostic(code(cmake::insert::reference_ambiguous))]
    AmbiguousReference {
        reference: String,
        stage: String,
        candidates: Vec<String>,
    },

    #[error("The statement {statement} has no list items to insert after")]
    #[diagnostic(code(cmake::insert::empty_list))]
    EmptyList { statement: String },

    #[error("The insert position {position} is not a character boundary of a {len} byte source")]
    #[diagnostic(code(cmake::insert::position_out_of_bounds))]
    PositionOutOfBounds { position: usize, len: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Whitespace(#[from] WhitespaceError),
}

impl InsertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InsertError::TargetNotFound { .. }
            | InsertError::VariableNotFound { .. }
            | InsertError::VariableNotUsedInTarget { .. }
            | InsertError::ReferenceNotFound { .. } => ErrorCategory::NotFound,

            InsertError::AmbiguousTarget { .. }
            | InsertError::AmbiguousVariable { .. }
            | InsertError::AmbiguousReference { .. } => ErrorCategory::Ambiguous,

            InsertError::EmptyList { .. }
            | InsertError::PositionOutOfBounds { .. }
            | InsertError::Path(_)
            | InsertError::Whitespace(_) => ErrorCategory::Structural,
        }
    }
}

// ============================================================================
// CLASS INSERT ERRORS
// ============================================================================

/// Which half of a class a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Header,
    Implementation,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Header => write!(f, "header"),
            FileRole::Implementation => write!(f, "implementation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ClassInsertError {
    #[error(
        "The {role} file of reference class `{reference}` can't be found in (supported) cmake statements, tried extensions {}",
        .tried.join(" ")
    )]
    #[diagnostic(code(cmake::class::reference_not_found))]
    NotFound {
        role: FileRole,
        reference: String,
        tried: Vec<String>,
    },

    #[error("Cannot place the {role} file next to `{reference}`")]
    #[diagnostic(code(cmake::class::insert_failed))]
    Insert {
        role: FileRole,
        reference: String,
        #[source]
        #[diagnostic_source]
        source: InsertError,
    },
}

// ============================================================================
// HELPERS
// ============================================================================

pub(crate) fn to_source_span(span: Span) -> SourceSpan {
    let len = span.end.saturating_sub(span.start);
    SourceSpan::from((span.start, len))
}
