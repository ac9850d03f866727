//! Adds source files and classes to CMake scripts next to existing ones.
//!
//! The pipeline is: [`syntax::scan`] the script into a [`CMakeAst`], compute
//! [`InsertAction`]s with the [`inserter`] module, then apply them to the
//! original text in descending position order.

pub mod ast;
pub mod cli;
pub mod errors;
pub mod inserter;
pub mod path;
pub mod syntax;

pub use crate::ast::{CMakeAst, CMakeStringList, ListItem, Statement};
pub use crate::errors::{ClassInsertError, ErrorCategory, InsertError, ParseError, PathError};
pub use crate::inserter::{InsertAction, Spacing};
pub use crate::syntax::{parse, scan};
