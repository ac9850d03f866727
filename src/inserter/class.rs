//! Adding a class, a header plus an implementation file, next to an existing
//! class.

use tracing::{debug, trace};

use crate::ast::Statement;
use crate::errors::{ClassInsertError, ErrorCategory, FileRole};

use super::source::Inserter;
use super::{InsertAction, Spacing};

pub const HEADER_EXTENSIONS: [&str; 5] = [".hpp", ".h", ".hh", ".h++", ".hxx"];
pub const IMPLEMENTATION_EXTENSIONS: [&str; 6] = [".c", ".C", ".c++", ".cc", ".cpp", ".cxx"];

/// Ordered file extensions tried for each half of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCandidates {
    pub header: Vec<String>,
    pub implementation: Vec<String>,
}

impl Default for ExtensionCandidates {
    fn default() -> Self {
        Self {
            header: HEADER_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            implementation: IMPLEMENTATION_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ExtensionCandidates {
    pub fn for_role(&self, role: FileRole) -> &[String] {
        match role {
            FileRole::Header => &self.header,
            FileRole::Implementation => &self.implementation,
        }
    }
}

/// The two computed insertions. Neither has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInsertActions {
    pub header: InsertAction,
    pub implementation: InsertAction,
}

impl ClassInsertActions {
    /// Both actions, in the order they must be applied to one source text.
    ///
    /// At a shared position the implementation goes first, leaving the header
    /// in front of it.
    pub fn in_application_order(&self) -> [&InsertAction; 2] {
        if self.header.position > self.implementation.position {
            [&self.header, &self.implementation]
        } else {
            [&self.implementation, &self.header]
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassInserter {
    extensions: ExtensionCandidates,
}

impl ClassInserter {
    pub fn new(extensions: ExtensionCandidates) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &ExtensionCandidates {
        &self.extensions
    }

    /// Computes where `class_name`'s header and implementation go, next to the
    /// files of `reference_class_name`.
    ///
    /// For each half, extensions are tried in order and the first one whose
    /// reference file is found is used for the new file as well. Both halves
    /// must be found.
    pub fn insert_class_next_to_other_class(
        &self,
        ast: &[Statement],
        class_name: &str,
        reference_class_name: &str,
        spacing: Spacing<'_>,
    ) -> Result<ClassInsertActions, ClassInsertError> {
        let header = self.insert_file(ast, class_name, reference_class_name, FileRole::Header, spacing)?;
        let implementation = self.insert_file(
            ast,
            class_name,
            reference_class_name,
            FileRole::Implementation,
            spacing,
        )?;
        Ok(ClassInsertActions {
            header,
            implementation,
        })
    }

    fn insert_file(
        &self,
        ast: &[Statement],
        class_name: &str,
        reference_class_name: &str,
        role: FileRole,
        spacing: Spacing<'_>,
    ) -> Result<InsertAction, ClassInsertError> {
        let (inserter, extension) = self.find_reference(ast, reference_class_name, role)?;
        let reference = format!("{reference_class_name}{extension}");

        inserter
            .insert_source_with(&format!("{class_name}{extension}"), spacing)
            .map_err(|source| ClassInsertError::Insert {
                role,
                reference,
                source,
            })
    }

    fn find_reference<'a>(
        &self,
        ast: &'a [Statement],
        reference_class_name: &str,
        role: FileRole,
    ) -> Result<(Inserter<'a>, String), ClassInsertError> {
        let extensions = self.extensions.for_role(role);

        for extension in extensions {
            let reference = format!("{reference_class_name}{extension}");
            match Inserter::next_to_reference(ast, &reference) {
                Ok(inserter) => {
                    debug!(%role, %reference, "reference file found");
                    return Ok((inserter, extension.clone()));
                }
                Err(error) if error.category() == ErrorCategory::NotFound => {
                    trace!(%role, %reference, "reference file not found");
                }
                Err(source) => {
                    return Err(ClassInsertError::Insert {
                        role,
                        reference,
                        source,
                    })
                }
            }
        }

        Err(ClassInsertError::NotFound {
            role,
            reference: reference_class_name.to_string(),
            tried: extensions.to_vec(),
        })
    }
}

/// Class insertion with the default extensions and single-space separators.
pub fn insert_class_next_to_other_class(
    ast: &[Statement],
    class_name: &str,
    reference_class_name: &str,
) -> Result<ClassInsertActions, ClassInsertError> {
    ClassInserter::default().insert_class_next_to_other_class(
        ast,
        class_name,
        reference_class_name,
        Spacing::SingleSpace,
    )
}

/// Class insertion with the default extensions, reusing the separators found
/// in `full_source`.
pub fn insert_class_next_to_other_class_with_whitespace_enhancement(
    full_source: &str,
    ast: &[Statement],
    class_name: &str,
    reference_class_name: &str,
) -> Result<ClassInsertActions, ClassInsertError> {
    ClassInserter::default().insert_class_next_to_other_class(
        ast,
        class_name,
        reference_class_name,
        Spacing::MatchExisting {
            source: full_source,
        },
    )
}
