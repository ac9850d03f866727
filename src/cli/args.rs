//! Defines the command-line arguments for `cmake-create-class`.
//!
//! This module uses the `clap` crate with its "derive" feature. Rules that
//! span several arguments are checked afterwards by [`validate_args`].

use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;

use crate::inserter::ExtensionCandidates;
use crate::path::is_cmake_path;

/// The main CLI argument structure.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "cmake-create-class",
    version,
    about = "Create a new class by modifying CMake scripts."
)]
pub struct Args {
    /// The cmake script where the class will be added.
    pub cmakelists: PathBuf,

    /// The name of the new class. In single file mode, the file name including extension.
    pub name: String,

    /// Add the new class in the same way the reference class was added.
    #[arg(short = 'r', long, visible_alias = "rc")]
    pub reference_class: Option<String>,

    /// Modify the cmake script in place instead of writing to stdout.
    #[arg(short, long)]
    pub inplace: bool,

    /// Single file mode, only add a single file.
    #[arg(short, long)]
    pub single_file: bool,

    /// Implies single file mode. Add the source file to the given cmake variable.
    #[arg(long, visible_alias = "var")]
    pub variable: Option<String>,

    /// Implies single file mode. Add the source file to the given cmake target.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Separate new items by a single space instead of the list's own separator.
    #[arg(long)]
    pub plain_spacing: bool,

    /// Print a diff of the change instead of the whole script.
    #[arg(long, conflicts_with = "inplace")]
    pub diff: bool,

    /// Print the recognized statements as JSON and exit.
    #[arg(long)]
    pub print_ast: bool,

    /// Header extension to try, in order. Replaces the default list.
    #[arg(long = "header-ext", value_name = "EXT")]
    pub header_extensions: Vec<String>,

    /// Implementation extension to try, in order. Replaces the default list.
    #[arg(long = "impl-ext", value_name = "EXT")]
    pub implementation_extensions: Vec<String>,

    /// Log lookup decisions to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The configured extensions, falling back to the defaults per role.
    pub fn extension_candidates(&self) -> ExtensionCandidates {
        let mut extensions = ExtensionCandidates::default();
        if !self.header_extensions.is_empty() {
            extensions.header = self.header_extensions.clone();
        }
        if !self.implementation_extensions.is_empty() {
            extensions.implementation = self.implementation_extensions.clone();
        }
        extensions
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CliError {
    #[error("It is not allowed to use backslashes in the {what}.")]
    #[diagnostic(code(cmake::cli::backslash), help("use `/` as the path separator"))]
    Backslash { what: &'static str },

    #[error("In single file mode, it is not allowed to specify a reference class and also a variable or target.")]
    #[diagnostic(code(cmake::cli::reference_with_anchor))]
    ReferenceWithAnchor,

    #[error("In single file mode, please specify a cmake variable or a cmake target using --variable or -t, --target respectively.")]
    #[diagnostic(code(cmake::cli::missing_anchor))]
    MissingAnchor,

    #[error("In single file mode, it is not allowed to specify both a variable and a target.")]
    #[diagnostic(code(cmake::cli::variable_and_target))]
    VariableAndTarget,

    #[error("When adding a class, a reference class is required. Please specify one with -r, --reference-class.")]
    #[diagnostic(code(cmake::cli::missing_reference))]
    MissingReference,

    #[error("When adding a class, the name of the class '{name}' can't be a path.")]
    #[diagnostic(code(cmake::cli::class_name_is_path))]
    ClassNameIsPath { name: String },
}

pub fn using_single_file_mode(args: &Args) -> bool {
    args.single_file || args.variable.is_some() || args.target.is_some()
}

pub fn validate_args(args: &Args) -> Result<(), CliError> {
    if args.name.contains('\\') {
        return Err(CliError::Backslash { what: "class name" });
    }
    if args
        .reference_class
        .as_deref()
        .is_some_and(|reference| reference.contains('\\'))
    {
        return Err(CliError::Backslash {
            what: "reference class",
        });
    }

    if using_single_file_mode(args) {
        validate_single_file_mode(args)
    } else {
        validate_class_mode(args)
    }
}

fn validate_single_file_mode(args: &Args) -> Result<(), CliError> {
    let has_anchor = args.variable.is_some() || args.target.is_some();
    match (&args.reference_class, has_anchor) {
        (Some(_), true) => Err(CliError::ReferenceWithAnchor),
        (Some(_), false) => Ok(()),
        (None, false) => Err(CliError::MissingAnchor),
        (None, true) if args.variable.is_some() && args.target.is_some() => {
            Err(CliError::VariableAndTarget)
        }
        (None, true) => Ok(()),
    }
}

fn validate_class_mode(args: &Args) -> Result<(), CliError> {
    if args.reference_class.is_none() {
        return Err(CliError::MissingReference);
    }
    if is_cmake_path(&args.name) {
        return Err(CliError::ClassNameIsPath {
            name: args.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            cmakelists: PathBuf::from("CMakeLists.txt"),
            name: "Foo".to_string(),
            ..Args::default()
        }
    }

    #[test]
    fn test_backslashes_are_rejected() {
        let mut given = args();
        given.reference_class = Some("Bar".into());
        given.name = "dir\\Foo".into();
        assert_eq!(
            validate_args(&given),
            Err(CliError::Backslash { what: "class name" })
        );

        given.name = "Foo".into();
        given.reference_class = Some("dir\\Bar".into());
        assert_eq!(
            validate_args(&given),
            Err(CliError::Backslash {
                what: "reference class"
            })
        );
    }

    #[test]
    fn test_single_file_mode_either_has_reference_or_variable_or_target() {
        let mut given = args();
        given.single_file = true;
        assert_eq!(validate_args(&given), Err(CliError::MissingAnchor));

        given.target = Some("faketarget".into());
        assert_eq!(validate_args(&given), Ok(()));
        given.target = None;

        given.variable = Some("fakevariable".into());
        assert_eq!(validate_args(&given), Ok(()));
        given.variable = None;

        given.reference_class = Some("ref".into());
        assert_eq!(validate_args(&given), Ok(()));
    }

    #[test]
    fn test_single_file_mode_without_ref_cant_have_both_variable_and_target() {
        let mut given = args();
        given.single_file = true;
        given.target = Some("faketarget".into());
        given.variable = Some("fakevariable".into());
        assert_eq!(validate_args(&given), Err(CliError::VariableAndTarget));
    }

    #[test]
    fn test_single_file_mode_with_reference_cant_have_variable_or_target() {
        let mut given = args();
        given.single_file = true;
        given.reference_class = Some("fakeref".into());
        assert_eq!(validate_args(&given), Ok(()));

        given.variable = Some("fakevariable".into());
        assert_eq!(validate_args(&given), Err(CliError::ReferenceWithAnchor));

        given.variable = None;
        given.target = Some("faketarget".into());
        assert_eq!(validate_args(&given), Err(CliError::ReferenceWithAnchor));
    }

    #[test]
    fn test_variable_or_target_implies_single_file_mode() {
        let mut given = args();
        given.variable = Some("fakevariable".into());
        assert!(using_single_file_mode(&given));
        assert_eq!(validate_args(&given), Ok(()));

        given.reference_class = Some("fakeref".into());
        assert_eq!(validate_args(&given), Err(CliError::ReferenceWithAnchor));
    }

    #[test]
    fn test_adding_class_requires_reference() {
        let mut given = args();
        assert_eq!(validate_args(&given), Err(CliError::MissingReference));

        given.reference_class = Some("fakeref".into());
        assert_eq!(validate_args(&given), Ok(()));
    }

    #[test]
    fn test_class_name_cant_be_a_path() {
        let mut given = args();
        given.reference_class = Some("fakeref".into());
        given.name = "src/Foo".into();
        assert!(matches!(
            validate_args(&given),
            Err(CliError::ClassNameIsPath { .. })
        ));

        given.name = "/Foo".into();
        assert_eq!(validate_args(&given), Ok(()));
    }

    #[test]
    fn test_extension_overrides_replace_defaults_per_role() {
        let mut given = args();
        given.header_extensions = vec![".h".into()];
        let extensions = given.extension_candidates();
        assert_eq!(extensions.header, [".h"]);
        assert_eq!(
            extensions.implementation,
            ExtensionCandidates::default().implementation
        );
    }
}
