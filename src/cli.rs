//! The `cmake-create-class` command-line interface.
//!
//! This module is the entry point of the binary and orchestrates the library:
//! read the script, scan it, compute the insertions, apply them and write the
//! result.

use std::fs;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::ast::Statement;
use crate::errors::InsertError;
use crate::inserter::{ClassInserter, InsertAction, Inserter, Spacing};
use crate::syntax::scan;

pub mod args;
pub mod output;

use args::{using_single_file_mode, validate_args, Args, CliError};

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    validate_args(&args)?;
    execute(&args)
}

/// Runs one invocation with already validated arguments.
pub fn execute(args: &Args) -> Result<()> {
    let path = &args.cmakelists;
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let ast = scan(&source);
    debug!(statements = ast.len(), file = %path.display(), "scanned");

    if args.print_ast {
        return output::print_ast(&ast).into_diagnostic();
    }

    let actions = compute_actions(args, &source, &ast)?;
    let modified = apply_actions(&source, actions)?;

    if args.inplace {
        fs::write(path, &modified)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", path.display()))
    } else if args.diff {
        output::print_change(&source, &modified).into_diagnostic()
    } else {
        output::print_source(&modified).into_diagnostic()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn compute_actions(args: &Args, source: &str, ast: &[Statement]) -> Result<Vec<InsertAction>> {
    let spacing = if args.plain_spacing {
        Spacing::SingleSpace
    } else {
        Spacing::MatchExisting { source }
    };

    if !using_single_file_mode(args) {
        let reference = args.reference_class.as_deref().unwrap_or_default();
        let inserter = ClassInserter::new(args.extension_candidates());
        let actions =
            inserter.insert_class_next_to_other_class(ast, &args.name, reference, spacing)?;
        return Ok(vec![actions.header, actions.implementation]);
    }

    let action = match (&args.reference_class, &args.variable, &args.target) {
        (Some(reference), _, _) => {
            Inserter::next_to_reference(ast, reference)?.insert_source_with(&args.name, spacing)?
        }
        (None, Some(variable), _) => {
            Inserter::for_variable(ast, variable)?.insert_source_with(&args.name, spacing)?
        }
        (None, None, Some(target)) => {
            Inserter::for_target(ast, target)?.insert_source_with(&args.name, spacing)?
        }
        (None, None, None) => return Err(CliError::MissingAnchor.into()),
    };
    Ok(vec![action])
}

/// Applies `actions` to `source` in descending position order.
///
/// Actions sharing a position end up in the text in the order given.
pub fn apply_actions(source: &str, actions: Vec<InsertAction>) -> Result<String, InsertError> {
    let mut ordered: Vec<(usize, InsertAction)> = actions.into_iter().enumerate().collect();
    ordered.sort_by(|(i, a), (j, b)| b.position.cmp(&a.position).then(j.cmp(i)));
    ordered
        .iter()
        .try_fold(source.to_string(), |text, (_, action)| action.apply(&text))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
