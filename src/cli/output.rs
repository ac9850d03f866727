//! Handles all user-facing output for the CLI.
//!
//! Rewritten scripts, coloured diffs and the JSON rendering of the AST are
//! all produced here.

use std::io::{self, Write};

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Statement;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints the rewritten script unchanged to stdout.
pub fn print_source(source: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(source.as_bytes())?;
    handle.flush()
}

/// Prints a line diff between the original and the rewritten script.
pub fn print_change(original: &str, modified: &str) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_diff(&mut stdout, original, modified)
}

/// Prints the statements as pretty JSON.
pub fn print_ast(ast: &[Statement]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(ast).map_err(io::Error::from)?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

pub(crate) fn write_diff<W: WriteColor>(out: &mut W, original: &str, modified: &str) -> io::Result<()> {
    let changeset = Changeset::new(original, modified, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                out.reset()?;
                write_prefixed(out, ' ', x)?;
            }
            Difference::Add(x) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write_prefixed(out, '+', x)?;
            }
            Difference::Rem(x) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                write_prefixed(out, '-', x)?;
            }
        }
    }
    out.reset()
}

// A diff chunk may hold several lines; mark each of them.
fn write_prefixed<W: WriteColor>(out: &mut W, marker: char, chunk: &str) -> io::Result<()> {
    for line in chunk.split('\n') {
        writeln!(out, "{marker}{line}")?;
    }
    Ok(())
}
