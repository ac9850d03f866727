//! CMake Statement Parser
//!
//! Converts CMake source into statement nodes with byte-accurate item
//! locations. The grammar lives in `grammar.pest`; this module turns pest pairs
//! into AST nodes and implements the two operation modes.

use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::ast::{
    AddExecutable, AddLibrary, CMakeAst, CMakeStringList, ListItem, ListItemString,
    SetNormalVariable, Span, Statement, TargetSources, VariableUse,
};
use crate::errors::{to_source_span, ParseError};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct CMakeParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses the statement at the start of `source`.
///
/// Leading whitespace and comments are skipped and text after the statement
/// is not inspected. The result holds one statement, or none when the
/// statement is a `set(ENV{...} ...)`, which is recognized only to be ignored.
pub fn parse(source: &str) -> Result<CMakeAst, ParseError> {
    let mut pairs = CMakeParser::parse(Rule::single_statement, source)
        .map_err(|e| convert_parse_error(e, source))?;

    let Some(pair) = pairs.next().and_then(|p| p.into_inner().next()) else {
        return Ok(vec![]);
    };
    Ok(build_statement(pair, 0)?.into_iter().collect())
}

/// Finds every non-overlapping supported statement in `source`, in order.
///
/// Unrecognized text is skipped. Comments and quoted strings outside of a
/// statement are never searched, and a keyword must not be preceded by an
/// identifier character.
pub fn scan(source: &str) -> CMakeAst {
    let mut statements = Vec::new();
    let mut pos = 0;
    let mut previous: Option<char> = None;

    while let Some(ch) = source[pos..].chars().next() {
        match ch {
            '#' => {
                pos = skip_comment(source, pos);
                previous = Some('\n');
                continue;
            }
            '"' => {
                pos = skip_quoted(source, pos);
                previous = Some('"');
                continue;
            }
            _ => {}
        }

        if may_start_statement(ch, previous) {
            if let Some((statement, end)) = match_statement_at(source, pos) {
                if let Some(statement) = statement {
                    debug!(statement = %statement.describe(), start = pos, end, "scan matched");
                    statements.push(statement);
                }
                pos = end;
                previous = Some(')');
                continue;
            }
            trace!(position = pos, "no statement at candidate position");
        }

        pos += ch.len_utf8();
        previous = Some(ch);
    }

    statements
}

// ============================================================================
// SCANNING
// ============================================================================

fn may_start_statement(ch: char, previous: Option<char>) -> bool {
    matches!(ch.to_ascii_lowercase(), 's' | 'a' | 't')
        && !previous.is_some_and(is_identifier_char)
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Tries to match a statement starting exactly at `pos`. Returns the built
/// node (if it is one that is kept) and the offset just past the match.
fn match_statement_at(source: &str, pos: usize) -> Option<(Option<Statement>, usize)> {
    let mut pairs = CMakeParser::parse(Rule::scanned_statement, &source[pos..]).ok()?;
    let pair = pairs.next()?.into_inner().next()?;
    let end = pos + pair.as_span().end();
    match build_statement(pair, pos) {
        Ok(statement) => Some((statement, end)),
        Err(error) => {
            debug!(%error, position = pos, "matched statement could not be built");
            None
        }
    }
}

fn skip_comment(source: &str, pos: usize) -> usize {
    match source[pos..].find('\n') {
        Some(offset) => pos + offset + 1,
        None => source.len(),
    }
}

fn skip_quoted(source: &str, pos: usize) -> usize {
    let mut chars = source[pos..].char_indices().skip(1);
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '"' => return pos + offset + 1,
            _ => {}
        }
    }
    source.len()
}

// ============================================================================
// AST BUILDERS
// ============================================================================

/// Builds a statement node. `offset` is added to every location, since the
/// scanner parses from the middle of the text.
fn build_statement(pair: Pair<Rule>, offset: usize) -> Result<Option<Statement>, ParseError> {
    let span = get_span(&pair, offset);

    match pair.as_rule() {
        Rule::set_env_variable => Ok(None),

        Rule::set_normal_variable => {
            let (name, list) = build_name_and_list(pair, offset)?;
            Ok(Some(SetNormalVariable::located(name, list, span).into()))
        }

        Rule::add_library => {
            let (name, list) = build_name_and_list(pair, offset)?;
            Ok(Some(AddLibrary::located(name, list, span).into()))
        }

        Rule::add_executable => {
            let (name, list) = build_name_and_list(pair, offset)?;
            Ok(Some(AddExecutable::located(name, list, span).into()))
        }

        Rule::target_sources => {
            let (name, list) = build_name_and_list(pair, offset)?;
            Ok(Some(TargetSources::located(name, list, span).into()))
        }

        rule => Err(ParseError::malformed(
            format!("statement: unsupported rule {:?}", rule),
            span,
        )),
    }
}

/// Collects the declared name and every list of a statement. Flag keywords are
/// dropped; scoped sub-lists are concatenated in source order.
fn build_name_and_list(
    pair: Pair<Rule>,
    offset: usize,
) -> Result<(String, CMakeStringList), ParseError> {
    let span = get_span(&pair, offset);
    let mut name = None;
    let mut items = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::declared_name => name = Some(inner.as_str().to_string()),
            Rule::list_content | Rule::variable_list_content => {
                items.extend(build_list_items(inner, offset)?);
            }
            Rule::scoped_list => {
                for scoped in inner.into_inner() {
                    if scoped.as_rule() == Rule::list_content {
                        items.extend(build_list_items(scoped, offset)?);
                    }
                }
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::malformed("statement: missing name", span))?;
    Ok((name, CMakeStringList::new(items)))
}

fn build_list_items(pair: Pair<Rule>, offset: usize) -> Result<Vec<ListItem>, ParseError> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::list_item)
        .map(|p| build_list_item(p, offset))
        .collect()
}

fn build_list_item(pair: Pair<Rule>, offset: usize) -> Result<ListItem, ParseError> {
    let span = get_span(&pair, offset);
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::malformed("list item", span))?;

    match inner.as_rule() {
        Rule::standalone_variable | Rule::quoted_variable => {
            let span = get_span(&inner, offset);
            let name = inner
                .into_inner()
                .find(|p| p.as_rule() == Rule::variable_name)
                .ok_or_else(|| ParseError::malformed("variable reference", span))?;
            Ok(VariableUse::located(name.as_str(), span).into())
        }

        Rule::literal_item => {
            let start = inner.as_span().start() + offset;
            Ok(ListItemString::located(inner.as_str(), start).into())
        }

        rule => Err(ParseError::malformed(
            format!("list item: unsupported rule {:?}", rule),
            span,
        )),
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn get_span(pair: &Pair<Rule>, offset: usize) -> Span {
    Span::new(pair.as_span().start(), pair.as_span().end()).shifted(offset)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &str) -> ParseError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span::new(pos, pos),
        pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
    };

    ParseError::Syntax {
        message: error.variant.message().into_owned(),
        source_code: source.to_string(),
        span: to_source_span(span),
    }
}
