//! Recovering the separator an author used between list items.

use tracing::trace;

use crate::ast::CMakeStringList;
use crate::errors::WhitespaceError;

use super::InsertAction;

/// The source text between the end of the second-to-last item and the start
/// of the last item of `list`.
pub fn content_between_second_to_last_and_last_item<'s>(
    full_source: &'s str,
    list: &CMakeStringList,
) -> Result<&'s str, WhitespaceError> {
    let [.., second_to_last, last] = list.items.as_slice() else {
        return Err(WhitespaceError::LessThanTwoItems { found: list.len() });
    };

    let start = second_to_last.end_location();
    let end = last.start_location();
    full_source
        .get(start..end)
        .ok_or(WhitespaceError::InvalidRange { start, end })
}

/// Replaces the separator of `action` with the one found in `list`.
///
/// With fewer than two items the action keeps its separator.
pub fn enhance_insert_action_with_whitespace_used_in_list(
    full_source: &str,
    action: InsertAction,
    list: &CMakeStringList,
) -> Result<InsertAction, WhitespaceError> {
    match content_between_second_to_last_and_last_item(full_source, list) {
        Ok(separator) => Ok(action.with_separator(separator)),
        Err(WhitespaceError::LessThanTwoItems { found }) => {
            trace!(found, "too few items to infer a separator");
            Ok(action)
        }
        Err(error) => Err(error),
    }
}
