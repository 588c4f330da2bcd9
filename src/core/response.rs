//! Reply length limits
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

const ELLIPSIS: &str = "...";

/// Truncate text to `limit` bytes, adding an ellipsis if needed
///
/// Never splits a UTF-8 character. Limits too small for the ellipsis get a
/// bare cut instead.
pub fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    if limit < ELLIPSIS.len() {
        return text[..char_floor(text, limit)].to_string();
    }
    let end = char_floor(text, limit - ELLIPSIS.len());
    format!("{}{ELLIPSIS}", &text[..end])
}

/// Largest char boundary at or below `index`
fn char_floor(text: &str, index: usize) -> usize {
    let mut end = index;
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    end
}

/// Truncate text to fit the message limit
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}
