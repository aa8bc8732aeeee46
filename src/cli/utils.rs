//! CLI Utilities Module
//!
//! Small text helpers shared by the parser and the prompt loop.

/// Separator between commands on one input line.
pub const COMPOUND_SEPARATOR: &str = "&&";

/// Lower-case and trim a piece of user input.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Split a line into its `&&`-separated commands, in order.
///
/// Segments are returned untrimmed; an empty segment is kept so it reaches the
/// parser like any other input.
pub fn split_compound(line: &str) -> Vec<&str> {
    line.split(COMPOUND_SEPARATOR).collect()
}

/// Pad `text` on the left with spaces to `width` chars.
pub fn right_justify(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - len), text)
}

fn is_word_break(c: char) -> bool {
    c.is_whitespace() || c == '&'
}

/// Word before the cursor, for tab completion.
///
/// Words break on whitespace and `&`. Returns the byte offset where the word
/// starts and the word itself.
pub fn word_before(line: &str, pos: usize) -> (usize, &str) {
    let before = &line[..pos];
    let start = before
        .rfind(is_word_break)
        .map(|i| i + before[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    (start, &before[start..])
}
