//! Splitting raw command lines into argument tokens.
//!
//! There is no quoting or escaping: a delimiter character can never appear
//! inside a token, and runs of consecutive delimiters collapse so that no
//! empty tokens are ever produced.

/// Characters that separate arguments.
pub const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Lazily iterate over the tokens of `line`.
///
/// The iterator is finite and can be recreated from the same line any number
/// of times. An empty or all-delimiter line yields nothing.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(DELIMITERS).filter(|token| !token.is_empty())
}

/// Split `line` into an owned argument vector.
///
/// Element 0 is the command name; an empty vector means the line contained
/// nothing to execute.
pub fn split_line(line: &str) -> Vec<String> {
    tokens(line).map(str::to_owned).collect()
}
