//! Failure taxonomy of the pattern parser and the part accessors.

use std::error::Error;
use std::fmt;

/// Errors raised while parsing a pattern or querying its parts. Each carries
/// a human-readable message that embeds a bounded snippet of the source near
/// the failure point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatternError {
  /// General bad syntax: missing comma, missing style for a complex
  /// argument, malformed offset, missing message fragment after a selector.
  InvalidArgument(String),
  /// `{`/`}` imbalance, or end of input while a fragment is open.
  UnmatchedBraces(String),
  /// Missing operator after a choice number, or an empty choice body.
  BadChoicePatternSyntax(String),
  /// Empty selector, missing `other` case, premature end of a plural or
  /// select body.
  BadPluralSelectPatternSyntax(String),
  /// A numeric token that cannot be parsed as a double.
  InvalidNumericValue(String),
  /// A structural limit was exceeded: nesting depth, part length, argument
  /// number, numeric-table size, or a part index out of range.
  OutOfBounds(String),
}

impl PatternError {
  pub fn message(&self) -> &str {
    match self {
      PatternError::InvalidArgument(msg)
      | PatternError::UnmatchedBraces(msg)
      | PatternError::BadChoicePatternSyntax(msg)
      | PatternError::BadPluralSelectPatternSyntax(msg)
      | PatternError::InvalidNumericValue(msg)
      | PatternError::OutOfBounds(msg) => msg,
    }
  }
}

impl fmt::Display for PatternError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

impl Error for PatternError {}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_display_forwards_the_message() {
    let error = PatternError::UnmatchedBraces("Unmatched '{' braces in message \"{a\"".to_string());
    assert_eq!(error.to_string(), "Unmatched '{' braces in message \"{a\"");
    assert_eq!(error.message(), error.to_string());
  }
}
