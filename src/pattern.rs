//! The `MessagePattern` façade: owns one parse context, drives the parser,
//! and exposes the read-only [`Parts`] accessor over the linearised tree.

use log::trace;

use crate::context::ParseContext;
use crate::error::PatternError;
use crate::numeric;
use crate::parser::Parser;
use crate::part::{ApostropheMode, ArgType, Part, PartType, NO_NUMERIC_VALUE};
use crate::stream;

/// A parsed ICU MessageFormat pattern.
///
/// One instance owns one [`ParseContext`]; every `parse*` call fully resets
/// it, so an instance can be reused across patterns. After a successful
/// parse the part stream is reachable through [`MessagePattern::parts`].
///
/// # Example
///
/// ```
/// use message_pattern::MessagePattern;
///
/// let mut pattern = MessagePattern::new();
/// pattern.parse("Hello {name}.").unwrap();
/// assert!(pattern.has_named_arguments());
/// assert_eq!(pattern.parts().count_parts(), 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MessagePattern {
  pub(crate) ctx: ParseContext,
}

impl MessagePattern {
  pub fn new() -> Self {
    MessagePattern::default()
  }

  pub fn with_apostrophe_mode(mode: ApostropheMode) -> Self {
    MessagePattern { ctx: ParseContext::new(mode) }
  }

  /// Parses a full MessageFormat pattern string. The empty pattern is valid
  /// and yields a `MsgStart`/`MsgLimit` pair around an empty message.
  pub fn parse(&mut self, pattern: &str) -> Result<&mut Self, PatternError> {
    trace!("Parsing pattern ({} code points)", pattern.chars().count());
    self.ctx.pre_parse(pattern);
    Parser::new(&mut self.ctx).parse_message(0, 0, 0, ArgType::None)?;
    Ok(self)
  }

  /// Parses a bare choice style, without enclosing braces.
  pub fn parse_choice_style(&mut self, pattern: &str) -> Result<&mut Self, PatternError> {
    self.ctx.pre_parse(pattern);
    Parser::new(&mut self.ctx).parse_choice_style(0, 0)?;
    Ok(self)
  }

  /// Parses a bare plural style, without enclosing braces.
  pub fn parse_plural_style(&mut self, pattern: &str) -> Result<&mut Self, PatternError> {
    self.ctx.pre_parse(pattern);
    Parser::new(&mut self.ctx).parse_plural_or_select_style(ArgType::Plural, 0, 0)?;
    Ok(self)
  }

  /// Parses a bare select style, without enclosing braces.
  pub fn parse_select_style(&mut self, pattern: &str) -> Result<&mut Self, PatternError> {
    self.ctx.pre_parse(pattern);
    Parser::new(&mut self.ctx).parse_plural_or_select_style(ArgType::Select, 0, 0)?;
    Ok(self)
  }

  /// Resets the pattern and all parse state; keeps the apostrophe mode.
  pub fn clear(&mut self) {
    self.ctx.clear();
  }

  /// Resets the pattern and switches the apostrophe mode for later parses.
  pub fn clear_pattern_and_set_apostrophe_mode(&mut self, mode: ApostropheMode) {
    self.ctx.clear();
    self.ctx.apos_mode = mode;
  }

  pub fn get_apostrophe_mode(&self) -> ApostropheMode {
    self.ctx.apos_mode
  }

  /// The source string of the last parse, or `""` after `clear`.
  pub fn get_pattern_string(&self) -> &str {
    &self.ctx.msg
  }

  /// True iff at least one argument is referenced by name.
  pub fn has_named_arguments(&self) -> bool {
    self.ctx.has_arg_names
  }

  /// True iff at least one argument is referenced by number.
  pub fn has_numbered_arguments(&self) -> bool {
    self.ctx.has_arg_numbers
  }

  /// True iff the pattern contains a loose apostrophe that an auto-quoter
  /// would have to double.
  pub fn needs_auto_quoting(&self) -> bool {
    self.ctx.needs_auto_quoting
  }

  /// Returns an equivalent pattern with every loose apostrophe doubled, so
  /// that the result parses identically under `DoubleRequired` rules.
  /// Returns the source unchanged when nothing needs quoting.
  pub fn auto_quote_apostrophe_deep(&self) -> String {
    if !self.ctx.needs_auto_quoting {
      return self.ctx.msg.clone();
    }
    let mut chars = self.ctx.chars.clone();
    // insert back to front so recorded indexes stay valid
    for part in self.ctx.parts.iter().rev() {
      if part.part_type() == PartType::InsertChar {
        if let Some(c) = char::from_u32(part.value() as u32) {
          chars.insert(part.index(), c);
        }
      }
    }
    chars.into_iter().collect()
  }

  /// Read-only accessor over the part stream.
  pub fn parts(&self) -> Parts<'_> {
    Parts { pattern: self }
  }

  /// Classifies an argument name: the numeric value for a valid argument
  /// number, [`numeric::ARG_NAME_NOT_NUMBER`] for a valid identifier, and
  /// [`numeric::ARG_NAME_NOT_VALID`] otherwise.
  pub fn validate_argument_name(name: &str) -> i64 {
    if !stream::is_identifier(name) {
      return numeric::ARG_NAME_NOT_VALID;
    }
    match numeric::parse_arg_number_from_str(name, 0, name.chars().count()) {
      numeric::ARG_VALUE_OVERFLOW => numeric::ARG_NAME_NOT_VALID,
      classified => classified,
    }
  }
}

/// Read-only queries over a parsed pattern's part stream.
#[derive(Clone, Copy, Debug)]
pub struct Parts<'a> {
  pattern: &'a MessagePattern,
}

impl<'a> Parts<'a> {
  /// Number of parts; 0 iff no parse has run.
  pub fn count_parts(&self) -> usize {
    self.pattern.ctx.parts.len()
  }

  /// Bounds-checked indexed access.
  pub fn get_part(&self, index: usize) -> Result<Part, PatternError> {
    self
      .pattern
      .ctx
      .parts
      .get(index)
      .copied()
      .ok_or_else(|| PatternError::OutOfBounds(format!("Part index {index} out of range")))
  }

  pub fn get_part_type(&self, index: usize) -> Result<PartType, PatternError> {
    self.get_part(index).map(|part| part.part_type())
  }

  /// The pattern index at which the part at `index` begins.
  pub fn get_pattern_index(&self, index: usize) -> Result<usize, PatternError> {
    self.get_part(index).map(|part| part.index())
  }

  /// The source substring covered by `part`, in code points.
  pub fn get_substring(&self, part: &Part) -> String {
    let chars = &self.pattern.ctx.chars;
    chars[part.index().min(chars.len())..part.limit().min(chars.len())].iter().collect()
  }

  pub fn part_substring_matches(&self, part: &Part, s: &str) -> bool {
    let chars = &self.pattern.ctx.chars;
    part.limit() <= chars.len()
      && part.length() == s.chars().count()
      && s.chars().enumerate().all(|(offset, c)| chars[part.index() + offset] == c)
  }

  /// The numeric value of an `ArgInt`/`ArgDouble` part;
  /// [`NO_NUMERIC_VALUE`] for any other part kind or a missing table slot.
  pub fn get_numeric_value(&self, part: &Part) -> f64 {
    match part.part_type() {
      PartType::ArgInt => part.value() as f64,
      PartType::ArgDouble => {
        self.pattern.ctx.numeric_values.get(part.value() as usize).copied().unwrap_or(NO_NUMERIC_VALUE)
      },
      _ => NO_NUMERIC_VALUE,
    }
  }

  /// The `offset:` value of a plural argument, given the index of the first
  /// part after its name/number; 0 when no offset was specified.
  pub fn get_plural_offset(&self, plural_start: usize) -> Result<f64, PatternError> {
    let part = self.get_part(plural_start)?;
    if part.part_type().has_numeric_value() {
      Ok(self.get_numeric_value(&part))
    } else {
      Ok(0.0)
    }
  }

  /// The index of the `MsgLimit`/`ArgLimit` matching the start part at
  /// `start`, or `start` itself when the part there is not a start.
  pub fn get_limit_part_index(&self, start: usize) -> usize {
    self.pattern.ctx.limit_part_indexes.get(&start).copied().unwrap_or(start)
  }

  /// Iterates the parts in stream order.
  pub fn iter(&self) -> impl Iterator<Item = Part> + 'a {
    self.pattern.ctx.parts.iter().copied()
  }
}

impl<'a> IntoIterator for Parts<'a> {
  type Item = Part;
  type IntoIter = std::iter::Copied<std::slice::Iter<'a, Part>>;

  fn into_iter(self) -> Self::IntoIter {
    self.pattern.ctx.parts.iter().copied()
  }
}
