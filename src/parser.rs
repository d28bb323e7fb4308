//! Recursive descent parser over the code-point stream. One parse mutates a
//! single [`ParseContext`]; sub-messages are handled by recursing into
//! [`Parser::parse_message`] with the enclosing argument kind as the parent.

use color_eyre::owo_colors::OwoColorize;
use log::trace;

use crate::context::ParseContext;
use crate::error::PatternError;
use crate::numeric::{parse_arg_number_at, ARG_NAME_NOT_NUMBER, ARG_VALUE_OVERFLOW};
use crate::part::{ApostropheMode, ArgType, PartType, MAX_NESTING_LEVEL, PART_MAX_LENGTH, PART_MAX_VALUE};
use crate::stream;

pub(crate) struct Parser<'a> {
  ctx: &'a mut ParseContext,
}

impl<'a> Parser<'a> {
  pub(crate) fn new(ctx: &'a mut ParseContext) -> Self {
    Parser { ctx }
  }

  fn len(&self) -> usize {
    self.ctx.chars.len()
  }

  fn char_at(&self, index: usize) -> char {
    self.ctx.chars[index]
  }

  fn find_char(&self, needle: char, from: usize) -> Option<usize> {
    (from..self.len()).find(|&i| self.ctx.chars[i] == needle)
  }

  fn context_at(&self, index: usize) -> String {
    stream::error_context(&self.ctx.chars, index)
  }

  fn unmatched_braces(&self) -> PatternError {
    PatternError::UnmatchedBraces(format!("Unmatched '{{' braces in message {}", self.context_at(0)))
  }

  fn bad_arg_syntax(&self, name_index: usize) -> PatternError {
    PatternError::InvalidArgument(format!("Bad argument syntax: {}", self.context_at(name_index)))
  }

  /// Parses one message fragment starting at `index`. Returns the position
  /// after the consumed terminator, except inside a choice style where the
  /// terminating `}` or `|` is left for the choice loop.
  pub(crate) fn parse_message(
    &mut self,
    index: usize,
    msg_start_length: usize,
    nesting_level: i32,
    parent_type: ArgType,
  ) -> Result<usize, PatternError> {
    if nesting_level > MAX_NESTING_LEVEL {
      return Err(PatternError::OutOfBounds("Nesting level exceeds maximum value".to_string()));
    }
    let msg_start = self.ctx.parts.len();
    self.ctx.add_part(PartType::MsgStart, index, msg_start_length, nesting_level);
    let mut index = index + msg_start_length;
    while index < self.len() {
      let c = self.char_at(index);
      index += 1;
      if c == '\'' {
        index = self.parse_apostrophe(index, parent_type);
      } else if parent_type.has_plural_style() && c == '#' {
        // The unquoted # stands for the plural number minus the offset.
        self.ctx.add_part(PartType::ReplaceNumber, index - 1, 1, 0);
      } else if c == '{' {
        index = self.parse_arg(index - 1, 1, nesting_level)?;
      } else if (nesting_level > 0 && c == '}') || (parent_type == ArgType::Choice && c == '|') {
        // Close this fragment. In a choice style the terminator stays
        // visible to the choice loop and the `}` substring is reported by
        // the enclosing ArgLimit, so the MsgLimit length is 0 there.
        let limit_length = usize::from(parent_type != ArgType::Choice);
        self.ctx.add_limit_part(msg_start, PartType::MsgLimit, index - 1, limit_length, nesting_level);
        if parent_type == ArgType::Choice {
          return Ok(index - 1);
        }
        return Ok(index);
      }
      // anything else is literal text
    }
    if nesting_level > 0 && !self.in_top_level_choice_message(nesting_level, parent_type) {
      return Err(self.unmatched_braces());
    }
    self.ctx.add_limit_part(msg_start, PartType::MsgLimit, index, 0, nesting_level);
    Ok(index)
  }

  /// The top-level fragment of a bare choice parse may run to end of input.
  fn in_top_level_choice_message(&self, nesting_level: i32, parent_type: ArgType) -> bool {
    nesting_level == 1
      && parent_type == ArgType::Choice
      && self.ctx.parts.first().map(|part| part.part_type() != PartType::MsgStart).unwrap_or(false)
  }

  /// Handles the character after an apostrophe. `index` points just past
  /// the apostrophe; returns the position to resume scanning at.
  fn parse_apostrophe(&mut self, index: usize, parent_type: ArgType) -> usize {
    if index == self.len() {
      // The apostrophe is the last character; auto-quoting will double it.
      self.ctx.add_part(PartType::InsertChar, index, 0, 0x27);
      self.ctx.needs_auto_quoting = true;
      return index;
    }
    let c = self.char_at(index);
    if c == '\'' {
      // Doubled apostrophe: one literal apostrophe, skip the second.
      self.ctx.add_part(PartType::SkipSyntax, index, 1, 0);
      return index + 1;
    }
    if self.is_quote_trigger(c, parent_type) {
      // Quoted literal text; skip the quote-starting apostrophe.
      self.ctx.add_part(PartType::SkipSyntax, index - 1, 1, 0);
      let mut index = index;
      loop {
        match self.find_char('\'', index + 1) {
          Some(pos) => {
            if pos + 1 < self.len() && self.char_at(pos + 1) == '\'' {
              // A doubled apostrophe inside the quoted region; the quote
              // continues after it.
              self.ctx.add_part(PartType::SkipSyntax, pos, 1, 0);
              self.ctx.add_part(PartType::SkipSyntax, pos + 1, 1, 0);
              index = pos + 1;
            } else {
              // The quote-ending apostrophe.
              self.ctx.add_part(PartType::SkipSyntax, pos, 1, 0);
              return pos + 1;
            }
          },
          None => {
            // The quoted text reaches the end of the message.
            let end = self.len();
            self.ctx.add_part(PartType::InsertChar, end, 0, 0x27);
            self.ctx.needs_auto_quoting = true;
            return end;
          },
        }
      }
    }
    // A literal apostrophe before plain text; auto-quoting will double it.
    self.ctx.add_part(PartType::InsertChar, index - 1, 0, 0x27);
    self.ctx.needs_auto_quoting = true;
    index
  }

  fn is_quote_trigger(&self, c: char, parent_type: ArgType) -> bool {
    self.ctx.apos_mode == ApostropheMode::DoubleRequired
      || c == '{'
      || c == '}'
      || (parent_type == ArgType::Choice && c == '|')
      || (parent_type.has_plural_style() && c == '#')
  }

  /// Parses one `{...}` argument. `index` points at the opening brace;
  /// returns the position after the closing brace.
  fn parse_arg(&mut self, index: usize, arg_start_length: usize, nesting_level: i32) -> Result<usize, PatternError> {
    let arg_start = self.ctx.parts.len();
    let mut arg_type = ArgType::None;
    self.ctx.add_part(PartType::ArgStart, index, arg_start_length, arg_type.index() as i32);
    let name_index = stream::skip_white_space(&self.ctx.chars, index + arg_start_length);
    if name_index == self.len() {
      return Err(self.unmatched_braces());
    }
    let mut index = stream::skip_identifier(&self.ctx.chars, name_index);
    let number = parse_arg_number_at(&self.ctx.chars, name_index, index);
    if number >= 0 {
      let length = index - name_index;
      if length > PART_MAX_LENGTH || number > PART_MAX_VALUE as i64 {
        return Err(PatternError::OutOfBounds(format!("Argument number too large: {}", self.context_at(name_index))));
      }
      self.ctx.has_arg_numbers = true;
      self.ctx.add_part(PartType::ArgNumber, name_index, length, number as i32);
    } else if number == ARG_NAME_NOT_NUMBER {
      let length = index - name_index;
      if length > PART_MAX_LENGTH {
        return Err(PatternError::OutOfBounds(format!("Argument name too long: {}", self.context_at(name_index))));
      }
      self.ctx.has_arg_names = true;
      self.ctx.add_part(PartType::ArgName, name_index, length, 0);
    } else if number == ARG_VALUE_OVERFLOW {
      return Err(PatternError::OutOfBounds(format!("Argument number too large: {}", self.context_at(name_index))));
    } else {
      return Err(self.bad_arg_syntax(name_index));
    }
    index = stream::skip_white_space(&self.ctx.chars, index);
    if index == self.len() {
      return Err(self.unmatched_braces());
    }
    let mut c = self.char_at(index);
    if c == '}' {
      // untyped argument, all done
    } else if c != ',' {
      return Err(self.bad_arg_syntax(name_index));
    } else {
      // parse the argument kind: a run of ASCII letters
      let type_index = stream::skip_white_space(&self.ctx.chars, index + 1);
      let mut type_limit = type_index;
      while type_limit < self.len() && stream::is_arg_type_char(self.char_at(type_limit)) {
        type_limit += 1;
      }
      let length = type_limit - type_index;
      index = stream::skip_white_space(&self.ctx.chars, type_limit);
      if index == self.len() {
        return Err(self.unmatched_braces());
      }
      c = self.char_at(index);
      if length == 0 || (c != ',' && c != '}') {
        return Err(self.bad_arg_syntax(name_index));
      }
      if length > PART_MAX_LENGTH {
        return Err(PatternError::OutOfBounds(format!("Argument type name too long: {}", self.context_at(type_index))));
      }
      arg_type = ArgType::Simple;
      if length == 6 {
        if stream::equals_keyword_ignore_case(&self.ctx.chars, type_index, type_limit, "choice") {
          arg_type = ArgType::Choice;
        } else if stream::equals_keyword_ignore_case(&self.ctx.chars, type_index, type_limit, "plural") {
          arg_type = ArgType::Plural;
        } else if stream::equals_keyword_ignore_case(&self.ctx.chars, type_index, type_limit, "select") {
          arg_type = ArgType::Select;
        }
      } else if length == 13
        && stream::equals_keyword_ignore_case(&self.ctx.chars, type_index, type_limit, "selectordinal")
      {
        arg_type = ArgType::SelectOrdinal;
      }
      trace!(
        "Argument {} resolved as {}",
        self.ctx.chars[name_index..stream::skip_identifier(&self.ctx.chars, name_index)]
          .iter()
          .collect::<String>()
          .purple(),
        arg_type.cyan()
      );
      // back-patch the ArgStart payload before anything else is appended
      self.ctx.set_part_value(arg_start, arg_type.index() as i32);
      if arg_type == ArgType::Simple {
        self.ctx.add_part(PartType::ArgType, type_index, length, 0);
      }
      if c == '}' {
        if arg_type != ArgType::Simple {
          return Err(PatternError::InvalidArgument(format!(
            "No style field for complex argument: {}",
            self.context_at(name_index)
          )));
        }
      } else {
        // skip the ',' and parse the style body
        index += 1;
        index = match arg_type {
          ArgType::Simple => self.parse_simple_style(index)?,
          ArgType::Choice => self.parse_choice_style(index, nesting_level)?,
          _ => self.parse_plural_or_select_style(arg_type, index, nesting_level)?,
        };
      }
    }
    // the style parsers leave the cursor on the closing '}'
    self.ctx.add_limit_part(arg_start, PartType::ArgLimit, index, 1, arg_type.index() as i32);
    Ok(index + 1)
  }

  /// Scans an uninterpreted simple style up to its terminating `}`,
  /// balancing nested braces and jumping over quoted spans verbatim.
  fn parse_simple_style(&mut self, start: usize) -> Result<usize, PatternError> {
    let mut nested_braces = 0;
    let mut index = start;
    while index < self.len() {
      let c = self.char_at(index);
      index += 1;
      match c {
        '\'' => {
          // Quoted text is part of the style and is not interpreted here.
          match self.find_char('\'', index) {
            Some(pos) => index = pos + 1,
            None => {
              return Err(PatternError::InvalidArgument(format!(
                "Quoted literal argument style text reaches to the end of the message: {}",
                self.context_at(start)
              )));
            },
          }
        },
        '{' => nested_braces += 1,
        '}' => {
          if nested_braces > 0 {
            nested_braces -= 1;
          } else {
            index -= 1;
            let length = index - start;
            if length > PART_MAX_LENGTH {
              return Err(PatternError::OutOfBounds(format!(
                "Argument style text too long: {}",
                self.context_at(start)
              )));
            }
            self.ctx.add_part(PartType::ArgStyle, start, length, 0);
            return Ok(index);
          }
        },
        _ => {},
      }
    }
    Err(self.unmatched_braces())
  }

  /// Parses the `|`-separated (number, operator, message) triples of a
  /// choice style. Returns the position of the closing `}`, or the end of
  /// input for a bare choice parse.
  pub(crate) fn parse_choice_style(&mut self, index: usize, nesting_level: i32) -> Result<usize, PatternError> {
    let start = index;
    let mut index = stream::skip_white_space(&self.ctx.chars, index);
    if index == self.len() || self.char_at(index) == '}' {
      return Err(PatternError::BadChoicePatternSyntax(format!(
        "Missing choice argument pattern: {}",
        self.context_at(start)
      )));
    }
    loop {
      let number_index = index;
      index = stream::skip_double(&self.ctx.chars, index);
      let length = index - number_index;
      if length == 0 {
        return Err(PatternError::BadChoicePatternSyntax(format!(
          "Bad choice pattern syntax: {}",
          self.context_at(start)
        )));
      }
      if length > PART_MAX_LENGTH {
        return Err(PatternError::OutOfBounds(format!("Choice number too long: {}", self.context_at(number_index))));
      }
      self.parse_double(number_index, index, true)?;
      index = stream::skip_white_space(&self.ctx.chars, index);
      if index == self.len() {
        return Err(PatternError::BadChoicePatternSyntax(format!(
          "Bad choice pattern syntax: {}",
          self.context_at(start)
        )));
      }
      let c = self.char_at(index);
      if !(c == '#' || c == '<' || c == '\u{2264}') {
        return Err(PatternError::BadChoicePatternSyntax(format!(
          "Expected choice separator (#<\u{2264}) instead of '{}': {}",
          c,
          self.context_at(start)
        )));
      }
      self.ctx.add_part(PartType::ArgSelector, index, 1, 0);
      index = self.parse_message(index + 1, 0, nesting_level + 1, ArgType::Choice)?;
      if index == self.len() {
        return Ok(index);
      }
      if self.char_at(index) == '}' {
        if !self.ctx.in_message_format_pattern(nesting_level) {
          return Err(PatternError::BadChoicePatternSyntax(format!(
            "Bad choice pattern syntax: {}",
            self.context_at(start)
          )));
        }
        return Ok(index);
      }
      // the fragment stopped on a '|'
      index = stream::skip_white_space(&self.ctx.chars, index + 1);
    }
  }

  /// Parses the selector/message pairs of a plural, selectordinal or select
  /// style. Returns the position of the closing `}`, or the end of input
  /// for a bare style parse.
  pub(crate) fn parse_plural_or_select_style(
    &mut self,
    arg_type: ArgType,
    index: usize,
    nesting_level: i32,
  ) -> Result<usize, PatternError> {
    let start = index;
    let mut index = index;
    let mut is_empty = true;
    let mut has_other = false;
    loop {
      index = stream::skip_white_space(&self.ctx.chars, index);
      let eos = index == self.len();
      if eos || self.char_at(index) == '}' {
        if eos && self.ctx.msg_limit_balance() > 0 {
          return Err(self.unmatched_braces());
        }
        if eos == self.ctx.in_message_format_pattern(nesting_level) {
          return Err(PatternError::BadPluralSelectPatternSyntax(format!(
            "Bad {} pattern syntax: {}",
            arg_type,
            self.context_at(start)
          )));
        }
        if !has_other {
          return Err(PatternError::BadPluralSelectPatternSyntax(format!(
            "Missing 'other' keyword in {} pattern: {}",
            arg_type,
            self.context_at(start)
          )));
        }
        return Ok(index);
      }
      let selector_index = index;
      if arg_type.has_plural_style() && self.char_at(selector_index) == '=' {
        // explicit-value selector =N
        index = stream::skip_double(&self.ctx.chars, index + 1);
        let length = index - selector_index;
        if length == 1 {
          return Err(PatternError::BadPluralSelectPatternSyntax(format!(
            "Bad {} pattern syntax: {}",
            arg_type,
            self.context_at(start)
          )));
        }
        if length > PART_MAX_LENGTH {
          return Err(PatternError::OutOfBounds(format!(
            "Argument selector too long: {}",
            self.context_at(selector_index)
          )));
        }
        self.ctx.add_part(PartType::ArgSelector, selector_index, length, 0);
        self.parse_double(selector_index + 1, index, false)?;
      } else {
        index = stream::skip_identifier(&self.ctx.chars, index);
        let length = index - selector_index;
        if length == 0 {
          return Err(PatternError::BadPluralSelectPatternSyntax(format!(
            "Bad {} pattern syntax: {}",
            arg_type,
            self.context_at(start)
          )));
        }
        if arg_type.has_plural_style()
          && length == 6
          && index < self.len()
          && stream::starts_with_at(&self.ctx.chars, selector_index, "offset:")
        {
          // the plural offset, not a selector
          if !is_empty {
            return Err(PatternError::InvalidArgument(format!(
              "Plural argument 'offset:' (if present) must precede key-message pairs: {}",
              self.context_at(start)
            )));
          }
          let value_index = stream::skip_white_space(&self.ctx.chars, index + 1);
          index = stream::skip_double(&self.ctx.chars, value_index);
          if index == value_index {
            return Err(PatternError::InvalidArgument(format!(
              "Missing value for plural 'offset:' {}",
              self.context_at(start)
            )));
          }
          if index - value_index > PART_MAX_LENGTH {
            return Err(PatternError::OutOfBounds(format!(
              "Plural offset value too long: {}",
              self.context_at(value_index)
            )));
          }
          self.parse_double(value_index, index, false)?;
          is_empty = false;
          continue;
        }
        if length > PART_MAX_LENGTH {
          return Err(PatternError::OutOfBounds(format!(
            "Argument selector too long: {}",
            self.context_at(selector_index)
          )));
        }
        self.ctx.add_part(PartType::ArgSelector, selector_index, length, 0);
        if length == 5 && stream::starts_with_at(&self.ctx.chars, selector_index, "other") {
          has_other = true;
        }
      }
      // the selector must be followed by a {message} fragment
      index = stream::skip_white_space(&self.ctx.chars, index);
      if index == self.len() || self.char_at(index) != '{' {
        return Err(PatternError::InvalidArgument(format!(
          "No message fragment after {} selector: {}",
          arg_type,
          self.context_at(selector_index)
        )));
      }
      index = self.parse_message(index, 1, nesting_level + 1, arg_type)?;
      is_empty = false;
    }
  }

  /// Parses `chars[start..limit)` as a number. Integral values whose
  /// magnitude fits the part payload become an `ArgInt`; everything else is
  /// stored in the numeric side table behind an `ArgDouble`.
  fn parse_double(&mut self, start: usize, limit: usize, allow_infinity: bool) -> Result<(), PatternError> {
    debug_assert!(start < limit);
    let mut value: i64 = 0;
    let mut is_negative = false;
    let mut i = start;
    let mut c = self.char_at(i);
    i += 1;
    if c == '-' {
      is_negative = true;
      if i == limit {
        return Err(self.bad_numeric_value(start));
      }
      c = self.char_at(i);
      i += 1;
    } else if c == '+' {
      if i == limit {
        return Err(self.bad_numeric_value(start));
      }
      c = self.char_at(i);
      i += 1;
    }
    if c == '\u{221e}' {
      if allow_infinity && i == limit {
        let infinity = if is_negative { f64::NEG_INFINITY } else { f64::INFINITY };
        return self.ctx.add_arg_double_part(infinity, start, limit - start);
      }
      return Err(self.bad_numeric_value(start));
    }
    // fast path for small integers
    while c.is_ascii_digit() {
      value = value * 10 + (c as u8 - b'0') as i64;
      if value > PART_MAX_VALUE as i64 {
        break;
      }
      if i == limit {
        let signed = if is_negative { -value } else { value };
        self.ctx.add_part(PartType::ArgInt, start, limit - start, signed as i32);
        return Ok(());
      }
      c = self.char_at(i);
      i += 1;
    }
    let text: String = self.ctx.chars[start..limit].iter().collect();
    match text.parse::<f64>() {
      Ok(parsed) => self.ctx.add_arg_double_part(parsed, start, limit - start),
      Err(_) => Err(self.bad_numeric_value(start)),
    }
  }

  fn bad_numeric_value(&self, start: usize) -> PatternError {
    PatternError::InvalidNumericValue(format!("Bad syntax for numeric value: {}", self.context_at(start)))
  }
}
