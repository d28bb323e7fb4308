//! The Part-stream data model: one immutable record per token of the
//! linearised parse tree, plus the closed token/argument enumerations.

use std::fmt;

/// Maximum code-point length a single part may cover.
pub const PART_MAX_LENGTH: usize = 0xffff;

/// Maximum integer payload a part may carry.
pub const PART_MAX_VALUE: i32 = 0xffff;

/// Argument numbers are non-negative 31-bit integers.
pub const ARG_NUMBER_MAX: i64 = i32::MAX as i64;

/// Hard cap on nested message fragments.
pub const MAX_NESTING_LEVEL: i32 = 80;

/// Sentinel returned by numeric lookups on parts without a numeric value.
pub const NO_NUMERIC_VALUE: f64 = -123456789.0;

/// One token of the linearised parse tree.
///
/// `index` and `length` are in code points of the source pattern. The
/// meaning of `value` depends on `part_type`: the nesting level for message
/// brackets, the [`ArgType`] ordinal for argument brackets, the argument
/// number for `ArgNumber`, the integer itself for `ArgInt`, the slot in the
/// numeric side table for `ArgDouble`, and the code point to insert for
/// `InsertChar`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Part {
  pub(crate) part_type: PartType,
  pub(crate) index: u32,
  pub(crate) length: u16,
  pub(crate) value: i32,
}

impl Part {
  pub(crate) fn new(part_type: PartType, index: usize, length: usize, value: i32) -> Self {
    Part { part_type, index: index as u32, length: length as u16, value }
  }

  pub fn part_type(&self) -> PartType {
    self.part_type
  }

  /// Code-point offset into the source where this token begins.
  pub fn index(&self) -> usize {
    self.index as usize
  }

  /// Code-point length of the token (0 for synthetic insertion markers).
  pub fn length(&self) -> usize {
    self.length as usize
  }

  /// Code-point offset just past this token.
  pub fn limit(&self) -> usize {
    self.index as usize + self.length as usize
  }

  pub fn value(&self) -> i32 {
    self.value
  }

  /// The argument kind carried by `ArgStart`/`ArgLimit` parts; `None` for
  /// every other token kind.
  pub fn arg_type(&self) -> ArgType {
    match self.part_type {
      PartType::ArgStart | PartType::ArgLimit => ArgType::from_index(self.value as usize),
      _ => ArgType::None,
    }
  }
}

impl fmt::Display for Part {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}({})@{}", self.part_type, self.value, self.index)
  }
}

/// Token kinds of the part stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PartType {
  MsgStart,
  MsgLimit,
  SkipSyntax,
  InsertChar,
  ReplaceNumber,
  ArgStart,
  ArgLimit,
  ArgNumber,
  ArgName,
  ArgType,
  ArgStyle,
  ArgSelector,
  ArgInt,
  ArgDouble,
}

impl PartType {
  /// True for the kinds whose payload is a number: `ArgInt` carries the
  /// value itself, `ArgDouble` a slot in the numeric side table.
  pub fn has_numeric_value(&self) -> bool {
    matches!(self, PartType::ArgInt | PartType::ArgDouble)
  }
}

/// Argument kinds, stored as the payload of `ArgStart`/`ArgLimit` parts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ArgType {
  /// `{name}` without a type.
  #[default]
  None,
  /// `{name, kind}` or `{name, kind, style}` with an uninterpreted style.
  Simple,
  Choice,
  Plural,
  Select,
  SelectOrdinal,
}

impl ArgType {
  /// True for the kinds whose style is plural-shaped (`#` substitution,
  /// `offset:`, explicit `=N` selectors).
  pub fn has_plural_style(&self) -> bool {
    matches!(self, ArgType::Plural | ArgType::SelectOrdinal)
  }

  /// True for the kinds whose style contains nested sub-messages.
  pub fn is_complex_type(&self) -> bool {
    matches!(self, ArgType::Choice | ArgType::Plural | ArgType::Select | ArgType::SelectOrdinal)
  }

  /// Stable ordinal used as the `ArgStart`/`ArgLimit` payload.
  pub fn index(&self) -> usize {
    match self {
      ArgType::None => 0,
      ArgType::Simple => 1,
      ArgType::Choice => 2,
      ArgType::Plural => 3,
      ArgType::Select => 4,
      ArgType::SelectOrdinal => 5,
    }
  }

  pub(crate) fn from_index(index: usize) -> ArgType {
    match index {
      1 => ArgType::Simple,
      2 => ArgType::Choice,
      3 => ArgType::Plural,
      4 => ArgType::Select,
      5 => ArgType::SelectOrdinal,
      _ => ArgType::None,
    }
  }
}

/// Lowercase kind labels, as used in diagnostics ("plural", "selectordinal").
impl fmt::Display for ArgType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      ArgType::None => "none",
      ArgType::Simple => "simple",
      ArgType::Choice => "choice",
      ArgType::Plural => "plural",
      ArgType::Select => "select",
      ArgType::SelectOrdinal => "selectordinal",
    };
    f.write_str(label)
  }
}

/// Whether a lone apostrophe always starts a quoted literal
/// (`DoubleRequired`, pre-ICU-4.8) or only before a syntax-triggering
/// character (`DoubleOptional`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ApostropheMode {
  #[default]
  DoubleOptional,
  DoubleRequired,
}
