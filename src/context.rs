//! The mutable shared state of one parse: the source text, its code-point
//! view, the growing part list, the numeric side table, the start-to-limit
//! index map and the parse flags.

use std::collections::HashMap;

use crate::error::PatternError;
use crate::part::{ApostropheMode, Part, PartType, PART_MAX_VALUE};
use crate::stream;

#[derive(Clone, Debug, Default)]
pub(crate) struct ParseContext {
  pub(crate) msg: String,
  pub(crate) chars: Vec<char>,
  pub(crate) parts: Vec<Part>,
  pub(crate) numeric_values: Vec<f64>,
  pub(crate) limit_part_indexes: HashMap<usize, usize>,
  pub(crate) has_arg_names: bool,
  pub(crate) has_arg_numbers: bool,
  pub(crate) needs_auto_quoting: bool,
  pub(crate) apos_mode: ApostropheMode,
}

impl ParseContext {
  pub(crate) fn new(apos_mode: ApostropheMode) -> Self {
    ParseContext { apos_mode, ..Default::default() }
  }

  /// Full reset, then installs the new source and its code-point view.
  pub(crate) fn pre_parse(&mut self, src: &str) {
    self.clear();
    self.msg = src.to_string();
    self.chars = src.chars().collect();
  }

  /// Full reset of all parse state. The apostrophe mode is configuration
  /// and survives.
  pub(crate) fn clear(&mut self) {
    self.msg.clear();
    self.chars.clear();
    self.parts.clear();
    self.numeric_values.clear();
    self.limit_part_indexes.clear();
    self.has_arg_names = false;
    self.has_arg_numbers = false;
    self.needs_auto_quoting = false;
  }

  pub(crate) fn add_part(&mut self, part_type: PartType, index: usize, length: usize, value: i32) {
    self.parts.push(Part::new(part_type, index, length, value));
  }

  /// Appends a limit part and records the start-to-limit mapping.
  pub(crate) fn add_limit_part(&mut self, start: usize, part_type: PartType, index: usize, length: usize, value: i32) {
    self.add_part(part_type, index, length, value);
    self.limit_part_indexes.insert(start, self.parts.len() - 1);
  }

  /// Stores a double in the side table and appends an `ArgDouble` part
  /// referencing its slot.
  pub(crate) fn add_arg_double_part(&mut self, value: f64, start: usize, length: usize) -> Result<(), PatternError> {
    if self.numeric_values.len() > PART_MAX_VALUE as usize {
      return Err(PatternError::OutOfBounds(format!(
        "Too many numeric values: {}",
        stream::error_context(&self.chars, start)
      )));
    }
    self.numeric_values.push(value);
    let slot = self.numeric_values.len() - 1;
    self.add_part(PartType::ArgDouble, start, length, slot as i32);
    Ok(())
  }

  /// Back-patches the payload of an already-appended part. Used only to
  /// resolve an `ArgStart` once the argument kind is known.
  pub(crate) fn set_part_value(&mut self, part_index: usize, value: i32) {
    self.parts[part_index].value = value;
  }

  /// True while parsing a full MessageFormat pattern, false inside a bare
  /// choice/plural/select style parse at its top level.
  pub(crate) fn in_message_format_pattern(&self, nesting_level: i32) -> bool {
    nesting_level > 0 || self.parts.first().map(|part| part.part_type == PartType::MsgStart).unwrap_or(false)
  }

  /// Open message fragments so far: `MsgStart` count minus `MsgLimit` count.
  pub(crate) fn msg_limit_balance(&self) -> i32 {
    let starts = self.parts.iter().filter(|part| part.part_type == PartType::MsgStart).count() as i32;
    let limits = self.parts.iter().filter(|part| part.part_type == PartType::MsgLimit).count() as i32;
    starts - limits
  }
}
