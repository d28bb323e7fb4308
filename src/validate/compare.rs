//! Source/target comparison: every complex argument occurrence of the
//! source pattern must have a compatible occurrence in the target.

use std::collections::HashMap;

use color_eyre::owo_colors::OwoColorize;
use log::{debug, warn};
use serde::Serialize;

use crate::error::PatternError;
use crate::part::{ArgType, PartType};
use crate::pattern::MessagePattern;
use crate::validate::compliance::PatternValidator;

/// A `(name, type)` multiplicity mismatch that is tolerable: the side with
/// fewer occurrences still has at least one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OccurrenceWarning {
  pub argument_name: String,
  /// Lowercase complex-kind label (`"plural"`, `"selectordinal"`, ...).
  pub argument_type: String,
  pub source_occurrences: usize,
  pub target_occurrences: usize,
}

/// Result of a comparison run. Warnings are per side: `source_warnings`
/// lists forms the source has more of than the target, `target_warnings`
/// forms the target has that the source never consumed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CompareReport {
  pub source_warnings: Vec<OccurrenceWarning>,
  pub target_warnings: Vec<OccurrenceWarning>,
}

impl CompareReport {
  pub fn has_warnings(&self) -> bool {
    !self.source_warnings.is_empty() || !self.target_warnings.is_empty()
  }
}

/// Failure of a comparison run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompareError {
  SourceSyntax(PatternError),
  TargetSyntax(PatternError),
  /// The target has no occurrence at all of a `(name, type)` the source
  /// requires. `target_type` is the kind of the first target occurrence
  /// under the same name, or `None` when the name is absent entirely.
  MissingComplexForm {
    argument_name: String,
    source_type: ArgType,
    target_type: Option<ArgType>,
    source_language: String,
    target_language: String,
  },
}

impl std::fmt::Display for CompareError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CompareError::SourceSyntax(error) => write!(f, "Source pattern does not parse: {error}"),
      CompareError::TargetSyntax(error) => write!(f, "Target pattern does not parse: {error}"),
      CompareError::MissingComplexForm { argument_name, source_type, target_type, source_language, target_language } => {
        write!(
          f,
          "Missing {source_type} form for argument '{argument_name}': source ({source_language}) requires it, target ({target_language}) has {}",
          match target_type {
            Some(found) => format!("a {found} form instead"),
            None => "no occurrence of that argument".to_string(),
          }
        )
      },
    }
  }
}

impl std::error::Error for CompareError {}

/// Compares the complex forms of a source pattern against a target pattern.
#[derive(Clone, Debug)]
pub struct PatternComparator {
  source: PatternValidator,
  target: PatternValidator,
}

impl PatternComparator {
  pub fn new<SL, TL, SP, TP>(
    source_language: SL,
    target_language: TL,
    source_pattern: SP,
    target_pattern: TP,
  ) -> Self
  where
    SL: Into<String>,
    TL: Into<String>,
    SP: Into<String>,
    TP: Into<String>,
  {
    PatternComparator {
      source: PatternValidator::new(source_language, source_pattern),
      target: PatternValidator::new(target_language, target_pattern),
    }
  }

  pub fn from_validators(source: PatternValidator, target: PatternValidator) -> Self {
    PatternComparator { source, target }
  }

  pub fn from_patterns<SL: Into<String>, TL: Into<String>>(
    source_language: SL,
    target_language: TL,
    source: MessagePattern,
    target: MessagePattern,
  ) -> Self {
    PatternComparator {
      source: PatternValidator::from_pattern(source_language, source),
      target: PatternValidator::from_pattern(target_language, target),
    }
  }

  pub fn source_contains_complex_syntax(&mut self) -> bool {
    self.source.contains_complex_syntax()
  }

  pub fn target_contains_complex_syntax(&mut self) -> bool {
    self.target.contains_complex_syntax()
  }

  pub fn get_source_language(&self) -> &str {
    self.source.get_language()
  }

  pub fn get_target_language(&self) -> &str {
    self.target.get_language()
  }

  pub fn get_source_pattern_string(&self) -> &str {
    self.source.get_pattern_string()
  }

  pub fn get_target_pattern_string(&self) -> &str {
    self.target.get_pattern_string()
  }

  pub fn source_validator(&mut self) -> &mut PatternValidator {
    &mut self.source
  }

  pub fn target_validator(&mut self) -> &mut PatternValidator {
    &mut self.target
  }

  /// Verifies that every `(argument name, complex type)` occurrence of the
  /// source has a matching occurrence in the target, as multisets.
  ///
  /// A source pattern without complex syntax short-circuits to an empty
  /// report. Multiplicity gaps where the target still has at least one
  /// occurrence are reported as warnings; an entirely missing form raises
  /// [`CompareError::MissingComplexForm`].
  pub fn validate(&mut self) -> Result<CompareReport, CompareError> {
    if !self.source.contains_complex_syntax() {
      debug!("Source pattern has no complex syntax, nothing to compare");
      return Ok(CompareReport::default());
    }
    let source_forms = match self.source.get_pattern() {
      Ok(pattern) => extract_complex_forms(pattern),
      Err(error) => return Err(CompareError::SourceSyntax(error)),
    };
    let target_forms = match self.target.get_pattern() {
      Ok(pattern) => extract_complex_forms(pattern),
      Err(error) => return Err(CompareError::TargetSyntax(error)),
    };
    debug!(
      "Comparing {} source form(s) against {} target form(s)",
      source_forms.len().to_string().cyan(),
      target_forms.len().to_string().cyan()
    );

    let mut target_total: HashMap<(String, ArgType), usize> = HashMap::new();
    for (name, arg_type) in &target_forms {
      *target_total.entry((name.clone(), *arg_type)).or_insert(0) += 1;
    }
    let mut source_total: HashMap<(String, ArgType), usize> = HashMap::new();
    for (name, arg_type) in &source_forms {
      *source_total.entry((name.clone(), *arg_type)).or_insert(0) += 1;
    }

    let mut remaining = target_total.clone();
    for (name, arg_type) in &source_forms {
      let key = (name.clone(), *arg_type);
      match remaining.get_mut(&key) {
        Some(count) if *count > 0 => *count -= 1,
        _ => {
          if target_total.get(&key).copied().unwrap_or(0) == 0 {
            let target_type = target_forms.iter().find(|(target_name, _)| target_name == name).map(|(_, t)| *t);
            warn!(
              "Source {} form for argument {} has no counterpart in target",
              arg_type.red(),
              name.purple()
            );
            return Err(CompareError::MissingComplexForm {
              argument_name: name.clone(),
              source_type: *arg_type,
              target_type,
              source_language: self.source.get_language().to_string(),
              target_language: self.target.get_language().to_string(),
            });
          }
          // the target has this form, just fewer of them; warn below
        },
      }
    }

    let mut report = CompareReport::default();
    let mut seen: Vec<(String, ArgType)> = Vec::new();
    for (name, arg_type) in &source_forms {
      let key = (name.clone(), *arg_type);
      if seen.contains(&key) {
        continue;
      }
      seen.push(key.clone());
      let source_occurrences = source_total[&key];
      let target_occurrences = target_total.get(&key).copied().unwrap_or(0);
      if source_occurrences > target_occurrences {
        report.source_warnings.push(OccurrenceWarning {
          argument_name: name.clone(),
          argument_type: arg_type.to_string(),
          source_occurrences,
          target_occurrences,
        });
      }
    }
    let mut seen: Vec<(String, ArgType)> = Vec::new();
    for (name, arg_type) in &target_forms {
      let key = (name.clone(), *arg_type);
      if seen.contains(&key) {
        continue;
      }
      seen.push(key.clone());
      let target_occurrences = target_total[&key];
      let source_occurrences = source_total.get(&key).copied().unwrap_or(0);
      if target_occurrences > source_occurrences {
        report.target_warnings.push(OccurrenceWarning {
          argument_name: name.clone(),
          argument_type: arg_type.to_string(),
          source_occurrences,
          target_occurrences,
        });
      }
    }
    Ok(report)
  }
}

/// The ordered `(argument name, complex type)` list of a pattern: one entry
/// per complex `ArgStart`, in pattern order, duplicates kept.
fn extract_complex_forms(pattern: &MessagePattern) -> Vec<(String, ArgType)> {
  let parts = pattern.parts();
  let all: Vec<_> = parts.iter().collect();
  let mut forms = Vec::new();
  for (i, part) in all.iter().enumerate() {
    if part.part_type() == PartType::ArgStart && part.arg_type().is_complex_type() {
      forms.push((parts.get_substring(&all[i + 1]), part.arg_type()));
    }
  }
  forms
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_plain_source_is_a_no_op() {
    let mut comparator = PatternComparator::new("en", "fr", "Hello {name}.", "{broken");
    let report = comparator.validate().unwrap();
    assert!(!report.has_warnings());
  }

  #[test]
  fn test_matching_forms_pass() {
    let mut comparator = PatternComparator::new(
      "en",
      "ru",
      "{n, plural, one {# item} other {# items}}",
      "{n, plural, one {x} few {y} many {z} other {w}}",
    );
    let report = comparator.validate().unwrap();
    assert!(!report.has_warnings());
  }

  #[test]
  fn test_missing_form_entirely_is_an_error() {
    let mut comparator = PatternComparator::new(
      "en",
      "fr",
      "{currentYear, selectordinal, one {{totalYears, plural, one {a} other {b}}} other {{totalYears, plural, one {c} other {d}}}}",
      "{currentYear, selectordinal, one {x} other {y}}",
    );
    let error = comparator.validate().unwrap_err();
    match error {
      CompareError::MissingComplexForm { argument_name, source_type, target_type, source_language, target_language } => {
        assert_eq!(argument_name, "totalYears");
        assert_eq!(source_type, ArgType::Plural);
        assert_eq!(target_type, None);
        assert_eq!(source_language, "en");
        assert_eq!(target_language, "fr");
      },
      other => panic!("expected MissingComplexForm, got {other:?}"),
    }
  }

  #[test]
  fn test_plural_and_selectordinal_are_not_interchangeable() {
    let mut comparator = PatternComparator::new(
      "en",
      "fr",
      "{n, plural, one {#} other {#}}",
      "{n, selectordinal, one {#} other {#}}",
    );
    let error = comparator.validate().unwrap_err();
    match error {
      CompareError::MissingComplexForm { argument_name, source_type, target_type, .. } => {
        assert_eq!(argument_name, "n");
        assert_eq!(source_type, ArgType::Plural);
        assert_eq!(target_type, Some(ArgType::SelectOrdinal));
      },
      other => panic!("expected MissingComplexForm, got {other:?}"),
    }
  }

  #[test_log::test]
  fn test_excess_source_occurrences_warn() {
    // three nested plurals in the source, two in the target
    let mut comparator = PatternComparator::new(
      "en",
      "fr",
      "{o, selectordinal, one {{t, plural, other {#}}} two {{t, plural, other {#}}} other {{t, plural, other {#}}}}",
      "{o, selectordinal, one {{t, plural, other {#}}} other {{t, plural, other {#}}}}",
    );
    let report = comparator.validate().unwrap();
    assert!(report.has_warnings());
    assert_eq!(report.source_warnings.len(), 1);
    let warning = &report.source_warnings[0];
    assert_eq!(warning.argument_name, "t");
    assert_eq!(warning.argument_type, "plural");
    assert_eq!(warning.source_occurrences, 3);
    assert_eq!(warning.target_occurrences, 2);
    assert!(report.target_warnings.is_empty());
  }

  #[test]
  fn test_extra_target_occurrences_warn() {
    let mut comparator = PatternComparator::new(
      "en",
      "ar",
      "{n, plural, one {#} other {#}}",
      "{n, plural, one {#} other {#}} {g, select, male {x} other {y}}",
    );
    let report = comparator.validate().unwrap();
    assert_eq!(report.source_warnings.len(), 0);
    assert_eq!(report.target_warnings.len(), 1);
    assert_eq!(report.target_warnings[0].argument_name, "g");
    assert_eq!(report.target_warnings[0].argument_type, "select");
    assert_eq!(report.target_warnings[0].source_occurrences, 0);
  }

  #[test]
  fn test_source_syntax_error_propagates() {
    let mut comparator = PatternComparator::new("en", "fr", "{n, plural, one {#}", "{n}");
    assert!(matches!(comparator.validate(), Err(CompareError::SourceSyntax(_))));
  }

  #[test]
  fn test_target_syntax_error_propagates() {
    let mut comparator =
      PatternComparator::new("en", "fr", "{n, plural, one {#} other {#}}", "{n, plural, one {#}");
    assert!(matches!(comparator.validate(), Err(CompareError::TargetSyntax(_))));
  }

  #[test]
  fn test_from_patterns_constructor() {
    let mut source = MessagePattern::new();
    source.parse("{g, select, other {x}}").unwrap();
    let mut target = MessagePattern::new();
    target.parse("{g, select, other {y}}").unwrap();
    let mut comparator = PatternComparator::from_patterns("en", "de", source, target);
    assert!(comparator.source_contains_complex_syntax());
    assert!(comparator.target_contains_complex_syntax());
    assert!(!comparator.validate().unwrap().has_warnings());
    assert_eq!(comparator.get_source_language(), "en");
    assert_eq!(comparator.get_target_language(), "de");
  }

  #[test]
  fn test_report_serializes() {
    let mut comparator = PatternComparator::new(
      "en",
      "fr",
      "{n, plural, one {#} other {#}} {n, plural, one {#} other {#}}",
      "{n, plural, one {#} other {#}}",
    );
    let report = comparator.validate().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["source_warnings"][0]["argument_name"], "n");
    assert_eq!(json["source_warnings"][0]["source_occurrences"], 2);
  }
}
