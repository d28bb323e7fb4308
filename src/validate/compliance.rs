//! Plural-compliance validation: classifies the selectors of every plural
//! and selectordinal argument against the CLDR categories of a locale.

use color_eyre::owo_colors::OwoColorize;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use cldr_plurals::{get_cardinal_categories, get_ordinal_categories, is_valid_category};

use crate::error::PatternError;
use crate::part::{ArgType, Part, PartType};
use crate::pattern::MessagePattern;

lazy_static! {
  static ref NUMERIC_SELECTOR: Regex = Regex::new(r"^=(\d+)$").unwrap();
}

/// One warning per plural/selectordinal argument whose selectors are valid
/// CLDR names but do not line up with the locale's category set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ArgumentComplianceWarning {
  pub argument_name: String,
  /// `"plural"` or `"selectordinal"`.
  pub argument_type: String,
  /// The locale's category list for this argument kind.
  pub expected: Vec<String>,
  /// All non-numeric selectors of this argument, in pattern order.
  pub found: Vec<String>,
  /// Explicit `=N` selectors; always valid, never counted as categories.
  pub numeric_selectors: Vec<String>,
  /// Valid CLDR names that are not used by this locale and kind.
  pub wrong_locale_selectors: Vec<String>,
  /// Expected categories with no selector in the pattern.
  pub missing_categories: Vec<String>,
  pub language: String,
}

/// Warnings-only result of a compliance run; returned, never raised.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PluralComplianceWarning {
  pub warnings: Vec<ArgumentComplianceWarning>,
}

/// Failure of a compliance run: the pattern does not parse, or at least one
/// selector is not a CLDR category name at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ComplianceError {
  Syntax(PatternError),
  PluralCompliance {
    /// Selectors that are not CLDR category names, across all arguments.
    invalid_selectors: Vec<String>,
    found_selectors: Vec<String>,
    missing_categories: Vec<String>,
    language: String,
  },
}

impl std::fmt::Display for ComplianceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ComplianceError::Syntax(error) => error.fmt(f),
      ComplianceError::PluralCompliance { invalid_selectors, found_selectors, missing_categories, language } => {
        write!(
          f,
          "Invalid plural selectors {invalid_selectors:?} for locale {language} (found {found_selectors:?}, missing {missing_categories:?})"
        )
      },
    }
  }
}

impl std::error::Error for ComplianceError {}

/// Validates one pattern against one locale.
///
/// The pattern string is parsed lazily on the first query; a parse failure
/// is stored and surfaced again on every later query until
/// [`PatternValidator::set_pattern_string`] replaces the pattern.
#[derive(Clone, Debug)]
pub struct PatternValidator {
  language: String,
  pattern_string: String,
  pattern: MessagePattern,
  parsed: bool,
  syntax_error: Option<PatternError>,
}

impl PatternValidator {
  pub fn new<L: Into<String>, P: Into<String>>(language: L, pattern_string: P) -> Self {
    PatternValidator {
      language: language.into(),
      pattern_string: pattern_string.into(),
      pattern: MessagePattern::new(),
      parsed: false,
      syntax_error: None,
    }
  }

  /// Wraps an already-parsed pattern.
  pub fn from_pattern<L: Into<String>>(language: L, pattern: MessagePattern) -> Self {
    PatternValidator {
      language: language.into(),
      pattern_string: pattern.get_pattern_string().to_string(),
      pattern,
      parsed: true,
      syntax_error: None,
    }
  }

  /// Replaces the pattern string and drops the cached parse and any stored
  /// syntax error.
  pub fn set_pattern_string<P: Into<String>>(&mut self, pattern_string: P) -> &mut Self {
    self.pattern_string = pattern_string.into();
    self.pattern = MessagePattern::new();
    self.parsed = false;
    self.syntax_error = None;
    self
  }

  fn ensure_parsed(&mut self) {
    if !self.parsed {
      self.parsed = true;
      if let Err(error) = self.pattern.parse(&self.pattern_string) {
        debug!("Pattern for locale {} failed to parse: {}", self.language.cyan(), error.to_string().yellow());
        self.syntax_error = Some(error);
      }
    }
  }

  /// The parsed pattern; parses on first use and re-raises a stored parse
  /// failure on every call.
  pub fn get_pattern(&mut self) -> Result<&MessagePattern, PatternError> {
    self.ensure_parsed();
    match &self.syntax_error {
      Some(error) => Err(error.clone()),
      None => Ok(&self.pattern),
    }
  }

  pub fn is_valid_syntax(&mut self) -> bool {
    self.ensure_parsed();
    self.syntax_error.is_none()
  }

  pub fn get_syntax_exception(&mut self) -> Option<String> {
    self.ensure_parsed();
    self.syntax_error.as_ref().map(ToString::to_string)
  }

  /// True iff the pattern holds at least one choice/plural/select/
  /// selectordinal argument. A broken pattern is consulted through the
  /// parts emitted before the failure, so this never raises.
  pub fn contains_complex_syntax(&mut self) -> bool {
    self.ensure_parsed();
    self
      .pattern
      .parts()
      .iter()
      .any(|part| part.part_type() == PartType::ArgStart && part.arg_type().is_complex_type())
  }

  pub fn get_language(&self) -> &str {
    &self.language
  }

  pub fn get_pattern_string(&self) -> &str {
    &self.pattern_string
  }

  /// Classifies every plural/selectordinal selector against the locale.
  ///
  /// Returns `Ok(None)` when everything lines up, `Ok(Some(...))` when all
  /// selectors are valid CLDR names but some are inapplicable to the locale
  /// or expected categories are missing, and an error when the pattern does
  /// not parse or a selector is not a CLDR category name at all.
  pub fn validate_plural_compliance(&mut self) -> Result<Option<PluralComplianceWarning>, ComplianceError> {
    self.ensure_parsed();
    if let Some(error) = &self.syntax_error {
      return Err(ComplianceError::Syntax(error.clone()));
    }

    let parts = self.pattern.parts();
    let all: Vec<Part> = parts.iter().collect();
    let mut warnings = Vec::new();
    let mut invalid_union = Vec::new();
    let mut found_union = Vec::new();
    let mut missing_union = Vec::new();

    for (start, part) in all.iter().enumerate() {
      if part.part_type() != PartType::ArgStart || !part.arg_type().has_plural_style() {
        continue;
      }
      let argument_type = part.arg_type();
      let argument_name = parts.get_substring(&all[start + 1]);
      let expected: Vec<String> = match argument_type {
        ArgType::SelectOrdinal => get_ordinal_categories(&self.language),
        _ => get_cardinal_categories(&self.language),
      }
      .iter()
      .map(ToString::to_string)
      .collect();
      debug!(
        "Checking {} argument {} against categories {:?} for locale {}",
        argument_type.cyan(),
        argument_name.purple(),
        expected,
        self.language.cyan()
      );

      let mut found = Vec::new();
      let mut numeric_selectors = Vec::new();
      let mut wrong_locale_selectors = Vec::new();
      let mut invalid_selectors = Vec::new();

      // walk this argument's own selectors, jumping over nested arguments
      let limit = parts.get_limit_part_index(start);
      let mut i = start + 2;
      while i < limit {
        match all[i].part_type() {
          PartType::ArgStart => {
            i = parts.get_limit_part_index(i);
          },
          PartType::ArgSelector => {
            let selector = parts.get_substring(&all[i]);
            if NUMERIC_SELECTOR.is_match(&selector) {
              push_unique(&mut numeric_selectors, selector);
            } else {
              if !is_valid_category(&selector) {
                warn!("Selector {} is not a CLDR category name", selector.red());
                push_unique(&mut invalid_selectors, selector.clone());
              } else if !expected.iter().any(|category| category == &selector) {
                warn!(
                  "Selector {} is valid CLDR but not used by locale {}",
                  selector.yellow(),
                  self.language.cyan()
                );
                push_unique(&mut wrong_locale_selectors, selector.clone());
              }
              push_unique(&mut found, selector);
            }
          },
          _ => {},
        }
        i += 1;
      }

      let missing_categories: Vec<String> =
        expected.iter().filter(|category| !found.contains(category)).cloned().collect();

      for selector in &invalid_selectors {
        push_unique(&mut invalid_union, selector.clone());
      }
      for selector in &found {
        push_unique(&mut found_union, selector.clone());
      }
      for category in &missing_categories {
        push_unique(&mut missing_union, category.clone());
      }

      if invalid_selectors.is_empty() && (!wrong_locale_selectors.is_empty() || !missing_categories.is_empty()) {
        warnings.push(ArgumentComplianceWarning {
          argument_name,
          argument_type: argument_type.to_string(),
          expected,
          found,
          numeric_selectors,
          wrong_locale_selectors,
          missing_categories,
          language: self.language.clone(),
        });
      }
    }

    if !invalid_union.is_empty() {
      return Err(ComplianceError::PluralCompliance {
        invalid_selectors: invalid_union,
        found_selectors: found_union,
        missing_categories: missing_union,
        language: self.language.clone(),
      });
    }
    if warnings.is_empty() {
      Ok(None)
    } else {
      Ok(Some(PluralComplianceWarning { warnings }))
    }
  }
}

fn push_unique(values: &mut Vec<String>, value: String) {
  if !values.contains(&value) {
    values.push(value);
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_compliant_plural_returns_none() {
    let mut validator = PatternValidator::new("en", "You have {count, plural, one{# item} other{# items}}.");
    assert_eq!(validator.validate_plural_compliance().unwrap(), None);
  }

  #[test_log::test]
  fn test_wrong_locale_selector_warns() {
    let mut validator =
      PatternValidator::new("en", "{count, plural, one{# item} few{# items} other{# items}}");
    let warning = validator.validate_plural_compliance().unwrap().unwrap();
    assert_eq!(warning.warnings.len(), 1);
    let arg = &warning.warnings[0];
    assert_eq!(arg.argument_name, "count");
    assert_eq!(arg.argument_type, "plural");
    assert_eq!(arg.expected, vec!["one", "other"]);
    assert_eq!(arg.wrong_locale_selectors, vec!["few"]);
    assert!(arg.missing_categories.is_empty());
    assert_eq!(arg.language, "en");
  }

  #[test_log::test]
  fn test_invalid_selector_is_an_error() {
    let mut validator =
      PatternValidator::new("en", "{count, plural, one{# item} some{# items} other{# items}}");
    let error = validator.validate_plural_compliance().unwrap_err();
    match error {
      ComplianceError::PluralCompliance { invalid_selectors, language, .. } => {
        assert_eq!(invalid_selectors, vec!["some"]);
        assert_eq!(language, "en");
      },
      other => panic!("expected a PluralCompliance error, got {other:?}"),
    }
  }

  #[test]
  fn test_numeric_selectors_are_always_valid() {
    let mut validator =
      PatternValidator::new("en", "{n, plural, =0 {none} =1 {one} one {# item} other {# items}}");
    assert_eq!(validator.validate_plural_compliance().unwrap(), None);
  }

  #[test]
  fn test_missing_category_warns() {
    let mut validator = PatternValidator::new("en", "{n, plural, other {# items}}");
    let warning = validator.validate_plural_compliance().unwrap().unwrap();
    assert_eq!(warning.warnings[0].missing_categories, vec!["one"]);
  }

  #[test]
  fn test_selectordinal_uses_ordinal_categories() {
    let mut validator =
      PatternValidator::new("en", "{place, selectordinal, one{#st} two{#nd} few{#rd} other{#th}}");
    assert_eq!(validator.validate_plural_compliance().unwrap(), None);

    // "two" is not an ordinal category for French
    let mut validator = PatternValidator::new("fr", "{place, selectordinal, one{#er} two{#e} other{#e}}");
    let warning = validator.validate_plural_compliance().unwrap().unwrap();
    assert_eq!(warning.warnings[0].argument_type, "selectordinal");
    assert_eq!(warning.warnings[0].wrong_locale_selectors, vec!["two"]);
  }

  #[test]
  fn test_nested_arguments_are_attributed_to_their_own_parent() {
    // the inner plural's "few" must not be blamed on the outer selectordinal
    let mut validator = PatternValidator::new(
      "en",
      "{y, selectordinal, one {{t, plural, few {x} other {#}}} other {{t, plural, other {#}}}}",
    );
    let warning = validator.validate_plural_compliance().unwrap().unwrap();
    let offenders: Vec<&str> = warning
      .warnings
      .iter()
      .filter(|arg| !arg.wrong_locale_selectors.is_empty())
      .map(|arg| arg.argument_name.as_str())
      .collect();
    assert_eq!(offenders, vec!["t"]);
  }

  #[test]
  fn test_syntax_error_is_stored_and_repeated() {
    let mut validator = PatternValidator::new("en", "{n, plural, one {#}");
    assert!(!validator.is_valid_syntax());
    let first = validator.get_syntax_exception().unwrap();
    let second = validator.get_syntax_exception().unwrap();
    assert_eq!(first, second);
    assert!(matches!(validator.validate_plural_compliance(), Err(ComplianceError::Syntax(_))));
    assert!(validator.get_pattern().is_err());

    validator.set_pattern_string("{n, plural, one {#} other {#}}");
    assert!(validator.is_valid_syntax());
    assert_eq!(validator.get_syntax_exception(), None);
    assert_eq!(validator.validate_plural_compliance().unwrap(), None);
  }

  #[test]
  fn test_contains_complex_syntax_on_partial_parse() {
    // parsing fails after the plural argument has been opened
    let mut validator = PatternValidator::new("en", "{n, plural, one {#}");
    assert!(!validator.is_valid_syntax());
    assert!(validator.contains_complex_syntax());

    let mut validator = PatternValidator::new("en", "plain text {name}");
    assert!(validator.is_valid_syntax());
    assert!(!validator.contains_complex_syntax());
  }

  #[test]
  fn test_from_pattern_skips_reparsing() {
    let mut pattern = MessagePattern::new();
    pattern.parse("{g, select, male {he} other {they}}").unwrap();
    let mut validator = PatternValidator::from_pattern("en", pattern);
    assert!(validator.is_valid_syntax());
    assert!(validator.contains_complex_syntax());
    assert_eq!(validator.get_language(), "en");
    // select arguments carry no plural selectors to validate
    assert_eq!(validator.validate_plural_compliance().unwrap(), None);
  }

  #[test]
  fn test_warning_report_serializes() {
    let mut validator = PatternValidator::new("en", "{n, plural, few {x} other {#}}");
    let warning = validator.validate_plural_compliance().unwrap().unwrap();
    let json = serde_json::to_value(&warning).unwrap();
    assert_eq!(json["warnings"][0]["argument_name"], "n");
    assert_eq!(json["warnings"][0]["wrong_locale_selectors"][0], "few");
  }
}
