//! Parser and validators for ICU MessageFormat pattern strings.
//!
//! The parser produces a flat, navigable list of typed [`Part`]s encoding
//! the parse tree of a pattern (arguments, plural/select/choice styles,
//! quoting), suitable for translation tooling that needs to inspect or
//! rewrite messages without formatting them. On top of the parse sit two
//! validators: [`PatternValidator`] checks plural/selectordinal selectors
//! against the CLDR categories of a locale, and [`PatternComparator`]
//! checks that a translation keeps every complex form of its source.
//!
//! ```
//! use message_pattern::{MessagePattern, PatternValidator};
//!
//! let mut pattern = MessagePattern::new();
//! pattern.parse("You have {count, plural, one{# item} other{# items}}.").unwrap();
//! assert!(pattern.has_named_arguments());
//!
//! let mut validator = PatternValidator::from_pattern("en", pattern.clone());
//! assert!(validator.validate_plural_compliance().unwrap().is_none());
//! ```

mod context;
mod error;
mod numeric;
mod parser;
mod part;
mod pattern;
mod stream;
pub mod validate;


pub use error::PatternError;
pub use numeric::{parse_arg_number_from_str, ARG_NAME_NOT_NUMBER, ARG_NAME_NOT_VALID, ARG_VALUE_OVERFLOW};
pub use part::{
  ApostropheMode, ArgType, Part, PartType, ARG_NUMBER_MAX, MAX_NESTING_LEVEL, NO_NUMERIC_VALUE, PART_MAX_LENGTH,
  PART_MAX_VALUE,
};
pub use pattern::{MessagePattern, Parts};
pub use stream::{append_reduced_apostrophes, is_identifier};
pub use validate::{
  ArgumentComplianceWarning, CompareError, CompareReport, ComplianceError, OccurrenceWarning, PatternComparator,
  PatternValidator, PluralComplianceWarning,
};
