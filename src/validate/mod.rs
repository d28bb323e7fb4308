//! Validation of parsed patterns: CLDR plural-category compliance for one
//! pattern, and complex-form compatibility between a translation pair.

pub mod compare;
pub mod compliance;

pub use compare::{CompareError, CompareReport, OccurrenceWarning, PatternComparator};
pub use compliance::{ArgumentComplianceWarning, ComplianceError, PatternValidator, PluralComplianceWarning};
