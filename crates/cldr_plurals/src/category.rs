use std::fmt;

/// The six CLDR plural categories. `Other` is the universal fallback and is
/// present in every locale's category list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
  Zero,
  One,
  Two,
  Few,
  Many,
  Other,
}

impl PluralCategory {
  /// All categories in CLDR display order.
  pub const ALL: [PluralCategory; 6] = [
    PluralCategory::Zero,
    PluralCategory::One,
    PluralCategory::Two,
    PluralCategory::Few,
    PluralCategory::Many,
    PluralCategory::Other,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      PluralCategory::Zero => "zero",
      PluralCategory::One => "one",
      PluralCategory::Two => "two",
      PluralCategory::Few => "few",
      PluralCategory::Many => "many",
      PluralCategory::Other => "other",
    }
  }

  /// Parses a CLDR category name. Case-sensitive, as in CLDR data files.
  pub fn from_name(name: &str) -> Option<PluralCategory> {
    match name {
      "zero" => Some(PluralCategory::Zero),
      "one" => Some(PluralCategory::One),
      "two" => Some(PluralCategory::Two),
      "few" => Some(PluralCategory::Few),
      "many" => Some(PluralCategory::Many),
      "other" => Some(PluralCategory::Other),
      _ => None,
    }
  }
}

impl fmt::Display for PluralCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
