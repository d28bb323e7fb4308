//! Ordinal plural rules, keyed separately from the cardinal tables. The
//! default for unlisted locales is a single `other` category.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::cardinal::RuleSet;

static ORDINAL_SETS: &[RuleSet] = &[
  // 0: no ordinal distinction
  RuleSet {
    langs: &["da", "de", "el", "es", "et", "fi", "id", "ja", "ko", "lt", "ms", "nl", "pl", "pt", "ru", "sr", "th", "zh"],
    rule: 0,
  },
  // 1: 1st/2nd/3rd/nth (en; sq and kn share the shape)
  RuleSet { langs: &["en", "kn", "sq"], rule: 1 },
  // 2: "one" for exactly 1 (fr; bn/as/hi/mr share the shape)
  RuleSet { langs: &["as", "bn", "fr", "hi", "hy", "lo", "mr", "vi"], rule: 2 },
  // 3: Macedonian
  RuleSet { langs: &["mk"], rule: 3 },
  // 4: Welsh
  RuleSet { langs: &["cy"], rule: 4 },
  // 5: Scottish Gaelic
  RuleSet { langs: &["gd"], rule: 5 },
  // 6: Italian (11, 8, 80, 800)
  RuleSet { langs: &["it", "sc", "scn"], rule: 6 },
  // 7: Kazakh, Azerbaijani, Georgian
  RuleSet { langs: &["az", "ka", "kk"], rule: 7 },
  // 8: Hungarian, Ukrainian, Turkmen
  RuleSet { langs: &["hu", "tk", "uk"], rule: 8 },
  // 9: Gujarati
  RuleSet { langs: &["gu"], rule: 9 },
  // 10: Odia
  RuleSet { langs: &["or"], rule: 10 },
  // 11: Telugu
  RuleSet { langs: &["te"], rule: 11 },
  // 12: Nepali
  RuleSet { langs: &["ne"], rule: 12 },
];

static ORDINAL_CATEGORIES: &[&[&str]] = &[
  &["other"],                                      // 0
  &["one", "two", "few", "other"],                 // 1
  &["one", "other"],                               // 2
  &["one", "two", "many", "other"],                // 3
  &["zero", "one", "two", "few", "many", "other"], // 4
  &["one", "two", "few", "other"],                 // 5
  &["many", "other"],                              // 6
  &["many", "other"],                              // 7
  &["few", "other"],                               // 8
  &["one", "two", "few", "many", "other"],         // 9
  &["one", "two", "few", "many", "other"],         // 10
  &["one", "two", "many", "other"],                // 11
  &["one", "few", "other"],                        // 12
];

lazy_static! {
  static ref ORDINAL_RULES: HashMap<&'static str, usize> = {
    let mut rules = HashMap::new();
    for set in ORDINAL_SETS {
      for &lang in set.langs {
        rules.insert(lang, set.rule);
      }
    }
    rules
  };
}

pub(crate) fn rule_for(language: &str) -> usize {
  ORDINAL_RULES.get(language).copied().unwrap_or(0)
}

pub(crate) fn categories(rule: usize) -> &'static [&'static str] {
  ORDINAL_CATEGORIES[rule]
}

/// Maps a count to an index within `categories(rule)`.
pub(crate) fn classify(rule: usize, n: u64) -> usize {
  let m10 = n % 10;
  let m100 = n % 100;
  match rule {
    1 => {
      if m10 == 1 && m100 != 11 {
        0
      } else if m10 == 2 && m100 != 12 {
        1
      } else if m10 == 3 && m100 != 13 {
        2
      } else {
        3
      }
    },
    2 => usize::from(n != 1),
    3 => {
      if m10 == 1 && m100 != 11 {
        0
      } else if m10 == 2 && m100 != 12 {
        1
      } else if (m10 == 7 || m10 == 8) && m100 != 17 && m100 != 18 {
        2
      } else {
        3
      }
    },
    4 => match n {
      0 | 7 | 8 | 9 => 0,
      1 => 1,
      2 => 2,
      3 | 4 => 3,
      5 | 6 => 4,
      _ => 5,
    },
    5 => match n {
      1 | 11 => 0,
      2 | 12 => 1,
      3 | 13 => 2,
      _ => 3,
    },
    6 => usize::from(!matches!(n, 8 | 11 | 80 | 800)),
    7 => usize::from(!(m10 == 6 || m10 == 9 || (m10 == 0 && n != 0))),
    8 => usize::from(!(m10 == 3 && m100 != 13)),
    9 => match n {
      1 => 0,
      2 | 3 => 1,
      4 => 2,
      6 => 3,
      _ => 4,
    },
    10 => match n {
      1 | 5 | 7 | 8 | 9 => 0,
      2 | 3 => 1,
      4 => 2,
      6 => 3,
      _ => 4,
    },
    11 => match n {
      1 => 0,
      2 | 3 => 1,
      6 => 2,
      _ => 3,
    },
    12 => {
      if (1..=4).contains(&n) {
        0
      } else if n == 5 || n == 6 {
        1
      } else {
        2
      }
    },
    _ => 0,
  }
}
