//! Languages served by the localized-strings lookup.

use std::str::FromStr as _;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::Error;

/// A supported UI language. Codes are matched case-insensitively and
/// otherwise exactly; surrounding whitespace is not stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Language {
  Es,
  En,
  Ja,
}

impl Language {
  /// Parse a language code such as `"es"` or `"JA"`.
  pub fn from_code(code: &str) -> Result<Self, Error> {
    Self::from_str(code).map_err(|_| Error::UnsupportedLanguage(code.to_owned()))
  }

  /// Normalised code, e.g. `"ES"`.
  pub fn code(self) -> &'static str { self.into() }

  /// The `LocalizedString` field holding text in this language.
  pub fn field(self) -> &'static str {
    match self {
      Self::Es => "eco_es",
      Self::En => "eco_en",
      Self::Ja => "eco_ja",
    }
  }
}
