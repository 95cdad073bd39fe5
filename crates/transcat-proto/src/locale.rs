//! Locale components: language, script, and region codes.
//!
//! Codes are validated on construction so that every value held by a record
//! is known to be well formed. Stored rows that fail validation surface as
//! conversion errors in the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LocaleError;

/// An ISO-639 language code such as `en`, `fr`, or `haw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and validate a language code.
    pub fn new(code: impl Into<String>) -> Result<Self, LocaleError> {
        let code = code.into();
        let valid = (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_lowercase());
        if valid {
            Ok(Self(code))
        } else {
            Err(LocaleError::InvalidLanguageCode(code))
        }
    }

    /// English, the fallback default for new catalogs.
    pub fn en() -> Self {
        Self("en".to_string())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::en()
    }
}

impl FromStr for LanguageCode {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Script designator used when a language is written in more than one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScriptCode {
    /// Arabic.
    Arab,
    /// Bengali.
    Beng,
    /// Cyrillic.
    Cyrl,
    /// Devanagari.
    Deva,
    /// Simplified Han.
    Hans,
    /// Traditional Han.
    Hant,
    /// Latin.
    Latn,
    /// Meitei Mayek.
    Mtei,
    /// Ol Chiki.
    Olck,
    /// Tifinagh.
    Tfng,
}

impl ScriptCode {
    /// Every supported script.
    pub const ALL: [ScriptCode; 10] = [
        ScriptCode::Arab,
        ScriptCode::Beng,
        ScriptCode::Cyrl,
        ScriptCode::Deva,
        ScriptCode::Hans,
        ScriptCode::Hant,
        ScriptCode::Latn,
        ScriptCode::Mtei,
        ScriptCode::Olck,
        ScriptCode::Tfng,
    ];

    /// The four-letter ISO-15924 designator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptCode::Arab => "Arab",
            ScriptCode::Beng => "Beng",
            ScriptCode::Cyrl => "Cyrl",
            ScriptCode::Deva => "Deva",
            ScriptCode::Hans => "Hans",
            ScriptCode::Hant => "Hant",
            ScriptCode::Latn => "Latn",
            ScriptCode::Mtei => "Mtei",
            ScriptCode::Olck => "Olck",
            ScriptCode::Tfng => "Tfng",
        }
    }
}

impl FromStr for ScriptCode {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|script| script.as_str() == s)
            .ok_or_else(|| LocaleError::InvalidScriptCode(s.to_string()))
    }
}

impl TryFrom<String> for ScriptCode {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScriptCode> for String {
    fn from(code: ScriptCode) -> Self {
        code.as_str().to_string()
    }
}

impl AsRef<str> for ScriptCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ScriptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ISO-3166 alpha-2 region (`GB`) or UN M.49 numeric area (`419`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Parse and validate a region code.
    pub fn new(code: impl Into<String>) -> Result<Self, LocaleError> {
        let code = code.into();
        let alpha = code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase());
        let numeric = code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit());
        if alpha || numeric {
            Ok(Self(code))
        } else {
            Err(LocaleError::InvalidRegionCode(code))
        }
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RegionCode {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A full locale tuple.
///
/// Renders as `language[-Script][_REGION]`, e.g. `zh-Hans_CN` or `en_GB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language component.
    pub language: LanguageCode,
    /// Optional script component.
    pub script: Option<ScriptCode>,
    /// Optional region component.
    pub region: Option<RegionCode>,
}

impl Locale {
    /// Create a base-language locale.
    pub fn new(language: LanguageCode) -> Self {
        Self {
            language,
            script: None,
            region: None,
        }
    }

    /// Set the script component.
    pub fn with_script(mut self, script: ScriptCode) -> Self {
        self.script = Some(script);
        self
    }

    /// Set the region component.
    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }

    /// Whether this locale has neither script nor region.
    pub fn is_base(&self) -> bool {
        self.script.is_none() && self.region.is_none()
    }

    /// The same language with script and region removed.
    pub fn base(&self) -> Self {
        Self::new(self.language.clone())
    }

    /// The identifier string for this locale.
    pub fn identifier(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "_{region}")?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(['-', '_']);
        let language = match parts.next() {
            Some(part) if !part.is_empty() => LanguageCode::new(part)?,
            _ => return Err(LocaleError::InvalidIdentifier(s.to_string())),
        };

        let mut locale = Locale::new(language);
        for part in parts {
            if part.len() == 4 && locale.script.is_none() && locale.region.is_none() {
                locale.script = Some(part.parse()?);
            } else if locale.region.is_none() {
                locale.region = Some(RegionCode::new(part)?);
            } else {
                return Err(LocaleError::InvalidIdentifier(s.to_string()));
            }
        }

        Ok(locale)
    }
}
