//! Label translation
//!
//! Dictionary lookup over a pre-translated language pack
//! (`lang_pack.json`: language code → English label → translated label).
//! English is the source language and always passes through unchanged, as
//! does any label the pack does not carry.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
    Tamil,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Marathi,
        Language::Tamil,
        Language::Telugu,
    ];

    /// ISO 639-1 code used as the language pack key
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Marathi => "mr",
            Language::Tamil => "ta",
            Language::Telugu => "te",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Marathi => "Marathi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    /// Accepts either the code ("hi") or the display name ("Hindi")
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(wanted)
                    || lang.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| anyhow::anyhow!("Unsupported language: '{}'", s))
    }
}

/// Translation seam for labels and free text.
///
/// Implementations are best-effort: anything they cannot translate is
/// returned as given. `LangPack` only knows labels, so free text such as
/// cultivation plans and narration passes through unless the caller supplies
/// a translating implementation.
pub trait Translator {
    fn translate<'a>(&'a self, lang: Language, text: &'a str) -> &'a str;
}

/// Pre-translated UI dictionary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LangPack {
    entries: FxHashMap<String, FxHashMap<String, String>>,
}

impl LangPack {
    /// Load a language pack from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read language pack: {:?}", path))?;

        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse language pack: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Languages with at least one entry
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|lang| self.entries.contains_key(lang.code()))
            .collect()
    }

    /// Number of labels carried for a language
    pub fn label_count(&self, lang: Language) -> usize {
        self.entries.get(lang.code()).map_or(0, |labels| labels.len())
    }
}

impl Translator for LangPack {
    fn translate<'a>(&'a self, lang: Language, text: &'a str) -> &'a str {
        if lang == Language::English {
            return text;
        }

        self.entries
            .get(lang.code())
            .and_then(|labels| labels.get(text))
            .map_or(text, |translated| translated.as_str())
    }
}
