//! UI string lookup.
//!
//! Strings come from the `[strings.<lang>]` tables of the site config.
//! Lookup never fails: a missing key falls back to the default language, and
//! then to the key itself, so an untranslated label shows up as e.g.
//! `tab.guides` instead of breaking the build.

use crate::config::SiteConfig;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Translations {
    default_lang: String,
    strings: BTreeMap<String, BTreeMap<String, String>>,
}

impl Translations {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            default_lang: config.default_lang.clone(),
            strings: config.strings.clone(),
        }
    }

    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.lookup(lang, key)
            .or_else(|| self.lookup(&self.default_lang, key))
            .unwrap_or(key)
    }

    /// Bind a language, for use inside page templates.
    pub fn for_lang<'a>(&'a self, lang: &'a str) -> Translator<'a> {
        Translator {
            translations: self,
            lang,
        }
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.strings
            .get(lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

/// [`Translations`] with a fixed language.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    translations: &'a Translations,
    lang: &'a str,
}

impl<'a> Translator<'a> {
    pub fn lang(&self) -> &'a str {
        self.lang
    }

    pub fn t<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.translations.translate(self.lang, key)
    }
}
