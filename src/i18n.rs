//! Translation tables.
//!
//! The tables are compiled into the binary and parsed once, by [`Catalog::load`]; after that
//! they never change. The only mutable part is which language a [`Localizer`] is speaking, and
//! that only changes through [`Localizer::set_language`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

static EN: &str = include_str!("../locales/en.json");
static FR: &str = include_str!("../locales/fr.json");

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    fn table_source(self) -> &'static str {
        match self {
            Language::Fr => FR,
            Language::En => EN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Language, LanguageParseError> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| LanguageParseError(s.to_owned()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language {0:?}; expected one of \"fr\" or \"en\"")]
pub struct LanguageParseError(String);

#[derive(Debug, thiserror::Error)]
#[error("failed to parse the built-in {language} translation table: {source}")]
pub struct I18nError {
    language: Language,
    #[source]
    source: serde_json::Error,
}

/// Every translation table, keyed by language.
#[derive(Debug)]
pub struct Catalog {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    /// Parse the built-in translation tables.
    pub fn load() -> Result<Catalog, I18nError> {
        let mut tables = HashMap::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            let table: HashMap<String, String> = serde_json::from_str(language.table_source())
                .map_err(|source| I18nError { language, source })?;
            log::debug!("loaded {} translations for {language}", table.len());
            tables.insert(language, table);
        }
        Ok(Catalog { tables })
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

/// Translates keys into the currently selected language.
#[derive(Debug)]
pub struct Localizer {
    catalog: Catalog,
    language: Language,
}

impl Localizer {
    pub fn new(catalog: Catalog, language: Language) -> Localizer {
        Localizer { catalog, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// The translation of `key`, or `key` itself if there isn't one.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        match self.catalog.lookup(self.language, key) {
            Some(text) => text,
            None => {
                log::debug!("no {} translation for {key:?}", self.language);
                key
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn parse_language_codes() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
        assert!("EN".parse::<Language>().is_err());
    }

    #[test]
    fn tables_have_the_same_keys() {
        let catalog = Catalog::load().unwrap();
        let keys = |lang| {
            catalog.tables[&lang]
                .keys()
                .map(String::as_str)
                .collect::<HashSet<_>>()
        };
        assert_eq!(keys(Language::Fr), keys(Language::En));
    }

    #[test]
    fn switching_language() {
        let mut localizer = Localizer::new(Catalog::load().unwrap(), Language::Fr);
        assert_eq!(localizer.t("veryStrong"), "Très fort");
        localizer.set_language(Language::En);
        assert_eq!(localizer.language(), Language::En);
        assert_eq!(localizer.t("veryStrong"), "Very strong");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let localizer = Localizer::new(Catalog::load().unwrap(), Language::En);
        assert_eq!(localizer.t("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn strength_and_crack_time_keys_exist() {
        let catalog = Catalog::load().unwrap();
        for key in [
            "weak",
            "medium",
            "strong",
            "veryStrong",
            "instant",
            "secondPlural",
            "minutePlural",
            "hourPlural",
            "dayPlural",
            "yearPlural",
            "thousandsOfYears",
            "millionsOfYears",
            "selectAtLeastOneOption",
        ] {
            for lang in Language::ALL {
                assert!(catalog.lookup(lang, key).is_some(), "{lang} lacks {key}");
            }
        }
    }
}
