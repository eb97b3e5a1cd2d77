//! The two user preferences that outlive a run: colour theme and language.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Colour theme.
///
/// A terminal has no portable way to ask for the desktop's light/dark preference, so with
/// nothing saved this defaults to `Light`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Theme, ThemeParseError> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ThemeParseError(s.to_owned())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown theme {0:?}; expected \"light\" or \"dark\"")]
pub struct ThemeParseError(String);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
}

impl Preferences {
    /// Load preferences from `path`. A file that doesn't exist yet just means defaults.
    pub fn load(path: &Path) -> Result<Preferences, PreferencesError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no preferences at {}; using defaults", path.display());
                return Ok(Preferences::default());
            }
            Err(err) => return Err(PreferencesErrorRepr::Io(err).into()),
        };
        let prefs = serde_yaml::from_str(&data).map_err(PreferencesErrorRepr::Parse)?;
        log::debug!("loaded preferences from {}: {prefs:?}", path.display());
        Ok(prefs)
    }

    /// Write the preferences to `path`, replacing whatever was there.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let file_name = path
            .file_name()
            .ok_or(PreferencesErrorRepr::NotAFile)?
            .to_os_string();
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(PreferencesErrorRepr::Io)?;
        }

        let temp_path = {
            let mut file_name = file_name;
            file_name.push(".writing");
            parent.join(file_name)
        };
        let data = serde_yaml::to_string(self).map_err(PreferencesErrorRepr::Serialize)?;
        fs::write(&temp_path, data).map_err(PreferencesErrorRepr::Io)?;
        fs::rename(&temp_path, path).map_err(PreferencesErrorRepr::Io)?;
        log::debug!("saved preferences to {}", path.display());
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct PreferencesError(PreferencesErrorRepr);

impl PreferencesError {
    /// Whether the file was read but its contents are not valid preferences.
    pub fn is_malformed(&self) -> bool {
        matches!(self.0, PreferencesErrorRepr::Parse(_))
    }
}

impl From<PreferencesErrorRepr> for PreferencesError {
    fn from(err: PreferencesErrorRepr) -> PreferencesError {
        PreferencesError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum PreferencesErrorRepr {
    #[error("I/O error: {0}")]
    Io(io::Error),
    #[error("failed to parse the preferences file")]
    Parse(#[source] serde_yaml::Error),
    #[error("failed to serialize preferences")]
    Serialize(#[source] serde_yaml::Error),
    #[error("the preferences path does not name a file")]
    NotAFile,
}
