use std::path::PathBuf;

use anyhow::Context;

use passgen::{Catalog, Language, Localizer, Preferences, Theme};

/// Everything that lives for one run of the program.
///
/// Created by [`Session::start`], handed to whichever command runs, and consumed by
/// [`Session::shutdown`], which writes back any preference that changed.
pub(crate) struct Session {
    preferences_path: PathBuf,
    preferences: Preferences,
    /// What is on disk, or `None` if the file there could not be parsed.
    loaded: Option<Preferences>,
    localizer: Localizer,
}

impl Session {
    pub(crate) fn start(preferences_path: PathBuf) -> anyhow::Result<Session> {
        let loaded = match Preferences::load(&preferences_path) {
            Ok(preferences) => Some(preferences),
            Err(err) if err.is_malformed() => {
                log::warn!(
                    "ignoring unreadable preferences in {} ({:#}); using defaults",
                    preferences_path.display(),
                    anyhow::Error::new(err),
                );
                None
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!(
                        "failed to load preferences from {}",
                        preferences_path.display()
                    )
                })
            }
        };
        let preferences = loaded.unwrap_or_default();
        let catalog = Catalog::load()?;
        Ok(Session {
            localizer: Localizer::new(catalog, preferences.language),
            preferences_path,
            preferences,
            loaded,
        })
    }

    pub(crate) fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub(crate) fn theme(&self) -> Theme {
        self.preferences.theme
    }

    /// Switch to `theme`, or to the other theme if none is given. Returns the new theme.
    pub(crate) fn set_theme(&mut self, theme: Option<Theme>) -> Theme {
        match theme {
            Some(theme) => self.preferences.theme = theme,
            None => self.preferences.toggle_theme(),
        }
        self.preferences.theme
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        self.preferences.language = language;
        self.localizer.set_language(language);
    }

    /// Persist the preferences if they changed, or if the file on disk was malformed.
    pub(crate) fn shutdown(self) -> anyhow::Result<()> {
        if self.loaded == Some(self.preferences) {
            return Ok(());
        }
        self.preferences
            .save(&self.preferences_path)
            .with_context(|| {
                format!(
                    "failed to save preferences to {}",
                    self.preferences_path.display()
                )
            })
    }
}
