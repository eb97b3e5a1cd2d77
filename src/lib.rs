//! Random password generation with a rough strength and crack-time estimate.
//!
//! The core is [`generate`]: it builds an alphabet from a [`CompositionOptions`] and draws
//! each character from the operating system's CSPRNG. [`classify_strength`] and
//! [`estimate_crack_time`] work from the options and the length alone, never from a generated
//! password.

use serde::{Deserialize, Serialize};

mod crack_time;
pub mod i18n;
mod options;
pub mod password_generation;
pub mod preferences;
mod strength;

pub use crack_time::{estimate_crack_time, CrackTime};
pub use i18n::{Catalog, Language, Localizer};
pub use options::{build_alphabet, CompositionOptions};
pub use password_generation::{
    generate, generate_with, GenerateError, GenerationRequest, PasswordCount, PasswordLength,
    RequestError,
};
pub use preferences::{Preferences, Theme};
pub use strength::{charset_size, classify_strength, StrengthAssessment, StrengthLevel};

/// A generated password.
///
/// The `Debug` output never shows the contents, so these can be logged freely.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
