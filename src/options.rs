use std::collections::BTreeSet;

pub(crate) static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub(crate) static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub(crate) static NUMBERS: &str = "0123456789";
pub(crate) static SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// Characters that are easily confused with one another in most fonts.
pub(crate) static AMBIGUOUS: &str = "ilIL10oO";

/// Which characters a generated password may contain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompositionOptions {
    pub lowercase: bool,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    /// Drop `i l I L 1 0 o O` from the alphabet.
    pub avoid_ambiguous: bool,
    /// `exclude_set` is only honoured when this is set, so a set can be kept around while
    /// switched off.
    pub exclude_enabled: bool,
    pub exclude_set: BTreeSet<char>,
}

impl CompositionOptions {
    /// Options with every class and filter switched off, which yield an empty alphabet.
    pub fn none() -> CompositionOptions {
        CompositionOptions {
            lowercase: false,
            uppercase: false,
            numbers: false,
            symbols: false,
            avoid_ambiguous: false,
            exclude_enabled: false,
            exclude_set: BTreeSet::new(),
        }
    }

    /// Enable exclusion of every character in `chars`.
    pub fn excluding(mut self, chars: &str) -> CompositionOptions {
        self.exclude_enabled = true;
        self.exclude_set.extend(chars.chars());
        self
    }
}

impl Default for CompositionOptions {
    fn default() -> CompositionOptions {
        CompositionOptions {
            lowercase: true,
            uppercase: true,
            numbers: true,
            symbols: true,
            avoid_ambiguous: true,
            exclude_enabled: false,
            exclude_set: BTreeSet::new(),
        }
    }
}

/// Build the alphabet a password is sampled from.
///
/// The classes are appended in a fixed order (lowercase, uppercase, numbers, symbols) and
/// never overlap, so the result has no duplicates. An empty alphabet is a valid result; it is
/// up to the caller to refuse to generate from it.
pub fn build_alphabet(options: &CompositionOptions) -> Vec<char> {
    let mut abc = Vec::new();
    if options.lowercase {
        abc.extend(LOWERCASE.chars());
    }
    if options.uppercase {
        abc.extend(UPPERCASE.chars());
    }
    if options.numbers {
        abc.extend(NUMBERS.chars());
    }
    if options.symbols {
        abc.extend(SYMBOLS.chars());
    }

    if options.avoid_ambiguous {
        abc.retain(|ch| !AMBIGUOUS.contains(*ch));
    }
    if options.exclude_enabled && !options.exclude_set.is_empty() {
        abc.retain(|ch| !options.exclude_set.contains(ch));
    }

    log::debug!("built an alphabet of {} characters", abc.len());
    abc
}
