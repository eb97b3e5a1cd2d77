use std::fmt;

use crate::i18n::Localizer;
use crate::options::CompositionOptions;
use crate::password_generation::PasswordLength;
use crate::strength::effective_charset_size;

/// Assumed attacker throughput, in guesses per second.
const GUESSES_PER_SECOND: f64 = 1e10;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// How long a brute-force search of the whole space would take, bucketed for display.
///
/// Counted values are floored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrackTime {
    Instant,
    Seconds(u64),
    Minutes(u64),
    Hours(u64),
    Days(u64),
    Years(u64),
    ThousandsOfYears,
    MillionsOfYears,
}

/// Estimate how long exhausting every password generated from `options` at `length` would take.
pub fn estimate_crack_time(options: &CompositionOptions, length: PasswordLength) -> CrackTime {
    // Lengths are capped at 64, so this stays finite even for the largest character sets.
    let combinations = effective_charset_size(options).powi(length.get() as i32);
    let seconds = combinations / GUESSES_PER_SECOND;
    log::debug!("exhausting {combinations:e} combinations takes {seconds:e}s");
    CrackTime::from_seconds(seconds)
}

impl CrackTime {
    pub fn from_seconds(seconds: f64) -> CrackTime {
        let floored = |unit: f64| (seconds / unit).floor() as u64;
        if seconds < 1.0 {
            CrackTime::Instant
        } else if seconds < MINUTE {
            CrackTime::Seconds(floored(1.0))
        } else if seconds < HOUR {
            CrackTime::Minutes(floored(MINUTE))
        } else if seconds < DAY {
            CrackTime::Hours(floored(HOUR))
        } else if seconds < YEAR {
            CrackTime::Days(floored(DAY))
        } else if seconds < YEAR * 1e3 {
            CrackTime::Years(floored(YEAR))
        } else if seconds < YEAR * 1e6 {
            CrackTime::ThousandsOfYears
        } else {
            CrackTime::MillionsOfYears
        }
    }

    /// The counted value and the singular translation key of its unit, if this is a counted
    /// bucket.
    fn counted(self) -> Option<(u64, &'static str)> {
        match self {
            CrackTime::Seconds(n) => Some((n, "second")),
            CrackTime::Minutes(n) => Some((n, "minute")),
            CrackTime::Hours(n) => Some((n, "hour")),
            CrackTime::Days(n) => Some((n, "day")),
            CrackTime::Years(n) => Some((n, "year")),
            CrackTime::Instant | CrackTime::ThousandsOfYears | CrackTime::MillionsOfYears => None,
        }
    }

    /// Render in the localizer's current language.
    pub fn localize(self, localizer: &Localizer) -> String {
        match self.counted() {
            Some((n, unit)) if n > 1 => format!("{n} {}", localizer.t(&format!("{unit}Plural"))),
            Some((n, unit)) => format!("{n} {}", localizer.t(unit)),
            None => match self {
                CrackTime::ThousandsOfYears => localizer.t("thousandsOfYears").to_owned(),
                CrackTime::MillionsOfYears => localizer.t("millionsOfYears").to_owned(),
                _ => localizer.t("instant").to_owned(),
            },
        }
    }
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.counted() {
            Some((n, unit)) if n > 1 => write!(f, "{n} {unit}s"),
            Some((n, unit)) => write!(f, "{n} {unit}"),
            None => match self {
                CrackTime::ThousandsOfYears => f.write_str("thousands of years"),
                CrackTime::MillionsOfYears => f.write_str("millions of years"),
                _ => f.write_str("instant"),
            },
        }
    }
}
