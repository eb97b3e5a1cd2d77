use std::fmt;

use crate::options::CompositionOptions;
use crate::password_generation::PasswordLength;

/// The character-set size strength and crack-time estimates are based on.
///
/// This is an approximation, not the length of [`crate::build_alphabet`]: the symbol class
/// counts as 30, and avoiding ambiguous characters always takes off 8, even when the enabled
/// classes contain fewer than 8 of them (symbols alone, say). Exclusions are not counted at
/// all. The result can therefore be negative; users clamp it to at least 1.
pub fn charset_size(options: &CompositionOptions) -> i32 {
    let mut size = 0;
    if options.lowercase {
        size += 26;
    }
    if options.uppercase {
        size += 26;
    }
    if options.numbers {
        size += 10;
    }
    if options.symbols {
        size += 30;
    }
    if options.avoid_ambiguous {
        size -= 8;
    }
    size
}

pub(crate) fn effective_charset_size(options: &CompositionOptions) -> f64 {
    f64::from(charset_size(options).max(1))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StrengthAssessment {
    pub entropy_bits: u32,
    pub level: StrengthLevel,
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_entropy(bits: u32) -> StrengthLevel {
        match bits {
            0..=39 => StrengthLevel::Weak,
            40..=59 => StrengthLevel::Medium,
            60..=79 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }

    /// The translation key for this level's label.
    pub fn key(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "weak",
            StrengthLevel::Medium => "medium",
            StrengthLevel::Strong => "strong",
            StrengthLevel::VeryStrong => "veryStrong",
        }
    }

    /// How full a strength meter should be drawn.
    pub fn percent(self) -> u8 {
        match self {
            StrengthLevel::Weak => 25,
            StrengthLevel::Medium => 50,
            StrengthLevel::Strong => 75,
            StrengthLevel::VeryStrong => 100,
        }
    }

    /// Display colour, as a CSS hex string, for graphical front-ends. The terminal binary
    /// approximates these with named ANSI colours.
    pub fn color(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "#ef4444",
            StrengthLevel::Medium => "#f59e0b",
            StrengthLevel::Strong => "#22c55e",
            StrengthLevel::VeryStrong => "#16a34a",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthLevel::Weak => "weak",
            StrengthLevel::Medium => "medium",
            StrengthLevel::Strong => "strong",
            StrengthLevel::VeryStrong => "very strong",
        };
        f.write_str(label)
    }
}

/// Estimate how strong a password generated with `options` and `length` is.
pub fn classify_strength(options: &CompositionOptions, length: PasswordLength) -> StrengthAssessment {
    let bits = length.get() as f64 * effective_charset_size(options).log2();
    let entropy_bits = bits.floor() as u32;
    StrengthAssessment {
        entropy_bits,
        level: StrengthLevel::from_entropy(entropy_bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(n: u32) -> PasswordLength {
        PasswordLength::try_from(n).unwrap()
    }

    #[test]
    fn sizes() {
        assert_eq!(charset_size(&CompositionOptions::default()), 84);
        assert_eq!(charset_size(&CompositionOptions::none()), 0);
        let symbols_only = CompositionOptions {
            symbols: true,
            avoid_ambiguous: true,
            ..CompositionOptions::none()
        };
        assert_eq!(charset_size(&symbols_only), 22);
        let nothing_but_the_filter = CompositionOptions {
            avoid_ambiguous: true,
            ..CompositionOptions::none()
        };
        assert_eq!(charset_size(&nothing_but_the_filter), -8);
    }

    #[test]
    fn exclusions_do_not_change_the_estimate() {
        let options = CompositionOptions::default();
        assert_eq!(
            classify_strength(&options, len(16)),
            classify_strength(&options.clone().excluding("abcdef"), len(16)),
        );
    }

    #[test]
    fn everything_enabled_at_24() {
        let assessment = classify_strength(&CompositionOptions::default(), len(24));
        assert_eq!(assessment.entropy_bits, 153);
        assert_eq!(assessment.level, StrengthLevel::VeryStrong);
    }

    #[test]
    fn lowercase_at_8_is_weak() {
        let options = CompositionOptions {
            lowercase: true,
            ..CompositionOptions::none()
        };
        let assessment = classify_strength(&options, len(8));
        assert_eq!(assessment.entropy_bits, 37);
        assert_eq!(assessment.level, StrengthLevel::Weak);
    }

    #[test]
    fn no_characters_means_no_entropy() {
        for options in [
            CompositionOptions::none(),
            CompositionOptions {
                avoid_ambiguous: true,
                ..CompositionOptions::none()
            },
        ] {
            let assessment = classify_strength(&options, len(64));
            assert_eq!(assessment.entropy_bits, 0);
            assert_eq!(assessment.level, StrengthLevel::Weak);
        }
    }

    #[test]
    fn thresholds() {
        assert_eq!(StrengthLevel::from_entropy(0), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_entropy(39), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_entropy(40), StrengthLevel::Medium);
        assert_eq!(StrengthLevel::from_entropy(59), StrengthLevel::Medium);
        assert_eq!(StrengthLevel::from_entropy(60), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_entropy(79), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_entropy(80), StrengthLevel::VeryStrong);
    }

    #[test]
    fn longer_is_never_weaker() {
        let options = CompositionOptions {
            numbers: true,
            ..CompositionOptions::none()
        };
        let mut previous = classify_strength(&options, len(8));
        for n in 9..=64 {
            let current = classify_strength(&options, len(n));
            assert!(current.entropy_bits >= previous.entropy_bits);
            assert!(current.level >= previous.level);
            previous = current;
        }
    }

    #[test]
    fn presentation() {
        assert_eq!(StrengthLevel::Medium.percent(), 50);
        assert_eq!(StrengthLevel::VeryStrong.key(), "veryStrong");
        assert_eq!(StrengthLevel::VeryStrong.to_string(), "very strong");
        assert_eq!(StrengthLevel::Weak.color(), "#ef4444");
    }
}
