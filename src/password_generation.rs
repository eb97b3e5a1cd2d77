//! Utilities for generating passwords.

use std::fmt;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::options::{build_alphabet, CompositionOptions};

/// Generate a simple, impossible-to-guess password by just randomly sampling the given alphabet.
///
/// These are ugly, hard to remember passwords, but perfect if you're just copying them from
/// somewhere.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
///
/// Returns `None` if the alphabet is empty.
pub fn generate_random_password<R>(
    rng: &mut R,
    alphabet: &[char],
    len: usize,
) -> Option<crate::Secret>
where
    R: Rng + CryptoRng,
{
    let mut secret = crate::Secret(String::with_capacity(len));
    for _ in 0..len {
        let ch = alphabet.choose(rng)?;
        secret.0.push(*ch);
    }
    Some(secret)
}

/// Generate the passwords described by `request`, drawing from the operating system's CSPRNG.
pub fn generate(request: &GenerationRequest) -> Result<Vec<crate::Secret>, GenerateError> {
    generate_with(&mut OsRng, request)
}

/// Like [`generate`], but with a caller-supplied RNG.
pub fn generate_with<R>(
    rng: &mut R,
    request: &GenerationRequest,
) -> Result<Vec<crate::Secret>, GenerateError>
where
    R: Rng + CryptoRng,
{
    let alphabet = build_alphabet(&request.options);
    if alphabet.is_empty() {
        return Err(GenerateError::EmptyAlphabet);
    }

    log::debug!(
        "generating {} password(s) of length {} from {} characters",
        request.count,
        request.length,
        alphabet.len(),
    );
    let mut passwords = Vec::with_capacity(request.count.get());
    for _ in 0..request.count.get() {
        let password = generate_random_password(rng, &alphabet, request.length.get())
            .ok_or(GenerateError::EmptyAlphabet)?;
        passwords.push(password);
    }
    Ok(passwords)
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("no characters are left to generate a password from")]
    EmptyAlphabet,
}

/// Everything needed to generate a batch of passwords.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenerationRequest {
    pub length: PasswordLength,
    pub count: PasswordCount,
    pub options: CompositionOptions,
}

/// A password length, between 8 and 64 characters inclusive.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct PasswordLength(u8);

impl PasswordLength {
    pub const MIN: u32 = 8;
    pub const MAX: u32 = 64;

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for PasswordLength {
    fn default() -> PasswordLength {
        PasswordLength(24)
    }
}

impl TryFrom<u32> for PasswordLength {
    type Error = RequestError;

    fn try_from(len: u32) -> Result<PasswordLength, RequestError> {
        if (Self::MIN..=Self::MAX).contains(&len) {
            // In range, so this fits in a u8.
            Ok(PasswordLength(len as u8))
        } else {
            Err(RequestError::LengthOutOfRange(len))
        }
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many passwords to generate in one go: 1, 3, 5 or 10.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct PasswordCount(u8);

impl PasswordCount {
    pub const ALLOWED: [u32; 4] = [1, 3, 5, 10];

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for PasswordCount {
    fn default() -> PasswordCount {
        PasswordCount(1)
    }
}

impl TryFrom<u32> for PasswordCount {
    type Error = RequestError;

    fn try_from(count: u32) -> Result<PasswordCount, RequestError> {
        if Self::ALLOWED.contains(&count) {
            Ok(PasswordCount(count as u8))
        } else {
            Err(RequestError::UnsupportedCount(count))
        }
    }
}

impl fmt::Display for PasswordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("a password length of {0} is not supported; it must be between 8 and 64")]
    LengthOutOfRange(u32),
    #[error("cannot generate {0} passwords at once; choose 1, 3, 5 or 10")]
    UnsupportedCount(u32),
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn request(length: u32, count: u32, options: CompositionOptions) -> GenerationRequest {
        GenerationRequest {
            length: PasswordLength::try_from(length).unwrap(),
            count: PasswordCount::try_from(count).unwrap(),
            options,
        }
    }

    #[test]
    fn length_bounds() {
        assert!(PasswordLength::try_from(7).is_err());
        assert!(PasswordLength::try_from(65).is_err());
        assert_eq!(PasswordLength::try_from(8).unwrap().get(), 8);
        assert_eq!(PasswordLength::try_from(64).unwrap().get(), 64);
        assert_eq!(PasswordLength::default().get(), 24);
    }

    #[test]
    fn allowed_counts() {
        for count in PasswordCount::ALLOWED {
            assert_eq!(PasswordCount::try_from(count).unwrap().get(), count as usize);
        }
        for count in [0, 2, 4, 11] {
            assert!(matches!(
                PasswordCount::try_from(count),
                Err(RequestError::UnsupportedCount(c)) if c == count,
            ));
        }
    }

    #[test]
    fn lowercase_only_single_password() {
        let options = CompositionOptions {
            lowercase: true,
            ..CompositionOptions::none()
        };
        let passwords = generate(&request(8, 1, options)).unwrap();
        assert_eq!(passwords.len(), 1);
        assert_eq!(passwords[0].len(), 8);
        assert!(passwords[0].as_str().chars().all(|ch| ch.is_ascii_lowercase()));
    }

    #[test]
    fn shape_and_membership() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let options = CompositionOptions::default().excluding("@#$");
        let alphabet = build_alphabet(&options);
        for &(length, count) in &[(8, 1), (24, 3), (40, 5), (64, 10)] {
            let passwords = generate_with(&mut rng, &request(length, count, options.clone()))
                .unwrap();
            assert_eq!(passwords.len(), count as usize);
            for password in &passwords {
                assert_eq!(password.len(), length as usize);
                assert!(password.as_str().chars().all(|ch| alphabet.contains(&ch)));
            }
        }
    }

    #[test]
    fn excluded_characters_never_appear() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = CompositionOptions {
            lowercase: true,
            ..CompositionOptions::none()
        }
        .excluding("a");
        for _ in 0..20 {
            for password in generate_with(&mut rng, &request(64, 10, options.clone())).unwrap() {
                assert!(!password.as_str().contains('a'));
            }
        }
    }

    #[test]
    fn empty_alphabet_is_reported() {
        for &(length, count) in &[(8, 1), (64, 10)] {
            assert!(matches!(
                generate(&request(length, count, CompositionOptions::none())),
                Err(GenerateError::EmptyAlphabet)
            ));
        }
    }

    #[test]
    fn sampling_from_an_empty_alphabet() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(generate_random_password(&mut rng, &[], 8).is_none());
        assert_eq!(
            generate_random_password(&mut rng, &[], 0).map(|s| s.len()),
            Some(0)
        );
    }

    #[test]
    fn every_character_is_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let alphabet = ['x', 'y', 'z'];
        let password = generate_random_password(&mut rng, &alphabet, 64).unwrap();
        for ch in alphabet {
            assert!(password.as_str().contains(ch));
        }
    }
}
