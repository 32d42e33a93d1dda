//! Random short code generation.
//!
//! Generators are pure: they draw candidate codes without consulting
//! storage. Uniqueness is enforced by the allocation engine's atomic
//! reservation, not here.

use rand::Rng;
use urlie_core::ShortCode;

/// Code alphabet: digits and letters minus the visually confusable
/// characters `0`, `O`, `1`, `I`, and `l`.
const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Generated code length. 57^6 (~34 billion) keys keep the collision
/// probability negligible at any realistic fill level.
pub const CODE_LENGTH: usize = 6;

/// Trait for generating candidate short codes.
///
/// Implementations must produce independent draws so that a collision on
/// one attempt says nothing about the next.
pub trait CodeGenerator: Send + Sync + 'static {
    /// Generates one candidate code.
    fn generate(&self) -> ShortCode;
}

/// Draws fixed-length codes uniformly from [`ALPHABET`].
///
/// Uses the thread-local CSPRNG, so codes are not enumerable or
/// predictable from previous outputs.
#[derive(Debug, Clone, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_have_fixed_length() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..100 {
            assert_eq!(generator.generate().as_str().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn codes_stay_within_alphabet() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..100 {
            let code = generator.generate();
            assert!(code
                .as_str()
                .bytes()
                .all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn alphabet_excludes_confusable_characters() {
        for confusable in [b'0', b'O', b'1', b'I', b'l'] {
            assert!(!ALPHABET.contains(&confusable));
        }
    }

    #[test]
    fn draws_are_independent() {
        let generator = RandomCodeGenerator::new();
        let codes: HashSet<String> = (0..1000)
            .map(|_| generator.generate().as_str().to_owned())
            .collect();
        // 1000 draws from a 34-billion key space; a duplicate would point
        // at a broken random source.
        assert_eq!(codes.len(), 1000);
    }
}
