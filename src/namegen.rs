//! Opaque identifier generation.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Fixed-length random identifier source, scoped to one obfuscation run.
///
/// Names are alphanumeric with a letter first so every result is a valid
/// identifier. The generator remembers every name it has issued and draws
/// again on collision or on a spelling that is not a bare identifier
/// (keywords), so names are unique within a run.
pub struct NameGenerator {
    rng: StdRng,
    length: usize,
    issued: HashSet<String>,
}

impl NameGenerator {
    pub const DEFAULT_LENGTH: usize = 5;

    /// Entropy-seeded generator with the given identifier length.
    pub fn new(length: usize) -> Self {
        Self::from_rng(StdRng::from_entropy(), length)
    }

    /// Seeded generator for reproducible runs and tests.
    pub fn with_seed(seed: u64, length: usize) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), length)
    }

    fn from_rng(rng: StdRng, length: usize) -> Self {
        Self {
            rng,
            length: length.max(1),
            issued: HashSet::new(),
        }
    }

    /// Produce a fresh opaque name, unique within this run.
    pub fn fresh(&mut self) -> String {
        loop {
            let candidate = self.candidate();
            if self.issued.contains(&candidate) {
                continue;
            }
            if syn::parse_str::<syn::Ident>(&candidate).is_err() {
                continue;
            }
            self.issued.insert(candidate.clone());
            return candidate;
        }
    }

    fn candidate(&mut self) -> String {
        let mut out = String::with_capacity(self.length);
        out.push(LETTERS[self.rng.gen_range(0..LETTERS.len())] as char);
        for _ in 1..self.length {
            out.push(ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char);
        }
        out
    }
}
