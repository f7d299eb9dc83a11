//! Base-26 alphabetic name factory.

use crate::naming::NameFactory;

const LOWER: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const MIXED: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generates short alphabetic names: `a, b, .., z, aa, ab, ..`.
///
/// With mixed case enabled the alphabet doubles, alternating through the upper
/// case letters before growing a character: `a, .., z, A, .., Z, aa, ..`.
#[derive(Debug, Clone)]
pub struct SimpleNameFactory {
    mixed_case: bool,
    index: u64,
}

impl SimpleNameFactory {
    /// Creates a factory, optionally drawing from the mixed-case alphabet.
    #[must_use]
    pub fn new(mixed_case: bool) -> Self {
        SimpleNameFactory {
            mixed_case,
            index: 0,
        }
    }

    fn alphabet(&self) -> &'static [u8] {
        if self.mixed_case {
            MIXED
        } else {
            LOWER
        }
    }
}

impl NameFactory for SimpleNameFactory {
    fn next(&mut self) -> String {
        self.index += 1;
        let alphabet = self.alphabet();
        let base = alphabet.len() as u64;

        // Bijective base-N numeration: no zero digit, so "a" follows "" the
        // way "aa" follows "z".
        let mut n = self.index;
        let mut bytes = Vec::new();
        while n > 0 {
            n -= 1;
            bytes.push(alphabet[(n % base) as usize]);
            n /= base;
        }
        bytes.reverse();
        String::from_utf8(bytes).unwrap_or_default()
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
