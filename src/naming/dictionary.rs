//! Dictionary-backed name factory.

use std::fs;
use std::path::Path;

use crate::model::names::is_valid_identifier;
use crate::naming::NameFactory;
use crate::Result;

/// Draws names from a word list, falling back to another factory once the list
/// is exhausted.
///
/// The list is deduplicated while preserving first-occurrence order. Resetting
/// rewinds to the first word and also resets the fallback factory, whether or
/// not the fallback was ever reached.
pub struct DictionaryNameFactory {
    words: Vec<String>,
    position: usize,
    fallback: Box<dyn NameFactory>,
}

impl DictionaryNameFactory {
    /// Creates a factory from raw dictionary text.
    ///
    /// Lines starting with `#` and trailing `#...` comments are stripped, as is
    /// surrounding whitespace. With `identifiers_only`, tokens that are not
    /// valid Java identifiers are skipped instead of produced.
    #[must_use]
    pub fn new(text: &str, identifiers_only: bool, fallback: Box<dyn NameFactory>) -> Self {
        let mut words = Vec::new();
        for line in text.lines() {
            let token = match line.find('#') {
                Some(index) => &line[..index],
                None => line,
            };
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if identifiers_only && !is_valid_identifier(token) {
                continue;
            }
            if !words.iter().any(|w| w == token) {
                words.push(token.to_string());
            }
        }
        DictionaryNameFactory {
            words,
            position: 0,
            fallback,
        }
    }

    /// Creates a factory from a dictionary file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be read.
    pub fn from_file(
        path: &Path,
        identifiers_only: bool,
        fallback: Box<dyn NameFactory>,
    ) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(DictionaryNameFactory::new(&text, identifiers_only, fallback))
    }

    /// Number of usable words in the dictionary.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl NameFactory for DictionaryNameFactory {
    fn next(&mut self) -> String {
        if self.position < self.words.len() {
            let word = self.words[self.position].clone();
            self.position += 1;
            word
        } else {
            self.fallback.next()
        }
    }

    fn reset(&mut self) {
        self.position = 0;
        self.fallback.reset();
    }
}

impl std::fmt::Debug for DictionaryNameFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryNameFactory")
            .field("words", &self.words.len())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
