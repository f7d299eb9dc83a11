//! Decimal counter name factory.

use crate::naming::NameFactory;

/// Generates the decimal strings `1, 2, 3, ..` with no leading zeros.
///
/// Used for class renaming, where purely numeric simple names cannot clash
/// with any source identifier.
#[derive(Debug, Clone, Default)]
pub struct NumericNameFactory {
    index: u64,
}

impl NumericNameFactory {
    /// Creates a factory starting at `1`.
    #[must_use]
    pub fn new() -> Self {
        NumericNameFactory::default()
    }
}

impl NameFactory for NumericNameFactory {
    fn next(&mut self) -> String {
        self.index += 1;
        self.index.to_string()
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
