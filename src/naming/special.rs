//! Marker-suffix name factory decorator.

use crate::naming::NameFactory;

/// Suffix appended to every name produced by a [`SpecialNameFactory`].
pub const SPECIAL_NAME_SUFFIX: &str = "_";

/// Wraps another factory and appends [`SPECIAL_NAME_SUFFIX`] to every name.
///
/// Special names are guaranteed distinguishable from ordinary generated names,
/// which lets later passes recognize synthetic entities the engine introduced
/// itself.
pub struct SpecialNameFactory {
    inner: Box<dyn NameFactory>,
}

impl SpecialNameFactory {
    /// Wraps the given factory.
    #[must_use]
    pub fn new(inner: Box<dyn NameFactory>) -> Self {
        SpecialNameFactory { inner }
    }
}

impl NameFactory for SpecialNameFactory {
    fn next(&mut self) -> String {
        let mut name = self.inner.next();
        name.push_str(SPECIAL_NAME_SUFFIX);
        name
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// Whether a name was produced by a [`SpecialNameFactory`].
#[must_use]
pub fn is_special_name(name: &str) -> bool {
    name.len() > SPECIAL_NAME_SUFFIX.len() && name.ends_with(SPECIAL_NAME_SUFFIX)
}
