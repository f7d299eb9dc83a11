//! Candidate name generation for the renaming passes.
//!
//! A name factory produces a lazy, restartable sequence of candidate
//! identifiers. The renamers draw from a factory until a candidate clears the
//! target namespace, so factories never worry about collisions themselves; they
//! only guarantee fresh, non-empty values and a deterministic restart.
//!
//! # Key Components
//!
//! - [`NameFactory`] - The generation contract
//! - [`SimpleNameFactory`] - Base-26 alphabetic counter (`a, b, .., z, aa, ..`)
//! - [`NumericNameFactory`] - Decimal counter starting at `1`
//! - [`DictionaryNameFactory`] - Word-list source with a fallback factory
//! - [`SpecialNameFactory`] - Decorator marking names with a fixed suffix
//!
//! # Examples
//!
//! ```rust
//! use shroud::naming::{NameFactory, SimpleNameFactory};
//!
//! let mut factory = SimpleNameFactory::new(false);
//! assert_eq!(factory.next(), "a");
//! assert_eq!(factory.next(), "b");
//! factory.reset();
//! assert_eq!(factory.next(), "a");
//! ```

mod dictionary;
mod numeric;
mod simple;
mod special;

pub use dictionary::DictionaryNameFactory;
pub use numeric::NumericNameFactory;
pub use simple::SimpleNameFactory;
pub use special::{is_special_name, SpecialNameFactory, SPECIAL_NAME_SUFFIX};

/// Produces a lazy, restartable sequence of candidate identifiers.
///
/// Every call to [`next`](NameFactory::next) returns a fresh, non-empty value
/// until [`reset`](NameFactory::reset) restarts the sequence. Resetting is
/// deterministic: given the same construction inputs, the sequence after a
/// reset is identical to the original run.
pub trait NameFactory {
    /// Produces the next candidate identifier.
    fn next(&mut self) -> String;

    /// Restarts the sequence from its first value.
    fn reset(&mut self);
}
