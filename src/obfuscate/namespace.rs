//! Collision domains for assigned names.
//!
//! A namespace records every name already claimed within one collision domain:
//! one per package bucket for classes, one per member scope for fields and
//! methods. Namespaces are explicit values handed to each allocation call, so
//! renaming scenarios compose without any global tables.

use std::collections::HashSet;

/// A collision domain within which assigned names must be pairwise distinct.
///
/// Comparison is optionally case-folding: with mixed-case names disabled, `ab`
/// and `aB` collide, keeping output safe for case-insensitive filesystems.
#[derive(Debug, Clone)]
pub struct Namespace {
    label: String,
    case_sensitive: bool,
    names: HashSet<String>,
}

impl Namespace {
    /// Creates an empty namespace.
    ///
    /// The label only appears in diagnostics (e.g. exhaustion errors).
    #[must_use]
    pub fn new(label: &str, case_sensitive: bool) -> Self {
        Namespace {
            label: label.to_string(),
            case_sensitive,
            names: HashSet::new(),
        }
    }

    /// The diagnostic label of this collision domain.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `name` is already claimed in this domain.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&self.fold(name))
    }

    /// Claims `name` in this domain. Returns whether the name was free.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(self.fold(name))
    }

    /// Number of claimed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no name has been claimed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn fold(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }
}
