//! Attribute usage marking.
//!
//! The reachability analysis (outside this crate) decides which attribute
//! records are still required and marks them through a [`UsageMarker`]. The
//! compactor later drops every attribute the marker did not touch.
//!
//! Each marker carries its own identity; a mark written by a different marker
//! (say, a previous run over the same pool) does not count as "used" for this
//! one. That keeps a stale mark from smuggling a dead attribute through
//! compaction.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::model::attribute::{Attribute, UsageMark};

static NEXT_MARKER_ID: AtomicU32 = AtomicU32::new(1);

/// Marks attribute records as in use for one obfuscation run.
#[derive(Debug)]
pub struct UsageMarker {
    id: NonZeroU32,
}

impl UsageMarker {
    /// Creates a marker with a fresh identity.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` markers are created in one process.
    #[must_use]
    pub fn new() -> Self {
        let raw = NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed);
        UsageMarker {
            id: NonZeroU32::new(raw).expect("marker id counter wrapped"),
        }
    }

    /// Marks the attribute as used.
    pub fn mark(&self, attribute: &mut Attribute) {
        attribute.usage = Some(UsageMark::new(self.id));
    }

    /// Whether this marker marked the attribute.
    ///
    /// Marks from other markers, and the unmarked state, both answer `false`.
    #[must_use]
    pub fn is_used(&self, attribute: &Attribute) -> bool {
        attribute.usage.map(UsageMark::marker_id) == Some(self.id)
    }
}

impl Default for UsageMarker {
    fn default() -> Self {
        UsageMarker::new()
    }
}
