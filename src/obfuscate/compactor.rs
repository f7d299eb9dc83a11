//! Attribute compaction.
//!
//! After the usage marker has run, every attribute list in the pool is
//! compacted: marked attributes move into a prefix in their original order,
//! the live count shrinks to match, and the vacated slots are cleared so the
//! dropped records can be collected.
//!
//! Owners are independent, so compaction runs in parallel across classes with
//! each class (and its members' lists) compacted as one unit. Re-running the
//! compactor on an already-compacted pool is a no-op.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::model::attribute::AttributeList;
use crate::model::pool::ClassPool;
use crate::obfuscate::usage::UsageMarker;

/// Compacts every attribute list in a pool down to its marked attributes.
#[derive(Debug)]
pub struct AttributeCompactor<'a> {
    marker: &'a UsageMarker,
}

impl<'a> AttributeCompactor<'a> {
    /// Creates a compactor that keeps attributes marked by `marker`.
    #[must_use]
    pub fn new(marker: &'a UsageMarker) -> Self {
        AttributeCompactor { marker }
    }

    /// Compacts all class and member attribute lists in the pool.
    ///
    /// Returns the number of attribute records dropped.
    pub fn run(&self, pool: &mut ClassPool) -> usize {
        let dropped = AtomicUsize::new(0);
        pool.classes_mut().par_iter_mut().for_each(|class| {
            let mut removed = self.compact_list(&mut class.attributes);
            for member in &mut class.members {
                removed += self.compact_list(&mut member.attributes);
            }
            dropped.fetch_add(removed, Ordering::Relaxed);
        });
        dropped.into_inner()
    }

    /// Compacts one attribute list. Returns the number of records dropped.
    pub fn compact_list(&self, list: &mut AttributeList) -> usize {
        let before = list.count();
        list.compact(|attribute| self.marker.is_used(attribute));
        before - list.count()
    }
}
