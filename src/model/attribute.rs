//! Attribute records and the attribute lists that own them.
//!
//! Every class, field, and method carries an ordered list of attribute records
//! (debug tables, signatures, annotations, ...). The shrinking stage marks the
//! attributes that are still required and then compacts each list so that only
//! marked attributes survive.
//!
//! # Key Types
//!
//! - [`AttributeKind`] - Closed set of attribute record kinds
//! - [`Attribute`] - One attribute record with its usage slot
//! - [`AttributeList`] - The ordered, compactable list owned by an entity
//! - [`UsageMark`] - Typed mark written by the usage marker

use std::num::NonZeroU32;

use strum::{Display, EnumCount, EnumIter};

/// Identifiers for the attribute record kinds tracked by the renaming engine.
///
/// Each variant corresponds to one class-file attribute. Dispatch over attribute
/// kinds is an exhaustive match on this enum; there is no open-ended "unknown
/// attribute" escape hatch inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
pub enum AttributeKind {
    /// Name of the source file the class was compiled from
    SourceFile,
    /// Bytecode of a method body
    Code,
    /// Line number debug table of a method body
    LineNumberTable,
    /// Local variable debug table of a method body
    LocalVariableTable,
    /// Local variable type debug table of a method body
    LocalVariableTypeTable,
    /// Inner/outer class relationship records
    InnerClasses,
    /// Enclosing method of a local or anonymous class
    EnclosingMethod,
    /// Generic signature of a class or member
    Signature,
    /// Checked exceptions declared by a method
    Exceptions,
    /// Compile-time constant value of a field
    ConstantValue,
    /// Marks compiler-generated entities
    Synthetic,
    /// Marks entities scheduled for removal
    Deprecated,
    /// Runtime-visible annotations
    RuntimeVisibleAnnotations,
    /// Runtime-invisible annotations
    RuntimeInvisibleAnnotations,
    /// Annotation default values
    AnnotationDefault,
    /// Bootstrap methods for invokedynamic call sites
    BootstrapMethods,
    /// Kotlin reflection metadata annotation payload
    KotlinMetadata,
}

/// A typed mark recording that an attribute is still in use.
///
/// Marks are issued by a `UsageMarker` and carry that marker's identity, so a
/// mark left behind by an unrelated marker (e.g. a previous run over the same
/// pool) never counts as "used" for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMark(NonZeroU32);

impl UsageMark {
    pub(crate) fn new(marker_id: NonZeroU32) -> Self {
        UsageMark(marker_id)
    }

    pub(crate) fn marker_id(self) -> NonZeroU32 {
        self.0
    }
}

/// One attribute record owned by a class, field, or method.
///
/// The payload is opaque to the renaming engine; only the kind and the usage
/// slot matter here. Parsing and re-emitting payloads is the writer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The kind of this attribute record
    pub kind: AttributeKind,
    /// Raw payload bytes, untouched by the engine
    pub payload: Vec<u8>,
    /// Usage slot written by the usage marker; `None` until marked
    pub usage: Option<UsageMark>,
}

impl Attribute {
    /// Creates a new unmarked attribute of the given kind with an empty payload.
    #[must_use]
    pub fn new(kind: AttributeKind) -> Self {
        Attribute {
            kind,
            payload: Vec::new(),
            usage: None,
        }
    }

    /// Creates a new unmarked attribute with a payload.
    #[must_use]
    pub fn with_payload(kind: AttributeKind, payload: Vec<u8>) -> Self {
        Attribute {
            kind,
            payload,
            usage: None,
        }
    }
}

/// An ordered, compactable list of attribute records.
///
/// The list models the class-file layout directly: a slot array plus a live
/// count. Before compaction every slot is occupied and `count` equals the slot
/// total. After compaction the first `count` slots hold exactly the attributes
/// that were marked used, in their original relative order, and every later
/// slot is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    slots: Vec<Option<Attribute>>,
    count: usize,
}

impl AttributeList {
    /// Creates an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        AttributeList::default()
    }

    /// Creates a list from a set of attribute records.
    #[must_use]
    pub fn from_attributes(attributes: Vec<Attribute>) -> Self {
        let count = attributes.len();
        AttributeList {
            slots: attributes.into_iter().map(Some).collect(),
            count,
        }
    }

    /// Appends an attribute record to the live prefix of the list.
    pub fn push(&mut self, attribute: Attribute) {
        self.slots.truncate(self.count);
        self.slots.push(Some(attribute));
        self.count = self.slots.len();
    }

    /// Number of live attribute records.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the list holds no live attribute records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over the live attribute records.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.slots[..self.count].iter().filter_map(Option::as_ref)
    }

    /// Iterates mutably over the live attribute records.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Attribute> {
        self.slots[..self.count]
            .iter_mut()
            .filter_map(Option::as_mut)
    }

    /// Returns the live attribute at `index`, if within the live prefix.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Attribute> {
        if index < self.count {
            self.slots[index].as_ref()
        } else {
            None
        }
    }

    /// Total number of slots, including cleared ones past the live prefix.
    #[must_use]
    pub fn slot_len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the slot at `index` has been cleared by compaction.
    #[must_use]
    pub fn is_slot_cleared(&self, index: usize) -> bool {
        index < self.slots.len() && self.slots[index].is_none()
    }

    /// Compacts the list in place, keeping only attributes for which `keep`
    /// returns `true`.
    ///
    /// The kept attributes are moved into a prefix of the slot array in their
    /// original relative order, `count` is set to their number, and every slot
    /// past the prefix is cleared. Running this twice with the same predicate
    /// is equivalent to running it once.
    pub fn compact<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Attribute) -> bool,
    {
        let mut kept = 0;
        for index in 0..self.count {
            if let Some(attribute) = self.slots[index].take() {
                if keep(&attribute) {
                    self.slots[kept] = Some(attribute);
                    kept += 1;
                }
            }
        }
        for slot in &mut self.slots[kept..] {
            *slot = None;
        }
        self.count = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(kinds: &[AttributeKind]) -> AttributeList {
        AttributeList::from_attributes(kinds.iter().map(|k| Attribute::new(*k)).collect())
    }

    #[test]
    fn test_from_attributes_count() {
        let list = list_of(&[AttributeKind::Code, AttributeKind::Signature]);
        assert_eq!(list.count(), 2);
        assert_eq!(list.slot_len(), 2);
    }

    #[test]
    fn test_push_after_compaction_reuses_cleared_slots() {
        let mut list = list_of(&[AttributeKind::Code, AttributeKind::Signature]);
        list.compact(|a| a.kind == AttributeKind::Code);
        list.push(Attribute::new(AttributeKind::Deprecated));
        assert_eq!(list.count(), 2);
        let kinds: Vec<_> = list.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AttributeKind::Code, AttributeKind::Deprecated]);
    }

    #[test]
    fn test_compact_keeps_order_and_clears_tail() {
        let mut list = list_of(&[
            AttributeKind::SourceFile,
            AttributeKind::Code,
            AttributeKind::LineNumberTable,
            AttributeKind::Signature,
        ]);
        list.compact(|a| {
            matches!(a.kind, AttributeKind::Code | AttributeKind::Signature)
        });
        assert_eq!(list.count(), 2);
        let kinds: Vec<_> = list.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AttributeKind::Code, AttributeKind::Signature]);
        assert!(list.is_slot_cleared(2));
        assert!(list.is_slot_cleared(3));
    }

    #[test]
    fn test_compact_empty_list_is_noop() {
        let mut list = AttributeList::new();
        list.compact(|_| true);
        assert_eq!(list.count(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_compact_is_idempotent() {
        let mut list = list_of(&[
            AttributeKind::SourceFile,
            AttributeKind::Code,
            AttributeKind::Exceptions,
        ]);
        list.compact(|a| a.kind != AttributeKind::SourceFile);
        let once = list.clone();
        list.compact(|_| true);
        assert_eq!(list, once);
    }

    #[test]
    fn test_compact_none_kept() {
        let mut list = list_of(&[AttributeKind::Code]);
        list.compact(|_| false);
        assert_eq!(list.count(), 0);
        assert!(list.is_slot_cleared(0));
    }
}
