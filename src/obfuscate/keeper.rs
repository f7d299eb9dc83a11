//! The pin pass: freezing names that must not change.
//!
//! Driven by an external keep-rule matcher, this pass assigns every kept
//! entity its original name before the renamers run. Pinning uses the same
//! decide-once assignment primitive as ordinary renaming, so a pinned entity
//! simply looks "already decided" to every later pass.
//!
//! Pinning a class also force-visits the enclosing classes referenced by its
//! inner-class records. Anonymous and local classes carry naming conventions
//! derived from their enclosing class, and an outer class must have its keep
//! decision made before any class whose name depends on it.

use crate::model::class::Class;
use crate::model::member::Member;
use crate::model::pool::{ClassId, ClassPool};
use crate::Result;

/// External keep-rule decision, one boolean per entity.
pub trait KeepPredicate {
    /// Whether the class must keep its original name.
    fn keep_class(&self, class: &Class) -> bool;

    /// Whether the member must keep its original name.
    fn keep_member(&self, class: &Class, member: &Member) -> bool;
}

/// Statistics of one pin pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepStats {
    /// Classes pinned to their original names
    pub pinned_classes: usize,
    /// Members pinned to their original names
    pub pinned_members: usize,
}

/// Applies a [`KeepPredicate`] to every class and member in a pool.
pub struct NameKeeper<'a> {
    predicate: &'a dyn KeepPredicate,
}

impl<'a> NameKeeper<'a> {
    /// Creates a keeper driven by the given predicate.
    #[must_use]
    pub fn new(predicate: &'a dyn KeepPredicate) -> Self {
        NameKeeper { predicate }
    }

    /// Pins every kept entity in the pool.
    ///
    /// Entities that already carry an assigned name (from an applied mapping,
    /// or an earlier pin) are skipped; a keep rule never overrides a decision
    /// made before it.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature reserves the error channel shared
    /// by the other passes.
    pub fn run(&self, pool: &mut ClassPool) -> Result<KeepStats> {
        let mut stats = KeepStats::default();
        let mut visited = vec![false; pool.len()];
        for id in pool.ids() {
            self.visit_class(pool, id, &mut visited, &mut stats)?;
        }
        Ok(stats)
    }

    fn visit_class(
        &self,
        pool: &mut ClassPool,
        id: ClassId,
        visited: &mut [bool],
        stats: &mut KeepStats,
    ) -> Result<()> {
        if visited[id.index()] {
            return Ok(());
        }
        visited[id.index()] = true;

        // Outer classes referenced by this class's inner-class records get
        // their keep decision first.
        let outers: Vec<ClassId> = pool
            .class(id)
            .inner_classes
            .iter()
            .filter(|info| info.inner == Some(id))
            .filter_map(|info| info.outer)
            .collect();
        for outer in outers {
            self.visit_class(pool, outer, visited, stats)?;
        }

        let class = pool.class(id);
        if !class.has_assigned_name() && self.predicate.keep_class(class) {
            let original = class.name().to_string();
            pool.class_mut(id).pin_to(&original)?;
            stats.pinned_classes += 1;
        }

        let member_count = pool.class(id).members.len();
        for index in 0..member_count {
            let class = pool.class(id);
            let member = &class.members[index];
            if member.is_initializer() || member.assigned_name().is_some() {
                continue;
            }
            if self.predicate.keep_member(class, member) {
                let original = member.name().to_string();
                pool.class_mut(id).members[index].pin_to(&original)?;
                stats.pinned_members += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::class::InnerClassInfo;
    use crate::model::member::Member;

    struct KeepByName {
        classes: Vec<&'static str>,
        members: Vec<&'static str>,
    }

    impl KeepPredicate for KeepByName {
        fn keep_class(&self, class: &Class) -> bool {
            self.classes.iter().any(|name| *name == class.name())
        }

        fn keep_member(&self, _class: &Class, member: &Member) -> bool {
            self.members.iter().any(|name| *name == member.name())
        }
    }

    #[test]
    fn test_pins_matching_class_and_member() {
        let mut pool = ClassPool::new();
        let mut class = Class::new("com/example/Api");
        class.add_member(Member::method("call", "()V"));
        class.add_member(Member::method("helper", "()V"));
        let id = pool.add_class(class);

        let predicate = KeepByName {
            classes: vec!["com/example/Api"],
            members: vec!["call"],
        };
        let stats = NameKeeper::new(&predicate).run(&mut pool).unwrap();
        assert_eq!(stats.pinned_classes, 1);
        assert_eq!(stats.pinned_members, 1);

        let class = pool.class(id);
        assert!(class.is_pinned());
        assert!(class.has_original_class_name());
        assert!(class.members[0].is_pinned());
        assert!(!class.members[1].is_pinned());
    }

    #[test]
    fn test_initializers_never_pinned() {
        let mut pool = ClassPool::new();
        let mut class = Class::new("A");
        class.add_member(Member::method("<init>", "()V"));
        class.add_member(Member::method("<clinit>", "()V"));
        let id = pool.add_class(class);

        let predicate = KeepByName {
            classes: vec![],
            members: vec!["<init>", "<clinit>"],
        };
        let stats = NameKeeper::new(&predicate).run(&mut pool).unwrap();
        assert_eq!(stats.pinned_members, 0);
        assert_eq!(pool.class(id).members[0].assigned_name(), None);
    }

    #[test]
    fn test_inner_class_record_forces_outer_visit() {
        let mut pool = ClassPool::new();
        // Insert the inner class first so its visit precedes the outer's.
        let inner = pool.add_class(Class::new("Outer$1"));
        let outer = pool.add_class(Class::new("Outer"));
        pool.class_mut(inner).inner_classes.push(InnerClassInfo {
            inner: Some(inner),
            outer: Some(outer),
        });

        let predicate = KeepByName {
            classes: vec!["Outer"],
            members: vec![],
        };
        NameKeeper::new(&predicate).run(&mut pool).unwrap();
        assert!(pool.class(outer).is_pinned());
        assert!(!pool.class(inner).is_pinned());
    }

    #[test]
    fn test_already_assigned_entity_is_skipped() {
        let mut pool = ClassPool::new();
        let mut class = Class::new("A");
        class.assign_name("x").unwrap();
        let id = pool.add_class(class);

        let predicate = KeepByName {
            classes: vec!["A"],
            members: vec![],
        };
        let stats = NameKeeper::new(&predicate).run(&mut pool).unwrap();
        assert_eq!(stats.pinned_classes, 0);
        assert_eq!(pool.class(id).assigned_name(), Some("x"));
    }
}
