//! Field and method renaming.
//!
//! Methods that override each other must keep matching names, or virtual
//! dispatch breaks. The renamer therefore first partitions all methods into
//! override groups: the transitive closure of "same name and descriptor along
//! a superclass or interface edge", computed with a union-find over the whole
//! hierarchy. Only then does it allocate one name per group, checking the
//! candidate against the member namespace of every class that declares a
//! group member, and against every equal-descriptor method already decided in
//! a hierarchy-related class (one sharing a descendant with the owner). The
//! second check keeps renaming from manufacturing an override relationship
//! that did not exist: two unrelated methods that some class inherits side by
//! side must end up with distinct names.
//!
//! Fields never participate in dispatch, so each field forms its own group and
//! only avoids collisions within its declaring class. Initializers (`<init>`,
//! `<clinit>`) are excluded from the renaming pool entirely; the platform
//! fixes their names.

use std::collections::HashMap;

use crate::model::member::MemberKind;
use crate::model::pool::{ClassId, ClassPool, MemberId};
use crate::naming::NameFactory;
use crate::obfuscate::config::ObfuscationConfig;
use crate::obfuscate::namespace::Namespace;
use crate::{Error, Result};

/// Union-find over global member indices.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        UnionFind {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Lower index wins so group order follows declaration order.
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[high] = low;
        }
    }
}

/// Assigns final names to all fields and methods in a pool.
pub struct MemberRenamer<'a> {
    config: &'a ObfuscationConfig,
    factory: Box<dyn NameFactory>,
    namespaces: HashMap<(ClassId, MemberKind), Namespace>,
    /// Decided method names, each with its descriptor and declaring class
    decided_signatures: HashMap<String, Vec<(String, ClassId)>>,
}

impl<'a> MemberRenamer<'a> {
    /// Creates a renamer drawing member names from `factory`.
    #[must_use]
    pub fn new(config: &'a ObfuscationConfig, factory: Box<dyn NameFactory>) -> Self {
        MemberRenamer {
            config,
            factory,
            namespaces: HashMap::new(),
            decided_signatures: HashMap::new(),
        }
    }

    /// Renames every non-initializer member without an assigned name.
    ///
    /// Returns the number of members renamed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NamespaceExhausted`] if no collision-free candidate is
    /// found within the configured attempt bound.
    pub fn run(&mut self, pool: &mut ClassPool) -> Result<usize> {
        let members = self.collect_members(pool);
        let groups = self.build_groups(pool, &members);
        let related = self.descendant_sets(pool);

        // Names decided before this pass claim their namespaces first.
        for &(class_id, member_id) in &members {
            let member = pool.class(class_id).member(member_id);
            if let Some(assigned) = member.assigned_name() {
                let key = self.namespace_key(assigned, member.descriptor());
                let kind = member.kind();
                if kind == MemberKind::Method {
                    self.record_signature(assigned, member.descriptor(), class_id);
                }
                self.namespace_mut(class_id, kind).insert(&key);
            }
        }

        let mut renamed = 0;
        for group in &groups {
            renamed += self.process_group(pool, &members, group, &related)?;
        }
        Ok(renamed)
    }

    /// All renamable members in deterministic order: pool order, declaration
    /// order, fields and methods alike. Initializers never enter the pool.
    fn collect_members(&self, pool: &ClassPool) -> Vec<(ClassId, MemberId)> {
        let mut members = Vec::new();
        for class_id in pool.ids() {
            let class = pool.class(class_id);
            for (index, member) in class.members.iter().enumerate() {
                if !member.is_initializer() {
                    members.push((class_id, MemberId(index)));
                }
            }
        }
        members
    }

    /// Partitions members into override groups. Fields and members of
    /// unrelated classes stay in singleton groups.
    fn build_groups(
        &self,
        pool: &ClassPool,
        members: &[(ClassId, MemberId)],
    ) -> Vec<Vec<usize>> {
        let index_of: HashMap<(ClassId, MemberId), usize> = members
            .iter()
            .enumerate()
            .map(|(index, &key)| (key, index))
            .collect();
        let mut union_find = UnionFind::new(members.len());

        for (index, &(class_id, member_id)) in members.iter().enumerate() {
            let member = pool.class(class_id).member(member_id);
            if member.kind() != MemberKind::Method {
                continue;
            }
            for ancestor_id in self.ancestors(pool, class_id) {
                let ancestor = pool.class(ancestor_id);
                if let Some(overridden) = ancestor.find_member(
                    MemberKind::Method,
                    member.name(),
                    member.descriptor(),
                ) {
                    if let Some(&other) = index_of.get(&(ancestor_id, overridden)) {
                        union_find.union(index, other);
                    }
                }
            }
        }

        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        for index in 0..members.len() {
            let root = union_find.find(index);
            let group_index = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group_index].push(index);
        }
        groups
    }

    /// Transitive superclasses and interfaces of a class.
    fn ancestors(&self, pool: &ClassPool, class_id: ClassId) -> Vec<ClassId> {
        let mut seen = vec![false; pool.len()];
        let mut queue = vec![class_id];
        let mut result = Vec::new();
        seen[class_id.index()] = true;
        while let Some(current) = queue.pop() {
            let class = pool.class(current);
            let edges = class.super_class.iter().chain(class.interfaces.iter());
            for &next in edges {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    result.push(next);
                    queue.push(next);
                }
            }
        }
        result
    }

    fn process_group(
        &mut self,
        pool: &mut ClassPool,
        members: &[(ClassId, MemberId)],
        group: &[usize],
        related: &[Vec<bool>],
    ) -> Result<usize> {
        // A name already decided for any group member (keep rule or applied
        // mapping) becomes the whole group's name.
        let decided: Option<String> = group.iter().find_map(|&index| {
            let (class_id, member_id) = members[index];
            pool.class(class_id)
                .member(member_id)
                .assigned_name()
                .map(str::to_string)
        });

        let name = match decided {
            Some(name) => name,
            None => self.generate_group_name(pool, members, group, related)?,
        };

        let mut renamed = 0;
        for &index in group {
            let (class_id, member_id) = members[index];
            let member = pool.class(class_id).member(member_id);
            if member.assigned_name().is_some() {
                continue;
            }
            let key = self.namespace_key(&name, member.descriptor());
            let kind = member.kind();
            let descriptor = member.descriptor().to_string();
            if kind == MemberKind::Method {
                self.record_signature(&name, &descriptor, class_id);
            }
            self.namespace_mut(class_id, kind).insert(&key);
            pool.class_mut(class_id)
                .member_mut(member_id)
                .assign_name(&name)?;
            renamed += 1;
        }
        Ok(renamed)
    }

    fn generate_group_name(
        &mut self,
        pool: &ClassPool,
        members: &[(ClassId, MemberId)],
        group: &[usize],
        related: &[Vec<bool>],
    ) -> Result<String> {
        self.factory.reset();
        for _ in 0..self.config.max_name_attempts {
            let candidate = self.factory.next();
            let free = group.iter().all(|&index| {
                let (class_id, member_id) = members[index];
                let member = pool.class(class_id).member(member_id);
                let key = self.namespace_key(&candidate, member.descriptor());
                if let Some(namespace) = self.namespaces.get(&(class_id, member.kind())) {
                    if namespace.contains(&key) {
                        return false;
                    }
                }
                member.kind() != MemberKind::Method
                    || self.signature_is_free(&candidate, member.descriptor(), class_id, related)
            });
            if free {
                return Ok(candidate);
            }
        }
        let (class_id, member_id) = members[group[0]];
        let member = pool.class(class_id).member(member_id);
        Err(Error::NamespaceExhausted {
            namespace: format!(
                "members of '{}' around '{}'",
                pool.class(class_id).name(),
                member.name()
            ),
            attempts: self.config.max_name_attempts,
        })
    }

    /// Collision key for a candidate name.
    ///
    /// With aggressive overloading only identical descriptors conflict, so the
    /// descriptor joins the key; otherwise the bare name must be unique within
    /// the class.
    fn namespace_key(&self, name: &str, descriptor: &str) -> String {
        if self.config.aggressive_overloading {
            format!("{name} {descriptor}")
        } else {
            name.to_string()
        }
    }

    fn namespace_mut(&mut self, class_id: ClassId, kind: MemberKind) -> &mut Namespace {
        // Member names are case-sensitive on the platform; case folding only
        // applies to class names, which become file names.
        self.namespaces
            .entry((class_id, kind))
            .or_insert_with(|| Namespace::new("members", true))
    }

    /// Reflexive transitive ancestor-to-descendant reachability, per class.
    ///
    /// `sets[a][d]` is true iff `a` is `d` or an ancestor of `d`. Two classes
    /// are hierarchy-related when their sets overlap: some single class
    /// inherits from both, so a method name decided in one is visible next to
    /// the other's methods.
    fn descendant_sets(&self, pool: &ClassPool) -> Vec<Vec<bool>> {
        let len = pool.len();
        let mut sets = vec![vec![false; len]; len];
        for id in pool.ids() {
            sets[id.index()][id.index()] = true;
            for ancestor in self.ancestors(pool, id) {
                sets[ancestor.index()][id.index()] = true;
            }
        }
        sets
    }

    fn hierarchy_related(related: &[Vec<bool>], a: ClassId, b: ClassId) -> bool {
        related[a.index()]
            .iter()
            .zip(&related[b.index()])
            .any(|(x, y)| *x && *y)
    }

    /// Whether giving `name` to a method with `descriptor` in `class_id` would
    /// collide with an equal-signature method already decided in a
    /// hierarchy-related class. Such a collision would create an override
    /// relationship that did not exist before renaming.
    fn signature_is_free(
        &self,
        name: &str,
        descriptor: &str,
        class_id: ClassId,
        related: &[Vec<bool>],
    ) -> bool {
        let Some(entries) = self.decided_signatures.get(name) else {
            return true;
        };
        !entries.iter().any(|(other_descriptor, other_class)| {
            other_descriptor == descriptor
                && Self::hierarchy_related(related, *other_class, class_id)
        })
    }

    fn record_signature(&mut self, name: &str, descriptor: &str, class_id: ClassId) {
        self.decided_signatures
            .entry(name.to_string())
            .or_default()
            .push((descriptor.to_string(), class_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::class::Class;
    use crate::model::member::Member;
    use crate::naming::SimpleNameFactory;

    fn renamer(config: &ObfuscationConfig) -> MemberRenamer<'_> {
        MemberRenamer::new(
            config,
            Box::new(SimpleNameFactory::new(config.mixed_case_names)),
        )
    }

    #[test]
    fn test_override_group_shares_name() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut base = Class::new("A");
        base.add_member(Member::method("foo", "()V"));
        base.add_member(Member::method("other", "()V"));
        let base_id = pool.add_class(base);

        let mut derived = Class::new("B");
        derived.add_member(Member::method("foo", "()V"));
        let derived_id = pool.add_class(derived);
        pool.class_mut(derived_id).super_class = Some(base_id);

        renamer(&config).run(&mut pool).unwrap();

        let a_foo = pool.class(base_id).members[0].assigned_name().unwrap();
        let a_other = pool.class(base_id).members[1].assigned_name().unwrap();
        let b_foo = pool.class(derived_id).members[0].assigned_name().unwrap();
        assert_eq!(a_foo, b_foo);
        assert_ne!(a_foo, a_other);
    }

    #[test]
    fn test_interface_links_sibling_implementations() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut iface = Class::new("I");
        iface.add_member(Member::method("run", "()V"));
        let iface_id = pool.add_class(iface);

        let mut first = Class::new("First");
        first.add_member(Member::method("run", "()V"));
        let first_id = pool.add_class(first);
        pool.class_mut(first_id).interfaces.push(iface_id);

        let mut second = Class::new("Second");
        second.add_member(Member::method("run", "()V"));
        let second_id = pool.add_class(second);
        pool.class_mut(second_id).interfaces.push(iface_id);

        renamer(&config).run(&mut pool).unwrap();

        let i_run = pool.class(iface_id).members[0].assigned_name().unwrap();
        let f_run = pool.class(first_id).members[0].assigned_name().unwrap();
        let s_run = pool.class(second_id).members[0].assigned_name().unwrap();
        assert_eq!(i_run, f_run);
        assert_eq!(i_run, s_run);
    }

    #[test]
    fn test_pinned_member_pins_whole_group() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut base = Class::new("A");
        let foo = base.add_member(Member::method("foo", "()V"));
        let base_id = pool.add_class(base);
        pool.class_mut(base_id).member_mut(foo).pin_to("foo").unwrap();

        let mut derived = Class::new("B");
        derived.add_member(Member::method("foo", "()V"));
        let derived_id = pool.add_class(derived);
        pool.class_mut(derived_id).super_class = Some(base_id);

        renamer(&config).run(&mut pool).unwrap();
        assert_eq!(
            pool.class(derived_id).members[0].assigned_name(),
            Some("foo")
        );
    }

    #[test]
    fn test_initializers_left_untouched() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut class = Class::new("A");
        class.add_member(Member::method("<init>", "()V"));
        class.add_member(Member::method("<clinit>", "()V"));
        let id = pool.add_class(class);

        let renamed = renamer(&config).run(&mut pool).unwrap();
        assert_eq!(renamed, 0);
        assert_eq!(pool.class(id).members[0].assigned_name(), None);
        assert_eq!(pool.class(id).members[1].assigned_name(), None);
    }

    #[test]
    fn test_overloads_get_distinct_names_by_default() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut class = Class::new("A");
        class.add_member(Member::method("foo", "()V"));
        class.add_member(Member::method("foo", "()I"));
        let id = pool.add_class(class);

        renamer(&config).run(&mut pool).unwrap();
        let first = pool.class(id).members[0].assigned_name().unwrap();
        let second = pool.class(id).members[1].assigned_name().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_aggressive_overloading_reuses_names_across_descriptors() {
        let mut config = ObfuscationConfig::new();
        config.aggressive_overloading = true;
        let mut pool = ClassPool::new();
        let mut class = Class::new("A");
        class.add_member(Member::method("foo", "()V"));
        class.add_member(Member::method("bar", "()I"));
        let id = pool.add_class(class);

        renamer(&config).run(&mut pool).unwrap();
        let first = pool.class(id).members[0].assigned_name().unwrap();
        let second = pool.class(id).members[1].assigned_name().unwrap();
        // Different descriptors no longer conflict, so both take "a".
        assert_eq!(first, second);
    }

    #[test]
    fn test_fields_avoid_same_class_fields_only() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut first = Class::new("A");
        first.add_member(Member::field("count", "I"));
        first.add_member(Member::field("total", "I"));
        let first_id = pool.add_class(first);

        let mut second = Class::new("B");
        second.add_member(Member::field("count", "I"));
        let second_id = pool.add_class(second);

        renamer(&config).run(&mut pool).unwrap();
        let a0 = pool.class(first_id).members[0].assigned_name().unwrap();
        let a1 = pool.class(first_id).members[1].assigned_name().unwrap();
        let b0 = pool.class(second_id).members[0].assigned_name().unwrap();
        assert_ne!(a0, a1);
        // Unrelated classes restart the short-name sequence.
        assert_eq!(a0, b0);
    }

    #[test]
    fn test_fields_and_methods_use_separate_namespaces() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut class = Class::new("A");
        class.add_member(Member::field("count", "I"));
        class.add_member(Member::method("get", "()I"));
        let id = pool.add_class(class);

        renamer(&config).run(&mut pool).unwrap();
        let field = pool.class(id).members[0].assigned_name().unwrap();
        let method = pool.class(id).members[1].assigned_name().unwrap();
        assert_eq!(field, method);
    }

    #[test]
    fn test_unrelated_hierarchy_methods_get_distinct_names() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut base = Class::new("Base");
        base.add_member(Member::method("bar", "()V"));
        let base_id = pool.add_class(base);

        let mut derived = Class::new("Derived");
        derived.add_member(Member::method("baz", "()V"));
        let derived_id = pool.add_class(derived);
        pool.class_mut(derived_id).super_class = Some(base_id);

        renamer(&config).run(&mut pool).unwrap();
        let bar = pool.class(base_id).members[0].assigned_name().unwrap();
        let baz = pool.class(derived_id).members[0].assigned_name().unwrap();
        // bar and baz never overrode each other; equal new names would make
        // Derived's method override Base's.
        assert_ne!(bar, baz);
    }

    #[test]
    fn test_generated_name_avoids_pinned_inherited_method() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut base = Class::new("Base");
        let kept = base.add_member(Member::method("m", "()V"));
        let base_id = pool.add_class(base);
        pool.class_mut(base_id).member_mut(kept).pin_to("a").unwrap();

        let mut derived = Class::new("Derived");
        derived.add_member(Member::method("other", "()V"));
        let derived_id = pool.add_class(derived);
        pool.class_mut(derived_id).super_class = Some(base_id);

        renamer(&config).run(&mut pool).unwrap();
        // "a" is taken by the pinned method visible in Derived.
        assert_eq!(pool.class(derived_id).members[0].assigned_name(), Some("b"));
    }

    #[test]
    fn test_methods_joined_through_common_subclass_get_distinct_names() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut base = Class::new("Base");
        base.add_member(Member::method("bar", "()V"));
        let base_id = pool.add_class(base);

        let mut iface = Class::new("Iface");
        iface.add_member(Member::method("baz", "()V"));
        let iface_id = pool.add_class(iface);

        // Joiner inherits from both, so their method names share visibility.
        let joiner_id = pool.add_class(Class::new("Joiner"));
        pool.class_mut(joiner_id).super_class = Some(base_id);
        pool.class_mut(joiner_id).interfaces.push(iface_id);

        renamer(&config).run(&mut pool).unwrap();
        let bar = pool.class(base_id).members[0].assigned_name().unwrap();
        let baz = pool.class(iface_id).members[0].assigned_name().unwrap();
        assert_ne!(bar, baz);
    }

    #[test]
    fn test_sibling_classes_may_reuse_method_names() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let base_id = pool.add_class(Class::new("Base"));

        let mut first = Class::new("First");
        first.add_member(Member::method("foo", "()V"));
        let first_id = pool.add_class(first);
        pool.class_mut(first_id).super_class = Some(base_id);

        let mut second = Class::new("Second");
        second.add_member(Member::method("bar", "()V"));
        let second_id = pool.add_class(second);
        pool.class_mut(second_id).super_class = Some(base_id);

        renamer(&config).run(&mut pool).unwrap();
        let foo = pool.class(first_id).members[0].assigned_name().unwrap();
        let bar = pool.class(second_id).members[0].assigned_name().unwrap();
        // No class inherits from both siblings, so the names never meet.
        assert_eq!(foo, bar);
    }

    #[test]
    fn test_different_descriptors_across_hierarchy_may_share_names() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut base = Class::new("Base");
        base.add_member(Member::method("bar", "()V"));
        let base_id = pool.add_class(base);

        let mut derived = Class::new("Derived");
        derived.add_member(Member::method("baz", "()I"));
        let derived_id = pool.add_class(derived);
        pool.class_mut(derived_id).super_class = Some(base_id);

        renamer(&config).run(&mut pool).unwrap();
        let bar = pool.class(base_id).members[0].assigned_name().unwrap();
        let baz = pool.class(derived_id).members[0].assigned_name().unwrap();
        // Equal names with different descriptors are plain overloads, not
        // overrides.
        assert_eq!(bar, baz);
    }

    #[test]
    fn test_member_namespaces_are_case_sensitive() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut class = Class::new("C");
        let pinned = class.add_member(Member::field("upper", "I"));
        class.add_member(Member::field("lower", "I"));
        let id = pool.add_class(class);
        pool.class_mut(id).member_mut(pinned).pin_to("A").unwrap();

        renamer(&config).run(&mut pool).unwrap();
        // "A" and "a" are distinct member names even with lowercase-only
        // class naming.
        assert_eq!(pool.class(id).members[1].assigned_name(), Some("a"));
    }
}
