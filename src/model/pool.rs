//! The class pool: id-indexed storage for every class of the processed program.
//!
//! The pool is the shared graph all obfuscation passes read and mutate. It is
//! exclusively owned by the running pass, so storage is a plain arena with a
//! name index rather than a concurrent registry; passes receive it by mutable
//! reference and run strictly one after another.
//!
//! # Key Components
//!
//! - [`ClassPool`] - Arena of [`Class`] values plus a name index
//! - [`ClassId`] / [`MemberId`] - Stable indices into the pool
//!
//! # Examples
//!
//! ```rust
//! use shroud::model::{Class, ClassPool, Member};
//!
//! let mut pool = ClassPool::new();
//! let mut class = Class::new("com/example/A");
//! class.add_member(Member::method("foo", "()V"));
//! let id = pool.add_class(class);
//! assert_eq!(pool.class(id).name(), "com/example/A");
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::model::class::Class;
use crate::model::constant::Constant;
use crate::model::member::MemberKind;

/// Identifies a class within a [`ClassPool`].
///
/// Ids are assigned in insertion order and stay valid for the lifetime of the
/// pool; classes are never removed during an obfuscation run.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    /// The position of the class in the pool's deterministic traversal order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Identifies a member within its declaring [`Class`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub(crate) usize);

impl MemberId {
    /// The position of the member in its class's declaration order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

/// Arena of all program classes, indexed by [`ClassId`] and by original
/// internal name.
#[derive(Debug, Default)]
pub struct ClassPool {
    classes: Vec<Class>,
    by_name: HashMap<String, ClassId>,
}

impl ClassPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        ClassPool::default()
    }

    /// Adds a class and returns its id.
    ///
    /// A later class with a duplicate original name shadows the earlier one in
    /// the name index; duplicate names do not occur in well-formed input.
    pub fn add_class(&mut self, class: Class) -> ClassId {
        let id = ClassId(self.classes.len());
        self.by_name.insert(class.name().to_string(), id);
        self.classes.push(class);
        id
    }

    /// Number of classes in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the pool holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The class with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this pool.
    #[must_use]
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    /// Mutable access to the class with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this pool.
    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id.0]
    }

    /// Looks a class up by its original internal name.
    #[must_use]
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Ids of all classes in deterministic (insertion) order.
    pub fn ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.classes.len()).map(ClassId)
    }

    /// All classes in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter()
    }

    /// Mutable iteration over all classes in deterministic order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Class> {
        self.classes.iter_mut()
    }

    /// Parallel mutable access to the class slice, for owner-granular passes.
    pub(crate) fn classes_mut(&mut self) -> &mut [Class] {
        &mut self.classes
    }

    /// Resolves the symbolic references of every constant pool against the
    /// classes and members currently in the pool.
    ///
    /// References naming classes outside the pool keep a `None` target and are
    /// later left untouched by fixup. Safe to call again after classes are
    /// added; already-resolved targets are recomputed from the same names.
    pub fn link_references(&mut self) {
        let mut links: Vec<Vec<Constant>> = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let resolved = class
                .constants
                .iter()
                .map(|constant| self.resolve_constant(constant))
                .collect();
            links.push(resolved);
        }
        for (class, resolved) in self.classes.iter_mut().zip(links) {
            class.constants = resolved;
        }
    }

    fn resolve_constant(&self, constant: &Constant) -> Constant {
        match constant {
            Constant::Class { name, .. } => Constant::Class {
                name: name.clone(),
                target: self.class_by_name(name),
            },
            Constant::FieldRef {
                class_name,
                name,
                descriptor,
                ..
            } => Constant::FieldRef {
                class_name: class_name.clone(),
                name: name.clone(),
                descriptor: descriptor.clone(),
                target: self.resolve_member(class_name, MemberKind::Field, name, descriptor),
            },
            Constant::MethodRef {
                class_name,
                name,
                descriptor,
                ..
            } => Constant::MethodRef {
                class_name: class_name.clone(),
                name: name.clone(),
                descriptor: descriptor.clone(),
                target: self.resolve_member(class_name, MemberKind::Method, name, descriptor),
            },
        }
    }

    /// Resolves a member reference, searching the declaring class and then its
    /// superclass chain and interfaces the way the platform resolves symbols.
    fn resolve_member(
        &self,
        class_name: &str,
        kind: MemberKind,
        name: &str,
        descriptor: &str,
    ) -> Option<(ClassId, MemberId)> {
        let mut current = self.class_by_name(class_name);
        while let Some(class_id) = current {
            let class = self.class(class_id);
            if let Some(member_id) = class.find_member(kind, name, descriptor) {
                return Some((class_id, member_id));
            }
            for &interface_id in &class.interfaces {
                let interface = self.class(interface_id);
                if let Some(member_id) = interface.find_member(kind, name, descriptor) {
                    return Some((interface_id, member_id));
                }
            }
            current = class.super_class;
        }
        None
    }
}
