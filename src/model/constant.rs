//! Symbolic references carried in a class's constant pool.
//!
//! The renaming engine does not model the full constant pool; it models the
//! subset that names program entities and therefore has to be rewritten after
//! renaming. The set of reference kinds is closed, so reference fixup is an
//! exhaustive match with no "unsupported constant" fallback.

use crate::model::pool::{ClassId, MemberId};

/// A symbolic reference to a class or member, as stored in a constant pool.
///
/// Each variant carries the textual names from the input class file plus the
/// resolved link into the class pool, when resolution succeeded. References to
/// library classes outside the processed program stay unresolved and are left
/// untouched by fixup.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// A `CONSTANT_Class` entry.
    Class {
        /// Internal name of the referenced class
        name: String,
        /// Resolved class, if the name denotes a program class
        target: Option<ClassId>,
    },
    /// A `CONSTANT_Fieldref` entry.
    FieldRef {
        /// Internal name of the class declaring the field
        class_name: String,
        /// Field name
        name: String,
        /// Field descriptor
        descriptor: String,
        /// Resolved declaring class and field, if within the program
        target: Option<(ClassId, MemberId)>,
    },
    /// A `CONSTANT_Methodref` or `CONSTANT_InterfaceMethodref` entry.
    MethodRef {
        /// Internal name of the class declaring the method
        class_name: String,
        /// Method name
        name: String,
        /// Method descriptor
        descriptor: String,
        /// Resolved declaring class and method, if within the program
        target: Option<(ClassId, MemberId)>,
    },
}

impl Constant {
    /// The referenced class's internal name, for any reference kind.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Constant::Class { name, .. } => name,
            Constant::FieldRef { class_name, .. } | Constant::MethodRef { class_name, .. } => {
                class_name
            }
        }
    }

    /// Whether the reference resolved to an entity inside the processed program.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Constant::Class { target, .. } => target.is_some(),
            Constant::FieldRef { target, .. } | Constant::MethodRef { target, .. } => {
                target.is_some()
            }
        }
    }
}
