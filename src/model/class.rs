//! Program classes and their inner-class relationship records.

use crate::model::access::ClassAccessFlags;
use crate::model::attribute::AttributeList;
use crate::model::constant::Constant;
use crate::model::member::{Member, MemberKind};
use crate::model::pool::{ClassId, MemberId};
use crate::{Error, Result};

/// One record of an `InnerClasses` attribute.
///
/// Either link may be absent, mirroring a zero constant-pool index in the class
/// file. Only records where both links are present tie an inner class to its
/// enclosing class for renaming purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerClassInfo {
    /// The inner class, if the record's inner index is non-zero
    pub inner: Option<ClassId>,
    /// The enclosing class, if the record's outer index is non-zero
    pub outer: Option<ClassId>,
}

/// A class of the processed program.
///
/// Holds the hierarchy edges, declared members, attribute records, and the
/// symbolic references of the constant pool. The original internal name is
/// immutable; the assigned name is decided exactly once.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    /// Access and property flags
    pub access_flags: ClassAccessFlags,
    /// Direct superclass, if it belongs to the processed program
    pub super_class: Option<ClassId>,
    /// Directly implemented interfaces within the processed program
    pub interfaces: Vec<ClassId>,
    /// Declared fields and methods
    pub members: Vec<Member>,
    /// Attribute records owned by this class
    pub attributes: AttributeList,
    /// Inner-class relationship records
    pub inner_classes: Vec<InnerClassInfo>,
    /// Symbolic references of the constant pool
    pub constants: Vec<Constant>,
    assigned_name: Option<String>,
    pinned: bool,
}

impl Class {
    /// Creates an empty class with the given internal name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Class {
            name: name.to_string(),
            access_flags: ClassAccessFlags::default(),
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            attributes: AttributeList::new(),
            inner_classes: Vec::new(),
            constants: Vec::new(),
            assigned_name: None,
            pinned: false,
        }
    }

    /// The original internal name (`com/example/Foo`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The assigned internal name, once one has been decided.
    #[must_use]
    pub fn assigned_name(&self) -> Option<&str> {
        self.assigned_name.as_deref()
    }

    /// The internal name this class will carry in the output.
    #[must_use]
    pub fn output_name(&self) -> &str {
        self.assigned_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether the pin pass froze this class's name.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Whether this class is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(ClassAccessFlags::INTERFACE)
    }

    /// Whether a name has been decided for this class.
    #[must_use]
    pub fn has_assigned_name(&self) -> bool {
        self.assigned_name.is_some()
    }

    /// Whether this class was explicitly decided to keep its original name.
    ///
    /// Distinct from "no name assigned yet": downstream consumers (e.g.
    /// conditional debug-info retention) use this to tell an explicit keep
    /// apart from a class that has not been processed.
    #[must_use]
    pub fn has_original_class_name(&self) -> bool {
        self.assigned_name.as_deref() == Some(self.name.as_str())
    }

    /// Decides this class's internal name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleAssignment`] if a name was already decided.
    pub fn assign_name(&mut self, name: &str) -> Result<()> {
        if let Some(current) = &self.assigned_name {
            return Err(Error::DoubleAssignment {
                entity: self.name.clone(),
                current: current.clone(),
                attempted: name.to_string(),
            });
        }
        self.assigned_name = Some(name.to_string());
        Ok(())
    }

    /// Pins this class to a fixed internal name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleAssignment`] if a name was already decided.
    pub fn pin_to(&mut self, name: &str) -> Result<()> {
        self.assign_name(name)?;
        self.pinned = true;
        Ok(())
    }

    /// Appends a member and returns its id within this class.
    pub fn add_member(&mut self, member: Member) -> MemberId {
        let id = MemberId(self.members.len());
        self.members.push(member);
        id
    }

    /// Looks up a declared member by kind, name, and descriptor.
    #[must_use]
    pub fn find_member(&self, kind: MemberKind, name: &str, descriptor: &str) -> Option<MemberId> {
        self.members.iter().position(|m| {
            m.kind() == kind && m.name() == name && m.descriptor() == descriptor
        }).map(MemberId)
    }

    /// The member with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this class.
    #[must_use]
    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0]
    }

    /// Mutable access to the member with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this class.
    pub fn member_mut(&mut self, id: MemberId) -> &mut Member {
        &mut self.members[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_once() {
        let mut c = Class::new("com/example/A");
        c.assign_name("a/a").unwrap();
        assert_eq!(c.assigned_name(), Some("a/a"));
        assert!(c.assign_name("a/b").is_err());
        assert_eq!(c.output_name(), "a/a");
    }

    #[test]
    fn test_has_original_class_name() {
        let mut kept = Class::new("com/example/A");
        kept.pin_to("com/example/A").unwrap();
        assert!(kept.has_original_class_name());

        let untouched = Class::new("com/example/B");
        assert!(!untouched.has_original_class_name());

        let mut renamed = Class::new("com/example/C");
        renamed.assign_name("a").unwrap();
        assert!(!renamed.has_original_class_name());
    }

    #[test]
    fn test_find_member_distinguishes_descriptor() {
        let mut c = Class::new("A");
        let id_v = c.add_member(Member::method("foo", "()V"));
        let id_i = c.add_member(Member::method("foo", "()I"));
        assert_eq!(c.find_member(MemberKind::Method, "foo", "()V"), Some(id_v));
        assert_eq!(c.find_member(MemberKind::Method, "foo", "()I"), Some(id_i));
        assert_eq!(c.find_member(MemberKind::Field, "foo", "()V"), None);
    }
}
