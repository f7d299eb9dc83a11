//! Fields and methods of a program class.

use crate::model::access::MemberAccessFlags;
use crate::model::attribute::AttributeList;
use crate::{Error, Result};

/// Name of instance initializers, which the platform fixes and renaming never touches.
pub const INITIALIZER_NAME: &str = "<init>";

/// Name of class initializers, equally fixed by the platform.
pub const CLASS_INITIALIZER_NAME: &str = "<clinit>";

/// Distinguishes fields from methods.
///
/// The renaming algorithm is shared; only methods participate in override
/// grouping, since fields never take part in virtual dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A field declaration
    Field,
    /// A method declaration
    Method,
}

/// A field or method declared by a program class.
///
/// The original name and descriptor are immutable; the assigned name is decided
/// exactly once by the pin pass or the member renamer and never overwritten.
#[derive(Debug, Clone)]
pub struct Member {
    kind: MemberKind,
    name: String,
    descriptor: String,
    /// Access and property flags
    pub access_flags: MemberAccessFlags,
    /// Attribute records owned by this member
    pub attributes: AttributeList,
    assigned_name: Option<String>,
    pinned: bool,
    /// First line of the method body in the debug tables, if known
    pub first_line: u32,
    /// Last line of the method body in the debug tables, if known
    pub last_line: u32,
}

impl Member {
    /// Creates a field with default access flags and no attributes.
    #[must_use]
    pub fn field(name: &str, descriptor: &str) -> Self {
        Member::new(MemberKind::Field, name, descriptor)
    }

    /// Creates a method with default access flags and no attributes.
    #[must_use]
    pub fn method(name: &str, descriptor: &str) -> Self {
        Member::new(MemberKind::Method, name, descriptor)
    }

    /// Creates a member of the given kind.
    #[must_use]
    pub fn new(kind: MemberKind, name: &str, descriptor: &str) -> Self {
        Member {
            kind,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags: MemberAccessFlags::default(),
            attributes: AttributeList::new(),
            assigned_name: None,
            pinned: false,
            first_line: 0,
            last_line: 0,
        }
    }

    /// Sets the access flags, builder style.
    #[must_use]
    pub fn with_access(mut self, access_flags: MemberAccessFlags) -> Self {
        self.access_flags = access_flags;
        self
    }

    /// Sets the debug line range, builder style.
    #[must_use]
    pub fn with_lines(mut self, first_line: u32, last_line: u32) -> Self {
        self.first_line = first_line;
        self.last_line = last_line;
        self
    }

    /// The member kind.
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The original name from the input class file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field or method descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Replaces the descriptor after class renaming rewrote its embedded
    /// class names. Fixup only.
    pub(crate) fn set_descriptor(&mut self, descriptor: String) {
        self.descriptor = descriptor;
    }

    /// The assigned name, once one has been decided.
    #[must_use]
    pub fn assigned_name(&self) -> Option<&str> {
        self.assigned_name.as_deref()
    }

    /// The name this member will carry in the output: the assigned name if one
    /// was decided, otherwise the original name.
    #[must_use]
    pub fn output_name(&self) -> &str {
        self.assigned_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether the pin pass froze this member's name.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Whether this is `<init>` or `<clinit>`, whose names the platform fixes.
    #[must_use]
    pub fn is_initializer(&self) -> bool {
        self.kind == MemberKind::Method
            && (self.name == INITIALIZER_NAME || self.name == CLASS_INITIALIZER_NAME)
    }

    /// Decides this member's name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleAssignment`] if a name was already decided, even
    /// if it equals the new one. The decide-once contract is what lets the
    /// fixup pass trust every assigned name it observes.
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

    /// Pins this member to a fixed name, removing it from the renaming pool.
    ///
    /// Pinning to the original name is the keep-rule case; pinning to a
    /// different name is the apply-mapping case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleAssignment`] if a name was already decided.
    pub fn pin_to(&mut self, name: &str) -> Result<()> {
        self.assign_name(name)?;
        self.pinned = true;
        Ok(())
    }
}
