//! Access flags for classes, fields, and methods.
//!
//! These mirror the JVM `access_flags` bit layout. The renaming engine only
//! inspects a handful of them (interface detection, synthetic members), but the
//! full set is modeled so loaded flags round-trip unchanged.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Access and property flags of a class.
    pub struct ClassAccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared final
        const FINAL = 0x0010;
        /// Treat superclass methods specially on invokespecial
        const SUPER = 0x0020;
        /// Is an interface
        const INTERFACE = 0x0200;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface
        const ANNOTATION = 0x2000;
        /// Declared as an enum class
        const ENUM = 0x4000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Access and property flags of a field or method.
    pub struct MemberAccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Declared synchronized (methods) / volatile (fields)
        const SYNCHRONIZED = 0x0020;
        /// Bridge method generated by the compiler
        const BRIDGE = 0x0040;
        /// Declared with variable arity (methods) / transient (fields)
        const VARARGS = 0x0080;
        /// Declared native
        const NATIVE = 0x0100;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Declared strictfp
        const STRICT = 0x0800;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
    }
}

impl Default for ClassAccessFlags {
    fn default() -> Self {
        ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER
    }
}

impl Default for MemberAccessFlags {
    fn default() -> Self {
        MemberAccessFlags::PUBLIC
    }
}
