//! In-memory model of the processed program.
//!
//! The model is the mutable graph every obfuscation pass operates on: classes
//! with their members, attribute lists, inner-class records, and symbolic
//! references, plus the auxiliary resources that point at classes from outside
//! the bytecode. Parsing class files into this model and writing it back out
//! are the host application's job; the engine only renames and rewrites.
//!
//! # Key Components
//!
//! - [`ClassPool`] - Arena of all program classes
//! - [`Class`] / [`Member`] - Renamable entities with decide-once assigned names
//! - [`AttributeList`] - Compactable per-entity attribute storage
//! - [`Constant`] - Closed sum type over symbolic reference kinds
//! - [`ResourcePool`] / [`JavaReference`] - Auxiliary metadata references
//! - [`names`] - Internal/external name form conversion

pub mod access;
pub mod attribute;
pub mod class;
pub mod constant;
pub mod descriptor;
pub mod member;
pub mod names;
pub mod pool;
pub mod resource;

pub use access::{ClassAccessFlags, MemberAccessFlags};
pub use attribute::{Attribute, AttributeKind, AttributeList, UsageMark};
pub use class::{Class, InnerClassInfo};
pub use constant::Constant;
pub use member::{Member, MemberKind, CLASS_INITIALIZER_NAME, INITIALIZER_NAME};
pub use pool::{ClassId, ClassPool, MemberId};
pub use resource::{JavaReference, Resource, ResourcePool};
