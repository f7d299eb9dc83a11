//! # shroud Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the shroud library. Import this module to get quick access to the essential
//! types for renaming a program and fixing up its references.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all shroud operations
pub use crate::Error;

/// The result type used throughout shroud
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The pass pipeline driver
pub use crate::obfuscate::{ObfuscationConfig, ObfuscationSummary, Obfuscator, RunOptions};

/// Pipeline configuration enums
pub use crate::obfuscate::{NameGeneratorKind, PackagePolicy};

// ================================================================================================
// Program Model
// ================================================================================================

/// The class pool and its entities
pub use crate::model::{
    Attribute, AttributeKind, AttributeList, Class, ClassId, ClassPool, Constant, InnerClassInfo,
    JavaReference, Member, MemberId, MemberKind, Resource, ResourcePool,
};

/// Access flag types
pub use crate::model::{ClassAccessFlags, MemberAccessFlags};

// ================================================================================================
// Obfuscation Passes
// ================================================================================================

/// Individual passes, for hosts that drive the pipeline manually
pub use crate::obfuscate::{
    AttributeCompactor, ClassRenamer, KeepPredicate, MemberRenamer, NameKeeper, Namespace,
    ReferenceFixer, UsageMarker,
};

// ================================================================================================
// Name Generation
// ================================================================================================

/// Candidate name factories
pub use crate::naming::{
    is_special_name, DictionaryNameFactory, NameFactory, NumericNameFactory, SimpleNameFactory,
    SpecialNameFactory,
};

// ================================================================================================
// Mapping I/O
// ================================================================================================

/// Mapping events, sinks, and file I/O
pub use crate::mapping::{
    ClassMapping, FieldMapping, MappingEmitter, MappingPrinter, MappingReader, MappingSink,
    MethodMapping, MultiMappingSink,
};
