//! Configuration for the obfuscation pipeline.
//!
//! This module provides the configuration types controlling name generation,
//! package restructuring, overload aggressiveness, and auxiliary metadata
//! retention.

use std::path::PathBuf;

/// How renamed classes are distributed across packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PackagePolicy {
    /// Keep every class in its original package; rename only simple names.
    #[default]
    KeepPackage,
    /// Move all renamed classes into the given package and its generated
    /// subpackages ("flatten package hierarchy").
    FlattenInto(String),
    /// Move all renamed classes directly into the given single package.
    RepackageInto(String),
}

/// Which candidate generator the renamers draw from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NameGeneratorKind {
    /// Short alphabetic names (`a, b, ..`).
    #[default]
    Simple,
    /// Decimal names (`1, 2, ..`), immune to source-identifier clashes.
    Numeric,
    /// Words from a dictionary file, falling back to alphabetic names.
    Dictionary(PathBuf),
}

/// Configuration for the obfuscation pipeline.
///
/// Controls all aspects of renaming: the candidate generator, collision-domain
/// case folding, package restructuring, overload aggressiveness, and whether
/// auxiliary (non-bytecode) metadata is retained and fixed up.
#[derive(Debug, Clone)]
pub struct ObfuscationConfig {
    /// Candidate generator for class and member names.
    pub name_generator: NameGeneratorKind,

    /// Allow names differing only in case to coexist (default: false).
    ///
    /// When disabled, namespace collision checks are case-insensitive so the
    /// output stays safe on case-insensitive filesystems.
    pub mixed_case_names: bool,

    /// Allow members of one class to share a name across different descriptors
    /// more aggressively (default: false).
    ///
    /// When enabled, only members with identical descriptors conflict inside a
    /// class; when disabled, a candidate name must be free across all of a
    /// class's members regardless of descriptor.
    pub aggressive_overloading: bool,

    /// Package restructuring policy.
    pub package_policy: PackagePolicy,

    /// Retain and fix up auxiliary non-bytecode metadata such as Kotlin
    /// reflection metadata (default: false).
    pub keep_aux_metadata: bool,

    /// Restrict dictionary words to valid Java identifiers (default: true).
    pub dictionary_identifiers_only: bool,

    /// Upper bound on candidates drawn per namespace before the run aborts
    /// with a namespace-exhaustion error.
    pub max_name_attempts: usize,
}

impl ObfuscationConfig {
    /// Creates a configuration with defaults suitable for typical shrinking runs.
    #[must_use]
    pub fn new() -> Self {
        ObfuscationConfig {
            name_generator: NameGeneratorKind::Simple,
            mixed_case_names: false,
            aggressive_overloading: false,
            package_policy: PackagePolicy::KeepPackage,
            keep_aux_metadata: false,
            dictionary_identifiers_only: true,
            max_name_attempts: 1 << 20,
        }
    }
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        ObfuscationConfig::new()
    }
}
