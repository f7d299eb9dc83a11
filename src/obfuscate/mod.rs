//! The obfuscation pipeline.
//!
//! Renaming is a fixed sequence of passes over the class pool, each of which
//! must fully complete before the next starts:
//!
//! 1. **Attribute compaction**: drop every attribute the usage marker did not
//!    mark (the marks themselves come from an external reachability pass).
//! 2. **Pinning**: force names that must not change — applied mappings first,
//!    then keep rules.
//! 3. **Class renaming**: assign fresh names to the remaining classes.
//! 4. **Member renaming**: assign fresh names per override group.
//! 5. **Mapping emission**: report every decided rename to the mapping sinks.
//! 6. **Reference fixup**: rewrite all symbolic references to the final names.
//!
//! Only the renamers are order-sensitive across entities; compaction and
//! fixup parallelize per owner. The [`Obfuscator`] drives the sequence and
//! reports an [`ObfuscationSummary`].
//!
//! # Examples
//!
//! ```rust
//! use shroud::model::{Class, ClassPool, Member};
//! use shroud::obfuscate::{KeepPredicate, ObfuscationConfig, Obfuscator, RunOptions};
//!
//! struct KeepNone;
//! impl KeepPredicate for KeepNone {
//!     fn keep_class(&self, _: &shroud::model::Class) -> bool { false }
//!     fn keep_member(&self, _: &shroud::model::Class, _: &shroud::model::Member) -> bool { false }
//! }
//!
//! let mut pool = ClassPool::new();
//! let mut class = Class::new("com/example/A");
//! class.add_member(Member::method("foo", "()V"));
//! pool.add_class(class);
//!
//! let obfuscator = Obfuscator::new(ObfuscationConfig::new())?;
//! let keep = KeepNone;
//! let summary = obfuscator.run(
//!     &mut pool,
//!     RunOptions {
//!         keep: Some(&keep),
//!         ..RunOptions::default()
//!     },
//! )?;
//! assert_eq!(summary.classes_renamed, 1);
//! # Ok::<(), shroud::Error>(())
//! ```

pub mod class_renamer;
pub mod compactor;
pub mod config;
pub mod fixup;
pub mod keeper;
pub mod member_renamer;
pub mod namespace;
pub mod usage;

pub use class_renamer::ClassRenamer;
pub use compactor::AttributeCompactor;
pub use config::{NameGeneratorKind, ObfuscationConfig, PackagePolicy};
pub use fixup::{FixupStats, ReferenceFixer};
pub use keeper::{KeepPredicate, KeepStats, NameKeeper};
pub use member_renamer::MemberRenamer;
pub use namespace::Namespace;
pub use usage::UsageMarker;

use crate::mapping::{MappingEmitter, MappingReader, MappingSink};
use crate::model::pool::ClassPool;
use crate::model::resource::ResourcePool;
use crate::naming::{
    DictionaryNameFactory, NameFactory, NumericNameFactory, SimpleNameFactory,
};
use crate::{Error, Result};

/// Statistics of one complete obfuscation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObfuscationSummary {
    /// Attribute records dropped by compaction
    pub attributes_dropped: usize,
    /// Classes and members pinned by keep rules
    pub keep: KeepStats,
    /// Classes forced by an applied mapping
    pub mapping_classes_applied: usize,
    /// Members forced by an applied mapping
    pub mapping_members_applied: usize,
    /// Classes renamed
    pub classes_renamed: usize,
    /// Members renamed
    pub members_renamed: usize,
    /// In-format fixup statistics
    pub class_fixup: FixupStats,
    /// Auxiliary fixup statistics; all zero unless auxiliary metadata is kept
    pub resource_fixup: FixupStats,
}

/// Per-run inputs of the pipeline.
///
/// The pool itself is passed separately; everything here is optional, but a
/// run that neither keeps names, applies a mapping, nor records one is
/// rejected (its output would be unusable).
#[derive(Default)]
pub struct RunOptions<'a> {
    /// Marker whose marks decide which attributes survive compaction.
    /// Without a marker, compaction is skipped entirely.
    pub marker: Option<&'a UsageMarker>,
    /// Keep-rule decisions, applied by the pin pass.
    pub keep: Option<&'a dyn KeepPredicate>,
    /// Previously printed mapping to re-apply before renaming.
    pub apply_mapping: Option<&'a str>,
    /// Auxiliary resources to fix up when the configuration retains them.
    pub resources: Option<&'a mut ResourcePool>,
    /// Sink receiving one event per decided rename.
    pub mapping_sink: Option<&'a mut dyn MappingSink>,
}

/// Drives the obfuscation pass sequence over a class pool.
pub struct Obfuscator {
    config: ObfuscationConfig,
}

impl Obfuscator {
    /// Creates an obfuscator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the configured dictionary file does
    /// not exist.
    pub fn new(config: ObfuscationConfig) -> Result<Self> {
        if let NameGeneratorKind::Dictionary(path) = &config.name_generator {
            if !path.is_file() {
                return Err(Error::Configuration(format!(
                    "dictionary file '{}' not found",
                    path.display()
                )));
            }
        }
        Ok(Obfuscator { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ObfuscationConfig {
        &self.config
    }

    /// Runs the full pass sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no keep rules, applied mapping, or
    /// mapping sink were provided; otherwise propagates the first pass
    /// failure. The pool must be considered corrupted after an error.
    pub fn run(
        &self,
        pool: &mut ClassPool,
        options: RunOptions<'_>,
    ) -> Result<ObfuscationSummary> {
        if options.keep.is_none()
            && options.apply_mapping.is_none()
            && options.mapping_sink.is_none()
        {
            return Err(Error::Configuration(
                "renaming requires keep rules, an applied mapping, or a mapping sink; \
                 the output would otherwise be unusable"
                    .to_string(),
            ));
        }

        let mut summary = ObfuscationSummary::default();
        pool.link_references();

        if let Some(marker) = options.marker {
            summary.attributes_dropped = AttributeCompactor::new(marker).run(pool);
        }

        if let Some(text) = options.apply_mapping {
            let stats = MappingReader::new().apply(text, pool)?;
            summary.mapping_classes_applied = stats.classes_applied;
            summary.mapping_members_applied = stats.members_applied;
        }

        if let Some(keep) = options.keep {
            summary.keep = NameKeeper::new(keep).run(pool)?;
        }

        let mut class_renamer = ClassRenamer::new(
            &self.config,
            self.name_factory()?,
            Box::new(SimpleNameFactory::new(false)),
        );
        summary.classes_renamed = class_renamer.run(pool)?;

        let mut member_renamer = MemberRenamer::new(&self.config, self.name_factory()?);
        summary.members_renamed = member_renamer.run(pool)?;

        if let Some(sink) = options.mapping_sink {
            MappingEmitter::new().emit(pool, sink);
        }

        let fixer = ReferenceFixer::new(pool);
        summary.class_fixup = fixer.fix_classes(pool);
        if self.config.keep_aux_metadata {
            if let Some(resources) = options.resources {
                summary.resource_fixup = fixer.fix_resources(resources);
            }
        }

        Ok(summary)
    }

    /// Builds a fresh candidate factory per the configuration.
    fn name_factory(&self) -> Result<Box<dyn NameFactory>> {
        Ok(match &self.config.name_generator {
            NameGeneratorKind::Simple => {
                Box::new(SimpleNameFactory::new(self.config.mixed_case_names))
            }
            NameGeneratorKind::Numeric => Box::new(NumericNameFactory::new()),
            NameGeneratorKind::Dictionary(path) => Box::new(DictionaryNameFactory::from_file(
                path,
                self.config.dictionary_identifiers_only,
                Box::new(SimpleNameFactory::new(self.config.mixed_case_names)),
            )?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::class::Class;
    use crate::model::member::Member;

    struct KeepNone;

    impl KeepPredicate for KeepNone {
        fn keep_class(&self, _: &Class) -> bool {
            false
        }
        fn keep_member(&self, _: &Class, _: &Member) -> bool {
            false
        }
    }

    #[test]
    fn test_run_without_any_name_source_is_rejected() {
        let obfuscator = Obfuscator::new(ObfuscationConfig::new()).unwrap();
        let mut pool = ClassPool::new();
        let result = obfuscator.run(&mut pool, RunOptions::default());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_missing_dictionary_is_rejected_up_front() {
        let mut config = ObfuscationConfig::new();
        config.name_generator =
            NameGeneratorKind::Dictionary("/nonexistent/words.txt".into());
        assert!(matches!(
            Obfuscator::new(config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_pool_run_succeeds() {
        let obfuscator = Obfuscator::new(ObfuscationConfig::new()).unwrap();
        let mut pool = ClassPool::new();
        let keep = KeepNone;
        let summary = obfuscator
            .run(
                &mut pool,
                RunOptions {
                    keep: Some(&keep),
                    ..RunOptions::default()
                },
            )
            .unwrap();
        assert_eq!(summary.classes_renamed, 0);
        assert_eq!(summary.members_renamed, 0);
    }
}
