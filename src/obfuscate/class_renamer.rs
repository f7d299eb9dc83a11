//! Class renaming.
//!
//! Assigns a fresh internal name to every class the pin pass left untouched.
//! Candidates come from the configured name factory and are checked against
//! the namespace of the class's target package bucket, which the package
//! policy selects: keep the original package, flatten the hierarchy under one
//! package, or repackage everything into a single package.
//!
//! Classes are processed in the pool's deterministic order, with one
//! exception: a class whose inner-class records tie it to an enclosing class
//! forces that enclosing class to be processed first. Anonymous and local
//! classes (numeric simple-name suffix, `Outer$1`) then derive their new name
//! from the enclosing class's new name, keeping the `$` convention intact.

use std::collections::HashMap;

use crate::model::names::{
    has_numeric_simple_name, package_of, qualify, simple_name_of, INNER_CLASS_SEPARATOR,
};
use crate::model::pool::{ClassId, ClassPool};
use crate::naming::NameFactory;
use crate::obfuscate::config::{ObfuscationConfig, PackagePolicy};
use crate::obfuscate::namespace::Namespace;
use crate::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Assigns final names to all classes in a pool.
pub struct ClassRenamer<'a> {
    config: &'a ObfuscationConfig,
    factory: Box<dyn NameFactory>,
    package_factory: Box<dyn NameFactory>,
    package_namespace: Namespace,
    package_map: HashMap<String, String>,
    namespaces: HashMap<String, Namespace>,
}

impl<'a> ClassRenamer<'a> {
    /// Creates a renamer drawing class names from `factory`.
    ///
    /// Flattened package names are generated by `package_factory`.
    #[must_use]
    pub fn new(
        config: &'a ObfuscationConfig,
        factory: Box<dyn NameFactory>,
        package_factory: Box<dyn NameFactory>,
    ) -> Self {
        ClassRenamer {
            config,
            factory,
            package_factory,
            package_namespace: Namespace::new("packages", config.mixed_case_names),
            package_map: HashMap::new(),
            namespaces: HashMap::new(),
        }
    }

    /// Renames every class without an assigned name.
    ///
    /// Returns the number of classes renamed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NamespaceExhausted`] if the factory cannot produce an
    /// unclaimed candidate within the configured attempt bound.
    pub fn run(&mut self, pool: &mut ClassPool) -> Result<usize> {
        // Names decided before this pass (pinned classes, applied mappings)
        // claim their buckets first, so generated names cannot collide with
        // them no matter the processing order.
        for id in pool.ids() {
            if let Some(assigned) = pool.class(id).assigned_name() {
                let package = package_of(assigned).to_string();
                let simple = simple_name_of(assigned).to_string();
                self.namespace_mut(&package).insert(&simple);
            }
        }

        let mut renamed = 0;
        let mut states = vec![VisitState::Unvisited; pool.len()];
        for id in pool.ids() {
            renamed += self.process_class(pool, id, &mut states)?;
        }
        Ok(renamed)
    }

    fn process_class(
        &mut self,
        pool: &mut ClassPool,
        id: ClassId,
        states: &mut [VisitState],
    ) -> Result<usize> {
        match states[id.index()] {
            VisitState::Done | VisitState::InProgress => return Ok(0),
            VisitState::Unvisited => states[id.index()] = VisitState::InProgress,
        }

        // Enclosing classes decide their names first.
        let outers: Vec<ClassId> = pool
            .class(id)
            .inner_classes
            .iter()
            .filter(|info| info.inner == Some(id))
            .filter_map(|info| info.outer)
            .collect();
        let mut renamed = 0;
        for outer in outers {
            renamed += self.process_class(pool, outer, states)?;
        }

        if pool.class(id).has_assigned_name() {
            states[id.index()] = VisitState::Done;
            return Ok(renamed);
        }

        let original = pool.class(id).name().to_string();
        let new_name = match self.derived_inner_name(pool, id, &original) {
            Some(name) => name,
            None => self.generate_name(&original)?,
        };
        pool.class_mut(id).assign_name(&new_name)?;
        states[id.index()] = VisitState::Done;
        Ok(renamed + 1)
    }

    /// New name of an anonymous or local class: the enclosing class's new name
    /// with the numeric tail reattached, provided that name is still free.
    fn derived_inner_name(
        &mut self,
        pool: &ClassPool,
        id: ClassId,
        original: &str,
    ) -> Option<String> {
        if !has_numeric_simple_name(original) {
            return None;
        }
        let outer_id = pool
            .class(id)
            .inner_classes
            .iter()
            .find(|info| info.inner == Some(id) && info.outer.is_some())?
            .outer?;
        let outer_name = pool.class(outer_id).assigned_name()?;
        let tail_start = original.rfind(INNER_CLASS_SEPARATOR)?;
        let candidate = format!("{}{}", outer_name, &original[tail_start..]);

        let package = package_of(&candidate).to_string();
        let simple = simple_name_of(&candidate).to_string();
        let namespace = self.namespace_mut(&package);
        if namespace.contains(&simple) {
            return None;
        }
        namespace.insert(&simple);
        Some(candidate)
    }

    fn generate_name(&mut self, original: &str) -> Result<String> {
        let package = self.target_package(package_of(original));
        self.factory.reset();
        for _ in 0..self.config.max_name_attempts {
            let candidate = self.factory.next();
            let namespace = self
                .namespaces
                .entry(package.clone())
                .or_insert_with(|| {
                    Namespace::new(&package, self.config.mixed_case_names)
                });
            if !namespace.contains(&candidate) {
                namespace.insert(&candidate);
                return Ok(qualify(&package, &candidate));
            }
        }
        Err(Error::NamespaceExhausted {
            namespace: format!("package '{package}'"),
            attempts: self.config.max_name_attempts,
        })
    }

    fn target_package(&mut self, original: &str) -> String {
        match &self.config.package_policy {
            PackagePolicy::KeepPackage => original.to_string(),
            PackagePolicy::RepackageInto(package) => package.clone(),
            PackagePolicy::FlattenInto(root) => {
                if let Some(mapped) = self.package_map.get(original) {
                    return mapped.clone();
                }
                let mut segment = self.package_factory.next();
                while self.package_namespace.contains(&segment) {
                    segment = self.package_factory.next();
                }
                self.package_namespace.insert(&segment);
                let mapped = qualify(root, &segment);
                self.package_map.insert(original.to_string(), mapped.clone());
                mapped
            }
        }
    }

    fn namespace_mut(&mut self, package: &str) -> &mut Namespace {
        self.namespaces
            .entry(package.to_string())
            .or_insert_with(|| Namespace::new(package, self.config.mixed_case_names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::class::{Class, InnerClassInfo};
    use crate::naming::SimpleNameFactory;

    fn renamer(config: &ObfuscationConfig) -> ClassRenamer<'_> {
        ClassRenamer::new(
            config,
            Box::new(SimpleNameFactory::new(config.mixed_case_names)),
            Box::new(SimpleNameFactory::new(false)),
        )
    }

    #[test]
    fn test_renames_within_original_package() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let a = pool.add_class(Class::new("com/example/First"));
        let b = pool.add_class(Class::new("com/example/Second"));
        let c = pool.add_class(Class::new("org/other/Third"));

        let renamed = renamer(&config).run(&mut pool).unwrap();
        assert_eq!(renamed, 3);
        assert_eq!(pool.class(a).assigned_name(), Some("com/example/a"));
        assert_eq!(pool.class(b).assigned_name(), Some("com/example/b"));
        // Separate package bucket restarts the sequence.
        assert_eq!(pool.class(c).assigned_name(), Some("org/other/a"));
    }

    #[test]
    fn test_pinned_names_block_candidates() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut pinned = Class::new("com/example/a");
        pinned.pin_to("com/example/a").unwrap();
        pool.add_class(pinned);
        let fresh = pool.add_class(Class::new("com/example/Fresh"));

        renamer(&config).run(&mut pool).unwrap();
        assert_eq!(pool.class(fresh).assigned_name(), Some("com/example/b"));
    }

    #[test]
    fn test_repackage_into_single_package() {
        let mut config = ObfuscationConfig::new();
        config.package_policy = PackagePolicy::RepackageInto("o".to_string());
        let mut pool = ClassPool::new();
        let a = pool.add_class(Class::new("com/example/First"));
        let b = pool.add_class(Class::new("org/other/Second"));

        renamer(&config).run(&mut pool).unwrap();
        assert_eq!(pool.class(a).assigned_name(), Some("o/a"));
        assert_eq!(pool.class(b).assigned_name(), Some("o/b"));
    }

    #[test]
    fn test_flatten_assigns_one_subpackage_per_original_package() {
        let mut config = ObfuscationConfig::new();
        config.package_policy = PackagePolicy::FlattenInto("o".to_string());
        let mut pool = ClassPool::new();
        let a = pool.add_class(Class::new("com/example/First"));
        let b = pool.add_class(Class::new("com/example/Second"));
        let c = pool.add_class(Class::new("org/other/Third"));

        renamer(&config).run(&mut pool).unwrap();
        assert_eq!(pool.class(a).assigned_name(), Some("o/a/a"));
        assert_eq!(pool.class(b).assigned_name(), Some("o/a/b"));
        assert_eq!(pool.class(c).assigned_name(), Some("o/b/a"));
    }

    #[test]
    fn test_case_insensitive_collision_without_mixed_case() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let mut pinned = Class::new("p/A");
        pinned.pin_to("p/A").unwrap();
        pool.add_class(pinned);
        let fresh = pool.add_class(Class::new("p/Fresh"));

        renamer(&config).run(&mut pool).unwrap();
        // "a" collides with the kept "A" when case folding is on.
        assert_eq!(pool.class(fresh).assigned_name(), Some("p/b"));
    }

    #[test]
    fn test_outer_class_processed_before_inner() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        // Inner first in pool order; processing must still visit Outer first.
        let inner = pool.add_class(Class::new("p/Outer$1"));
        let outer = pool.add_class(Class::new("p/Outer"));
        pool.class_mut(inner).inner_classes.push(InnerClassInfo {
            inner: Some(inner),
            outer: Some(outer),
        });

        renamer(&config).run(&mut pool).unwrap();
        let outer_name = pool.class(outer).assigned_name().unwrap().to_string();
        let inner_name = pool.class(inner).assigned_name().unwrap().to_string();
        assert_eq!(inner_name, format!("{outer_name}$1"));
    }

    #[test]
    fn test_named_inner_class_not_derived() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let inner = pool.add_class(Class::new("p/Outer$Inner"));
        let outer = pool.add_class(Class::new("p/Outer"));
        pool.class_mut(inner).inner_classes.push(InnerClassInfo {
            inner: Some(inner),
            outer: Some(outer),
        });

        renamer(&config).run(&mut pool).unwrap();
        let inner_name = pool.class(inner).assigned_name().unwrap();
        assert!(!inner_name.contains('$'));
    }

    #[test]
    fn test_cyclic_inner_records_terminate() {
        let config = ObfuscationConfig::new();
        let mut pool = ClassPool::new();
        let a = pool.add_class(Class::new("p/A$1"));
        let b = pool.add_class(Class::new("p/B$1"));
        pool.class_mut(a).inner_classes.push(InnerClassInfo {
            inner: Some(a),
            outer: Some(b),
        });
        pool.class_mut(b).inner_classes.push(InnerClassInfo {
            inner: Some(b),
            outer: Some(a),
        });

        let renamed = renamer(&config).run(&mut pool).unwrap();
        assert_eq!(renamed, 2);
        assert!(pool.class(a).has_assigned_name());
        assert!(pool.class(b).has_assigned_name());
    }
}
