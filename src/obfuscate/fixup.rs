//! Reference fixup: rewriting symbolic references to the finalized names.
//!
//! Runs strictly after both renamers, when every class and member either has
//! an assigned name or keeps its original one. Two responsibilities:
//!
//! - **In-format fixup** always runs: every constant-pool reference naming a
//!   program class or member is rewritten, including the class names embedded
//!   in field and method descriptors.
//! - **Auxiliary fixup** runs only when the configuration retains non-bytecode
//!   metadata: the external, dot-separated class names inside resources are
//!   rewritten for every reference that resolved to a program class.
//!
//! References whose target never resolved point outside the program and stay
//! byte-for-byte unchanged; that is expected, not an error. Work is
//! independent per class and per resource, so both sub-passes run in parallel
//! at that granularity.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::model::constant::Constant;
use crate::model::names::external_class_name;
use crate::model::pool::ClassPool;
use crate::model::resource::ResourcePool;

/// Statistics of one fixup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixupStats {
    /// Constant-pool references rewritten
    pub constants_rewritten: usize,
    /// Descriptors whose embedded class names changed
    pub descriptors_rewritten: usize,
    /// Auxiliary references rewritten
    pub aux_references_rewritten: usize,
    /// Auxiliary references left untouched because their target never resolved
    pub aux_references_unresolved: usize,
}

/// Rewrites symbolic references to match assigned names.
pub struct ReferenceFixer {
    /// Output internal name per class, indexed by `ClassId`
    class_names: Vec<String>,
    /// Output name per member, indexed by `ClassId` then `MemberId`
    member_names: Vec<Vec<String>>,
    /// Original internal name to output internal name, for descriptor rewriting
    renamed: HashMap<String, String>,
}

impl ReferenceFixer {
    /// Snapshots the finalized names of a pool.
    ///
    /// The snapshot decouples name lookup from the mutation below, so classes
    /// can be rewritten in parallel.
    #[must_use]
    pub fn new(pool: &ClassPool) -> Self {
        let mut class_names = Vec::with_capacity(pool.len());
        let mut member_names = Vec::with_capacity(pool.len());
        let mut renamed = HashMap::new();
        for class in pool.iter() {
            class_names.push(class.output_name().to_string());
            member_names.push(
                class
                    .members
                    .iter()
                    .map(|member| member.output_name().to_string())
                    .collect(),
            );
            if class.output_name() != class.name() {
                renamed.insert(class.name().to_string(), class.output_name().to_string());
            }
        }
        ReferenceFixer {
            class_names,
            member_names,
            renamed,
        }
    }

    /// Rewrites every resolved constant-pool reference in the pool.
    pub fn fix_classes(&self, pool: &mut ClassPool) -> FixupStats {
        let constants = AtomicUsize::new(0);
        let descriptors = AtomicUsize::new(0);
        pool.classes_mut().par_iter_mut().for_each(|class| {
            for constant in &mut class.constants {
                let (changed_name, changed_descriptor) = self.fix_constant(constant);
                if changed_name {
                    constants.fetch_add(1, Ordering::Relaxed);
                }
                if changed_descriptor {
                    descriptors.fetch_add(1, Ordering::Relaxed);
                }
            }
            // Declared member descriptors embed class names too.
            for member in &mut class.members {
                let mut descriptor = member.descriptor().to_string();
                if self.fix_descriptor(&mut descriptor) {
                    member.set_descriptor(descriptor);
                    descriptors.fetch_add(1, Ordering::Relaxed);
                }
            }
        });
        FixupStats {
            constants_rewritten: constants.into_inner(),
            descriptors_rewritten: descriptors.into_inner(),
            ..FixupStats::default()
        }
    }

    /// Rewrites the external names of resolved auxiliary references.
    pub fn fix_resources(&self, resources: &mut ResourcePool) -> FixupStats {
        let rewritten = AtomicUsize::new(0);
        let unresolved = AtomicUsize::new(0);
        resources.resources.par_iter_mut().for_each(|resource| {
            for reference in &mut resource.references {
                match reference.target {
                    Some(class_id) => {
                        let external =
                            external_class_name(&self.class_names[class_id.index()]);
                        if reference.external_name != external {
                            reference.external_name = external;
                            rewritten.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    None => {
                        unresolved.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });
        FixupStats {
            aux_references_rewritten: rewritten.into_inner(),
            aux_references_unresolved: unresolved.into_inner(),
            ..FixupStats::default()
        }
    }

    /// Rewrites one constant. Returns (name changed, descriptor changed).
    fn fix_constant(&self, constant: &mut Constant) -> (bool, bool) {
        match constant {
            Constant::Class { name, target } => match target {
                Some(class_id) => {
                    let new_name = &self.class_names[class_id.index()];
                    if name != new_name {
                        *name = new_name.clone();
                        (true, false)
                    } else {
                        (false, false)
                    }
                }
                None => (false, false),
            },
            Constant::FieldRef {
                class_name,
                name,
                descriptor,
                target,
            }
            | Constant::MethodRef {
                class_name,
                name,
                descriptor,
                target,
            } => {
                let mut changed = false;
                if let Some((class_id, member_id)) = target {
                    let new_class = &self.class_names[class_id.index()];
                    if class_name != new_class {
                        *class_name = new_class.clone();
                        changed = true;
                    }
                    let new_name = &self.member_names[class_id.index()][member_id.index()];
                    if name != new_name {
                        *name = new_name.clone();
                        changed = true;
                    }
                }
                let changed_descriptor = self.fix_descriptor(descriptor);
                (changed, changed_descriptor)
            }
        }
    }

    /// Rewrites the `L<class>;` segments of a descriptor in place.
    ///
    /// Returns whether anything changed. Descriptors reference classes by
    /// original internal name regardless of reference resolution, so this maps
    /// through the rename table rather than through resolved targets.
    fn fix_descriptor(&self, descriptor: &mut String) -> bool {
        if self.renamed.is_empty() || !descriptor.contains('L') {
            return false;
        }
        let mut result = String::with_capacity(descriptor.len());
        let mut changed = false;
        let mut rest = descriptor.as_str();
        while let Some(start) = rest.find('L') {
            let Some(end_offset) = rest[start..].find(';') else {
                break;
            };
            let end = start + end_offset;
            result.push_str(&rest[..=start]);
            let class_name = &rest[start + 1..end];
            match self.renamed.get(class_name) {
                Some(new_name) => {
                    result.push_str(new_name);
                    changed = true;
                }
                None => result.push_str(class_name),
            }
            result.push(';');
            rest = &rest[end + 1..];
        }
        result.push_str(rest);
        if changed {
            *descriptor = result;
        }
        changed
    }
}
