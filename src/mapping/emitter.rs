//! Mapping event production from a renamed class pool.

use crate::mapping::{ClassMapping, FieldMapping, MappingSink, MethodMapping};
use crate::model::descriptor::{external_type, method_signature};
use crate::model::member::MemberKind;
use crate::model::names::external_class_name;
use crate::model::pool::ClassPool;

/// Walks a pool after renaming and feeds one event per mapping to a sink.
///
/// Classes are visited in the pool's deterministic order. Member events only
/// follow a class event the sink accepted, and only members whose name was
/// actually decided produce events; untouched members and initializers are
/// silent, which keeps a printed mapping free of identity lines that a replay
/// could not distinguish from real renames.
#[derive(Debug, Default)]
pub struct MappingEmitter;

impl MappingEmitter {
    /// Creates an emitter.
    #[must_use]
    pub fn new() -> Self {
        MappingEmitter
    }

    /// Emits all mappings of the pool into the sink.
    pub fn emit(&self, pool: &ClassPool, sink: &mut dyn MappingSink) {
        for class in pool.iter() {
            let owner = external_class_name(class.name());
            let new_owner = external_class_name(class.output_name());
            let accepted = sink.on_class_mapping(&ClassMapping {
                old_name: owner.clone(),
                new_name: new_owner.clone(),
            });
            if !accepted {
                continue;
            }
            for member in &class.members {
                let Some(new_name) = member.assigned_name() else {
                    continue;
                };
                match member.kind() {
                    MemberKind::Field => sink.on_field_mapping(&FieldMapping {
                        owner: owner.clone(),
                        field_type: external_type(member.descriptor()),
                        old_name: member.name().to_string(),
                        new_owner: new_owner.clone(),
                        new_name: new_name.to_string(),
                    }),
                    MemberKind::Method => {
                        let (args, return_type) = match method_signature(member.descriptor()) {
                            Some(signature) => signature,
                            None => (Vec::new(), member.descriptor().to_string()),
                        };
                        sink.on_method_mapping(&MethodMapping {
                            owner: owner.clone(),
                            first_line: member.first_line,
                            last_line: member.last_line,
                            return_type,
                            old_name: member.name().to_string(),
                            args,
                            new_owner: new_owner.clone(),
                            new_first_line: member.first_line,
                            new_last_line: member.last_line,
                            new_name: new_name.to_string(),
                        });
                    }
                }
            }
        }
    }
}
