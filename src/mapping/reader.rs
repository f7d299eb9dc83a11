//! Mapping file parser and re-applier.

use crate::mapping::{ClassMapping, FieldMapping, MappingSink, MethodMapping};
use crate::model::descriptor::{internal_type, method_descriptor};
use crate::model::member::MemberKind;
use crate::model::names::internal_class_name;
use crate::model::pool::ClassPool;
use crate::{Error, Result};

/// Parses the line-oriented mapping file format and replays it.
///
/// Replaying a previously printed mapping reproduces the exact class, field,
/// and method identities: [`pump`](MappingReader::pump) feeds the parsed
/// events to any sink, and [`apply`](MappingReader::apply) forces the parsed
/// names onto a class pool, pinning each mapped entity to its recorded new
/// name before the renamers run.
#[derive(Debug, Default)]
pub struct MappingReader;

/// Statistics of one mapping application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Classes whose names were forced
    pub classes_applied: usize,
    /// Members whose names were forced
    pub members_applied: usize,
    /// Member lines whose member no longer exists in the pool
    pub members_missing: usize,
}

impl MappingReader {
    /// Creates a reader.
    #[must_use]
    pub fn new() -> Self {
        MappingReader
    }

    /// Parses mapping text and feeds every event to `sink`.
    ///
    /// Member events of a class the sink rejected are parsed but not
    /// delivered, mirroring emission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] on lines that fit neither the class header
    /// nor the member line format.
    pub fn pump(&self, text: &str, sink: &mut dyn MappingSink) -> Result<()> {
        let mut current: Option<(ClassMapping, bool)> = None;
        for (line_number, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with(char::is_whitespace) {
                let Some((class, accepted)) = &current else {
                    return Err(malformed_error!(
                        "member line {} appears before any class header",
                        line_number + 1
                    ));
                };
                if !accepted {
                    continue;
                }
                self.parse_member_line(line.trim_start(), class, line_number + 1, sink)?;
            } else {
                let class = Self::parse_class_header(line, line_number + 1)?;
                let accepted = sink.on_class_mapping(&class);
                current = Some((class, accepted));
            }
        }
        Ok(())
    }

    /// Forces the parsed names onto `pool`.
    ///
    /// Every mapped class and member is pinned to its recorded new name,
    /// exactly like a keep rule pinning to a different target. Member lines
    /// whose member is gone (e.g. removed by shrinking) are counted and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassNotFound`] if a mapped class is absent from the
    /// pool, [`Error::DoubleAssignment`] if a mapped entity already has a
    /// conflicting name, and [`Error::Malformed`] on parse failures.
    pub fn apply(&self, text: &str, pool: &mut ClassPool) -> Result<ApplyStats> {
        let mut applier = MappingApplier {
            pool,
            stats: ApplyStats::default(),
            error: None,
        };
        self.pump(text, &mut applier)?;
        match applier.error {
            Some(error) => Err(error),
            None => Ok(applier.stats),
        }
    }

    fn parse_class_header(line: &str, line_number: usize) -> Result<ClassMapping> {
        let Some(body) = line.strip_suffix(':') else {
            return Err(malformed_error!(
                "class header on line {} does not end with ':'",
                line_number
            ));
        };
        let Some((old_name, new_name)) = body.split_once(" -> ") else {
            return Err(malformed_error!(
                "class header on line {} has no '->'",
                line_number
            ));
        };
        Ok(ClassMapping {
            old_name: old_name.trim().to_string(),
            new_name: new_name.trim().to_string(),
        })
    }

    fn parse_member_line(
        &self,
        line: &str,
        class: &ClassMapping,
        line_number: usize,
        sink: &mut dyn MappingSink,
    ) -> Result<()> {
        let Some((left, new_name)) = line.rsplit_once(" -> ") else {
            return Err(malformed_error!(
                "member line {} has no '->'",
                line_number
            ));
        };
        let new_name = new_name.trim().to_string();

        if let Some(open) = left.find('(') {
            let Some(close) = left.rfind(')') else {
                return Err(malformed_error!(
                    "method line {} has unbalanced parentheses",
                    line_number
                ));
            };
            let args: Vec<String> = if open + 1 == close {
                Vec::new()
            } else {
                left[open + 1..close]
                    .split(',')
                    .map(|arg| arg.trim().to_string())
                    .collect()
            };
            let head = &left[..open];
            let (lines, signature) = Self::split_line_prefix(head);
            let Some((return_type, old_name)) = signature.rsplit_once(' ') else {
                return Err(malformed_error!(
                    "method line {} lacks a return type",
                    line_number
                ));
            };
            sink.on_method_mapping(&MethodMapping {
                owner: class.old_name.clone(),
                first_line: lines.0,
                last_line: lines.1,
                return_type: return_type.trim().to_string(),
                old_name: old_name.trim().to_string(),
                args,
                new_owner: class.new_name.clone(),
                new_first_line: lines.0,
                new_last_line: lines.1,
                new_name,
            });
        } else {
            let Some((field_type, old_name)) = left.rsplit_once(' ') else {
                return Err(malformed_error!(
                    "field line {} lacks a type",
                    line_number
                ));
            };
            sink.on_field_mapping(&FieldMapping {
                owner: class.old_name.clone(),
                field_type: field_type.trim().to_string(),
                old_name: old_name.trim().to_string(),
                new_owner: class.new_name.clone(),
                new_name,
            });
        }
        Ok(())
    }

    /// Splits an optional `first:last:` prefix off a method signature head.
    fn split_line_prefix(head: &str) -> ((u32, u32), &str) {
        let mut parts = head.splitn(3, ':');
        if let (Some(first), Some(last), Some(rest)) = (parts.next(), parts.next(), parts.next())
        {
            if let (Ok(first), Ok(last)) = (first.parse(), last.parse()) {
                return ((first, last), rest);
            }
        }
        ((0, 0), head)
    }
}

/// Sink forcing parsed mappings onto a class pool.
struct MappingApplier<'a> {
    pool: &'a mut ClassPool,
    stats: ApplyStats,
    error: Option<Error>,
}

impl MappingApplier<'_> {
    fn apply_member(
        &mut self,
        owner: &str,
        kind: MemberKind,
        old_name: &str,
        descriptor: &str,
        new_name: &str,
    ) {
        if self.error.is_some() {
            return;
        }
        let Some(class_id) = self.pool.class_by_name(&internal_class_name(owner)) else {
            return;
        };
        let Some(member_id) = self
            .pool
            .class(class_id)
            .find_member(kind, old_name, descriptor)
        else {
            self.stats.members_missing += 1;
            return;
        };
        match self
            .pool
            .class_mut(class_id)
            .member_mut(member_id)
            .pin_to(new_name)
        {
            Ok(()) => self.stats.members_applied += 1,
            Err(error) => self.error = Some(error),
        }
    }
}

impl MappingSink for MappingApplier<'_> {
    fn on_class_mapping(&mut self, mapping: &ClassMapping) -> bool {
        if self.error.is_some() {
            return false;
        }
        let internal_old = internal_class_name(&mapping.old_name);
        let Some(class_id) = self.pool.class_by_name(&internal_old) else {
            self.error = Some(Error::ClassNotFound(mapping.old_name.clone()));
            return false;
        };
        let internal_new = internal_class_name(&mapping.new_name);
        match self.pool.class_mut(class_id).pin_to(&internal_new) {
            Ok(()) => {
                self.stats.classes_applied += 1;
                true
            }
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }

    fn on_field_mapping(&mut self, mapping: &FieldMapping) {
        let descriptor = internal_type(&mapping.field_type);
        self.apply_member(
            &mapping.owner,
            MemberKind::Field,
            &mapping.old_name,
            &descriptor,
            &mapping.new_name,
        );
    }

    fn on_method_mapping(&mut self, mapping: &MethodMapping) {
        let descriptor = method_descriptor(&mapping.args, &mapping.return_type);
        self.apply_member(
            &mapping.owner,
            MemberKind::Method,
            &mapping.old_name,
            &descriptor,
            &mapping.new_name,
        );
    }
}
