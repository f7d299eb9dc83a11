//! Mapping I/O: recording and replaying the old-name to new-name table.
//!
//! After renaming, the engine walks the class pool and emits one event per
//! class, field, and method mapping. Events fan out to any number of
//! independent sinks: a printer writing the line-oriented mapping file, a
//! collector feeding a build system, or both at once.
//!
//! # Key Components
//!
//! - [`MappingSink`] - Consumer of mapping events
//! - [`MultiMappingSink`] - Fans every event out to a list of sinks
//! - [`MappingEmitter`] - Produces events from a renamed pool
//! - [`MappingPrinter`](crate::mapping::MappingPrinter) - Writes the mapping file
//! - [`MappingReader`](crate::mapping::MappingReader) - Parses and re-applies a mapping file

mod emitter;
mod printer;
mod reader;

pub use emitter::MappingEmitter;
pub use printer::MappingPrinter;
pub use reader::MappingReader;

/// A class rename: external old and new names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    /// External original name
    pub old_name: String,
    /// External new name
    pub new_name: String,
}

/// A field rename within a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// External name of the declaring class before renaming
    pub owner: String,
    /// External field type
    pub field_type: String,
    /// Original field name
    pub old_name: String,
    /// External name of the declaring class after renaming
    pub new_owner: String,
    /// New field name
    pub new_name: String,
}

/// A method rename within a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMapping {
    /// External name of the declaring class before renaming
    pub owner: String,
    /// First line of the method body in the debug tables, 0 if unknown
    pub first_line: u32,
    /// Last line of the method body in the debug tables, 0 if unknown
    pub last_line: u32,
    /// External return type
    pub return_type: String,
    /// Original method name
    pub old_name: String,
    /// External argument types
    pub args: Vec<String>,
    /// External name of the declaring class after renaming
    pub new_owner: String,
    /// First line after renaming; the engine does not renumber
    pub new_first_line: u32,
    /// Last line after renaming
    pub new_last_line: u32,
    /// New method name
    pub new_name: String,
}

/// Consumer of mapping events.
///
/// All callbacks are fire-and-forget except
/// [`on_class_mapping`](MappingSink::on_class_mapping), whose return value
/// tells the emitter whether the class exists for this sink and its member
/// events should follow.
pub trait MappingSink {
    /// Called once per class. Returns whether this sink knows the class and
    /// wants its member events.
    fn on_class_mapping(&mut self, mapping: &ClassMapping) -> bool;

    /// Called once per renamed field of an accepted class.
    fn on_field_mapping(&mut self, mapping: &FieldMapping);

    /// Called once per renamed method of an accepted class.
    fn on_method_mapping(&mut self, mapping: &MethodMapping);
}

/// Fans every mapping event out to a list of sinks.
///
/// Every sink receives every event; no sink's return value short-circuits
/// another's delivery. The class-mapping result is the logical OR over all
/// sinks, and an empty sink list accepts nothing.
#[derive(Default)]
pub struct MultiMappingSink {
    sinks: Vec<Box<dyn MappingSink>>,
}

impl MultiMappingSink {
    /// Creates a fan-out over the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn MappingSink>>) -> Self {
        MultiMappingSink { sinks }
    }

    /// Creates a fan-out with no sinks, which ignores all events.
    #[must_use]
    pub fn empty() -> Self {
        MultiMappingSink::default()
    }

    /// Adds a sink to the fan-out.
    pub fn add(&mut self, sink: Box<dyn MappingSink>) {
        self.sinks.push(sink);
    }
}

impl MappingSink for MultiMappingSink {
    fn on_class_mapping(&mut self, mapping: &ClassMapping) -> bool {
        let mut any = false;
        for sink in &mut self.sinks {
            // No short-circuit: every sink sees every class.
            any |= sink.on_class_mapping(mapping);
        }
        any
    }

    fn on_field_mapping(&mut self, mapping: &FieldMapping) {
        for sink in &mut self.sinks {
            sink.on_field_mapping(mapping);
        }
    }

    fn on_method_mapping(&mut self, mapping: &MethodMapping) {
        for sink in &mut self.sinks {
            sink.on_method_mapping(mapping);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FixedSink {
        accept: Vec<bool>,
        calls: Rc<RefCell<usize>>,
        position: usize,
    }

    impl MappingSink for FixedSink {
        fn on_class_mapping(&mut self, _mapping: &ClassMapping) -> bool {
            *self.calls.borrow_mut() += 1;
            let result = self.accept[self.position % self.accept.len()];
            self.position += 1;
            result
        }

        fn on_field_mapping(&mut self, _mapping: &FieldMapping) {}

        fn on_method_mapping(&mut self, _mapping: &MethodMapping) {}
    }

    fn class_mapping() -> ClassMapping {
        ClassMapping {
            old_name: "com.example.A".to_string(),
            new_name: "a".to_string(),
        }
    }

    #[test]
    fn test_or_of_results_and_no_short_circuit() {
        let calls = Rc::new(RefCell::new(0));
        // First sink answers true then false; second answers false then true.
        let mut multi = MultiMappingSink::new(vec![
            Box::new(FixedSink {
                accept: vec![true, false],
                calls: calls.clone(),
                position: 0,
            }),
            Box::new(FixedSink {
                accept: vec![false, true],
                calls: calls.clone(),
                position: 0,
            }),
        ]);

        assert!(multi.on_class_mapping(&class_mapping()));
        assert!(multi.on_class_mapping(&class_mapping()));
        // Both sinks saw both events despite the early `true`.
        assert_eq!(*calls.borrow(), 4);
    }

    #[test]
    fn test_all_false_yields_false() {
        let calls = Rc::new(RefCell::new(0));
        let mut multi = MultiMappingSink::new(vec![Box::new(FixedSink {
            accept: vec![false],
            calls,
            position: 0,
        })]);
        assert!(!multi.on_class_mapping(&class_mapping()));
    }

    #[test]
    fn test_empty_sink_list_rejects() {
        let mut multi = MultiMappingSink::empty();
        assert!(!multi.on_class_mapping(&class_mapping()));
    }
}
