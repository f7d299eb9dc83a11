//! Mapping file writer.

use std::io::Write;

use crate::mapping::{ClassMapping, FieldMapping, MappingSink, MethodMapping};
use crate::Result;

/// Writes mapping events in the line-oriented mapping file format:
///
/// ```text
/// com.example.A -> a:
///     int count -> a
///     12:25:void foo(int) -> b
/// ```
///
/// One class header per class, indented member lines below it. Methods with
/// known debug line ranges carry a `first:last:` prefix. The sink callbacks
/// cannot fail, so I/O errors are latched and surfaced by
/// [`finish`](MappingPrinter::finish).
pub struct MappingPrinter<W: Write> {
    writer: W,
    error: Option<std::io::Error>,
}

impl<W: Write> MappingPrinter<W> {
    /// Creates a printer writing to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        MappingPrinter {
            writer,
            error: None,
        }
    }

    /// Finishes printing and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error that occurred during printing, if any.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.writer),
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = writeln!(self.writer, "{line}") {
            self.error = Some(error);
        }
    }
}

impl<W: Write> MappingSink for MappingPrinter<W> {
    fn on_class_mapping(&mut self, mapping: &ClassMapping) -> bool {
        self.write_line(&format!("{} -> {}:", mapping.old_name, mapping.new_name));
        true
    }

    fn on_field_mapping(&mut self, mapping: &FieldMapping) {
        self.write_line(&format!(
            "    {} {} -> {}",
            mapping.field_type, mapping.old_name, mapping.new_name
        ));
    }

    fn on_method_mapping(&mut self, mapping: &MethodMapping) {
        let prefix = if mapping.first_line == 0 && mapping.last_line == 0 {
            String::new()
        } else {
            format!("{}:{}:", mapping.first_line, mapping.last_line)
        };
        self.write_line(&format!(
            "    {}{} {}({}) -> {}",
            prefix,
            mapping.return_type,
            mapping.old_name,
            mapping.args.join(","),
            mapping.new_name
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_expected_lines() {
        let mut printer = MappingPrinter::new(Vec::new());
        assert!(printer.on_class_mapping(&ClassMapping {
            old_name: "com.example.A".to_string(),
            new_name: "a".to_string(),
        }));
        printer.on_field_mapping(&FieldMapping {
            owner: "com.example.A".to_string(),
            field_type: "int".to_string(),
            old_name: "count".to_string(),
            new_owner: "a".to_string(),
            new_name: "a".to_string(),
        });
        printer.on_method_mapping(&MethodMapping {
            owner: "com.example.A".to_string(),
            first_line: 12,
            last_line: 25,
            return_type: "void".to_string(),
            old_name: "foo".to_string(),
            args: vec!["int".to_string(), "java.lang.String".to_string()],
            new_owner: "a".to_string(),
            new_first_line: 12,
            new_last_line: 25,
            new_name: "b".to_string(),
        });

        let output = String::from_utf8(printer.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "com.example.A -> a:\n    int count -> a\n    12:25:void foo(int,java.lang.String) -> b\n"
        );
    }

    #[test]
    fn test_method_without_lines_omits_prefix() {
        let mut printer = MappingPrinter::new(Vec::new());
        printer.on_method_mapping(&MethodMapping {
            owner: "A".to_string(),
            first_line: 0,
            last_line: 0,
            return_type: "void".to_string(),
            old_name: "foo".to_string(),
            args: Vec::new(),
            new_owner: "a".to_string(),
            new_first_line: 0,
            new_last_line: 0,
            new_name: "b".to_string(),
        });
        let output = String::from_utf8(printer.finish().unwrap()).unwrap();
        assert_eq!(output, "    void foo() -> b\n");
    }
}
