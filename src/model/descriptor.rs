//! Descriptor parsing for mapping emission.
//!
//! Mapping files describe types in external Java form (`int`,
//! `java.lang.String`, `byte[]`), while the class-file model carries JVM
//! descriptors (`I`, `Ljava/lang/String;`, `[B`). These helpers convert a
//! descriptor to its external form and back.

use crate::model::names::{external_class_name, internal_class_name};

/// Converts one field descriptor to its external Java type.
///
/// Malformed descriptors are returned unchanged rather than rejected; the
/// mapping file then shows the raw descriptor, which is still diagnosable.
#[must_use]
pub fn external_type(descriptor: &str) -> String {
    let mut dimensions = 0;
    let mut rest = descriptor;
    while let Some(stripped) = rest.strip_prefix('[') {
        dimensions += 1;
        rest = stripped;
    }
    let base = match rest {
        "B" => "byte".to_string(),
        "C" => "char".to_string(),
        "D" => "double".to_string(),
        "F" => "float".to_string(),
        "I" => "int".to_string(),
        "J" => "long".to_string(),
        "S" => "short".to_string(),
        "Z" => "boolean".to_string(),
        "V" => "void".to_string(),
        _ => match rest.strip_prefix('L').and_then(|r| r.strip_suffix(';')) {
            Some(class_name) => external_class_name(class_name),
            None => return descriptor.to_string(),
        },
    };
    let mut result = base;
    for _ in 0..dimensions {
        result.push_str("[]");
    }
    result
}

/// Converts an external Java type back to a field descriptor.
#[must_use]
pub fn internal_type(external: &str) -> String {
    let mut dimensions = 0;
    let mut rest = external;
    while let Some(stripped) = rest.strip_suffix("[]") {
        dimensions += 1;
        rest = stripped;
    }
    let base = match rest {
        "byte" => "B".to_string(),
        "char" => "C".to_string(),
        "double" => "D".to_string(),
        "float" => "F".to_string(),
        "int" => "I".to_string(),
        "long" => "J".to_string(),
        "short" => "S".to_string(),
        "boolean" => "Z".to_string(),
        "void" => "V".to_string(),
        _ => format!("L{};", internal_class_name(rest)),
    };
    format!("{}{}", "[".repeat(dimensions), base)
}

/// Splits a method descriptor into its argument types and return type, all in
/// external form.
///
/// Returns `None` for descriptors that do not parse as method descriptors.
#[must_use]
pub fn method_signature(descriptor: &str) -> Option<(Vec<String>, String)> {
    let rest = descriptor.strip_prefix('(')?;
    let close = rest.find(')')?;
    let (args_part, return_part) = (&rest[..close], &rest[close + 1..]);

    let mut args = Vec::new();
    let mut remaining = args_part;
    while !remaining.is_empty() {
        let len = single_descriptor_len(remaining)?;
        args.push(external_type(&remaining[..len]));
        remaining = &remaining[len..];
    }
    Some((args, external_type(return_part)))
}

/// Builds a method descriptor from external argument and return types.
#[must_use]
pub fn method_descriptor(args: &[String], return_type: &str) -> String {
    let mut result = String::from("(");
    for arg in args {
        result.push_str(&internal_type(arg));
    }
    result.push(')');
    result.push_str(&internal_type(return_type));
    result
}

/// Length in bytes of the first field descriptor in `input`.
fn single_descriptor_len(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut index = 0;
    while index < bytes.len() && bytes[index] == b'[' {
        index += 1;
    }
    match bytes.get(index)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Some(index + 1),
        b'L' => {
            let end = input[index..].find(';')?;
            Some(index + end + 1)
        }
        _ => None,
    }
}
