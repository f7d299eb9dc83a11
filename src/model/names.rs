//! Class name manipulation helpers.
//!
//! Class files carry names in internal form (`com/example/Outer$Inner`), while
//! resources and reflection metadata refer to classes in external form
//! (`com.example.Outer$Inner`). Nested classes keep their `$` separator in both
//! forms. These helpers convert between the two forms and split internal names
//! into their package and simple-name parts.

/// Package separator in internal class names.
pub const INTERNAL_PACKAGE_SEPARATOR: char = '/';

/// Package separator in external class names.
pub const EXTERNAL_PACKAGE_SEPARATOR: char = '.';

/// Separator between an outer and an inner class in a simple name.
pub const INNER_CLASS_SEPARATOR: char = '$';

/// Converts an internal class name (`com/example/Foo$Bar`) to its external
/// form (`com.example.Foo$Bar`). The `$` of nested classes is preserved.
#[must_use]
pub fn external_class_name(internal: &str) -> String {
    internal.replace(INTERNAL_PACKAGE_SEPARATOR, ".")
}

/// Converts an external class name (`com.example.Foo$Bar`) to its internal
/// form (`com/example/Foo$Bar`).
#[must_use]
pub fn internal_class_name(external: &str) -> String {
    external.replace(EXTERNAL_PACKAGE_SEPARATOR, "/")
}

/// Returns the package prefix of an internal class name, or `""` for classes
/// in the default package.
#[must_use]
pub fn package_of(internal: &str) -> &str {
    match internal.rfind(INTERNAL_PACKAGE_SEPARATOR) {
        Some(index) => &internal[..index],
        None => "",
    }
}

/// Returns the simple name of an internal class name (the part after the last
/// package separator).
#[must_use]
pub fn simple_name_of(internal: &str) -> &str {
    match internal.rfind(INTERNAL_PACKAGE_SEPARATOR) {
        Some(index) => &internal[index + 1..],
        None => internal,
    }
}

/// Joins a package prefix and a simple name into an internal class name.
/// An empty package yields the simple name unchanged.
#[must_use]
pub fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{package}/{simple_name}")
    }
}

/// Whether the simple name denotes an anonymous or local inner class.
///
/// Anonymous and local classes are compiled with a purely numeric suffix after
/// the last `$` (`Outer$1`, `Outer$2$3`). Their naming convention must stay
/// consistent with the renaming of the enclosing class.
#[must_use]
pub fn has_numeric_simple_name(internal: &str) -> bool {
    let simple = simple_name_of(internal);
    match simple.rfind(INNER_CLASS_SEPARATOR) {
        Some(index) => {
            let tail = &simple[index + 1..];
            !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Whether a token is a valid Java identifier (usable as a class or member
/// simple name).
#[must_use]
pub fn is_valid_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_class_name() {
        assert_eq!(external_class_name("com/example/Foo"), "com.example.Foo");
        assert_eq!(
            external_class_name("com/example/Outer$Inner"),
            "com.example.Outer$Inner"
        );
        assert_eq!(external_class_name("Foo"), "Foo");
    }

    #[test]
    fn test_internal_class_name() {
        assert_eq!(internal_class_name("com.example.Foo"), "com/example/Foo");
        assert_eq!(
            internal_class_name("com.example.Outer$Inner"),
            "com/example/Outer$Inner"
        );
    }

    #[test]
    fn test_package_of() {
        assert_eq!(package_of("com/example/Foo"), "com/example");
        assert_eq!(package_of("Foo"), "");
    }

    #[test]
    fn test_simple_name_of() {
        assert_eq!(simple_name_of("com/example/Foo"), "Foo");
        assert_eq!(simple_name_of("Foo"), "Foo");
        assert_eq!(simple_name_of("com/example/Outer$Inner"), "Outer$Inner");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("com/example", "a"), "com/example/a");
        assert_eq!(qualify("", "a"), "a");
    }

    #[test]
    fn test_has_numeric_simple_name() {
        assert!(has_numeric_simple_name("com/example/Outer$1"));
        assert!(has_numeric_simple_name("Outer$2$3"));
        assert!(!has_numeric_simple_name("com/example/Outer$Inner"));
        assert!(!has_numeric_simple_name("com/example/Outer"));
        assert!(!has_numeric_simple_name("Outer$"));
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("name1"));
        assert!(is_valid_identifier("_x"));
        assert!(is_valid_identifier("$gen"));
        assert!(!is_valid_identifier("1name"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("with space"));
        assert!(!is_valid_identifier("with-dash"));
    }
}
