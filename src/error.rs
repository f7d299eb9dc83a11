use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all error conditions that can occur while renaming classes and members,
/// compacting attributes, fixing up references, and reading or writing mapping files. Each
/// variant provides specific context about the failure mode to enable appropriate handling.
///
/// # Error Categories
///
/// ## Configuration Errors
/// - [`Error::Configuration`] - The obfuscation run was requested with an unusable configuration
///
/// ## Renaming Invariant Errors
/// - [`Error::DoubleAssignment`] - An entity's name was decided twice
/// - [`Error::NamespaceExhausted`] - The name factory could not produce a collision-free name
///
/// ## Mapping I/O Errors
/// - [`Error::Malformed`] - A mapping or dictionary file did not match the expected format
/// - [`Error::ClassNotFound`] - An applied mapping referenced a class absent from the pool
/// - [`Error::FileError`] - Filesystem I/O errors
#[derive(Error, Debug)]
pub enum Error {
    /// The obfuscation run was requested with an unusable configuration.
    ///
    /// Renaming without keep rules, an applied mapping, or a mapping printer would
    /// produce an output nobody can relate back to the input. This is a precondition
    /// failure: the run aborts before any name is assigned.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An entity's name was decided twice.
    ///
    /// Assigned names follow decide-once semantics: once a class or member has an
    /// assigned name, no later pass may overwrite it. A second assignment indicates a
    /// programming error in the pass pipeline and is never recovered from.
    #[error("Name of '{entity}' was already assigned to '{current}', refusing to assign '{attempted}'")]
    DoubleAssignment {
        /// Original name of the entity whose name was assigned twice
        entity: String,
        /// The name the entity already holds
        current: String,
        /// The name the second assignment attempted to install
        attempted: String,
    },

    /// The name factory could not produce an unused candidate within the attempt bound.
    ///
    /// Indicates a corrupted namespace or a factory that stopped producing fresh
    /// values. Renaming must not silently pick a colliding name, so this aborts
    /// the run.
    #[error("Exhausted {attempts} name candidates for namespace '{namespace}'")]
    NamespaceExhausted {
        /// Description of the collision domain that could not be satisfied
        namespace: String,
        /// Number of candidates that were drawn and rejected
        attempts: usize,
    },

    /// An input file is damaged or does not match the expected line format.
    ///
    /// Produced by the mapping reader and the dictionary reader. The error includes
    /// the source location where the malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An applied mapping referenced a class that is not present in the class pool.
    #[error("Class '{0}' from applied mapping was not found in the class pool")]
    ClassNotFound(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading dictionary files or
    /// writing mapping files.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories.
    #[error("{0}")]
    Error(String),
}

/// `Result<T, Error>`
///
/// Standard result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_assignment_display() {
        let err = Error::DoubleAssignment {
            entity: "com/example/Foo".to_string(),
            current: "a".to_string(),
            attempted: "b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("com/example/Foo"));
        assert!(msg.contains("'a'"));
        assert!(msg.contains("'b'"));
    }

    #[test]
    fn test_malformed_macro() {
        let err = malformed_error!("unexpected token at column {}", 7);
        match err {
            Error::Malformed { message, .. } => {
                assert_eq!(message, "unexpected token at column 7");
            }
            _ => panic!("expected Malformed"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::FileError(_)));
    }
}
