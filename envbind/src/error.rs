//! Error types for binding environment variables into records

/// Error type returned by coercion functions.
///
/// Built-in coercions and caller-registered parsers both report failures
/// through this type; the binder wraps it into [`BindError::Coercion`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding a record from environment variables.
///
/// The first error aborts the whole bind call. Fields visited before the
/// failing one keep the values already written into them.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The raw value of a satisfied variable could not be converted to the
    /// field's declared type.
    ///
    /// Covers numeric overflow, malformed numbers, unknown boolean literals
    /// and malformed structured (JSON) documents, as well as any failure
    /// reported by a caller-registered parser.
    #[error("Failed to bind field '{field}' from environment variable '{var}' as {type_name} (value {value:?}): {source}")]
    Coercion {
        /// Dotted path of the field from the root record (e.g. `database.port`)
        field: String,
        /// Name of the environment variable that supplied the value
        var: String,
        /// Raw value that failed to parse
        value: String,
        /// Fully qualified name of the declared type
        type_name: &'static str,
        /// Error reported by the coercion function
        source: BoxError,
    },

    /// A registered parser returned a value whose type is not the field's
    /// declared type.
    #[error("Parser for field '{field}' (environment variable '{var}') did not produce a value of type {type_name}")]
    TypeMismatch {
        /// Dotted path of the field from the root record
        field: String,
        /// Name of the environment variable that supplied the value
        var: String,
        /// Fully qualified name of the declared type
        type_name: &'static str,
    },
}

/// Errors produced by the built-in scalar coercions that have no standard
/// library error type of their own (booleans, range-checked floats, complex
/// numbers).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The input is not a valid literal for the target type.
    #[error("invalid {expected} literal {value:?}")]
    Syntax {
        /// Offending input
        value: String,
        /// Human readable name of the expected literal
        expected: &'static str,
    },

    /// The input is well formed but does not fit the declared precision.
    #[error("value {value:?} is out of range for {expected}")]
    OutOfRange {
        /// Offending input
        value: String,
        /// Human readable name of the target type
        expected: &'static str,
    },
}

impl ValueError {
    pub(crate) fn syntax(value: &str, expected: &'static str) -> Self {
        Self::Syntax {
            value: value.to_string(),
            expected,
        }
    }

    pub(crate) fn out_of_range(value: &str, expected: &'static str) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            expected,
        }
    }
}
