use std::fmt;

/// Errors returned by the construction and typed-access seams of the crate.
///
/// Encoding and decoding never fail; these errors only arise when a codec
/// is configured incorrectly or a decoded value is read back with the wrong
/// type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A delimited codec was constructed with an empty separator.
    EmptySeparator,
    /// A decoded value was read back with a type that does not match the
    /// type its codec produces.
    TypeMismatch {
        /// The parameter name
        param: String,
        /// The Rust type that was requested
        expected: &'static str,
    },
    /// A parameter name was registered twice in the same config map.
    DuplicateParam(String),
}

impl Error {
    /// Creates a type mismatch error for the given parameter.
    pub fn type_mismatch(param: impl Into<String>, expected: &'static str) -> Self {
        Error::TypeMismatch {
            param: param.into(),
            expected,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySeparator => write!(f, "separator must not be empty"),
            Error::TypeMismatch { param, expected } => {
                write!(f, "parameter '{}' does not hold a value of type {}", param, expected)
            }
            Error::DuplicateParam(name) => write!(f, "parameter '{}' is already configured", name),
        }
    }
}

impl std::error::Error for Error {}
