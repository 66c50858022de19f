/// A decoded (typed, in-memory) query parameter value.
///
/// Query parameters have more "no value" states than `Option` can express,
/// and callers rely on telling them apart:
///
/// - [`Absent`](Decoded::Absent): the parameter was not provided at all.
///   Encoding it removes the key from the query string.
/// - [`Null`](Decoded::Null): the parameter was provided but is explicitly
///   empty, or its text could not be parsed (a malformed date, malformed
///   JSON, an empty numeric string). Encoding it emits the bare key.
/// - [`Invalid`](Decoded::Invalid): the parameter was provided but is not a
///   permitted value (an enum member outside the allowed set). Encodes like
///   `Absent`.
/// - [`Value`](Decoded::Value): a decoded value. Numeric decoders keep
///   malformed text as `Value(f64::NAN)` rather than `Null`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_number, Decoded, Encoded};
///
/// assert_eq!(decode_number(&Encoded::Absent), Decoded::Absent);
/// assert_eq!(decode_number(&Encoded::from("")), Decoded::Null);
/// assert_eq!(decode_number(&Encoded::from("42")), Decoded::Value(42.0));
/// assert!(decode_number(&Encoded::from("abc")).value().is_some_and(|n| n.is_nan()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoded<T> {
    /// Not provided
    Absent,
    /// Provided but empty or unparseable
    Null,
    /// Provided but not a permitted value
    Invalid,
    /// A decoded value
    Value(T),
}

impl<T> Decoded<T> {
    /// Converts an `Option`; `None` maps to [`Decoded::Absent`], so setting a
    /// parameter to `None` removes it from the query string.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Decoded::Value(v),
            None => Decoded::Absent,
        }
    }

    /// Returns `true` if the value was not provided.
    pub fn is_absent(&self) -> bool {
        matches!(self, Decoded::Absent)
    }

    /// Returns `true` if the value was provided but empty or unparseable.
    pub fn is_null(&self) -> bool {
        matches!(self, Decoded::Null)
    }

    /// Returns `true` if the value was provided but not permitted.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Decoded::Invalid)
    }

    /// Returns `true` if a value is present.
    pub fn is_value(&self) -> bool {
        matches!(self, Decoded::Value(_))
    }

    /// Returns a reference to the value, if present.
    pub fn value(&self) -> Option<&T> {
        match self {
            Decoded::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts from `&Decoded<T>` to `Decoded<&T>`.
    pub fn as_ref(&self) -> Decoded<&T> {
        match self {
            Decoded::Absent => Decoded::Absent,
            Decoded::Null => Decoded::Null,
            Decoded::Invalid => Decoded::Invalid,
            Decoded::Value(v) => Decoded::Value(v),
        }
    }

    /// Maps the contained value, preserving the other states.
    pub fn map<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Decoded::Absent => Decoded::Absent,
            Decoded::Null => Decoded::Null,
            Decoded::Invalid => Decoded::Invalid,
            Decoded::Value(v) => Decoded::Value(f(v)),
        }
    }

    /// Chains a decoding step that may itself produce a non-value state.
    pub fn and_then<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> Decoded<U>,
    {
        match self {
            Decoded::Absent => Decoded::Absent,
            Decoded::Null => Decoded::Null,
            Decoded::Invalid => Decoded::Invalid,
            Decoded::Value(v) => f(v),
        }
    }

    /// Collapses every non-value state into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Decoded::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained value or the provided default.
    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }
}

impl<T> From<T> for Decoded<T> {
    fn from(value: T) -> Self {
        Decoded::Value(value)
    }
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Decoded::Absent
    }
}
