//! Type-erased parameter values and the decoded query record.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;
use time::{Date, OffsetDateTime};

use crate::codec::{
    encode_date, encode_date_time, encode_numeric_object, encode_object, number_to_string,
    FlatObject, NumericObject, DEFAULT_ENTRY_SEPARATOR, DEFAULT_KEY_VALUE_SEPARATOR,
};
use crate::config::ParamKey;
use crate::{Decoded, Encoded, Error};

/// Access to the concrete type behind a `dyn ParamValue`.
///
/// Implemented for every `'static` type; never implemented by hand.
pub trait AsAny {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value that can live in a [`DecodedQuery`].
///
/// Every codec value type implements this trait. `to_query_string` is the
/// fallback used when a value is encoded for a parameter that has no codec
/// configured.
///
/// Custom codec value types implement it with a single method:
///
/// ```
/// use query_param_codec::ParamValue;
///
/// #[derive(Debug, Clone)]
/// struct Viewport {
///     zoom: u8,
/// }
///
/// impl ParamValue for Viewport {
///     fn to_query_string(&self) -> String {
///         self.zoom.to_string()
///     }
/// }
/// ```
pub trait ParamValue: AsAny + fmt::Debug + Send + Sync + 'static {
    /// Returns the plain string form of the value.
    fn to_query_string(&self) -> String;
}

impl ParamValue for String {
    fn to_query_string(&self) -> String {
        self.clone()
    }
}

impl ParamValue for &'static str {
    fn to_query_string(&self) -> String {
        (*self).to_string()
    }
}

impl ParamValue for bool {
    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for f64 {
    fn to_query_string(&self) -> String {
        number_to_string(*self)
    }
}

macro_rules! impl_param_value_for_integers {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn to_query_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_param_value_for_integers!(i32, i64, u32, u64, usize);

impl ParamValue for Date {
    fn to_query_string(&self) -> String {
        encode_date(Decoded::Value(self)).first().unwrap_or_default().to_string()
    }
}

impl ParamValue for OffsetDateTime {
    fn to_query_string(&self) -> String {
        encode_date_time(Decoded::Value(self))
            .first()
            .unwrap_or_default()
            .to_string()
    }
}

impl ParamValue for serde_json::Value {
    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for Vec<Option<String>> {
    fn to_query_string(&self) -> String {
        self.iter()
            .map(|entry| entry.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl ParamValue for Vec<String> {
    fn to_query_string(&self) -> String {
        self.join(",")
    }
}

impl ParamValue for Vec<Option<f64>> {
    fn to_query_string(&self) -> String {
        self.iter()
            .map(|entry| entry.map(number_to_string).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl ParamValue for FlatObject {
    fn to_query_string(&self) -> String {
        encode_object(
            Decoded::Value(self),
            DEFAULT_KEY_VALUE_SEPARATOR,
            DEFAULT_ENTRY_SEPARATOR,
        )
        .first()
        .unwrap_or_default()
        .to_string()
    }
}

impl ParamValue for NumericObject {
    fn to_query_string(&self) -> String {
        encode_numeric_object(
            Decoded::Value(self),
            DEFAULT_KEY_VALUE_SEPARATOR,
            DEFAULT_ENTRY_SEPARATOR,
        )
        .first()
        .unwrap_or_default()
        .to_string()
    }
}

/// Unconfigured parameters pass through decoding as their raw `Encoded`
/// value.
impl ParamValue for Encoded {
    fn to_query_string(&self) -> String {
        match self {
            Encoded::Absent | Encoded::Null => String::new(),
            Encoded::Single(s) => s.clone(),
            Encoded::Multiple(values) => values.to_query_string(),
        }
    }
}

/// A boxed, type-erased decoded value.
pub type AnyValue = Box<dyn ParamValue>;

/// A record of decoded parameter values, keyed by parameter name.
///
/// Values of different types share one record; typed access goes through a
/// [`ParamKey`] returned when the codec was registered.
///
/// # Examples
///
/// ```
/// use query_param_codec::{Decoded, DecodedQuery, ParamKey};
///
/// const PAGE: ParamKey<f64> = ParamKey::new("page");
///
/// let mut query = DecodedQuery::new();
/// query.set(&PAGE, Decoded::Value(3.0));
/// query.insert("q", "shoes".to_string());
///
/// assert_eq!(query.get(&PAGE).unwrap(), Decoded::Value(&3.0));
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DecodedQuery {
    values: IndexMap<String, Decoded<AnyValue>>,
}

impl DecodedQuery {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a present value under `name`.
    pub fn insert<V: ParamValue>(&mut self, name: impl Into<String>, value: V) -> &mut Self {
        self.insert_decoded(name, Decoded::Value(value))
    }

    /// Inserts a value in any decoded state under `name`.
    pub fn insert_decoded<V: ParamValue>(
        &mut self,
        name: impl Into<String>,
        value: Decoded<V>,
    ) -> &mut Self {
        self.insert_raw(name, value.map(|v| Box::new(v) as AnyValue))
    }

    /// Inserts an already type-erased value under `name`.
    pub fn insert_raw(&mut self, name: impl Into<String>, value: Decoded<AnyValue>) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Sets the value of a typed parameter.
    pub fn set<T: ParamValue>(&mut self, key: &ParamKey<T>, value: Decoded<T>) -> &mut Self {
        self.insert_decoded(key.name(), value)
    }

    /// Reads a typed parameter.
    ///
    /// A parameter missing from the record reads as `Absent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the stored value is not a `T`.
    pub fn get<T: ParamValue>(&self, key: &ParamKey<T>) -> Result<Decoded<&T>, Error> {
        self.get_as(key.name())
    }

    /// Reads a parameter by name as type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the stored value is not a `T`.
    pub fn get_as<T: ParamValue>(&self, name: &str) -> Result<Decoded<&T>, Error> {
        let Some(value) = self.values.get(name) else {
            return Ok(Decoded::Absent);
        };
        match erase(value) {
            Decoded::Absent => Ok(Decoded::Absent),
            Decoded::Null => Ok(Decoded::Null),
            Decoded::Invalid => Ok(Decoded::Invalid),
            Decoded::Value(v) => v
                .as_any()
                .downcast_ref::<T>()
                .map(Decoded::Value)
                .ok_or_else(|| Error::type_mismatch(name, std::any::type_name::<T>())),
        }
    }

    /// Returns the type-erased value stored under `name`.
    pub fn get_raw(&self, name: &str) -> Option<Decoded<&dyn ParamValue>> {
        self.values.get(name).map(erase)
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Decoded<AnyValue>> {
        self.values.shift_remove(name)
    }

    /// Returns `true` if the record has an entry for `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decoded<&dyn ParamValue>)> {
        self.values.iter().map(|(name, value)| (name.as_str(), erase(value)))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Borrows the value behind the box, not the box itself.
pub(crate) fn erase(value: &Decoded<AnyValue>) -> Decoded<&dyn ParamValue> {
    match value {
        Decoded::Absent => Decoded::Absent,
        Decoded::Null => Decoded::Null,
        Decoded::Invalid => Decoded::Invalid,
        Decoded::Value(boxed) => Decoded::Value(&**boxed),
    }
}
