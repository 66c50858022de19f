//! The parameter configuration map: which codec handles which name.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::codec::Codec;
use crate::value::{AnyValue, ParamValue};
use crate::{Decoded, Encoded, Error};

/// A codec whose value type has been erased, so codecs for different types
/// can share one [`ParamConfigMap`].
///
/// Implemented for every [`Codec`] whose value type is a [`ParamValue`].
pub trait ErasedCodec: Send + Sync {
    /// Encodes a type-erased value.
    ///
    /// Returns `None` if the value is not of this codec's type.
    fn encode_erased(&self, value: Decoded<&dyn ParamValue>) -> Option<Encoded>;

    /// Decodes into a type-erased value.
    fn decode_erased(&self, input: &Encoded) -> Decoded<AnyValue>;

    /// Returns the Rust type name of the codec's value type.
    fn value_type(&self) -> &'static str;
}

impl<C> ErasedCodec for C
where
    C: Codec + 'static,
    C::Value: ParamValue,
{
    fn encode_erased(&self, value: Decoded<&dyn ParamValue>) -> Option<Encoded> {
        let typed = match value {
            Decoded::Absent => Decoded::Absent,
            Decoded::Null => Decoded::Null,
            Decoded::Invalid => Decoded::Invalid,
            Decoded::Value(v) => Decoded::Value(v.as_any().downcast_ref::<C::Value>()?),
        };
        Some(self.encode(typed))
    }

    fn decode_erased(&self, input: &Encoded) -> Decoded<AnyValue> {
        self.decode(input).map(|v| Box::new(v) as AnyValue)
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<C::Value>()
    }
}

/// A typed handle to a configured parameter.
///
/// Returned by [`ParamConfigMap::register`]; can also be declared as a
/// `const` next to the config that registers the same name.
pub struct ParamKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ParamKey<T> {
    /// Creates a key for the parameter `name`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Returns the parameter name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ParamKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ParamKey<T> {}

impl<T> fmt::Debug for ParamKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamKey")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Maps parameter names to codecs, in registration order.
///
/// The map is built once and then only read, so it can be shared between
/// threads behind an `Arc` or in a `static`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{NumberParam, ParamConfigMap, StringParam};
///
/// let config = ParamConfigMap::builder()
///     .with("page", NumberParam)
///     .with("q", StringParam)
///     .build();
///
/// assert_eq!(config.names().collect::<Vec<_>>(), vec!["page", "q"]);
/// ```
#[derive(Default)]
pub struct ParamConfigMap {
    codecs: IndexMap<String, Box<dyn ErasedCodec>>,
}

impl ParamConfigMap {
    /// Creates an empty config map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a chained builder.
    pub fn builder() -> ParamConfigBuilder {
        ParamConfigBuilder::default()
    }

    /// Registers `codec` under `name`, replacing any codec already there.
    ///
    /// A replaced entry keeps its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_param_codec::{BooleanParam, Decoded, DecodedQuery, ParamConfigMap};
    ///
    /// let mut config = ParamConfigMap::new();
    /// let flag = config.register("flag", BooleanParam);
    ///
    /// let mut query = DecodedQuery::new();
    /// query.set(&flag, Decoded::Value(true));
    /// assert_eq!(query.get(&flag).unwrap(), Decoded::Value(&true));
    /// ```
    pub fn register<C>(&mut self, name: &'static str, codec: C) -> ParamKey<C::Value>
    where
        C: Codec + 'static,
        C::Value: ParamValue,
    {
        self.codecs.insert(name.to_string(), Box::new(codec));
        ParamKey::new(name)
    }

    /// Registers `codec` under `name`, refusing to replace an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateParam`] if `name` is already configured.
    pub fn try_register<C>(
        &mut self,
        name: &'static str,
        codec: C,
    ) -> Result<ParamKey<C::Value>, Error>
    where
        C: Codec + 'static,
        C::Value: ParamValue,
    {
        if self.codecs.contains_key(name) {
            return Err(Error::DuplicateParam(name.to_string()));
        }
        Ok(self.register(name, codec))
    }

    /// Registers an already boxed codec under a runtime name.
    pub fn insert_erased(&mut self, name: impl Into<String>, codec: Box<dyn ErasedCodec>) {
        self.codecs.insert(name.into(), codec);
    }

    /// Returns the codec configured for `name`.
    pub fn get(&self, name: &str) -> Option<&dyn ErasedCodec> {
        self.codecs.get(name).map(|codec| &**codec)
    }

    /// Returns `true` if `name` has a codec.
    pub fn contains(&self, name: &str) -> bool {
        self.codecs.contains_key(name)
    }

    /// Returns the configured names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    /// Iterates over names and codecs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn ErasedCodec)> {
        self.codecs
            .iter()
            .map(|(name, codec)| (name.as_str(), &**codec))
    }

    /// Returns the number of configured parameters.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Returns `true` if nothing is configured.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for ParamConfigMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.codecs.iter().map(|(name, codec)| (name, codec.value_type())))
            .finish()
    }
}

/// Chained construction of a [`ParamConfigMap`].
#[derive(Debug, Default)]
pub struct ParamConfigBuilder {
    config: ParamConfigMap,
}

impl ParamConfigBuilder {
    /// Adds `codec` under `name`; a later call for the same name wins.
    pub fn with<C>(mut self, name: &'static str, codec: C) -> Self
    where
        C: Codec + 'static,
        C::Value: ParamValue,
    {
        self.config.register(name, codec);
        self
    }

    /// Finishes the map.
    pub fn build(self) -> ParamConfigMap {
        self.config
    }
}
