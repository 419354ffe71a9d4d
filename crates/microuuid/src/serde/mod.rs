//! Serde support for every identifier kind.
//!
//! By default identifiers serialize as their grouped hex text in
//! human-readable formats (JSON, TOML) and as their big-endian bytes in
//! compact ones. Deserialization is strict: malformed input is an error, not
//! a null identifier.
//!
//! The [`as_base64`] module can be used with `#[serde(with = "...")]` to
//! store the base64 form instead.

use core::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{Identifier, MicroId, NanoId, StandardId};

struct TextOrBytes<ID>(PhantomData<ID>);

impl<ID: Identifier> Visitor<'_> for TextOrBytes<ID> {
    type Value = ID;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a grouped hex string or {} bytes",
            ID::Bytes::default().as_ref().len()
        )
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ID, E> {
        ID::decode(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<ID, E> {
        ID::try_from_slice(v).map_err(E::custom)
    }
}

macro_rules! impl_serde {
    ($($name:ident),+) => {$(
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                if s.is_human_readable() {
                    s.serialize_str(&self.encode())
                } else {
                    s.serialize_bytes(self.to_bytes().as_ref())
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                if d.is_human_readable() {
                    d.deserialize_str(TextOrBytes(PhantomData))
                } else {
                    d.deserialize_bytes(TextOrBytes(PhantomData))
                }
            }
        }
    )+};
}

impl_serde!(MicroId, NanoId, StandardId);

/// Serialize an identifier as its base64 string.
///
/// ```
/// use microuuid::{NanoId, serde::as_base64};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "as_base64")]
///     id: NanoId,
/// }
///
/// let event = Event { id: NanoId::from_fields(1, 2, 3) };
/// let json = serde_json::to_string(&event).unwrap();
/// assert_eq!(json, r#"{"id":"AAAAAQCAAAM"}"#);
/// ```
pub mod as_base64 {
    use super::{Deserialize, Deserializer, Serializer};
    use crate::Identifier;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Identifier,
        S: Serializer,
    {
        s.serialize_str(&id.to_base64())
    }

    /// # Errors
    ///
    /// Returns an error if the string is not base64 of exactly the
    /// identifier's binary width.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Identifier,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        ID::try_from_base64(&s).map_err(serde::de::Error::custom)
    }
}
