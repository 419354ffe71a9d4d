use core::{fmt, hash::Hash};

use crate::{
    Error, Result,
    codec::{decode_base64, decode_hex, encode_base64, encode_hex_string, matches_groups},
};

/// The shape shared by every identifier kind: a fixed-width binary form, a
/// grouped hex text form and a base64 form.
///
/// Implementors only describe their binary form ([`Self::to_bytes`] and
/// [`Self::from_bytes`]) and their text grouping. Everything else is
/// provided.
///
/// Every decoder comes in two flavours. The strict one (`decode`,
/// `try_from_slice`, `try_from_base64`) reports what was wrong with the
/// input. The lenient one (`from_string`, `from_slice`, `from_base64`) never
/// fails and yields [`Self::NULL`] on malformed input; combine it with
/// [`Self::is_null`] or [`Self::validate`] when the difference matters.
///
/// # Example
///
/// ```
/// use microuuid::{Identifier, NanoId};
///
/// let id = NanoId::from_fields(1_700_000_000, 7, 4242);
/// let text = id.encode();
/// assert_eq!(text, "6553f100-01c01092");
/// assert_eq!(NanoId::from_string(&text), id);
/// assert_eq!(NanoId::from_base64(&id.to_base64()), id);
///
/// assert!(NanoId::from_string("not an id").is_null());
/// ```
pub trait Identifier: Copy + Eq + Ord + Hash + Default + fmt::Debug + fmt::Display + Sized {
    /// The big-endian binary form, e.g. `[u8; 12]`.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Copy + Default;

    /// Hex digits per dash-separated group of the text form.
    const GROUPS: &'static [usize];

    /// Whether [`Self::to_base64`] keeps trailing `=` padding.
    const PAD_BASE64: bool;

    /// The all-zero identifier that lenient decoders fall back to.
    const NULL: Self;

    /// The big-endian binary form.
    fn to_bytes(&self) -> Self::Bytes;

    /// Rebuilds an identifier from its binary form.
    fn from_bytes(bytes: Self::Bytes) -> Self;

    /// Whether the decoded fields describe a meaningful value. Kinds whose
    /// binary form can hold out-of-range fields override this.
    fn is_valid(&self) -> bool {
        true
    }

    /// Whether this is [`Self::NULL`].
    fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Neither null nor invalid.
    fn is_ok(&self) -> bool {
        !self.is_null() && self.is_valid()
    }

    /// Lowercase grouped hex, e.g. `00000000-00000-0000000-0000`.
    fn encode(&self) -> String {
        encode_hex_string(self.to_bytes().as_ref(), Self::GROUPS)
    }

    /// Strictly parses the grouped hex form (case-insensitive).
    fn decode(s: &str) -> Result<Self> {
        let mut bytes = Self::Bytes::default();
        decode_hex(s, Self::GROUPS, bytes.as_mut())?;
        Ok(Self::from_bytes(bytes))
    }

    /// Parses the grouped hex form, or returns [`Self::NULL`].
    fn from_string(s: &str) -> Self {
        Self::decode(s).unwrap_or(Self::NULL)
    }

    /// Returns `true` if `s` is exactly the grouped hex form of this kind.
    fn validate(s: &str) -> bool {
        matches_groups(s, Self::GROUPS)
    }

    /// Strictly parses the binary form; the slice must have the exact width.
    fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let mut out = Self::Bytes::default();
        let expected = out.as_ref().len();
        if bytes.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                found: bytes.len(),
            });
        }
        out.as_mut().copy_from_slice(bytes);
        Ok(Self::from_bytes(out))
    }

    /// Parses the binary form. Short input is zero-padded on the left;
    /// oversize input yields [`Self::NULL`].
    fn from_slice(bytes: &[u8]) -> Self {
        let mut out = Self::Bytes::default();
        let width = out.as_ref().len();
        match width.checked_sub(bytes.len()) {
            Some(offset) => {
                out.as_mut()[offset..].copy_from_slice(bytes);
                Self::from_bytes(out)
            }
            None => Self::NULL,
        }
    }

    fn to_base64(&self) -> String {
        encode_base64(self.to_bytes().as_ref(), Self::PAD_BASE64)
    }

    /// Strictly parses base64 (padding optional) of the exact binary width.
    fn try_from_base64(s: &str) -> Result<Self> {
        Self::try_from_slice(&decode_base64(s)?)
    }

    /// Parses base64 leniently, with the same padding rule as
    /// [`Self::from_slice`].
    fn from_base64(s: &str) -> Self {
        decode_base64(s).map_or(Self::NULL, |bytes| Self::from_slice(&bytes))
    }
}
