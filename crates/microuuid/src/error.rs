use core::fmt;

/// A result type whose error defaults to [`Error`].
///
/// Only the strict decoders return it. Generation is infallible, and the
/// lenient decoders (`from_string`, `from_slice`, `from_base64`) map every
/// error onto the identifier's `NULL` value instead.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `microuuid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input does not have the exact length of the expected
    /// representation.
    #[error("invalid length: expected {expected}, found {found}")]
    InvalidLength {
        /// Required length in bytes (binary) or characters (text).
        expected: usize,
        /// Length that was actually supplied.
        found: usize,
    },

    /// A character that is not a hexadecimal digit appeared inside a group.
    #[error("invalid hex character {} at index {index}", printable(.byte))]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Byte offset within the input.
        index: usize,
    },

    /// A dash was missing or misplaced, so the group structure does not match
    /// the identifier's layout.
    #[error("malformed group structure at index {index}")]
    InvalidGroup {
        /// Byte offset where a separator was expected or found.
        index: usize,
    },

    /// A character outside the standard base64 alphabet.
    #[error("invalid base64 character {} at index {index}", printable(.byte))]
    InvalidBase64 {
        /// The offending byte.
        byte: u8,
        /// Byte offset within the input.
        index: usize,
    },

    /// The base64 input has a length no encoder can produce.
    #[error("invalid base64 length: {len}")]
    Base64Length {
        /// Length of the input after padding was removed.
        len: usize,
    },
}

fn printable(byte: &u8) -> Printable {
    Printable(*byte)
}

struct Printable(u8);

impl fmt::Display for Printable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "{:#04x}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_printable_bytes() {
        let err = Error::InvalidCharacter {
            byte: b'g',
            index: 3,
        };
        assert_eq!(err.to_string(), "invalid hex character 'g' at index 3");
    }

    #[test]
    fn display_escapes_control_bytes() {
        let err = Error::InvalidBase64 {
            byte: b'\n',
            index: 0,
        };
        assert_eq!(err.to_string(), "invalid base64 character 0x0a at index 0");
    }
}
