/// Text and byte-array conversions that every identifier kind derives from
/// its [`Identifier`](crate::Identifier) implementation.
macro_rules! impl_conversions {
    ($name:ident, $len:literal) => {
        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&$crate::Identifier::encode(self))
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                <Self as $crate::Identifier>::decode(s)
            }
        }

        impl core::convert::TryFrom<&str> for $name {
            type Error = $crate::Error;

            fn try_from(s: &str) -> $crate::Result<Self> {
                <Self as $crate::Identifier>::decode(s)
            }
        }

        impl core::convert::TryFrom<&[u8]> for $name {
            type Error = $crate::Error;

            fn try_from(bytes: &[u8]) -> $crate::Result<Self> {
                <Self as $crate::Identifier>::try_from_slice(bytes)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                <Self as $crate::Identifier>::from_bytes(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(id: $name) -> Self {
                $crate::Identifier::to_bytes(&id)
            }
        }
    };
}

mod micro;
mod nano;
mod standard;

pub use micro::*;
pub use nano::*;
pub use standard::*;
