//! # microuuid
//!
//! Compact, sortable, time-ordered identifiers in three fixed bit layouts:
//!
//! | Kind           | Bits | Text form                                | Fields                                       |
//! |----------------|------|------------------------------------------|----------------------------------------------|
//! | [`MicroId`]    | 96   | `6553f100-1e240-55a2b3c-beef`            | seconds, microseconds, sequence, pid, server |
//! | [`NanoId`]     | 64   | `6553f100-01c01092`                      | seconds, sequence, pid                       |
//! | [`StandardId`] | 128  | `12345678-c9b1-101e-8123-001122334455`   | RFC4122 time, version, variant, seq, node    |
//!
//! Every kind round-trips losslessly between its binary form, its grouped hex
//! text and base64 (see [`Identifier`]). Malformed input decodes to the
//! kind's `NULL` value through the lenient decoders, or to an [`Error`]
//! through the strict ones.
//!
//! Generators ([`MicroGenerator`], [`NanoGenerator`], [`StandardGenerator`])
//! own an atomic sequence counter, so identifiers generated for the same
//! instant stay distinct and ordered. Process-wide defaults are exposed as
//! free functions.
//!
//! ```
//! use microuuid::Identifier;
//!
//! let id = microuuid::micro_id();
//! let text = id.to_string();
//! assert_eq!(microuuid::MicroId::from_string(&text), id);
//!
//! let uuid = microuuid::uuid4();
//! assert_eq!(uuid.version(), 4);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every kind
//! - `tracing`: trace spans around generation and debug events from host
//!   resolution
//!
//! These identifiers are not secret: sequences and process ids are small and
//! predictable.

mod codec;
mod error;
mod generator;
mod host;
mod id;
mod rand;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::host::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::{GREGORIAN_OFFSET, SystemClock, TimeSource};
