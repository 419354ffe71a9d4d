use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Identifier, codec::Layout, time::unix_parts};

/// A 64-bit time-ordered identifier with second resolution.
///
/// - 32 bits Unix seconds
/// - 10 bits sequence
/// - 22 bits process id
///
/// ```text
///  Bit Index:  63              32 31        22 21              0
///              +-----------------+------------+----------------+
///  Field:      | timestamp (32)  | seq (10)   | pid (22)       |
///              +-----------------+------------+----------------+
///  Text:       |<--- 8 hex --->|-|<---------- 8 hex ---------->|
/// ```
///
/// The base64 form drops its `=` padding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct NanoId {
    id: u64,
}

const TIMESTAMP: usize = 0;
const SEQUENCE: usize = 1;
const PROCESS_ID: usize = 2;

const _: () = assert!(NanoId::LAYOUT.total_bits() == 64);

impl NanoId {
    /// Field widths, most significant first.
    pub const LAYOUT: Layout<3> = Layout::new([32, 10, 22]);

    /// Builds an identifier from its raw fields, each masked to its width.
    pub const fn from_fields(timestamp: u32, sequence: u16, process_id: u32) -> Self {
        Self {
            id: Self::LAYOUT.pack([timestamp as u64, sequence as u64, process_id as u64]) as u64,
        }
    }

    /// Stamps `time` at second resolution.
    pub fn from_time(time: SystemTime, sequence: u16, process_id: u32) -> Self {
        Self::from_fields(unix_parts(time).0 as u32, sequence, process_id)
    }

    /// The identifier as one 64-bit integer.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Wraps a raw 64-bit value.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Unix seconds.
    pub const fn timestamp(&self) -> u32 {
        Self::LAYOUT.get(self.id as u128, TIMESTAMP) as u32
    }

    /// The 10-bit per-second sequence.
    pub const fn sequence(&self) -> u16 {
        Self::LAYOUT.get(self.id as u128, SEQUENCE) as u16
    }

    /// The 22-bit process id of the generating process.
    pub const fn process_id(&self) -> u32 {
        Self::LAYOUT.get(self.id as u128, PROCESS_ID) as u32
    }

    /// The embedded time, at whole seconds.
    pub fn time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(u64::from(self.timestamp()))
    }
}

impl Identifier for NanoId {
    type Bytes = [u8; 8];

    const GROUPS: &'static [usize] = &[8, 8];
    const PAD_BASE64: bool = false;
    const NULL: Self = Self { id: 0 };

    fn to_bytes(&self) -> Self::Bytes {
        self.id.to_be_bytes()
    }

    fn from_bytes(bytes: Self::Bytes) -> Self {
        Self {
            id: u64::from_be_bytes(bytes),
        }
    }
}

impl_conversions!(NanoId, 8);

impl core::fmt::Debug for NanoId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NanoId")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .field("process_id", &self.process_id())
            .finish()
    }
}
