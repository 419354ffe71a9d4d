use std::time::SystemTime;

use crate::{
    Identifier, StandardId,
    codec::{Layout, read_be, write_be},
    time::{from_unix_micros, unix_parts},
};

/// A 96-bit time-ordered identifier with microsecond resolution.
///
/// - 32 bits Unix seconds, split into two 16-bit halves
/// - 20 bits microseconds
/// - 6 bits sequence
/// - 22 bits process id
/// - 16 bits server id
///
/// ```text
///  Bit Index:  95        80 79       64 63      44 43    38 37      16 15        0
///              +-----------+-----------+----------+--------+----------+-----------+
///  Field:      | secs hi   | secs lo   | micros   | seq    | pid      | server    |
///              | (16)      | (16)      | (20)     | (6)    | (22)     | (16)      |
///              +-----------+-----------+----------+--------+----------+-----------+
///  Text:       |<----- 8 hex ------->|-|<- 5 ->|-|<---- 7 hex ---->|-|<- 4 ->|
/// ```
///
/// The text form is `%04x%04x-%05x-%07x-%04x`. The microsecond field can hold
/// values up to 1 048 575 even though only 0..=999 999 are meaningful; such
/// values decode without error and are reported by
/// [`is_valid`](Identifier::is_valid).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct MicroId {
    id: u128,
}

const SECONDS_HIGH: usize = 0;
const SECONDS_LOW: usize = 1;
const MICROS: usize = 2;
const SEQUENCE: usize = 3;
const PROCESS_ID: usize = 4;
const SERVER_ID: usize = 5;

const _: () = assert!(MicroId::LAYOUT.total_bits() == 96);

impl MicroId {
    /// Field widths, most significant first.
    pub const LAYOUT: Layout<6> = Layout::new([16, 16, 20, 6, 22, 16]);

    /// Largest microsecond value that [`is_valid`](Identifier::is_valid)
    /// accepts.
    pub const MAX_MICROS: u32 = 999_999;

    /// Builds an identifier from its raw fields. Every value is masked to its
    /// field width; nothing is validated.
    pub const fn from_fields(
        seconds_high: u16,
        seconds_low: u16,
        micros: u32,
        sequence: u8,
        process_id: u32,
        server_id: u16,
    ) -> Self {
        Self {
            id: Self::LAYOUT.pack([
                seconds_high as u64,
                seconds_low as u64,
                micros as u64,
                sequence as u64,
                process_id as u64,
                server_id as u64,
            ]),
        }
    }

    /// Like [`Self::from_fields`] but takes the 32-bit Unix seconds whole.
    pub const fn from_parts(
        unix_seconds: u32,
        micros: u32,
        sequence: u8,
        process_id: u32,
        server_id: u16,
    ) -> Self {
        Self::from_fields(
            (unix_seconds >> 16) as u16,
            unix_seconds as u16,
            micros,
            sequence,
            process_id,
            server_id,
        )
    }

    /// Stamps `time` at microsecond resolution. Seconds outside the 32-bit
    /// unsigned range wrap.
    pub fn from_time(time: SystemTime, sequence: u8, process_id: u32, server_id: u16) -> Self {
        let (seconds, micros) = unix_parts(time);
        Self::from_parts(seconds as u32, micros, sequence, process_id, server_id)
    }

    /// Re-encodes a standard identifier: the time is carried over, the
    /// sequence is truncated to 6 bits and the process and server ids are
    /// taken from the node.
    pub fn from_standard(uuid: &StandardId) -> Self {
        let micros = uuid.unix_micros();
        let node = uuid.node();
        Self::from_parts(
            micros.div_euclid(1_000_000) as u32,
            micros.rem_euclid(1_000_000) as u32,
            uuid.sequence() as u8,
            (node >> 26) as u32,
            node as u16,
        )
    }

    /// The 96 significant bits, right-aligned.
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Wraps a raw value. Bits above 96 are discarded.
    pub const fn from_raw(raw: u128) -> Self {
        Self {
            id: Self::LAYOUT.truncate(raw),
        }
    }

    /// Upper 16 bits of the Unix seconds.
    pub const fn seconds_high(&self) -> u16 {
        Self::LAYOUT.get(self.id, SECONDS_HIGH) as u16
    }

    /// Lower 16 bits of the Unix seconds.
    pub const fn seconds_low(&self) -> u16 {
        Self::LAYOUT.get(self.id, SECONDS_LOW) as u16
    }

    /// The two second halves joined back into one 32-bit value.
    pub const fn unix_seconds(&self) -> u32 {
        ((self.seconds_high() as u32) << 16) | self.seconds_low() as u32
    }

    /// The raw 20-bit microsecond field, possibly above [`Self::MAX_MICROS`].
    pub const fn micros(&self) -> u32 {
        Self::LAYOUT.get(self.id, MICROS) as u32
    }

    /// The 6-bit per-instant sequence.
    pub const fn sequence(&self) -> u8 {
        Self::LAYOUT.get(self.id, SEQUENCE) as u8
    }

    /// The 22-bit process id of the generating process.
    pub const fn process_id(&self) -> u32 {
        Self::LAYOUT.get(self.id, PROCESS_ID) as u32
    }

    /// The 16-bit server id.
    pub const fn server_id(&self) -> u16 {
        Self::LAYOUT.get(self.id, SERVER_ID) as u16
    }

    /// The embedded wall-clock time. Out-of-range microseconds are clamped to
    /// [`Self::MAX_MICROS`].
    pub fn time(&self) -> SystemTime {
        let seconds = i64::from(self.unix_seconds());
        let micros = self.micros().min(Self::MAX_MICROS);
        from_unix_micros(seconds * 1_000_000 + i64::from(micros))
    }
}

impl Identifier for MicroId {
    type Bytes = [u8; 12];

    const GROUPS: &'static [usize] = &[8, 5, 7, 4];
    const PAD_BASE64: bool = true;
    const NULL: Self = Self { id: 0 };

    fn to_bytes(&self) -> Self::Bytes {
        let mut out = [0; 12];
        write_be(self.id, &mut out);
        out
    }

    fn from_bytes(bytes: Self::Bytes) -> Self {
        Self {
            id: read_be(&bytes),
        }
    }

    fn is_valid(&self) -> bool {
        self.micros() <= Self::MAX_MICROS
    }
}

impl_conversions!(MicroId, 12);

impl core::fmt::Debug for MicroId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MicroId")
            .field("id", &format_args!("{self}"))
            .field("unix_seconds", &self.unix_seconds())
            .field("micros", &self.micros())
            .field("sequence", &self.sequence())
            .field("process_id", &self.process_id())
            .field(
                "server_id",
                &format_args!("{} (0x{:04x})", self.server_id(), self.server_id()),
            )
            .finish()
    }
}
