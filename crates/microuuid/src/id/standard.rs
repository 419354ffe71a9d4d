use std::time::SystemTime;

use crate::{
    GREGORIAN_OFFSET, Identifier,
    codec::{Layout, read_be, write_be},
    time::{from_unix_micros, unix_micros},
};

/// Most leading one-bits a variant marker may have.
pub const MAX_VARIANT: u8 = 8;

/// The RFC4122 variant (`10x` marker).
pub const VARIANT_RFC4122: u8 = 1;

/// Version of time and node based identifiers.
pub const VERSION_TIME: u8 = 1;

/// Version of random identifiers.
pub const VERSION_RANDOM: u8 = 4;

/// Packs a variant marker and a sequence into the 16-bit clock-sequence
/// field.
///
/// The marker is `variant` one-bits followed by a zero-bit, starting at the
/// most significant bit. The sequence fills whatever is left and is masked to
/// `0x7fff >> variant`. Variants above [`MAX_VARIANT`] are clamped.
///
/// ```
/// use microuuid::{decode_clock_seq, encode_clock_seq};
///
/// assert_eq!(encode_clock_seq(1, 0x1234), 0x9234);
/// assert_eq!(decode_clock_seq(0x9234), (1, 0x1234));
/// ```
pub const fn encode_clock_seq(variant: u8, sequence: u16) -> u16 {
    let variant = if variant > MAX_VARIANT {
        MAX_VARIANT
    } else {
        variant
    };
    !(0xffff_u16 >> variant) | (sequence & (0x7fff >> variant))
}

/// Splits a clock-sequence field into `(variant, sequence)`.
///
/// Counts leading one-bits up to [`MAX_VARIANT`]. A field with more than
/// eight leading ones decodes as variant 8.
pub const fn decode_clock_seq(clock_seq: u16) -> (u8, u16) {
    let mut variant = 0;
    while variant < MAX_VARIANT && clock_seq & (0x8000 >> variant) != 0 {
        variant += 1;
    }
    (variant, clock_seq & (0x7fff >> variant))
}

/// The 60-bit RFC4122 timestamp for `time`: 100 ns intervals since
/// 1582-10-15. Times outside the representable range saturate.
pub fn rfc4122_timestamp(time: SystemTime) -> u64 {
    let ticks = i128::from(GREGORIAN_OFFSET) + unix_micros(time) * 10;
    ticks.clamp(0, (1 << 60) - 1) as u64
}

/// A 128-bit identifier with the RFC4122 field layout.
///
/// ```text
///  Bits:   16         16         16          4     12          16            24          24
///        +----------+----------+-----------+-----+-----------+-------------+-----------+-----------+
///  Field:| time_low | time_mid | time_high | ver | time_high | var + seq   | node_high | node_low  |
///        |          |          | (low 16)  |     | (high 12) |             |           |           |
///        +----------+----------+-----------+-----+-----------+-------------+-----------+-----------+
///  Text: |<------ 8 hex ------>|-|<- 4 ->|-|<------ 4 ----->|-|<--- 4 --->|-|<------- 12 hex ----->|
/// ```
///
/// The 60-bit timestamp is `time_high << 32 | time_low << 16 | time_mid`, so
/// the first eight hex digits are the low 32 bits of the timestamp, as in
/// RFC4122. The variant is self-describing: see [`encode_clock_seq`].
///
/// Decoding normalises the clock-sequence field, so a value read from bytes
/// whose marker has more than eight leading ones is re-encoded canonically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct StandardId {
    id: u128,
}

const TIME_LOW: usize = 0;
const TIME_MID: usize = 1;
const TIME_HIGH_LOW: usize = 2;
const VERSION: usize = 3;
const TIME_HIGH_HIGH: usize = 4;
const CLOCK_SEQ: usize = 5;
const NODE_HIGH: usize = 6;
const NODE_LOW: usize = 7;

const _: () = assert!(StandardId::LAYOUT.total_bits() == 128);

impl StandardId {
    /// Field widths, most significant first.
    pub const LAYOUT: Layout<8> = Layout::new([16, 16, 16, 4, 12, 16, 24, 24]);

    /// Builds an identifier from its raw fields. `time_high` is the 28-bit
    /// high time; every other value is masked to its field width.
    #[allow(clippy::too_many_arguments)]
    pub const fn from_fields(
        time_low: u16,
        time_mid: u16,
        time_high: u32,
        version: u8,
        variant: u8,
        sequence: u16,
        node_high: u32,
        node_low: u32,
    ) -> Self {
        Self {
            id: Self::LAYOUT.pack([
                time_low as u64,
                time_mid as u64,
                time_high as u64,
                version as u64,
                (time_high >> 16) as u64,
                encode_clock_seq(variant, sequence) as u64,
                node_high as u64,
                node_low as u64,
            ]),
        }
    }

    /// Builds an identifier from a 60-bit timestamp and a 48-bit node.
    pub const fn from_timestamp(
        timestamp: u64,
        version: u8,
        variant: u8,
        sequence: u16,
        node: u64,
    ) -> Self {
        Self::from_fields(
            (timestamp >> 16) as u16,
            timestamp as u16,
            (timestamp >> 32) as u32,
            version,
            variant,
            sequence,
            (node >> 24) as u32,
            node as u32,
        )
    }

    /// The identifier as one 128-bit integer.
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Accepts any bit pattern; the clock-sequence field is normalised.
    pub const fn from_raw(raw: u128) -> Self {
        let shift = Self::LAYOUT.shift(CLOCK_SEQ);
        let (variant, sequence) = decode_clock_seq(Self::LAYOUT.get(raw, CLOCK_SEQ) as u16);
        let clock_seq = encode_clock_seq(variant, sequence) as u128;
        Self {
            id: (raw & !(0xffff << shift)) | (clock_seq << shift),
        }
    }

    /// Timestamp bits 16..32.
    pub const fn time_low(&self) -> u16 {
        Self::LAYOUT.get(self.id, TIME_LOW) as u16
    }

    /// Timestamp bits 0..16.
    pub const fn time_mid(&self) -> u16 {
        Self::LAYOUT.get(self.id, TIME_MID) as u16
    }

    /// All 28 bits of the high time field.
    pub const fn time_high(&self) -> u32 {
        ((Self::LAYOUT.get(self.id, TIME_HIGH_HIGH) as u32) << 16)
            | Self::LAYOUT.get(self.id, TIME_HIGH_LOW) as u32
    }

    /// The 4-bit version.
    pub const fn version(&self) -> u8 {
        Self::LAYOUT.get(self.id, VERSION) as u8
    }

    /// The raw 16-bit clock-sequence field, marker included.
    pub const fn clock_seq(&self) -> u16 {
        Self::LAYOUT.get(self.id, CLOCK_SEQ) as u16
    }

    /// Leading one-bits of the clock-sequence marker.
    pub const fn variant(&self) -> u8 {
        decode_clock_seq(self.clock_seq()).0
    }

    /// The clock sequence with the variant marker stripped.
    pub const fn sequence(&self) -> u16 {
        decode_clock_seq(self.clock_seq()).1
    }

    /// Upper 24 bits of the node.
    pub const fn node_high(&self) -> u32 {
        Self::LAYOUT.get(self.id, NODE_HIGH) as u32
    }

    /// Lower 24 bits of the node.
    pub const fn node_low(&self) -> u32 {
        Self::LAYOUT.get(self.id, NODE_LOW) as u32
    }

    /// The 48-bit node.
    pub const fn node(&self) -> u64 {
        ((self.node_high() as u64) << 24) | self.node_low() as u64
    }

    /// The 60-bit timestamp in 100 ns intervals since 1582-10-15.
    pub const fn timestamp(&self) -> u64 {
        ((self.time_high() as u64) << 32)
            | ((self.time_low() as u64) << 16)
            | self.time_mid() as u64
    }

    /// Microseconds since the Unix epoch, negative before 1970.
    pub const fn unix_micros(&self) -> i64 {
        (self.timestamp() as i64 - GREGORIAN_OFFSET as i64).div_euclid(10)
    }

    /// The embedded time at microsecond resolution.
    pub fn time(&self) -> SystemTime {
        from_unix_micros(self.unix_micros())
    }
}

impl Identifier for StandardId {
    type Bytes = [u8; 16];

    const GROUPS: &'static [usize] = &[8, 4, 4, 4, 12];
    const PAD_BASE64: bool = true;
    const NULL: Self = Self { id: 0 };

    fn to_bytes(&self) -> Self::Bytes {
        let mut out = [0; 16];
        write_be(self.id, &mut out);
        out
    }

    fn from_bytes(bytes: Self::Bytes) -> Self {
        Self::from_raw(read_be(&bytes))
    }
}

impl_conversions!(StandardId, 16);

impl core::fmt::Debug for StandardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StandardId")
            .field("id", &format_args!("{self}"))
            .field("version", &self.version())
            .field("variant", &self.variant())
            .field("sequence", &self.sequence())
            .field(
                "timestamp",
                &format_args!("{} (0x{:015x})", self.timestamp(), self.timestamp()),
            )
            .field("node", &format_args!("0x{:012x}", self.node()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn clock_seq_round_trips_every_variant() {
        for variant in 0..=MAX_VARIANT {
            let mask = 0x7fff_u16 >> variant;
            for sequence in [0, 1, 0x55, mask >> 1, mask] {
                let clock_seq = encode_clock_seq(variant, sequence);
                assert_eq!(
                    decode_clock_seq(clock_seq),
                    (variant, sequence),
                    "variant {variant} sequence {sequence:#x}"
                );
            }
        }
    }

    #[test]
    fn clock_seq_marker_bits() {
        assert_eq!(encode_clock_seq(0, 0x7fff), 0x7fff);
        assert_eq!(encode_clock_seq(1, 0), 0x8000);
        assert_eq!(encode_clock_seq(2, 0), 0xc000);
        assert_eq!(encode_clock_seq(8, 0x7f), 0xff7f);
        // sequence bits above the mask never touch the marker
        assert_eq!(encode_clock_seq(1, 0xffff), 0xbfff);
    }

    #[test]
    fn variant_scan_stops_at_eight() {
        assert_eq!(decode_clock_seq(0xffff), (8, 0x7f));
        assert_eq!(decode_clock_seq(0xff80), (8, 0));
        assert_eq!(encode_clock_seq(9, 0), encode_clock_seq(8, 0));
    }

    #[test]
    fn fields_round_trip_for_every_variant() {
        for variant in 1..=MAX_VARIANT {
            let sequence = 0x7fff >> variant;
            let id = StandardId::from_timestamp(
                0x0abc_def0_1234_5678,
                1,
                variant,
                sequence,
                0xa1b2_c3d4_e5f6,
            );
            let back = StandardId::from_string(&id.to_string());
            assert_eq!(back, id);
            assert_eq!(back.variant(), variant);
            assert_eq!(back.sequence(), sequence);
            assert_eq!(back.version(), 1);
            assert_eq!(back.node(), 0xa1b2_c3d4_e5f6);
            assert_eq!(back.timestamp(), 0x0abc_def0_1234_5678);
            assert_eq!(StandardId::from_slice(&id.to_bytes()), id);
            assert_eq!(StandardId::from_base64(&id.to_base64()), id);
        }
    }

    #[test]
    fn text_groups_match_rfc4122() {
        let id = StandardId::from_timestamp(0x01e_c9b1_1234_5678, 1, 1, 0x0123, 0x0011_2233_4455);
        assert_eq!(id.to_string(), "12345678-c9b1-101e-8123-001122334455");
        assert_eq!(id.time_low(), 0x1234);
        assert_eq!(id.time_mid(), 0x5678);
        assert_eq!(id.time_high(), 0x01e_c9b1);
        assert_eq!(id.clock_seq(), 0x8123);
    }

    #[test]
    fn version_keeps_four_bits() {
        let id = StandardId::from_fields(0, 0, 0, 0xf, 1, 0, 0, 0);
        assert_eq!(id.version(), 0xf);
        let id = StandardId::from_fields(0, 0, 0, 0x14, 1, 0, 0, 0);
        assert_eq!(id.version(), 4);
    }

    #[test]
    fn from_raw_normalises_long_markers() {
        let id = StandardId::from_string("00000000-0000-0000-ffff-000000000000");
        assert_eq!(id.variant(), 8);
        assert_eq!(id.sequence(), 0x7f);
        assert_eq!(id.to_string(), "00000000-0000-0000-ff7f-000000000000");
    }

    #[test]
    fn timestamp_matches_unix_time() {
        let t = UNIX_EPOCH + Duration::from_micros(1_700_000_000_123_456);
        let ts = rfc4122_timestamp(t);
        assert_eq!(ts, GREGORIAN_OFFSET + 17_000_000_001_234_560);
        let id = StandardId::from_timestamp(ts, VERSION_TIME, VARIANT_RFC4122, 0, 0);
        assert_eq!(id.unix_micros(), 1_700_000_000_123_456);
        assert_eq!(id.time(), t);
    }

    #[test]
    fn timestamp_before_gregorian_reform_saturates() {
        let t = UNIX_EPOCH - Duration::from_secs(500 * 365 * 86_400);
        assert_eq!(rfc4122_timestamp(t), 0);
        assert_eq!(
            StandardId::NULL.unix_micros(),
            -(GREGORIAN_OFFSET as i64) / 10
        );
    }

    #[test]
    fn null_text() {
        assert_eq!(
            StandardId::NULL.to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert!(StandardId::from_string("00000000-0000-0000-0000-00000000000").is_null());
        assert!(StandardId::validate("A1B2C3D4-0000-1000-8000-ABCDEFABCDEF"));
        assert!(!StandardId::validate("a1b2c3d4-0000-1000-8000abcdefabcdef"));
    }
}
