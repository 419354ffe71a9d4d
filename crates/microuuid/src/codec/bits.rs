/// A fixed table of bit-field widths, packed from **MSB to LSB**.
///
/// The first width occupies the highest bits of the identifier and the last
/// width the lowest. Every identifier kind in this crate declares its wire
/// format as a `Layout` constant; the table is validated at compile time when
/// used in a `const` context.
///
/// ```text
///  Layout::new([16, 16, 20, 6, 22, 16])
///
///  Bit Index:  95    80 79    64 63     44 43  38 37     16 15      0
///              +-------+-------+---------+------+---------+---------+
///  Field:      |   0   |   1   |    2    |  3   |    4    |    5    |
///              +-------+-------+---------+------+---------+---------+
///              |<------------ MSB ---- 96 bits ---- LSB ----------->|
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout<const N: usize> {
    widths: [u32; N],
}

impl<const N: usize> Layout<N> {
    /// Creates a layout from field widths given most-significant first.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if a width is zero or
    /// wider than 64 bits, or if the widths add up to more than 128 bits.
    pub const fn new(widths: [u32; N]) -> Self {
        let mut total = 0;
        let mut i = 0;
        while i < N {
            assert!(
                widths[i] > 0 && widths[i] <= 64,
                "field width must be within 1..=64 bits"
            );
            total += widths[i];
            i += 1;
        }
        assert!(total <= 128, "layout overflows 128 bits");
        Self { widths }
    }

    /// Sum of all field widths.
    pub const fn total_bits(&self) -> u32 {
        let mut total = 0;
        let mut i = 0;
        while i < N {
            total += self.widths[i];
            i += 1;
        }
        total
    }

    /// Length of the binary form: `ceil(total_bits / 8)`.
    pub const fn byte_len(&self) -> usize {
        (self.total_bits() as usize).div_ceil(8)
    }

    /// Width of field `index` in bits.
    pub const fn width(&self, index: usize) -> u32 {
        self.widths[index]
    }

    /// Number of bits below field `index`.
    pub const fn shift(&self, index: usize) -> u32 {
        let mut shift = 0;
        let mut i = index + 1;
        while i < N {
            shift += self.widths[i];
            i += 1;
        }
        shift
    }

    /// Largest value representable by field `index`.
    pub const fn max(&self, index: usize) -> u64 {
        u64::MAX >> (64 - self.widths[index])
    }

    /// Extracts field `index` from a packed value.
    pub const fn get(&self, raw: u128, index: usize) -> u64 {
        ((raw >> self.shift(index)) as u64) & self.max(index)
    }

    /// Packs field values into a single integer. Each value is masked to the
    /// width of its field, so oversized inputs never bleed into neighbours.
    pub const fn pack(&self, values: [u64; N]) -> u128 {
        let mut raw = 0u128;
        let mut i = 0;
        while i < N {
            raw = (raw << self.widths[i]) | (values[i] & self.max(i)) as u128;
            i += 1;
        }
        raw
    }

    /// Recovers every field value from a packed integer.
    pub const fn unpack(&self, raw: u128) -> [u64; N] {
        let mut values = [0u64; N];
        let mut i = 0;
        while i < N {
            values[i] = self.get(raw, i);
            i += 1;
        }
        values
    }

    /// Clears every bit above the layout's total width.
    pub const fn truncate(&self, raw: u128) -> u128 {
        let bits = self.total_bits();
        if bits == 128 {
            raw
        } else {
            raw & ((1u128 << bits) - 1)
        }
    }
}

/// Writes the low `out.len()` bytes of `raw` into `out`, big-endian.
pub fn write_be(raw: u128, out: &mut [u8]) {
    let bytes = raw.to_be_bytes();
    let len = out.len();
    debug_assert!(len <= bytes.len(), "output wider than 128 bits");
    out.copy_from_slice(&bytes[bytes.len() - len..]);
}

/// Reads a big-endian integer of up to 16 bytes.
pub fn read_be(bytes: &[u8]) -> u128 {
    debug_assert!(bytes.len() <= 16, "input wider than 128 bits");
    bytes
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b))
}
