use crate::{Error, Result};

const DIGITS: &[u8; 16] = b"0123456789abcdef";
const NO_VALUE: u8 = 255;

/// Lookup table for hex decoding, both cases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 16 {
        let c = DIGITS[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i;
        }
        i += 1;
    }
    lut
};

/// Length of the rendered text: all hex digits plus one dash between each
/// pair of groups.
pub const fn text_len(groups: &[usize]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < groups.len() {
        len += groups[i];
        i += 1;
    }
    len + groups.len().saturating_sub(1)
}

/// Renders `input` as lowercase hex, inserting a dash after each group of
/// `groups[i]` digits. Groups are counted in nibbles and need not line up
/// with byte boundaries.
///
/// The caller guarantees `groups` sums to `2 * input.len()` and that
/// `buf` is exactly [`text_len`] bytes.
pub fn encode_hex(input: &[u8], groups: &[usize], buf: &mut [u8]) {
    debug_assert_eq!(buf.len(), text_len(groups));
    let mut nibbles = input.iter().flat_map(|&b| [b >> 4, b & 0x0f]);
    let mut out = 0;
    for (g, &width) in groups.iter().enumerate() {
        if g > 0 {
            buf[out] = b'-';
            out += 1;
        }
        for nibble in nibbles.by_ref().take(width) {
            buf[out] = DIGITS[nibble as usize];
            out += 1;
        }
    }
}

/// Allocating form of [`encode_hex`].
pub fn encode_hex_string(input: &[u8], groups: &[usize]) -> String {
    let mut buf = vec![0; text_len(groups)];
    encode_hex(input, groups, &mut buf);
    buf.into_iter().map(char::from).collect()
}

/// Strictly decodes grouped hex text into `out`.
///
/// The text must have exactly the group widths in `groups`, dashes exactly at
/// group boundaries, and nothing but `[0-9a-fA-F]` elsewhere. On error `out`
/// may be partially written.
pub fn decode_hex(input: &str, groups: &[usize], out: &mut [u8]) -> Result<()> {
    out.fill(0);
    let mut nibble = 0;
    scan(input, groups, |value| {
        let byte = &mut out[nibble / 2];
        if nibble % 2 == 0 {
            *byte = value << 4;
        } else {
            *byte |= value;
        }
        nibble += 1;
    })
}

/// Returns `true` if `input` has exactly the grouped hex shape described by
/// `groups`. Case-insensitive.
pub fn matches_groups(input: &str, groups: &[usize]) -> bool {
    scan(input, groups, |_| {}).is_ok()
}

fn scan(input: &str, groups: &[usize], mut sink: impl FnMut(u8)) -> Result<()> {
    let bytes = input.as_bytes();
    let expected = text_len(groups);
    if bytes.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            found: bytes.len(),
        });
    }

    let mut index = 0;
    for (g, &width) in groups.iter().enumerate() {
        if g > 0 {
            if bytes[index] != b'-' {
                return Err(Error::InvalidGroup { index });
            }
            index += 1;
        }
        for _ in 0..width {
            let byte = bytes[index];
            match LOOKUP[byte as usize] {
                NO_VALUE if byte == b'-' => return Err(Error::InvalidGroup { index }),
                NO_VALUE => return Err(Error::InvalidCharacter { byte, index }),
                value => sink(value),
            }
            index += 1;
        }
    }
    Ok(())
}
