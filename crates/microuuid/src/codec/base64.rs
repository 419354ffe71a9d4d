use crate::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const NO_VALUE: u8 = 255;
const PAD: u8 = b'=';

const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 64 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes `input` with the standard base64 alphabet. When `pad` is `false`
/// the trailing `=` characters are omitted.
pub fn encode_base64(input: &[u8], pad: bool) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    for chunk in input.chunks(3) {
        let mut acc = 0u32;
        for (i, &b) in chunk.iter().enumerate() {
            acc |= u32::from(b) << (16 - 8 * i);
        }
        for i in 0..4 {
            if i <= chunk.len() {
                let index = (acc >> (18 - 6 * i)) & 0x3f;
                out.push(char::from(ALPHABET[index as usize]));
            } else if pad {
                out.push(char::from(PAD));
            }
        }
    }
    out
}

/// Decodes standard base64, with or without trailing `=` padding.
///
/// Up to two padding characters are stripped. The remaining length must be
/// one an encoder can produce (`len % 4 != 1`), and padding, when present,
/// must complete the final quantum.
pub fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let body = bytes
        .strip_suffix(b"==")
        .or_else(|| bytes.strip_suffix(b"="))
        .unwrap_or(bytes);
    let padded = body.len() != bytes.len();
    if body.len() % 4 == 1 || (padded && bytes.len() % 4 != 0) {
        return Err(Error::Base64Length { len: body.len() });
    }

    let mut out = Vec::with_capacity(body.len() * 3 / 4);
    let mut acc = 0u32;
    let mut bits = 0;
    for (index, &byte) in body.iter().enumerate() {
        let value = LOOKUP[byte as usize];
        if value == NO_VALUE {
            return Err(Error::InvalidBase64 { byte, index });
        }
        acc = (acc << 6) | u32::from(value);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_vectors() {
        assert_eq!(encode_base64(b"", true), "");
        assert_eq!(encode_base64(b"f", true), "Zg==");
        assert_eq!(encode_base64(b"fo", true), "Zm8=");
        assert_eq!(encode_base64(b"foo", true), "Zm9v");
        assert_eq!(encode_base64(b"foob", false), "Zm9vYg");
        assert_eq!(encode_base64(&[0xff; 8], false), "//////////8");
        assert_eq!(encode_base64(&[0xff; 8], true), "//////////8=");
    }

    #[test]
    fn decodes_with_and_without_padding() {
        assert_eq!(decode_base64("Zm9vYg==").unwrap(), b"foob");
        assert_eq!(decode_base64("Zm9vYg").unwrap(), b"foob");
        assert_eq!(decode_base64("Zm9vYmE=").unwrap(), b"fooba");
        assert_eq!(decode_base64("Zm9vYmE").unwrap(), b"fooba");
        assert_eq!(decode_base64("").unwrap(), b"");
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert_eq!(
            decode_base64("Zm9-"),
            Err(Error::InvalidBase64 {
                byte: b'-',
                index: 3
            })
        );
        assert!(decode_base64("Zm=v").is_err());
    }

    #[test]
    fn rejects_impossible_lengths() {
        assert_eq!(
            decode_base64("Zm9vY"),
            Err(Error::Base64Length { len: 5 })
        );
        assert_eq!(
            decode_base64("Zm9vYg="),
            Err(Error::Base64Length { len: 6 })
        );
    }
}
