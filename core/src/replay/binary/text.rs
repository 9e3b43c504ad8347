//! Player name encoding
//!
//! The client writes names in an ASCII-compatible single-byte form when it
//! can and falls back to UTF-16LE otherwise. Decoding tries the cheap
//! single-byte path first; UTF-16 is only attempted when that fails.
//! NUL padding is removed in both cases.

use super::layout::NAME_LEN;

/// Which path produced a decoded name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEncoding {
    SingleByte,
    Utf16,
}

/// Decode a raw name field.
///
/// Returns `None` only when neither encoding accepts the bytes. An empty
/// string means the field held nothing but padding.
pub fn decode_name(raw: &[u8]) -> Option<(String, NameEncoding)> {
    if let Some(name) = decode_single_byte(raw) {
        return Some((name, NameEncoding::SingleByte));
    }
    decode_utf16(raw).map(|name| (name, NameEncoding::Utf16))
}

fn decode_single_byte(raw: &[u8]) -> Option<String> {
    std::str::from_utf8(raw).ok().map(strip_nul)
}

fn decode_utf16(raw: &[u8]) -> Option<String> {
    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok().map(|s| strip_nul(&s))
}

// Interior NULs go too: an ASCII name stored as UTF-16 passes the
// single-byte check with a NUL after every character.
fn strip_nul(s: &str) -> String {
    s.replace('\0', "")
}

/// Encode a name into a padded field.
///
/// ASCII names are written single-byte; anything else as UTF-16LE. Text that
/// doesn't fit is cut at the last whole character.
pub fn encode_name(name: &str) -> [u8; NAME_LEN] {
    let mut out = [0u8; NAME_LEN];
    let mut pos = 0;

    if name.is_ascii() {
        for byte in name.bytes().take(NAME_LEN) {
            out[pos] = byte;
            pos += 1;
        }
    } else {
        for ch in name.chars() {
            let mut units = [0u16; 2];
            let encoded = ch.encode_utf16(&mut units);
            if pos + encoded.len() * 2 > NAME_LEN {
                break;
            }
            for unit in encoded.iter() {
                out[pos..pos + 2].copy_from_slice(&unit.to_le_bytes());
                pos += 2;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_name() {
        let raw = encode_name("ShinSolBadguy");
        assert_eq!(
            decode_name(&raw),
            Some(("ShinSolBadguy".to_string(), NameEncoding::SingleByte))
        );
    }

    #[test]
    fn test_utf16_fallback() {
        let raw = encode_name("ソル");
        assert_eq!(
            decode_name(&raw),
            Some(("ソル".to_string(), NameEncoding::Utf16))
        );

        let raw = encode_name("Zé");
        assert_eq!(decode_name(&raw), Some(("Zé".to_string(), NameEncoding::Utf16)));
    }

    #[test]
    fn test_ascii_stored_as_utf16_decodes() {
        let mut raw = [0u8; NAME_LEN];
        for (i, unit) in "Ky".encode_utf16().enumerate() {
            raw[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_name(&raw).map(|(n, _)| n), Some("Ky".to_string()));
    }

    #[test]
    fn test_empty_field() {
        assert_eq!(
            decode_name(&[0u8; NAME_LEN]),
            Some((String::new(), NameEncoding::SingleByte))
        );
    }

    #[test]
    fn test_undecodable_field() {
        // Invalid UTF-8 lead byte, then an unpaired high surrogate
        let mut raw = [0u8; NAME_LEN];
        raw[0] = 0x00;
        raw[1] = 0xD8;
        assert_eq!(decode_name(&raw), None);
    }

    #[test]
    fn test_encode_truncates() {
        let long = "A".repeat(40);
        let raw = encode_name(&long);
        assert_eq!(decode_name(&raw).map(|(n, _)| n), Some("A".repeat(32)));

        let long_wide = "ソ".repeat(20);
        let raw = encode_name(&long_wide);
        assert_eq!(decode_name(&raw).map(|(n, _)| n), Some("ソ".repeat(16)));
    }
}
