// eit/text.rs
//! DVB text field decoding (EN 300 468 annex A subset).
//!
//! Honours the leading character-table selector byte, maps the default
//! Latin tables as Latin-1 and strips the 0x80-0x9F control range.

/// Decode one DVB string field to UTF-8.
pub fn decode_text(raw: &[u8]) -> String {
    let bytes = strip_table_selector(raw);
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            0x20..=0x7E => out.push(b as char),
            0x8A => out.push(' '), // CR/LF control
            0x00..=0x1F | 0x7F..=0x9F => {}
            0xA0..=0xFF => out.push(b as char), // Latin-1 range
        }
    }
    out
}

fn strip_table_selector(raw: &[u8]) -> &[u8] {
    match raw.first() {
        // 0x10 selects a table via a 16-bit id
        Some(0x10) if raw.len() >= 3 => &raw[3..],
        Some(0x10) => &[],
        // 0x1F prefixes an encoding_type_id byte
        Some(0x1F) if raw.len() >= 2 => &raw[2..],
        Some(0x1F) => &[],
        Some(0x01..=0x1E) => &raw[1..],
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii() {
        assert_eq!(decode_text(b"News at Ten"), "News at Ten");
    }

    #[test]
    fn table_selector_stripped() {
        assert_eq!(decode_text(&[0x05, b'H', b'i']), "Hi");
        assert_eq!(decode_text(&[0x10, 0x00, 0x01, b'H', b'i']), "Hi");
    }

    #[test]
    fn latin1_and_controls() {
        // 0xE9 = é in Latin-1; 0x8A is the DVB CR/LF control
        assert_eq!(decode_text(&[b'C', 0xE9, 0x8A, b'x', 0x86, b'y']), "C\u{e9} xy");
    }
}
