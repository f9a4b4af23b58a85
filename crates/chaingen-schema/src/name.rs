//! Base-32 identifier codec.
//!
//! Maps a string of at most 13 characters over the alphabet `.1-5a-z` to a
//! compact `u64` and back. Characters 0..12 occupy 5 bits each from the
//! most-significant end; the 13th character only has 4 bits left and can
//! therefore encode just the first 16 alphabet entries.
//!
//! The round-trip property `decode(encode(s)) == s` is the single validity
//! gate applied to every declared table, action, and contract name.

/// Decoding alphabet, indexed by 5-bit symbol value.
const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Map one character to its 5-bit symbol value.
///
/// Characters outside the alphabet map to 0 (`.`); they are caught by the
/// round-trip check in [`is_valid`] rather than here.
fn char_to_symbol(c: u8) -> u64 {
    match c {
        b'a'..=b'z' => (c - b'a') as u64 + 6,
        b'1'..=b'5' => (c - b'0') as u64,
        _ => 0,
    }
}

/// Encode an identifier into its numeric form.
///
/// Only the first 13 characters participate; positions 0..11 contribute
/// their full 5-bit value, position 12 only its low 4 bits. Missing
/// trailing characters contribute 0.
pub fn encode(s: &str) -> u64 {
    let mut value = 0u64;
    for (i, &c) in s.as_bytes().iter().enumerate().take(13) {
        let symbol = char_to_symbol(c);
        if i < 12 {
            value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
        } else {
            value |= symbol & 0x0f;
        }
    }
    value
}

/// Decode a numeric identifier back into its string form.
///
/// Exact inverse of [`encode`]: groups are peeled from the
/// least-significant end (first the 13th position's 4-bit slot, then 5
/// bits per position), then trailing `.` padding is stripped.
pub fn decode(value: u64) -> String {
    let mut chars = [b'.'; 13];
    let mut tmp = value;
    for i in 0..13 {
        let c = if i == 0 {
            CHARMAP[(tmp & 0x0f) as usize]
        } else {
            CHARMAP[(tmp & 0x1f) as usize]
        };
        chars[12 - i] = c;
        tmp >>= if i == 0 { 4 } else { 5 };
    }

    let end = chars
        .iter()
        .rposition(|&c| c != b'.')
        .map_or(0, |p| p + 1);
    // CHARMAP is ASCII, so this cannot fail.
    String::from_utf8_lossy(&chars[..end]).into_owned()
}

/// Whether `s` survives an encode/decode round trip.
///
/// Rejects characters outside the alphabet, strings longer than 13
/// characters, and a 13th character that loses bits in the 4-bit slot.
pub fn is_valid(s: &str) -> bool {
    decode(encode(s)) == s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_known_names() {
        for name in ["eosio", "mytable", "hello", "a", "...a", "counter.a", "12345abcdefgj"] {
            assert_eq!(decode(encode(name)), name, "round trip failed for {name}");
        }
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(encode(""), 0);
        assert_eq!(decode(0), "");
        assert!(is_valid(""));
    }

    #[test]
    fn test_trailing_dots_do_not_round_trip() {
        // "abc." encodes identically to "abc"; decode strips the padding.
        assert_eq!(encode("abc."), encode("abc"));
        assert!(!is_valid("abc."));
        assert!(is_valid("abc"));
    }

    #[test]
    fn test_uppercase_rejected() {
        assert!(!is_valid("MyTable"));
        assert!(!is_valid("A"));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(!is_valid("my_table"));
        assert!(!is_valid("table6"));
        assert!(!is_valid("hello world"));
        assert!(!is_valid("0table"));
    }

    #[test]
    fn test_too_long_rejected() {
        assert!(is_valid("abcdefghijklm")); // exactly 13
        assert!(!is_valid("abcdefghijklmn")); // 14
    }

    #[test]
    fn test_thirteenth_char_four_bit_limit() {
        // Position 12 can only hold values 0..=15: '.'..='j'.
        assert!(is_valid("aaaaaaaaaaaaj"));
        // 'k' has symbol value 16, which is truncated to 0 in the low slot.
        assert!(!is_valid("aaaaaaaaaaaak"));
        assert!(!is_valid("aaaaaaaaaaaaz"));
    }

    #[test]
    fn test_known_encoding() {
        // "eosio" against the reference value used across EOSIO tooling.
        assert_eq!(encode("eosio"), 6138663577826885632);
        assert_eq!(decode(6138663577826885632), "eosio");
    }
}
