//! Name hashing
//!
//! Node names are compared by a 32-bit hash instead of by string. The hash
//! is a 31-multiplier rolling hash over UTF-16 code units, so the same name
//! hashes identically regardless of how it was spelled in the markup
//! encoding. The empty name hashes to 0, which marks an anonymous node.

/// Hash a node or class name
#[inline]
pub fn name_hash(name: &str) -> u32 {
    name.encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Hash a name with ASCII letters folded to lowercase
pub fn name_hash_ignore_case(name: &str) -> u32 {
    name.encode_utf16().fold(0u32, |acc, unit| {
        let unit = if (u16::from(b'A')..=u16::from(b'Z')).contains(&unit) {
            unit + 32
        } else {
            unit
        };
        acc.wrapping_mul(31).wrapping_add(u32::from(unit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_anonymous() {
        assert_eq!(name_hash(""), 0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(name_hash_ignore_case("Row"), name_hash("row"));
        assert_ne!(name_hash("Row"), name_hash("row"));
    }

    #[test]
    fn test_utf16_units() {
        // U+1F600 encodes as a surrogate pair
        let expected = 0xD83Du32.wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(name_hash("\u{1F600}"), expected);
    }
}
