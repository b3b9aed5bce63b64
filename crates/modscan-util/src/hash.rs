/// Compute the BLAKE3 hash of a byte slice, returning the hex-encoded digest.
#[must_use]
pub fn blake3_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Short form of a hex digest for human-readable output.
#[must_use]
pub fn short_hash(hex: &str) -> &str {
    hex.get(..12).unwrap_or(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_bytes() {
        // Known BLAKE3 hash of "hello world"
        assert_eq!(
            blake3_bytes(b"hello world"),
            "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
        );
    }

    #[test]
    fn test_blake3_bytes_differs() {
        assert_ne!(blake3_bytes(b"import 'a';"), blake3_bytes(b"import 'b';"));
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(
            short_hash("d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"),
            "d74981efa70a"
        );
        assert_eq!(short_hash("abc"), "abc");
    }
}
