//! Page provenance hashing.

use sha2::{Digest, Sha256};

/// Digest of the page a record was decoded from.
///
/// Stored alongside each entity so repeated saves of an unchanged page can be
/// spotted after the fact; the store itself never deduplicates.
pub fn page_digest(url: &str, html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(b"\n");
    hasher.update(html.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_stability() {
        let a = page_digest("https://www.serebii.net/pokedex-swsh/bulbasaur", "<html></html>");
        let b = page_digest("https://www.serebii.net/pokedex-swsh/bulbasaur", "<html></html>");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_changes_with_content() {
        let a = page_digest("https://www.serebii.net/pokedex-swsh/bulbasaur", "<html>a</html>");
        let b = page_digest("https://www.serebii.net/pokedex-swsh/bulbasaur", "<html>b</html>");
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_format() {
        let hash = page_digest("u", "h");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
