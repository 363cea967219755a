// ABOUTME: Application constants with domain-separated organization
// ABOUTME: Field bounds, short-link hash parameters, validation patterns, env config

//! Constants module
//!
//! Constants are grouped into logical domains rather than being spread as
//! magic numbers through the stores. The values mirror the column widths and
//! check-constraint bounds declared in the schema.

use regex::Regex;
use std::env;
use std::sync::LazyLock;

/// Field length bounds and check-constraint minimums
pub mod limits {
    /// Maximum length of a user email address
    pub const EMAIL_MAX_LENGTH: usize = 254;

    /// Maximum length of a username, first name or last name
    pub const NAME_MAX_LENGTH: usize = 150;

    /// Maximum length of a tag name or slug
    pub const TAG_MAX_LENGTH: usize = 32;

    /// Maximum length of an ingredient name
    pub const INGREDIENT_MAX_LENGTH: usize = 128;

    /// Maximum length of an ingredient measurement unit
    pub const UNIT_MAX_LENGTH: usize = 64;

    /// Maximum length of a recipe name
    pub const RECIPE_NAME_MAX_LENGTH: usize = 256;

    /// Minimum cooking time in minutes
    pub const COOKING_TIME_MIN: i64 = 1;

    /// Minimum ingredient amount within a recipe
    pub const AMOUNT_MIN: i64 = 1;
}

/// Short-link hash generation parameters
pub mod short_links {
    /// Maximum length of an original URL
    pub const URL_MAX_LENGTH: usize = 256;

    /// Inclusive lower bound for a generated hash length
    pub const HASH_LENGTH_MIN: usize = 3;

    /// Inclusive upper bound for a generated hash length
    pub const HASH_LENGTH_MAX: usize = 10;

    /// Width of the hash column (generated hashes always fit)
    pub const HASH_FIELD_LENGTH: usize = 16;

    /// Insert attempts before giving up with `HashSpaceExhausted`
    pub const HASH_MAX_ATTEMPTS: u32 = 5;

    /// Alphabet a hash is drawn from: ASCII letters and digits, 62 symbols
    pub const HASH_ALPHABET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
}

/// Username pattern: word characters plus `.`, `@`, `+`, `-`
pub static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal, compiles
    Regex::new(r"^[\w.@+-]+$").unwrap()
});

/// Tag slug pattern: letters, digits, hyphen, underscore
pub static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal, compiles
    Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap()
});

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:data/ladle.db".to_string())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns() {
        assert!(USERNAME_PATTERN.is_match("alice.smith@example+1"));
        assert!(!USERNAME_PATTERN.is_match("alice smith"));
        assert!(SLUG_PATTERN.is_match("weeknight_dinner-2"));
        assert!(!SLUG_PATTERN.is_match("weeknight dinner"));
    }

    #[test]
    fn test_hash_alphabet() {
        assert_eq!(short_links::HASH_ALPHABET.len(), 62);
        assert!(short_links::HASH_LENGTH_MIN <= short_links::HASH_LENGTH_MAX);
        assert!(short_links::HASH_LENGTH_MAX <= short_links::HASH_FIELD_LENGTH);
    }
}
