//! Static client credentials loaded once at startup.
//!
//! Pairs are read from indexed keys `CLIENT_ID_<n>` / `CLIENT_SECRET_<n>`
//! starting at `n = 1`. Loading stops at the first index where either half is
//! missing or empty, so the sequence must be contiguous.

use core::fmt;

/// Key prefix for the client id half of a pair.
pub const CLIENT_ID_PREFIX: &str = "CLIENT_ID_";

/// Key prefix for the client secret half of a pair.
pub const CLIENT_SECRET_PREFIX: &str = "CLIENT_SECRET_";

/// An `(id, secret)` pair authorizing a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub id: String,
    pub secret: String,
}

impl CredentialPair {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    fn matches(&self, id: &str, secret: &str) -> bool {
        self.id == id && self.secret == secret
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Ordered, immutable list of accepted credential pairs.
///
/// Built once and shared read-only between requests. Duplicates are kept;
/// any matching pair authorizes the caller.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    pairs: Vec<CredentialPair>,
}

impl CredentialStore {
    pub fn new(pairs: Vec<CredentialPair>) -> Self {
        Self { pairs }
    }

    /// Loads pairs through `lookup`, which maps a key such as `CLIENT_ID_1`
    /// to its configured value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: String| lookup(&key).filter(|value| !value.is_empty());

        let pairs = (1..)
            .map_while(|index: usize| {
                let id = non_empty(format!("{CLIENT_ID_PREFIX}{index}"))?;
                let secret = non_empty(format!("{CLIENT_SECRET_PREFIX}{index}"))?;
                Some(CredentialPair::new(id, secret))
            })
            .collect();

        Self::new(pairs)
    }

    /// Loads pairs from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Returns `true` iff some stored pair equals `(id, secret)` exactly.
    pub fn is_valid(&self, id: &str, secret: &str) -> bool {
        self.pairs.iter().any(|pair| pair.matches(id, secret))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[CredentialPair] {
        &self.pairs
    }
}
