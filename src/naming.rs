//! Canonical metric-name handling.
//!
//! Human-readable names arrive with characters the backend rejects (`.`,
//! `-`, `#`, space) and with whatever capitalisation the call site used.
//! [`normalise_name`] rewrites the illegal characters; case policy is a
//! separate layer applied by [`NameCache`], so that case-sensitive
//! registries can skip both the fold and the memo map entirely.

use moka::sync::Cache;

/// Upper bound on memoised names. Metric names are low-cardinality by
/// nature; the bound only guards against pathological callers that derive
/// names from unbounded input.
const NAME_CACHE_CAPACITY: u64 = 16_384;

/// Replace characters that are illegal in backend metric names with `_`.
///
/// Case is preserved; folding is the registry's case policy, not the
/// normaliser's. Empty input stays empty. Pure and safe to call from any
/// number of threads.
pub fn normalise_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '-' | '#' | ' ' => '_',
            other => other,
        })
        .collect()
}

/// [`normalise_name`] plus full lowercasing: the canonical form under the
/// default case-insensitive policy.
pub fn normalise_and_lowercase(name: &str) -> String {
    normalise_name(name).to_lowercase()
}

/// Per-registry resolver from raw names to metric keys.
///
/// In case-insensitive mode (the default) the normalise-and-fold result is
/// memoised keyed by the *original* raw string, since the same raw name
/// recurs heavily on hot paths. The memo is a sharded concurrent cache
/// with insert-if-absent population: racing first users agree on one
/// entry, and readers never observe a partial one.
///
/// In case-sensitive mode resolution is a fresh [`normalise_name`] on every
/// call, which is cheaper than a map lookup. That saving is the point of
/// the mode.
pub(crate) struct NameCache {
    case_sensitive: bool,
    memo: Cache<String, String>,
}

impl NameCache {
    pub(crate) fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            memo: Cache::new(NAME_CACHE_CAPACITY),
        }
    }

    /// Resolve a raw name to its metric key under this registry's policy.
    pub(crate) fn resolve(&self, raw: &str) -> String {
        if self.case_sensitive {
            normalise_name(raw)
        } else {
            self.memo
                .get_with(raw.to_owned(), || normalise_and_lowercase(raw))
        }
    }

    /// Drop every memoised name. Test isolation only.
    #[cfg(feature = "testing")]
    pub(crate) fn clear(&self) {
        self.memo.invalidate_all();
    }
}
