/// Returns the cache key for the daily vote result.
///
/// A single well-known key: the result is one value for the whole
/// organization, so every serving instance reads and invalidates the same
/// entry.
pub fn result_key() -> &'static str {
    "vote-result-key"
}
