//! Free-text matching shared by the route, direction and stop resolvers

/// Returns the first candidate, in the given order, whose key contains
/// `query` ignoring case.
///
/// The first hit wins even when a later candidate matches more closely.
pub(crate) fn first_match<T, F>(candidates: Vec<T>, query: &str, key: F) -> Option<T>
where
    F: Fn(&T) -> &str,
{
    let needle = query.to_lowercase();
    candidates
        .into_iter()
        .find(|candidate| key(candidate).to_lowercase().contains(&needle))
}
