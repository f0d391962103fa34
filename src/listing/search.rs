use crate::models::CharacterEntity;

/// Narrow a fetched collection by name, without touching the network.
///
/// A query that is empty after trimming returns the collection as-is.
/// Otherwise keeps, in order, every character whose name contains the query
/// case-insensitively.
pub fn apply_search(collection: &[CharacterEntity], query: &str) -> Vec<CharacterEntity> {
    if query.trim().is_empty() {
        return collection.to_vec();
    }

    let needle = query.to_lowercase();
    collection
        .iter()
        .filter(|character| character.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
