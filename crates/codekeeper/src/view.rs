//! Search and city-grouped views over the entry collection.
//!
//! Pure derived views, recomputed on every search-term or collection change.

use std::collections::BTreeMap;

use crate::entry::Entry;

/// Filter entries by a free-text search term.
///
/// Matches case-insensitively against business name and address; an empty
/// term matches everything. Input order is preserved.
#[must_use]
pub fn search(entries: &[Entry], term: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.matches(term))
        .cloned()
        .collect()
}

/// Group entries by their city token.
///
/// The city is the second comma-separated segment of the address, with an
/// "Unknown" bucket for addresses that lack one. The `BTreeMap` keeps group
/// keys in ascending lexicographic order; within a group, input order is
/// preserved.
#[must_use]
pub fn group_by_city(entries: &[Entry]) -> BTreeMap<String, Vec<Entry>> {
    let mut groups: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.city()).or_default().push(entry.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::UNKNOWN_CITY;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(name: &str, address: &str) -> Entry {
        let now = Utc::now();
        Entry {
            id: Uuid::new_v4(),
            business_name: name.to_string(),
            address: address.to_string(),
            latitude: None,
            longitude: None,
            male_code: None,
            female_code: None,
            first_added: now,
            last_updated: now,
        }
    }

    fn fixtures() -> Vec<Entry> {
        vec![
            entry("Corner Cafe", "12 Main St, Brooklyn, NY"),
            entry("Gas & Go", "401 Route 9, Albany, NY"),
            entry("Downtown Diner", "77 Elm St, Brooklyn, NY"),
            entry("Roadside Stop", "Mile marker 5"),
        ]
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let results = search(&fixtures(), "CORNER");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].business_name, "Corner Cafe");
    }

    #[test]
    fn test_search_matches_address() {
        let results = search(&fixtures(), "brooklyn");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_empty_term_matches_all() {
        let entries = fixtures();
        assert_eq!(search(&entries, "").len(), entries.len());
    }

    #[test]
    fn test_search_no_match() {
        assert!(search(&fixtures(), "zanzibar").is_empty());
    }

    #[test]
    fn test_group_by_city_keys_sorted() {
        let groups = group_by_city(&fixtures());
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Albany", "Brooklyn", UNKNOWN_CITY]);
    }

    #[test]
    fn test_group_by_city_membership() {
        let groups = group_by_city(&fixtures());
        assert_eq!(groups["Brooklyn"].len(), 2);
        assert_eq!(groups["Albany"].len(), 1);
        assert_eq!(groups[UNKNOWN_CITY].len(), 1);
        assert_eq!(groups[UNKNOWN_CITY][0].business_name, "Roadside Stop");
    }

    #[test]
    fn test_group_preserves_input_order_within_group() {
        let groups = group_by_city(&fixtures());
        let brooklyn: Vec<&str> = groups["Brooklyn"]
            .iter()
            .map(|e| e.business_name.as_str())
            .collect();
        assert_eq!(brooklyn, vec!["Corner Cafe", "Downtown Diner"]);
    }

    #[test]
    fn test_search_then_group_composes() {
        let filtered = search(&fixtures(), "st,");
        let groups = group_by_city(&filtered);
        assert!(groups.contains_key("Brooklyn"));
        assert!(!groups.contains_key("Albany"));
    }
}
