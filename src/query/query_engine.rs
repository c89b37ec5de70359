use std::collections::HashSet;

use crate::records::PriceRecord;
use crate::store::RecordStore;

/// Linear scans over a record store. Matching is case-sensitive and only the
/// query itself is trimmed.
pub struct QueryEngine<'a> {
    store: &'a RecordStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Records whose item contains the trimmed query.
    ///
    /// An empty query matches every record that has an item at all.
    pub fn search(&self, query: &str) -> Vec<&'a PriceRecord> {
        let q = query.trim();
        self.store
            .records()
            .iter()
            .filter(|record| !record.item.is_empty() && record.item.contains(q))
            .collect()
    }

    /// Distinct item names, in first-seen order, starting with the trimmed
    /// partial query.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let p = partial.trim();
        if p.is_empty() || self.store.is_empty() {
            return Vec::new();
        }

        self.distinct_items()
            .into_iter()
            .filter(|item| item.starts_with(p))
            .map(str::to_string)
            .collect()
    }

    fn distinct_items(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.store
            .records()
            .iter()
            .map(|record| record.item.as_str())
            .filter(|item| seen.insert(*item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(item: &str, platform: &str, price: i64) -> PriceRecord {
        PriceRecord::new("2025-01-01", "A", item, platform, Some(Decimal::from(price)))
    }

    fn store() -> RecordStore {
        RecordStore::from(vec![
            record("Widget", "ShopX", 1000),
            record("Widget Pro", "ShopY", 1500),
            record("Gadget", "ShopX", 800),
            record("Widget", "ShopZ", 950),
            record("", "ShopX", 10),
        ])
    }

    #[test]
    fn test_search_substring() {
        let store = store();
        let engine = QueryEngine::new(&store);
        let hits = engine.search("dget");
        let items: Vec<_> = hits.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["Widget", "Widget Pro", "Gadget", "Widget"]);
    }

    #[test]
    fn test_search_trims_query_only() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(engine.search("  Gadget  ").len(), 1);
        // inner whitespace is significant
        assert!(engine.search("Widget  Pro").is_empty());
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert!(engine.search("widget").is_empty());
    }

    #[test]
    fn test_empty_query_returns_every_record_with_an_item() {
        let store = store();
        let engine = QueryEngine::new(&store);
        let hits = engine.search("");
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|r| !r.item.is_empty()));
        assert_eq!(engine.search("   ").len(), 4);
    }

    #[test]
    fn test_exact_item_returns_at_least_that_record() {
        let store = store();
        let engine = QueryEngine::new(&store);
        let hits = engine.search("Widget Pro");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].platform, "ShopY");
    }

    #[test]
    fn test_suggest_distinct_prefix_matches_in_first_seen_order() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(engine.suggest("Wi"), vec!["Widget", "Widget Pro"]);
        assert_eq!(engine.suggest(" G "), vec!["Gadget"]);
    }

    #[test]
    fn test_suggest_is_prefix_only() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert!(engine.suggest("dget").is_empty());
        for suggestion in engine.suggest("W") {
            assert!(suggestion.starts_with('W'));
        }
    }

    #[test]
    fn test_suggest_empty_partial_or_empty_store() {
        let store = store();
        assert!(QueryEngine::new(&store).suggest("").is_empty());
        assert!(QueryEngine::new(&store).suggest("  ").is_empty());

        let empty = RecordStore::new();
        assert!(QueryEngine::new(&empty).suggest("Wi").is_empty());
        assert!(QueryEngine::new(&empty).search("").is_empty());
    }
}
