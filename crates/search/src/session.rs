use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use doctordork_core::ResultEntry;

/// Links generated during one run, grouped by category key.
///
/// Categories keep the order they were first recorded in. Recording a
/// category again replaces its entries in place. Serializes as a JSON object
/// keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResults {
    categories: Vec<(String, Vec<ResultEntry>)>,
}

impl SessionResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: impl Into<String>, entries: Vec<ResultEntry>) {
        let category = category.into();
        match self.categories.iter_mut().find(|(key, _)| *key == category) {
            Some((_, existing)) => *existing = entries,
            None => self.categories.push((category, entries)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[ResultEntry]> {
        self.categories
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResultEntry])> {
        self.categories
            .iter()
            .map(|(key, entries)| (key.as_str(), entries.as_slice()))
    }

    /// Every entry across all categories, in recording order.
    pub fn entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.categories.iter().flat_map(|(_, entries)| entries.iter())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn total_entries(&self) -> usize {
        self.categories.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }
}

impl Serialize for SessionResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (key, entries) in &self.categories {
            map.serialize_entry(key, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SessionResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SessionVisitor;

        impl<'de> Visitor<'de> for SessionVisitor {
            type Value = SessionResults;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category to result entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut results = SessionResults::new();
                while let Some((key, entries)) = access.next_entry::<String, Vec<ResultEntry>>()? {
                    results.record(key, entries);
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(SessionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, platform: &str) -> ResultEntry {
        ResultEntry::new(category, platform, format!("https://example.com/{}", platform))
    }

    #[test]
    fn test_record_accumulates_in_order() {
        let mut results = SessionResults::new();
        results.record("social_media", vec![entry("social_media", "LinkedIn")]);
        results.record(
            "review_aggregation",
            vec![entry("review_aggregation", "Google"), entry("review_aggregation", "Vitals")],
        );

        let keys: Vec<&str> = results.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["social_media", "review_aggregation"]);
        assert_eq!(results.category_count(), 2);
        assert_eq!(results.total_entries(), 3);
    }

    #[test]
    fn test_same_category_overwrites_in_place() {
        let mut results = SessionResults::new();
        results.record("a", vec![entry("a", "one"), entry("a", "two")]);
        results.record("b", vec![entry("b", "three")]);
        results.record("a", vec![entry("a", "four")]);

        let keys: Vec<&str> = results.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(results.get("a").unwrap(), &[entry("a", "four")]);
        assert_eq!(results.total_entries(), 2);
    }

    #[test]
    fn test_json_reparse_keeps_structure() {
        let mut results = SessionResults::new();
        results.record("medicare_lookup", vec![entry("medicare_lookup", "NPI Registry")]);
        results.record("contact_search", vec![entry("contact_search", "Google Search")]);

        let json = serde_json::to_string_pretty(&results).unwrap();
        let parsed: SessionResults = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, results);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["medicare_lookup"][0]["platform"], "NPI Registry");
    }

    #[test]
    fn test_clear() {
        let mut results = SessionResults::new();
        results.record("a", vec![entry("a", "one")]);
        results.clear();
        assert!(results.is_empty());
        assert_eq!(results.total_entries(), 0);
    }
}
