//! In-memory content index
//!
//! An ordered mapping from file name to [`Document`]. Order is scan order
//! until a sort rearranges it. Serializes as a JSON object whose key order
//! matches the index order, and deserializes back in the same order.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{value, Document, SortOrder};

/// One indexed document and the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// File name including the extension
    pub file_name: String,
    pub document: Document,
}

/// Ordered file name to document mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentIndex {
    entries: Vec<Entry>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document, replacing any entry with the same file name in place
    pub fn insert(&mut self, file_name: impl Into<String>, document: Document) {
        let file_name = file_name.into();
        match self.entries.iter_mut().find(|e| e.file_name == file_name) {
            Some(existing) => existing.document = document,
            None => self.entries.push(Entry {
                file_name,
                document,
            }),
        }
    }

    /// Looks up a document by file name
    pub fn get(&self, file_name: &str) -> Option<&Document> {
        self.entries
            .iter()
            .find(|e| e.file_name == file_name)
            .map(|e| &e.document)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in index order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Number of pages of `page_size` entries
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.entries.len().div_ceil(page_size)
    }

    /// Entries on 1-indexed page `page`; empty when out of range
    pub fn page(&self, page: usize, page_size: usize) -> &[Entry] {
        if page == 0 || page_size == 0 {
            return &[];
        }

        let start = (page - 1).saturating_mul(page_size);
        if start >= self.entries.len() {
            return &[];
        }

        let end = start.saturating_add(page_size).min(self.entries.len());
        &self.entries[start..end]
    }

    /// Stable sort by one field. Documents without the field (or with
    /// `null`) go last in both directions.
    pub fn sort_by(&mut self, field: &str, order: SortOrder) {
        let mut keyed: Vec<_> = self
            .entries
            .drain(..)
            .map(|entry| {
                let key = entry
                    .document
                    .field(field)
                    .filter(|v| !v.is_null())
                    .map(|v| v.into_owned());
                (key, entry)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => {
                let ord = value::compare(a, b);
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        self.entries = keyed.into_iter().map(|(_, entry)| entry).collect();
    }

    /// Entries whose `field` holds `tag` (exact match)
    pub fn by_tag(&self, tag: &str, field: &str) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| {
                e.document
                    .meta
                    .get(field)
                    .is_some_and(|v| value::contains_tag(v, tag))
            })
            .collect()
    }
}

impl FromIterator<(String, Document)> for ContentIndex {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        let mut index = ContentIndex::new();
        for (file_name, document) in iter {
            index.insert(file_name, document);
        }
        index
    }
}

impl Serialize for ContentIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.file_name, &entry.document)?;
        }
        map.end()
    }
}

struct IndexVisitor;

impl<'de> Visitor<'de> for IndexVisitor {
    type Value = ContentIndex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of file names to documents")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut index = ContentIndex::new();
        while let Some((file_name, document)) = access.next_entry::<String, Document>()? {
            index.insert(file_name, document);
        }
        Ok(index)
    }
}

impl<'de> Deserialize<'de> for ContentIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(IndexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentMeta;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn doc(url: &str, fields: Value) -> Document {
        let meta = match fields {
            Value::Object(map) => DocumentMeta::from(map),
            _ => DocumentMeta::new(),
        };
        Document::new(url, "", meta)
    }

    fn index_of(docs: Vec<(&str, Value)>) -> ContentIndex {
        docs.into_iter()
            .map(|(url, fields)| (format!("{}.md", url), doc(url, fields)))
            .collect()
    }

    fn urls(index: &ContentIndex) -> Vec<&str> {
        index.iter().map(|e| e.document.url.as_str()).collect()
    }

    fn page_urls(index: &ContentIndex, page: usize, size: usize) -> Vec<String> {
        index.page(page, size).iter().map(|e| e.document.url.clone()).collect()
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut index = index_of(vec![("a", json!({})), ("b", json!({}))]);
        index.insert("a.md", doc("a", json!({"title": "new"})));

        assert_eq!(urls(&index), vec!["a", "b"]);
        assert_eq!(index.get("a.md").unwrap().get_str("title"), Some("new"));
    }

    #[test]
    fn pages_slice_in_order() {
        let index = index_of(vec![
            ("a", json!({})),
            ("b", json!({})),
            ("c", json!({})),
            ("d", json!({})),
            ("e", json!({})),
        ]);

        assert_eq!(index.page_count(2), 3);
        assert_eq!(page_urls(&index, 1, 2), vec!["a", "b"]);
        assert_eq!(page_urls(&index, 2, 2), vec!["c", "d"]);
        assert_eq!(page_urls(&index, 3, 2), vec!["e"]);
        assert!(page_urls(&index, 4, 2).is_empty());
        assert!(page_urls(&index, 0, 2).is_empty());
    }

    #[test]
    fn zero_page_size() {
        let index = index_of(vec![("a", json!({}))]);
        assert_eq!(index.page_count(0), 0);
        assert!(index.page(1, 0).is_empty());
    }

    #[test]
    fn sort_numbers_and_missing_last() {
        let mut index = index_of(vec![
            ("ten", json!({"rank": 10})),
            ("none", json!({})),
            ("two", json!({"rank": 2})),
            ("null", json!({"rank": null})),
            ("five", json!({"rank": 5})),
        ]);

        index.sort_by("rank", SortOrder::Asc);
        assert_eq!(urls(&index), vec!["two", "five", "ten", "none", "null"]);

        index.sort_by("rank", SortOrder::Desc);
        assert_eq!(urls(&index), vec!["ten", "five", "two", "none", "null"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut index = index_of(vec![
            ("a", json!({"group": "x"})),
            ("b", json!({"group": "y"})),
            ("c", json!({"group": "x"})),
        ]);

        index.sort_by("group", SortOrder::Asc);
        assert_eq!(urls(&index), vec!["a", "c", "b"]);

        index.sort_by("group", SortOrder::Desc);
        assert_eq!(urls(&index), vec!["b", "a", "c"]);
    }

    #[test]
    fn sort_by_url() {
        let mut index = index_of(vec![("c", json!({})), ("a", json!({})), ("b", json!({}))]);
        index.sort_by("url", SortOrder::Asc);
        assert_eq!(urls(&index), vec!["a", "b", "c"]);
    }

    #[test]
    fn tag_filter() {
        let index = index_of(vec![
            ("a", json!({"tags": ["x"]})),
            ("b", json!({"tags": ["y"]})),
            ("c", json!({"tags": ["x", "y"]})),
            ("d", json!({})),
        ]);

        let hits: Vec<_> = index.by_tag("x", "tags").iter().map(|e| e.document.url.clone()).collect();
        assert_eq!(hits, vec!["a", "c"]);
        assert!(index.by_tag("z", "tags").is_empty());
        assert!(index.by_tag("x", "labels").is_empty());
    }

    #[test]
    fn serde_keeps_order() {
        let index = index_of(vec![
            ("zeta", json!({"n": 1})),
            ("alpha", json!({"n": 2})),
            ("mid", json!({"n": 3})),
        ]);

        let json = serde_json::to_string(&index).unwrap();
        let parsed: ContentIndex = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, index);
        assert_eq!(urls(&parsed), vec!["zeta", "alpha", "mid"]);
    }

    proptest! {
        #[test]
        fn pages_reassemble_index(n in 0usize..40, page_size in 1usize..12) {
            let index: ContentIndex = (0..n)
                .map(|i| (format!("{:03}.md", i), doc(&format!("{:03}", i), json!({ "i": i }))))
                .collect();

            let pages = index.page_count(page_size);
            prop_assert_eq!(pages, n.div_ceil(page_size));

            let joined: Vec<_> = (1..=pages)
                .flat_map(|p| index.page(p, page_size).iter().cloned())
                .collect();
            prop_assert_eq!(joined.as_slice(), index.entries());
            prop_assert!(index.page(pages + 1, page_size).is_empty());
        }

        #[test]
        fn sort_is_idempotent(ranks in proptest::collection::vec(proptest::option::of(0i64..5), 0..20)) {
            let mut index: ContentIndex = ranks
                .iter()
                .enumerate()
                .map(|(i, rank)| {
                    let fields = match rank {
                        Some(r) => json!({ "rank": r }),
                        None => json!({}),
                    };
                    (format!("{}.md", i), doc(&i.to_string(), fields))
                })
                .collect();

            index.sort_by("rank", SortOrder::Desc);
            let once = index.clone();
            index.sort_by("rank", SortOrder::Desc);
            prop_assert_eq!(index, once);
        }
    }
}
