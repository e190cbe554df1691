//! Sibling order mappings (`id -> order`) sent by the reorder endpoints.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered `id -> order` mapping, serialised as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMap {
    entries: Vec<(String, i64)>,
}

impl OrderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each id to its position: the dense `0..n-1` sequence
    pub fn dense<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (index, id) in ids.into_iter().enumerate() {
            map.insert(id, index as i64);
        }
        map
    }

    /// Insert or overwrite, keeping the first insertion position
    pub fn insert(&mut self, id: impl Into<String>, order: i64) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = order,
            None => self.entries.push((id, order)),
        }
    }

    pub fn get(&self, id: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, order)| *order)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(id, order)| (id.as_str(), *order))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for OrderMap {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (id, order) in iter {
            map.insert(id, order);
        }
        map
    }
}

impl Serialize for OrderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, order) in &self.entries {
            map.serialize_entry(id, order)?;
        }
        map.end()
    }
}

struct OrderMapVisitor;

impl<'de> Visitor<'de> for OrderMapVisitor {
    type Value = OrderMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping ids to integer orders")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OrderMap, A::Error> {
        let mut map = OrderMap::new();
        while let Some((id, order)) = access.next_entry::<String, i64>()? {
            map.insert(id, order);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for OrderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderMapVisitor)
    }
}
