//! Ordered message groups attached to a structured error

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Index;

/// Key used when messages are added without a group key
pub const DEFAULT_KEY: &str = "";

/// Mapping from group key to the messages stored under it.
///
/// Keys keep the order in which they were first used and every stored group
/// holds at least one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMap {
    entries: Vec<(String, Vec<String>)>,
}

impl MessageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of message groups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.position(key).map(|i| self.entries[i].1.as_slice())
    }

    /// First group in insertion order
    pub fn first(&self) -> Option<(&str, &[String])> {
        self.entries
            .first()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Total number of messages across all groups
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }

    /// Append messages under `key`, creating the group on first use.
    /// Nothing is stored when `messages` is empty.
    pub(crate) fn append(&mut self, key: &str, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }

        match self.position(key) {
            Some(i) => self.entries[i].1.extend(messages),
            None => self.entries.push((key.to_string(), messages)),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl Index<&str> for MessageMap {
    type Output = [String];

    /// # Panics
    ///
    /// Panics if no group exists for `key`.
    fn index(&self, key: &str) -> &Self::Output {
        match self.get(key) {
            Some(values) => values,
            None => panic!("no message group for key {:?}", key),
        }
    }
}

impl<'a> IntoIterator for &'a MessageMap {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for MessageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MessageMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MessageMapVisitor;

        impl<'de> Visitor<'de> for MessageMapVisitor {
            type Value = MessageMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of message groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = MessageMap::new();
                while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
                    map.append(&key, values);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MessageMapVisitor)
    }
}
