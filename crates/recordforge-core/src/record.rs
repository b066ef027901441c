use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::value::Value;

/// Insertion-ordered mapping from field name to emitted value.
///
/// Nested records produced by embedded factories are stored as
/// [`Value::Record`] and reached through [`Record::record`] or a dotted
/// [`Record::path`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous one when the key was present.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key)
            .map(|idx| self.entries.remove(idx).1)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Look up a field, failing when the record does not carry it.
    pub fn field(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::MissingField {
            path: key.to_string(),
        })
    }

    /// Look up a field that holds a nested record.
    pub fn record(&self, key: &str) -> Result<&Record> {
        self.field(key)?.as_record().ok_or_else(|| Error::NotARecord {
            path: key.to_string(),
        })
    }

    /// Walk a dotted path (`"owner.address.city"`) through nested records.
    pub fn path(&self, path: &str) -> Result<&Value> {
        let mut current = self;
        let mut walked = String::with_capacity(path.len());
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let value = current.get(segment).ok_or_else(|| Error::MissingField {
                path: walked.clone(),
            })?;
            if segments.peek().is_none() {
                return Ok(value);
            }
            current = value.as_record().ok_or_else(|| Error::NotARecord {
                path: walked.clone(),
            })?;
        }

        Err(Error::MissingField {
            path: path.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn to_json(&self) -> serde_json::Value {
        Value::Record(self.clone()).to_json()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == key)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
