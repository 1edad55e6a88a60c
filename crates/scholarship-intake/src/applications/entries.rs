use serde::{Deserialize, Serialize};

/// Ordered, growable list of free-form inputs (achievements, evidence links).
///
/// A fresh list holds a single blank entry, matching the one empty input the form shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList {
    entries: Vec<String>,
}

impl Default for EntryList {
    fn default() -> Self {
        Self {
            entries: vec![String::new()],
        }
    }
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Append an entry and return its index.
    pub fn add(&mut self, value: impl Into<String>) -> usize {
        self.entries.push(value.into());
        self.entries.len() - 1
    }

    pub fn add_blank(&mut self) -> usize {
        self.add(String::new())
    }

    /// Overwrite the entry at `index`. Returns `false` when out of range.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                *entry = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Trimmed, non-blank entries in input order.
    pub fn filled(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(String::new());
    }
}
