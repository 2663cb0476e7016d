use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Region name -> non-negative value, as supplied by the surrounding application.
///
/// Entries are sanitised on insertion: negative or non-finite values become 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ValueMap {
    entries: BTreeMap<String, f64>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into().trim().to_string();
        let value = sanitize(&name, value);
        self.entries.insert(name, value);
    }

    /// Value for `name`, or 0 when the map has no entry.
    pub fn get(&self, name: &str) -> f64 {
        self.entries.get(name.trim()).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Normalization denominator: the largest value, or 1 if the map is empty
    /// or all zero.
    pub fn max_value(&self) -> f64 {
        let max = self.entries.values().copied().fold(0.0, f64::max);
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    /// True when at least one entry is strictly positive.
    pub fn has_positive(&self) -> bool {
        self.entries.values().any(|v| *v > 0.0)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl From<BTreeMap<String, f64>> for ValueMap {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<ValueMap> for BTreeMap<String, f64> {
    fn from(map: ValueMap) -> Self {
        map.entries
    }
}

fn sanitize(name: &str, value: f64) -> f64 {
    if !value.is_finite() {
        warn!(name, value, "Non-finite value replaced with 0");
        0.0
    } else if value < 0.0 {
        warn!(name, value, "Negative value clamped to 0");
        0.0
    } else {
        value
    }
}
