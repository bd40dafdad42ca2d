// src/collections/map.rs
//! `HashMap` wrapper that fails loudly on missing or duplicate keys.

use crate::error::MapError;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, DefaultHasher, Entry};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash, V: Deserialize<'de>"
))]
pub struct Map<K, V> {
    inner: HashMap<K, V>,
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Map { inner: HashMap::new() }
    }
}

impl<K, V> Map<K, V> {
    pub fn new() -> Self {
        Map::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Map { inner: HashMap::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }

    pub fn as_hash_map(&self) -> &HashMap<K, V> {
        &self.inner
    }

    pub fn as_hash_map_mut(&mut self) -> &mut HashMap<K, V> {
        &mut self.inner
    }

    pub fn into_hash_map(self) -> HashMap<K, V> {
        self.inner
    }
}

impl<K: Eq + Hash + Debug, V> Map<K, V> {
    /// An existing key is left untouched.
    pub fn put(&mut self, key: K, value: V) -> Result<(), MapError> {
        match self.inner.entry(key) {
            Entry::Occupied(entry) => Err(MapError::DuplicateKey(format!("{:?}", entry.key()))),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    pub fn put_if_absent(&mut self, key: K, value: V) -> bool {
        match self.inner.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    pub fn get_value(&self, key: &K) -> Result<&V, MapError> {
        self.inner.get(key).ok_or_else(|| MapError::KeyNotFound(format!("{key:?}")))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.inner.remove(key).is_some()
    }

    pub fn replace(&mut self, key: &K, value: V) -> Result<V, MapError> {
        match self.inner.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(MapError::KeyNotFound(format!("{key:?}"))),
        }
    }
}

impl<K: Eq + Hash + Debug, V: PartialEq> Map<K, V> {
    pub fn remove_entry(&mut self, key: &K, value: &V) -> Result<(), MapError> {
        if self.inner.get(key) == Some(value) {
            self.inner.remove(key);
            Ok(())
        } else {
            Err(MapError::EntryMismatch(format!("{key:?}")))
        }
    }

    pub fn remove_instances_of(&mut self, value: &V) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, v| v != value);
        before - self.inner.len()
    }

    pub fn replace_if_equals(&mut self, key: &K, old: &V, new: V) -> Result<bool, MapError> {
        let slot = self
            .inner
            .get_mut(key)
            .ok_or_else(|| MapError::KeyNotFound(format!("{key:?}")))?;
        if *slot != *old {
            return Ok(false);
        }
        *slot = new;
        Ok(true)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.inner.values().any(|v| v == value)
    }

    /// Unlike `contains_key`, a missing key is an error.
    pub fn contains_entry(&self, key: &K, value: &V) -> Result<bool, MapError> {
        Ok(self.get_value(key)? == value)
    }
}

impl<K: Eq + Hash, V: Clone> Map<K, V> {
    pub fn get_value_or_default(&self, key: &K, default: V) -> V {
        self.inner.get(key).cloned().unwrap_or(default)
    }

    pub fn values(&self) -> Vec<V> {
        self.inner.values().cloned().collect()
    }
}

impl<K: Clone, V> Map<K, V> {
    pub fn keys(&self) -> Vec<K> {
        self.inner.keys().cloned().collect()
    }
}

impl<K: Clone, V: Clone> Map<K, V> {
    pub fn entries(&self) -> Vec<(K, V)> {
        self.inner.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Serialize, V: Serialize> Map<K, V> {
    /// Not stable across toolchains; do not persist it.
    pub fn hash_code(&self) -> Result<u64, MapError> {
        let mut serialized = self
            .inner
            .iter()
            .map(|entry| serde_json::to_string(&entry))
            .collect::<Result<Vec<_>, _>>()?;
        serialized.sort_unstable();

        let mut hasher = DefaultHasher::new();
        serialized.hash(&mut hasher);
        Ok(hasher.finish())
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Map<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.len() == other.inner.len()
            && self.inner.iter().all(|(k, v)| other.inner.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq> Eq for Map<K, V> {}

impl<K, V> From<HashMap<K, V>> for Map<K, V> {
    fn from(inner: HashMap<K, V>) -> Self {
        Map { inner }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map { inner: iter.into_iter().collect() }
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for Map<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<K, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Map<String, i32> {
        [("a", 1), ("b", 2), ("c", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_put_then_get() {
        let mut map = Map::new();
        map.put("x".to_string(), 10).unwrap();

        assert!(map.contains_key(&"x".to_string()));
        assert_eq!(*map.get_value(&"x".to_string()).unwrap(), 10);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_put_duplicate_key_fails_and_keeps_value() {
        let mut map = sample();
        let result = map.put("a".to_string(), 99);

        assert!(matches!(result, Err(MapError::DuplicateKey(_))));
        assert_eq!(*map.get_value(&"a".to_string()).unwrap(), 1);
    }

    #[test]
    fn test_put_if_absent() {
        let mut map = sample();
        assert!(!map.put_if_absent("a".to_string(), 99));
        assert!(map.put_if_absent("z".to_string(), 26));
        assert_eq!(*map.get_value(&"a".to_string()).unwrap(), 1);
        assert_eq!(*map.get_value(&"z".to_string()).unwrap(), 26);
    }

    #[test]
    fn test_missing_key() {
        let map = sample();
        let missing = "nope".to_string();

        assert!(matches!(map.get_value(&missing), Err(MapError::KeyNotFound(_))));
        assert_eq!(map.get_value_or_default(&missing, -1), -1);
        assert_eq!(map.get_value_or_default(&"b".to_string(), -1), 2);
    }

    #[test]
    fn test_remove() {
        let mut map = sample();
        assert!(map.remove(&"a".to_string()));
        assert!(!map.contains_key(&"a".to_string()));
        assert_eq!(map.len(), 2);
        assert!(!map.remove(&"a".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_entry() {
        let mut map = sample();
        assert!(matches!(map.remove_entry(&"a".to_string(), &2), Err(MapError::EntryMismatch(_))));
        assert!(matches!(map.remove_entry(&"zz".to_string(), &1), Err(MapError::EntryMismatch(_))));
        assert_eq!(map.len(), 3);

        map.remove_entry(&"a".to_string(), &1).unwrap();
        assert!(!map.contains_key(&"a".to_string()));
    }

    #[test]
    fn test_remove_instances_of() {
        let mut map = sample();
        assert_eq!(map.remove_instances_of(&1), 2);
        assert_eq!(map.keys(), vec!["b".to_string()]);
        assert_eq!(map.remove_instances_of(&1), 0);
    }

    #[test]
    fn test_replace() {
        let mut map = sample();
        assert_eq!(map.replace(&"b".to_string(), 20).unwrap(), 2);
        assert_eq!(*map.get_value(&"b".to_string()).unwrap(), 20);
        assert!(matches!(map.replace(&"q".to_string(), 0), Err(MapError::KeyNotFound(_))));
        assert!(!map.contains_key(&"q".to_string()));
    }

    #[test]
    fn test_replace_if_equals() {
        let mut map = sample();
        let key = "b".to_string();

        assert!(!map.replace_if_equals(&key, &3, 30).unwrap());
        assert_eq!(*map.get_value(&key).unwrap(), 2);

        assert!(map.replace_if_equals(&key, &2, 30).unwrap());
        assert_eq!(*map.get_value(&key).unwrap(), 30);

        assert!(matches!(
            map.replace_if_equals(&"q".to_string(), &2, 0),
            Err(MapError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_contains() {
        let map = sample();
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&7));
        assert!(map.contains_entry(&"a".to_string(), &1).unwrap());
        assert!(!map.contains_entry(&"a".to_string(), &2).unwrap());
        assert!(matches!(map.contains_entry(&"q".to_string(), &1), Err(MapError::KeyNotFound(_))));
    }

    #[test]
    fn test_snapshots_and_clear() {
        let mut map = sample();
        let mut keys = map.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let mut values = map.values();
        values.sort();
        assert_eq!(values, vec![1, 1, 2]);

        let entries = map.entries();
        map.clear();
        assert_eq!(entries.len(), 3);
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
        assert!(map.values().is_empty());
    }

    #[test]
    fn test_equality_detects_mismatched_values() {
        let mut other = sample();
        assert_eq!(sample(), other);

        other.replace(&"c".to_string(), 3).unwrap();
        assert_ne!(sample(), other);

        let mut smaller = sample();
        smaller.remove(&"c".to_string());
        assert_ne!(sample(), smaller);
        assert_ne!(smaller, sample());
    }

    #[test]
    fn test_hash_code() {
        let forward: Map<String, i32> = (0..50).map(|i| (i.to_string(), i)).collect();
        let backward: Map<String, i32> = (0..50).rev().map(|i| (i.to_string(), i)).collect();
        assert_eq!(forward.hash_code().unwrap(), backward.hash_code().unwrap());

        let mut changed = forward.clone();
        changed.replace(&"7".to_string(), 700).unwrap();
        assert_ne!(forward.hash_code().unwrap(), changed.hash_code().unwrap());
    }

    #[test]
    fn test_backing_store_views() {
        let mut map = sample();
        map.as_hash_map_mut().insert("d".to_string(), 4);
        assert_eq!(map.as_hash_map().get("d"), Some(&4));
        assert_eq!(map.into_hash_map().len(), 4);
    }

    #[test]
    fn test_serde_is_transparent() {
        let map = sample();
        let json = serde_json::to_string(&map).unwrap();
        let back: Map<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);

        let parsed: Map<String, i32> = serde_json::from_str(r#"{"k": 5}"#).unwrap();
        assert_eq!(*parsed.get_value(&"k".to_string()).unwrap(), 5);
    }
}
