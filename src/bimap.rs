use crate::BiMapError;
use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

/// Two-way lookup table where every key maps to exactly one value and every
/// value back to exactly one key.
///
/// Inserting a key or value that is already paired with something else is
/// rejected rather than silently overwriting one side.
#[derive(Debug, Clone)]
pub struct BidirectionalMap<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> Default for BidirectionalMap<K, V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }
}

impl<K, V> BidirectionalMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<(), BiMapError> {
        match (self.forward.get(&key), self.reverse.get(&value)) {
            (Some(existing), _) if *existing != value => Err(BiMapError::KeyCollision),
            (_, Some(existing)) if *existing != key => Err(BiMapError::ValueCollision),
            (Some(_), Some(_)) => Ok(()),
            _ => {
                self.forward.insert(key.clone(), value.clone());
                self.reverse.insert(value, key);
                Ok(())
            }
        }
    }

    pub fn get_by_key(&self, key: &K) -> Result<&V, BiMapError> {
        self.forward.get(key).ok_or(BiMapError::KeyNotFound)
    }

    pub fn get_by_value(&self, value: &V) -> Result<&K, BiMapError> {
        self.reverse.get(value).ok_or(BiMapError::ValueNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.reverse.contains_key(value)
    }

    pub fn remove_by_key(&mut self, key: &K) -> Option<V> {
        let value = self.forward.remove(key)?;
        self.reverse.remove(&value);
        Some(value)
    }

    pub fn remove_by_value(&mut self, value: &V) -> Option<K> {
        let key = self.reverse.remove(value)?;
        self.forward.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.forward.iter()
    }
}
