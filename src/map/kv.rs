//! Key-value operations: put, get, get_copy, contains_key, remove.

use std::hash::Hash;

use anyhow::{anyhow, Result};

use crate::alloc::RawAlloc;
use crate::hash::bucket_of_key;

use super::resize::Resize;
use super::{Entry, Map};

impl<K: Hash + Eq, V, A: RawAlloc + Clone> Map<K, V, A> {
    /// Inserts or updates. An update replaces the value in place and keeps
    /// the stored key; an insert grows the bucket array first when the load
    /// factor would be reached, then appends the new entry. Any refused
    /// allocation aborts the whole call with the map unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let mut idx = self.bucket_of(&key);
        let bucket = self
            .buckets
            .get_mut(idx)
            .ok_or_else(|| anyhow!("bucket {} out of range", idx))?;
        for entry in bucket.iter_mut() {
            if entry.key == key {
                // update path: old value dropped, stored key untouched
                entry.value = value;
                return Ok(());
            }
        }

        // insert path: resize runs before the entry is placed, and growth
        // changes the bucket count, so the target is recomputed against it
        match self.resize_if_needed()? {
            Resize::Done { buckets } => {
                idx = bucket_of_key(self.hash_kind, &key, buckets);
            }
            Resize::NotNeeded => {}
        }

        let bucket = self
            .buckets
            .get_mut(idx)
            .ok_or_else(|| anyhow!("bucket {} out of range", idx))?;
        bucket.append(Entry { key, value })?;
        self.len += 1;
        Ok(())
    }

    /// Direct reference to the stored value; the shared borrow of the map
    /// keeps it valid until the next mutating call.
    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.bucket_of(key);
        let bucket = self.buckets.get(idx)?;
        for entry in bucket.iter() {
            if entry.key == *key {
                return Some(&entry.value);
            }
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry, dropping its key and value. Absent key is a no-op.
    pub fn remove(&mut self, key: &K) -> bool {
        let idx = self.bucket_of(key);
        let bucket = match self.buckets.get_mut(idx) {
            Some(b) => b,
            None => return false,
        };
        let mut found = None;
        for (i, entry) in bucket.iter().enumerate() {
            if entry.key == *key {
                found = Some(i);
                break;
            }
        }
        match found {
            Some(i) => {
                bucket.remove(i);
                self.len -= 1;
                true
            }
            None => false,
        }
    }
}

impl<K: Hash + Eq, V: Clone, A: RawAlloc + Clone> Map<K, V, A> {
    /// Caller-owned copy of the stored value.
    pub fn get_copy(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }
}
