//! Read-only scan over all entries.

use crate::alloc::RawAlloc;
use crate::seq::Seq;

use super::{Entry, Map};

/// Iterator over `(&key, &value)`. Buckets are visited in index order and
/// entries within a bucket in insertion order; there is no order guarantee
/// across buckets.
pub struct Iter<'a, K, V, A: RawAlloc> {
    buckets: &'a Seq<Seq<Entry<K, V>, A>, A>,
    bucket: usize,
    pos: usize,
}

impl<'a, K, V, A: RawAlloc> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        loop {
            let bucket = self.buckets.get(self.bucket)?;
            if let Some(entry) = bucket.get(self.pos) {
                self.pos += 1;
                return Some((&entry.key, &entry.value));
            }
            self.bucket += 1;
            self.pos = 0;
        }
    }
}

impl<K, V, A: RawAlloc + Clone> Map<K, V, A> {
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            pos: 0,
        }
    }
}

impl<'a, K, V, A: RawAlloc + Clone> IntoIterator for &'a Map<K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
