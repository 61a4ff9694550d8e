//! Proactive bucket-array growth.
//!
//! The growth check runs before an insert places its entry: if admitting one
//! more entry would reach the load-factor threshold, the bucket count doubles
//! and every entry is relocated to `hash % new_count`. The live table is not
//! touched until the complete new array is allocated, so a refused allocation
//! leaves the map exactly as it was.

use std::hash::Hash;
use std::mem;

use anyhow::{anyhow, Result};
use log::debug;

use crate::alloc::RawAlloc;
use crate::consts::{MAP_BUCKET_FIRST_CAPACITY, MAP_BUCKET_GROWTH_FACTOR};
use crate::hash::bucket_of_key;
use crate::metrics;
use crate::seq::Seq;

use super::{Entry, Map};

/// Outcome of the pre-insert growth check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resize {
    NotNeeded,
    Done { buckets: usize },
}

impl<K: Hash, V, A: RawAlloc + Clone> Map<K, V, A> {
    /// Doubles the bucket array if `(len + 1) / bucket_count` reaches the
    /// threshold. Does not change the entry count. After `Done` the caller
    /// must recompute its target bucket against the new count.
    pub(crate) fn resize_if_needed(&mut self) -> Result<Resize> {
        let old_count = self.buckets.len();
        let load = (self.len + 1) as f64 / old_count as f64;
        if load < self.max_load_factor {
            return Ok(Resize::NotNeeded);
        }

        let new_count = old_count
            .checked_mul(MAP_BUCKET_GROWTH_FACTOR)
            .ok_or_else(|| anyhow!("bucket count overflow at {}", old_count))?;

        // Pass 1: incoming entry count per new bucket.
        let mut counts: Seq<usize, A> = Seq::with_capacity_in(new_count, self.alloc.clone())?;
        for _ in 0..new_count {
            counts.append(0)?;
        }
        for bucket in self.buckets.iter() {
            for entry in bucket.iter() {
                let idx = bucket_of_key(self.hash_kind, &entry.key, new_count);
                if let Some(c) = counts.get_mut(idx) {
                    *c += 1;
                }
            }
        }

        // Pass 2: allocate the complete new array before the live table is
        // touched. A refused allocation drops only what was built here.
        let mut fresh: Seq<Seq<Entry<K, V>, A>, A> =
            Seq::with_capacity_in(new_count, self.alloc.clone())?;
        for i in 0..new_count {
            let cap = counts
                .get(i)
                .copied()
                .unwrap_or(0)
                .max(MAP_BUCKET_FIRST_CAPACITY);
            fresh.append(Seq::with_capacity_in(cap, self.alloc.clone())?)?;
        }

        // Pass 3: relocate. Chains are pre-sized exactly, so no append here
        // can allocate; entries move as whole values. Old buckets drain
        // front-to-back, which keeps within-bucket insertion order for keys
        // that land together again.
        let old = mem::replace(&mut self.buckets, fresh);
        let mut moved = 0u64;
        for bucket in old {
            for entry in bucket {
                let idx = bucket_of_key(self.hash_kind, &entry.key, new_count);
                let chain = self
                    .buckets
                    .get_mut(idx)
                    .ok_or_else(|| anyhow!("bucket {} out of range 0..{}", idx, new_count))?;
                chain.append(entry)?;
                moved += 1;
            }
        }

        metrics::record_map_resize(moved);
        debug!(
            "map resize: buckets {} -> {}, {} entries rehashed",
            old_count, new_count, moved
        );
        Ok(Resize::Done { buckets: new_count })
    }
}
