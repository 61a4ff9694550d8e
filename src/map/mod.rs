//! Map — separate-chaining hash table built on Seq buckets.
//!
//! Layout:
//! - mod.rs    construction and accessors
//! - kv.rs     put / get / get_copy / contains_key / remove
//! - resize.rs proactive bucket-array growth
//! - scan.rs   entry iteration
//!
//! The bucket array is a Seq of Seqs; every bucket manipulation goes through
//! the Seq interface. Keys map to buckets via the crate's stable hash layer,
//! so the mapping survives toolchain and platform changes.

mod kv;
mod resize;
mod scan;

pub use scan::Iter;

use std::hash::Hash;

use anyhow::Result;

use crate::alloc::{RawAlloc, SysAlloc};
use crate::config::MapConfig;
use crate::consts::MAP_BUCKET_FIRST_CAPACITY;
use crate::hash::{bucket_of_key, HashKind};
use crate::seq::Seq;

/// One owned (key, value) pair inside a bucket. The two fields are owned and
/// dropped independently; moving an entry between buckets during a resize
/// moves the handles and never touches payload bytes.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

pub struct Map<K, V, A: RawAlloc + Clone = SysAlloc> {
    buckets: Seq<Seq<Entry<K, V>, A>, A>,
    len: usize,
    hash_kind: HashKind,
    max_load_factor: f64,
    alloc: A,
}

impl<K, V> Map<K, V, SysAlloc> {
    /// Map with the default configuration (12 buckets, load factor 0.75).
    pub fn new() -> Result<Self> {
        Self::with_config(MapConfig::default())
    }

    pub fn with_config(cfg: MapConfig) -> Result<Self> {
        Self::with_config_in(cfg, SysAlloc)
    }
}

impl<K, V, A: RawAlloc + Clone> Map<K, V, A> {
    pub fn new_in(alloc: A) -> Result<Self> {
        Self::with_config_in(MapConfig::default(), alloc)
    }

    /// Builds the initial bucket array, each bucket pre-sized for one entry.
    /// Fails whole: a refused allocation drops everything built so far and
    /// nothing escapes.
    pub fn with_config_in(cfg: MapConfig, alloc: A) -> Result<Self> {
        cfg.validate()?;
        let mut buckets = Seq::with_capacity_in(cfg.initial_buckets, alloc.clone())?;
        for _ in 0..cfg.initial_buckets {
            buckets.append(Seq::with_capacity_in(MAP_BUCKET_FIRST_CAPACITY, alloc.clone())?)?;
        }
        Ok(Self {
            buckets,
            len: 0,
            hash_kind: cfg.hash_kind,
            max_load_factor: cfg.max_load_factor,
            alloc,
        })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Current fill ratio, entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    #[inline]
    pub fn hash_kind(&self) -> HashKind {
        self.hash_kind
    }

    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }
}

impl<K: Hash, V, A: RawAlloc + Clone> Map<K, V, A> {
    #[inline]
    pub(crate) fn bucket_of(&self, key: &K) -> usize {
        bucket_of_key(self.hash_kind, key, self.buckets.len())
    }
}
