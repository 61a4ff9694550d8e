//! Centralized configuration and builder for HiveKV maps.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - MapConfig::from_env() reads the HK_* env vars; the fluent setters and
//!   MapBuilder override individual fields on top of that.
//!
//! Defaults match the classic chained-table tuning: 12 initial buckets,
//! growth at load factor 0.75, stable xxhash64(seed=0) keys-to-buckets.

use std::fmt;

use anyhow::{anyhow, Result};

use crate::consts::{MAP_INIT_BUCKET_COUNT, MAP_MAX_LOAD_FACTOR};
use crate::hash::{HashKind, HASH_KIND_DEFAULT};

/// Top-level configuration for a map.
#[derive(Clone, Copy, Debug)]
pub struct MapConfig {
    /// Bucket count the map starts with; doubles on growth.
    /// Env: HK_INIT_BUCKETS (default 12)
    pub initial_buckets: usize,

    /// Threshold for proactive growth: the map resizes before an insert
    /// would push `len / bucket_count` to this value.
    /// Env: HK_MAX_LOAD_FACTOR (default 0.75, open interval (0, 1))
    pub max_load_factor: f64,

    /// Stable hash used to map keys to buckets.
    pub hash_kind: HashKind,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: MAP_INIT_BUCKET_COUNT,
            max_load_factor: MAP_MAX_LOAD_FACTOR,
            hash_kind: HASH_KIND_DEFAULT,
        }
    }
}

impl MapConfig {
    /// Load configuration from environment variables; unknown or malformed
    /// values keep the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("HK_INIT_BUCKETS") {
            if let Ok(n) = v.trim().parse::<usize>() {
                if n > 0 {
                    cfg.initial_buckets = n;
                }
            }
        }

        if let Ok(v) = std::env::var("HK_MAX_LOAD_FACTOR") {
            if let Ok(x) = v.trim().parse::<f64>() {
                if x > 0.0 && x < 1.0 {
                    cfg.max_load_factor = x;
                }
            }
        }

        cfg
    }

    /// Refuse configurations the map cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.initial_buckets == 0 {
            return Err(anyhow!("initial_buckets must be > 0"));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(anyhow!(
                "max_load_factor {} out of range (0, 1)",
                self.max_load_factor
            ));
        }
        Ok(())
    }

    // Fluent setters (builder-style) to override specific fields.

    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = lf;
        self
    }

    pub fn with_hash_kind(mut self, kind: HashKind) -> Self {
        self.hash_kind = kind;
        self
    }
}

impl fmt::Display for MapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MapConfig {{ initial_buckets: {}, max_load_factor: {}, hash_kind: {} }}",
            self.initial_buckets, self.max_load_factor, self.hash_kind,
        )
    }
}

/// Lightweight builder that produces a MapConfig.
#[derive(Clone, Debug)]
pub struct MapBuilder {
    cfg: MapConfig,
}

impl Default for MapBuilder {
    fn default() -> Self {
        // Start from env to keep deployment overrides working, then allow
        // per-call overrides.
        Self {
            cfg: MapConfig::from_env(),
        }
    }
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: MapConfig::default(),
        }
    }

    pub fn initial_buckets(mut self, buckets: usize) -> Self {
        self.cfg.initial_buckets = buckets;
        self
    }

    pub fn max_load_factor(mut self, lf: f64) -> Self {
        self.cfg.max_load_factor = lf;
        self
    }

    pub fn hash_kind(mut self, kind: HashKind) -> Self {
        self.cfg.hash_kind = kind;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> MapConfig {
        self.cfg
    }
}
