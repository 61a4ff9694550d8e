#![allow(non_snake_case)]

// Base modules
pub mod config;
pub mod consts;
pub mod hash;
pub mod metrics;

// Core containers
pub mod alloc; // src/alloc.rs: RawAlloc / SysAlloc / QuotaAlloc
pub mod map; // src/map/{mod,kv,resize,scan}.rs
pub mod seq; // src/seq.rs

// Convenience re-exports
pub use alloc::{QuotaAlloc, RawAlloc, SysAlloc};
pub use config::{MapBuilder, MapConfig};
pub use hash::{bucket_of_key, bucket_of_key_default, hash64, HashKind, HASH_KIND_DEFAULT};
pub use map::{Iter, Map};
pub use seq::Seq;
