use anyhow::Result;
use std::collections::HashSet;

use HiveKV::hash::bucket_of_key;
use HiveKV::map::Map;
use HiveKV::MapBuilder;

#[test]
fn scan_yields_every_entry_exactly_once() -> Result<()> {
    let mut map: Map<u64, u64> = Map::new()?;
    for i in 0..50u64 {
        map.put(i, i + 1000)?;
    }

    let mut seen = HashSet::new();
    let mut count = 0usize;
    for (k, v) in &map {
        assert_eq!(*v, *k + 1000);
        assert!(seen.insert(*k), "key {} yielded twice", k);
        count += 1;
    }
    assert_eq!(count, map.len());
    Ok(())
}

#[test]
fn scan_of_empty_map_is_empty() -> Result<()> {
    let map: Map<u64, u64> = Map::new()?;
    assert_eq!(map.iter().count(), 0);
    Ok(())
}

#[test]
fn within_bucket_order_is_insertion_order() -> Result<()> {
    // Wide array and few entries so no resize interferes below.
    let cfg = MapBuilder::from_default().initial_buckets(64).build();
    let mut map: Map<u64, u64> = Map::with_config(cfg)?;

    // Pick three keys that share one bucket under the map's own hash.
    let kind = map.hash_kind();
    let buckets = map.bucket_count();
    let target = bucket_of_key(kind, &0u64, buckets);
    let mut cohort = vec![0u64];
    let mut i = 1u64;
    while cohort.len() < 3 {
        if bucket_of_key(kind, &i, buckets) == target {
            cohort.push(i);
        }
        i += 1;
    }

    for (n, k) in cohort.iter().enumerate() {
        map.put(*k, n as u64)?;
    }

    let order: Vec<u64> = map
        .iter()
        .filter(|&(k, _)| cohort.contains(k))
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(order, vec![0, 1, 2], "cohort must scan in insertion order");
    Ok(())
}
