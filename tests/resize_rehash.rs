use anyhow::Result;

use HiveKV::map::Map;

#[test]
fn doubling_triggers_at_threshold() -> Result<()> {
    let mut map: Map<u64, u64> = Map::new()?;
    assert_eq!(map.bucket_count(), 12);

    // 8 entries stay under the threshold: (i+1)/12 < 0.75 for i < 8
    for i in 0..8u64 {
        map.put(i, i * 10)?;
        assert_eq!(map.bucket_count(), 12, "no growth through entry {}", i + 1);
    }

    // the 9th insert crosses 9/12 = 0.75 -> buckets double before placement
    map.put(8, 80)?;
    assert_eq!(map.bucket_count(), 24);
    assert_eq!(map.len(), 9);

    // every key must still resolve to its unmodified value
    for i in 0..9u64 {
        assert_eq!(map.get(&i).copied(), Some(i * 10), "key {} after resize", i);
    }
    Ok(())
}

#[test]
fn load_factor_invariant_holds_through_growth() -> Result<()> {
    let mut map: Map<u64, Vec<u8>> = Map::new()?;
    for i in 0..1000u64 {
        map.put(i, i.to_le_bytes().to_vec())?;
        assert!(
            map.load_factor() < map.max_load_factor(),
            "after insert {}: {} buckets, {} entries",
            i,
            map.bucket_count(),
            map.len()
        );

        // bucket count only ever doubles from the initial 12
        let mut c = 12usize;
        while c < map.bucket_count() {
            c *= 2;
        }
        assert_eq!(c, map.bucket_count(), "bucket count off the doubling path");
    }

    assert_eq!(map.len(), 1000);
    for i in 0..1000u64 {
        assert_eq!(map.get_copy(&i), Some(i.to_le_bytes().to_vec()));
    }
    Ok(())
}

#[test]
fn updates_do_not_grow_the_table() -> Result<()> {
    let mut map: Map<u64, u64> = Map::new()?;
    for i in 0..8u64 {
        map.put(i, i)?;
    }
    let buckets = map.bucket_count();

    // rewriting the same 8 keys many times never crosses the threshold
    for round in 0..100u64 {
        for i in 0..8u64 {
            map.put(i, round)?;
        }
    }
    assert_eq!(map.bucket_count(), buckets);
    assert_eq!(map.len(), 8);
    Ok(())
}
