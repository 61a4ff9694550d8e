use anyhow::Result;

use HiveKV::alloc::QuotaAlloc;
use HiveKV::map::Map;
use HiveKV::seq::Seq;

#[test]
fn seq_refused_growth_is_a_clean_no_op() -> Result<()> {
    let quota = QuotaAlloc::new(usize::MAX);
    let mut s: Seq<u64, QuotaAlloc> = Seq::with_capacity_in(2, quota.clone())?;
    s.append(1)?;
    s.append(2)?;

    // Freeze the budget: the next growth must be refused.
    quota.set_limit(quota.used_bytes());
    let err = s.append(3).unwrap_err();
    assert!(err.to_string().contains("refused"), "got: {err:#}");
    assert_eq!(s.as_slice(), &[1, 2], "contents must be intact");
    assert_eq!(s.len(), 2);
    assert_eq!(s.capacity(), 2);

    // Lifting the limit lets the same append succeed.
    quota.set_limit(usize::MAX);
    s.append(3)?;
    assert_eq!(s.as_slice(), &[1, 2, 3]);
    Ok(())
}

#[test]
fn failed_resize_leaves_map_untouched() -> Result<()> {
    let quota = QuotaAlloc::new(usize::MAX);
    let mut map: Map<u64, Vec<u8>, QuotaAlloc> = Map::new_in(quota.clone())?;
    for i in 0..8u64 {
        map.put(i, vec![i as u8; 16])?;
    }
    assert_eq!(map.bucket_count(), 12);

    // The 9th distinct key triggers the doubling; freeze the budget so the
    // new bucket array cannot be allocated.
    quota.set_limit(quota.used_bytes());
    let err = map.put(8, vec![8u8; 16]).unwrap_err();
    assert!(err.to_string().contains("refused"), "got: {err:#}");

    // Entry count, bucket count and every association unchanged.
    assert_eq!(map.len(), 8);
    assert_eq!(map.bucket_count(), 12);
    for i in 0..8u64 {
        assert_eq!(map.get_copy(&i), Some(vec![i as u8; 16]), "key {}", i);
    }
    assert!(map.get(&8).is_none(), "failed put must not insert");

    // Updates need no allocation and still work under the frozen budget.
    map.put(3, vec![0xEE; 16])?;
    assert_eq!(map.get_copy(&3), Some(vec![0xEE; 16]));
    assert_eq!(map.len(), 8);

    // With the budget lifted the same insert succeeds and doubles the array.
    quota.set_limit(usize::MAX);
    map.put(8, vec![8u8; 16])?;
    assert_eq!(map.len(), 9);
    assert_eq!(map.bucket_count(), 24);
    for i in 0..8u64 {
        let want = if i == 3 { vec![0xEE; 16] } else { vec![i as u8; 16] };
        assert_eq!(map.get_copy(&i), Some(want), "key {} after recovery", i);
    }
    Ok(())
}

#[test]
fn quota_returns_to_zero_after_drop() -> Result<()> {
    let quota = QuotaAlloc::new(usize::MAX);
    {
        let mut map: Map<u64, u64, QuotaAlloc> = Map::new_in(quota.clone())?;
        for i in 0..100u64 {
            map.put(i, i)?;
        }
        assert!(quota.used_bytes() > 0);
    }
    assert_eq!(quota.used_bytes(), 0, "all buffers must be returned");
    Ok(())
}
