use anyhow::Result;

use HiveKV::config::{MapBuilder, MapConfig};
use HiveKV::map::Map;

#[test]
fn builder_overrides_take_effect() -> Result<()> {
    let cfg = MapBuilder::from_default()
        .initial_buckets(5)
        .max_load_factor(0.5)
        .build();
    let mut map: Map<u64, u64> = Map::with_config(cfg)?;
    assert_eq!(map.bucket_count(), 5);

    // 1/5 and 2/5 stay under 0.5; (2+1)/5 = 0.6 crosses at the 3rd insert
    map.put(1, 1)?;
    map.put(2, 2)?;
    assert_eq!(map.bucket_count(), 5);
    map.put(3, 3)?;
    assert_eq!(map.bucket_count(), 10);

    for i in 1..=3u64 {
        assert_eq!(map.get(&i).copied(), Some(i));
    }
    Ok(())
}

#[test]
fn invalid_configs_are_refused() {
    let cfg = MapConfig::default().with_initial_buckets(0);
    assert!(Map::<u64, u64>::with_config(cfg).is_err());

    let cfg = MapConfig::default().with_max_load_factor(0.0);
    assert!(Map::<u64, u64>::with_config(cfg).is_err());

    let cfg = MapConfig::default().with_max_load_factor(1.0);
    assert!(Map::<u64, u64>::with_config(cfg).is_err());
}

#[test]
fn env_overrides_are_picked_up() {
    std::env::set_var("HK_INIT_BUCKETS", "7");
    std::env::set_var("HK_MAX_LOAD_FACTOR", "0.6");
    let cfg = MapConfig::from_env();
    assert_eq!(cfg.initial_buckets, 7);
    assert!((cfg.max_load_factor - 0.6).abs() < 1e-9);

    // malformed / out-of-range values keep the defaults
    std::env::set_var("HK_INIT_BUCKETS", "not-a-number");
    std::env::set_var("HK_MAX_LOAD_FACTOR", "1.5");
    let cfg = MapConfig::from_env();
    assert_eq!(cfg.initial_buckets, 12);
    assert!((cfg.max_load_factor - 0.75).abs() < 1e-9);

    std::env::remove_var("HK_INIT_BUCKETS");
    std::env::remove_var("HK_MAX_LOAD_FACTOR");
}
