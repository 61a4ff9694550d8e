use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use HiveKV::map::Map;
use HiveKV::{metrics, MapBuilder};

/// Simple deterministic PRNG (SplitMix64). Enough for benches; not
/// cryptographic.
#[derive(Clone)]
struct Rng64 {
    state: u64,
}
impl Rng64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// HiveKV micro-benchmark CLI
///
/// Examples:
///   hivekv_bench --n 1000000 --value-size 64
///   hivekv_bench --n 100000 --initial-buckets 4 --json
#[derive(Parser, Debug)]
#[command(name = "hivekv_bench", version, about = "HiveKV micro-bench CLI")]
struct Opt {
    /// Number of distinct keys
    #[arg(long, default_value_t = 100_000)]
    n: usize,

    /// Value payload size (bytes)
    #[arg(long, default_value_t = 64)]
    value_size: usize,

    /// Initial bucket count
    #[arg(long)]
    initial_buckets: Option<usize>,

    /// Load-factor threshold, open interval (0, 1)
    #[arg(long)]
    max_load_factor: Option<f64>,

    /// PRNG seed for key material
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Emit the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
struct Phase {
    ops: usize,
    secs: f64,
    ops_per_sec: f64,
}

impl Phase {
    fn measure(ops: usize, start: Instant) -> Self {
        let secs = start.elapsed().as_secs_f64();
        let ops_per_sec = if secs > 0.0 { ops as f64 / secs } else { 0.0 };
        Self {
            ops,
            secs,
            ops_per_sec,
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct Report {
    n: usize,
    value_size: usize,
    bucket_count: usize,
    load_factor: f64,
    put: Phase,
    get_hit: Phase,
    get_miss: Phase,
    overwrite: Phase,
    remove: Phase,
    map_resizes_total: u64,
    map_rehashed_entries: u64,
    seq_growths_total: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    env_logger::init();
    let opt = Opt::parse();

    let mut builder = MapBuilder::new();
    if let Some(b) = opt.initial_buckets {
        builder = builder.initial_buckets(b);
    }
    if let Some(lf) = opt.max_load_factor {
        builder = builder.max_load_factor(lf);
    }
    let cfg = builder.build();

    metrics::reset();
    let mut map: Map<Vec<u8>, Vec<u8>> = Map::with_config(cfg)?;

    let mut rng = Rng64::new(opt.seed);
    let mut keys: Vec<Vec<u8>> = Vec::with_capacity(opt.n);
    for i in 0..opt.n {
        keys.push(format!("k-{:016x}-{:06}", rng.next_u64(), i).into_bytes());
    }
    let value = vec![0xABu8; opt.value_size];

    // put
    let t = Instant::now();
    for k in &keys {
        map.put(k.clone(), value.clone())?;
    }
    let put = Phase::measure(opt.n, t);

    // get (hits)
    let t = Instant::now();
    let mut hits = 0usize;
    for k in &keys {
        if map.get(k).is_some() {
            hits += 1;
        }
    }
    let get_hit = Phase::measure(opt.n, t);
    if hits != opt.n {
        eprintln!("warning: {} of {} keys missing after put", opt.n - hits, opt.n);
    }

    // get (misses)
    let t = Instant::now();
    for i in 0..opt.n {
        let k = format!("miss-{:06}", i).into_bytes();
        let _ = map.get(&k);
    }
    let get_miss = Phase::measure(opt.n, t);

    // overwrite
    let t = Instant::now();
    for k in &keys {
        map.put(k.clone(), value.clone())?;
    }
    let overwrite = Phase::measure(opt.n, t);

    // remove half
    let t = Instant::now();
    for k in keys.iter().step_by(2) {
        map.remove(k);
    }
    let remove = Phase::measure(opt.n / 2, t);

    let m = metrics::snapshot();
    let report = Report {
        n: opt.n,
        value_size: opt.value_size,
        bucket_count: map.bucket_count(),
        load_factor: map.load_factor(),
        put,
        get_hit,
        get_miss,
        overwrite,
        remove,
        map_resizes_total: m.map_resizes_total,
        map_rehashed_entries: m.map_rehashed_entries,
        seq_growths_total: m.seq_growths_total,
    };

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "n={} value_size={} buckets={} load_factor={:.3}",
            report.n, report.value_size, report.bucket_count, report.load_factor
        );
        for (name, ph) in [
            ("put", &report.put),
            ("get_hit", &report.get_hit),
            ("get_miss", &report.get_miss),
            ("overwrite", &report.overwrite),
            ("remove", &report.remove),
        ] {
            println!(
                "[{:>9}] {:>9} ops in {:>7.3}s, {:>12.0} ops/s",
                name, ph.ops, ph.secs, ph.ops_per_sec
            );
        }
        println!(
            "resizes={} rehashed={} seq_growths={}",
            report.map_resizes_total, report.map_rehashed_entries, report.seq_growths_total
        );
    }
    Ok(())
}
