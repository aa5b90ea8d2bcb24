//! lrukv demo harness
//!
//! Runs the same scripted scenarios against any backend implementing the
//! cache contract, printing PASSED/FAILED per check.

use std::process::ExitCode;
use std::thread::sleep;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lrukv::{Cache, CacheConfig, MemoryCache};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// In-process LRU cache
    Lru,
    /// Redis server at $REDIS_URL
    #[cfg(feature = "redis")]
    Redis,
    /// Memcached server at $MEMCACHED_URL
    #[cfg(feature = "memcached")]
    Memcached,
}

#[derive(Parser, Debug)]
#[command(name = "lrukv")]
#[command(about = "Exercise a cache backend with a fixed scenario script")]
struct Args {
    /// Backend to run the scenarios against
    #[arg(value_enum, default_value = "lru")]
    backend: Backend,

    /// Capacity of the in-process cache, replacing $CACHE_CAPACITY (the eviction
    /// scenario assumes 2)
    #[arg(long, default_value_t = 2)]
    capacity: i64,

    /// TTL used by the expiry scenario, in seconds
    #[arg(long, default_value_t = 5)]
    ttl_secs: u64,
}

/// Collects scenario outcomes.
#[derive(Default)]
struct Report {
    failures: usize,
}

impl Report {
    fn check(&mut self, passed: bool, success: &str, failure: &str) {
        if passed {
            println!("PASSED: {}", success);
        } else {
            self.failures += 1;
            println!("FAILED: {}", failure);
        }
    }

    /// Records a failed setup write; successful writes print nothing.
    fn stored(&mut self, key: &str, result: lrukv::Result<()>) -> bool {
        if let Err(err) = &result {
            self.check(false, "", &format!("set {} failed: {}", key, err));
        }
        result.is_ok()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lrukv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = CacheConfig::from_env();

    let (name, cache) = open_backend(&args, &config)?;

    println!("======================================");
    println!("Using Backend: {}", name);
    println!("======================================");

    let ttl = Duration::from_secs(args.ttl_secs);
    let report = tokio::task::spawn_blocking(move || run_scenarios(cache.as_ref(), ttl))
        .await
        .context("scenario task panicked")?;

    println!("\n======================================");
    if report.failures == 0 {
        println!("All scenarios passed for {}", name);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} scenario(s) failed for {}", report.failures, name);
        Ok(ExitCode::FAILURE)
    }
}

fn open_backend(
    args: &Args,
    config: &CacheConfig,
) -> anyhow::Result<(&'static str, Box<dyn Cache<String>>)> {
    match args.backend {
        Backend::Lru => {
            let config = CacheConfig {
                capacity: args.capacity,
                ..config.clone()
            };
            let cache: MemoryCache<String> = MemoryCache::from_config(&config)
                .with_context(|| format!("building cache with capacity {}", config.capacity))?;
            info!(
                capacity = ?cache.capacity(),
                sweeping = cache.is_sweeping(),
                "in-memory cache ready"
            );
            Ok(("In-Memory LRU Cache", Box::new(cache)))
        }
        #[cfg(feature = "redis")]
        Backend::Redis => {
            let cache = lrukv::remote::RedisCache::<String>::open(&config.redis_url)
                .with_context(|| format!("connecting to {}", config.redis_url))?;
            Ok(("Redis Cache", Box::new(cache)))
        }
        #[cfg(feature = "memcached")]
        Backend::Memcached => {
            let cache = lrukv::remote::MemcachedCache::<String>::open(&config.memcached_url)
                .with_context(|| format!("connecting to {}", config.memcached_url))?;
            Ok(("Memcached Cache", Box::new(cache)))
        }
    }
}

fn run_scenarios(cache: &dyn Cache<String>, ttl: Duration) -> Report {
    let mut report = Report::default();
    let forever = Duration::ZERO;

    println!("\n[1] Basic Set & Get");
    let stored = cache.set("TestKey1", "TestData1".to_string(), forever);
    let fetched = cache.get("TestKey1");
    report.check(
        stored.is_ok() && fetched.as_deref() == Ok("TestData1"),
        "Retrieved TestData1",
        &format!("set={:?} get={:?}", stored, fetched),
    );

    println!("\n[2] Overwrite Existing Key");
    let stored = cache.set("TestKey1", "UpdatedData1".to_string(), forever);
    let fetched = cache.get("TestKey1");
    report.check(
        stored.is_ok() && fetched.as_deref() == Ok("UpdatedData1"),
        "Updated value = UpdatedData1",
        &format!("set={:?} get={:?}", stored, fetched),
    );

    println!("\n[3] LRU Eviction Test");
    let first = cache.set("TestKey2", "TestData2".to_string(), forever);
    let second = cache.set("TestKey3", "TestData3".to_string(), forever);
    let filled = report.stored("TestKey2", first) & report.stored("TestKey3", second);
    match cache.get("TestKey1") {
        // A failed write was already reported
        _ if !filled => {}
        Err(err) if err.is_not_found() => println!("PASSED: TestKey1 evicted correctly"),
        // Remote servers have no tiny capacity bound; eviction is informational there
        Ok(_) => warn!("TestKey1 still present; backend did not evict at this size"),
        Err(err) => report.check(false, "", &format!("get failed: {}", err)),
    }

    println!("\n[4] TTL Expiry Test");
    println!("Setting key 'TTLKey' with TTL = {:?}", ttl);
    let stored = cache.set("TTLKey", "TestDataTTL".to_string(), ttl);
    let before = cache.get("TTLKey");
    report.check(
        stored.is_ok() && before.as_deref() == Ok("TestDataTTL"),
        "Retrieved TTLKey before expiry",
        &format!("set={:?} get={:?}", stored, before),
    );
    let wait = ttl + Duration::from_secs(1);
    println!("Waiting {:?} for TTL to expire...", wait);
    sleep(wait);
    let after = cache.get("TTLKey");
    report.check(
        after.as_ref().is_err_and(|err| err.is_not_found()),
        "TTLKey expired",
        &format!("TTL did not expire: {:?}", after),
    );

    println!("\n[5] Delete Test");
    let stored = cache.set("DeleteKey", "DeleteData".to_string(), forever);
    let deleted = cache.delete("DeleteKey");
    let fetched = cache.get("DeleteKey");
    report.check(
        stored.is_ok() && deleted.is_ok() && fetched.is_err(),
        "Delete successful",
        &format!("set={:?} delete={:?} get={:?}", stored, deleted, fetched),
    );

    println!("\n[6] Clear Test");
    let first = cache.set("ClearKey1", "ClearData1".to_string(), forever);
    let second = cache.set("ClearKey2", "ClearData2".to_string(), forever);
    let filled = report.stored("ClearKey1", first) & report.stored("ClearKey2", second);
    let cleared = cache.clear();
    report.check(
        filled
            && cleared.is_ok()
            && cache.get("ClearKey1").is_err()
            && cache.get("ClearKey2").is_err(),
        "Cache cleared successfully",
        &format!("clear={:?}", cleared),
    );

    println!("\n[7] Missing Key Test");
    let missing = cache.get("NonExistingKey");
    report.check(
        missing.as_ref().is_err_and(|err| err.is_not_found()),
        "Missing key handled correctly",
        &format!("missing key returned {:?}", missing),
    );

    report
}
