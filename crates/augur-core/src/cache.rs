//! Memoizing cache for time-series forecasts
//!
//! Forecasts are pure, so a result can be reused whenever the same series is
//! forecast again with the same horizon, label and tuning. Keys are the hex
//! SHA-256 of those inputs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::SeriesConfig;
use crate::forecast::TimeSeriesForecaster;
use crate::models::{ForecastResult, TimeSeriesPoint};

/// Hit/miss counters and current size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Default entry bound for [`ForecastCache::new`]
pub const DEFAULT_CAPACITY: usize = 1024;

/// Thread-safe forecast cache.
///
/// Holds at most `capacity` results; inserting into a full cache evicts an
/// arbitrary entry.
#[derive(Debug)]
pub struct ForecastCache {
    entries: Mutex<HashMap<String, ForecastResult>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache bounded to `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached forecast for these inputs, computing it on a miss
    pub fn get_or_compute(
        &self,
        forecaster: &TimeSeriesForecaster,
        historical: &[TimeSeriesPoint],
        periods_ahead: usize,
        metric: &str,
    ) -> ForecastResult {
        let key = cache_key(forecaster.config(), historical, periods_ahead, metric);

        if let Some(hit) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Forecast cache hit for {} ({})", metric, &key[..12]);
            return hit.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = forecaster.forecast(historical, periods_ahead, metric);

        let mut entries = self.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(evict) = entries.keys().next().cloned() {
                entries.remove(&evict);
            }
        }
        entries.insert(key, result.clone());
        result
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all entries; counters are kept
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ForecastResult>> {
        // A poisoned map still holds valid finished forecasts
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Hex SHA-256 over tuning, metric, horizon and every (date, value) pair
pub fn cache_key(
    config: &SeriesConfig,
    historical: &[TimeSeriesPoint],
    periods_ahead: usize,
    metric: &str,
) -> String {
    let mut hasher = Sha256::new();
    hash_config(&mut hasher, config);
    hasher.update(metric.as_bytes());
    hasher.update([0u8]);
    hasher.update((periods_ahead as u64).to_le_bytes());
    for point in historical {
        hasher.update(point.date.to_string().as_bytes());
        hasher.update(point.value.to_bits().to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

fn hash_config(hasher: &mut Sha256, config: &SeriesConfig) {
    // Destructured so a new tuning field cannot be left out of the key
    let SeriesConfig {
        smoothing_alpha,
        linear_weight,
        smoothed_weight,
        uncertainty_growth,
        z_score,
        confidence_decay,
        confidence_floor,
        confidence_cap,
        trend_threshold_pct,
        seasonality_period,
        seasonality_threshold,
        min_observations,
        period_days,
    } = config;

    for value in [
        smoothing_alpha,
        linear_weight,
        smoothed_weight,
        uncertainty_growth,
        z_score,
        confidence_decay,
        confidence_floor,
        confidence_cap,
        trend_threshold_pct,
        seasonality_threshold,
    ] {
        hasher.update(value.to_bits().to_le_bytes());
    }
    hasher.update((*seasonality_period as u64).to_le_bytes());
    hasher.update((*min_observations as u64).to_le_bytes());
    hasher.update(period_days.to_le_bytes());
}
