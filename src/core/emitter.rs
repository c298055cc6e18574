//! Sparkle emitter state machine: throttling, spawn geometry, cap eviction,
//! idempotent expiry and FPS-driven retuning.
//!
//! Timestamps arrive as `f64` milliseconds from the caller, so every
//! transition is deterministic under test. Randomness comes from a seeded
//! per-instance RNG.

use super::tier::{Tier, TierParams};
use glam::Vec2;
use rand::prelude::*;
use std::collections::VecDeque;

/// Cursor jitter applied independently per axis, in pixels.
pub const JITTER_RANGE_PX: f32 = 15.0;
/// Random extra animation time added on top of the tier base duration.
pub const DURATION_SPREAD_MS: f64 = 600.0;
/// Smallest sampled sparkle size.
pub const MIN_SIZE_PX: f32 = 3.0;

// Retune bounds. Emission is never fully disabled: the interval ceiling and
// the count floor are both non-zero.
pub const MIN_INTERVAL_MS: f64 = 30.0;
pub const MAX_INTERVAL_MS: f64 = 200.0;
pub const MIN_MAX_SPARKLES: usize = 8;
pub const MAX_MAX_SPARKLES: usize = 50;

pub const LOW_FPS_THRESHOLD: f64 = 30.0;
pub const HIGH_FPS_THRESHOLD: f64 = 50.0;
pub const RELAX_INTERVAL_FACTOR: f64 = 1.5;
pub const RELAX_COUNT_FACTOR: f64 = 0.8;
pub const TIGHTEN_INTERVAL_FACTOR: f64 = 0.9;
pub const TIGHTEN_COUNT_FACTOR: f64 = 1.1;

// Battery saver: below this charge level the interval is tripled and the cap
// divided by three, with the floors the original effect used.
pub const BATTERY_SAVER_LEVEL: f64 = 0.2;
pub const BATTERY_MIN_INTERVAL_MS: f64 = 150.0;
pub const BATTERY_MIN_SPARKLES: usize = 10;

/// Everything the DOM layer needs to materialize one sparkle.
#[derive(Clone, Debug, PartialEq)]
pub struct SparkleSpec {
    pub id: u64,
    pub position: Vec2,
    pub size_px: f32,
    pub duration_ms: f64,
}

/// Result of feeding one mouse-move event to the emitter.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnOutcome {
    /// Inside the throttle window; no side effect.
    Throttled,
    /// Cap reached: the given number of oldest sparkles were evicted and no
    /// spawn happened this cycle.
    Evicted(usize),
    Spawned(SparkleSpec),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retune {
    Relaxed,
    Tightened,
}

#[derive(Clone, Copy, Debug)]
struct LiveSparkle {
    id: u64,
    spawned_at_ms: f64,
}

pub struct SparkleEmitter {
    tier: Tier,
    params: TierParams,
    /// Oldest first, so cap eviction pops from the front.
    live: VecDeque<LiveSparkle>,
    last_accepted_ms: f64,
    next_id: u64,
    /// Once battery saver kicks in, tightening retunes may not exceed these
    /// values. Relaxing retunes are unaffected.
    battery_ceiling: Option<TierParams>,
    rng: StdRng,
}

impl SparkleEmitter {
    pub fn new(tier: Tier, seed: u64) -> Self {
        Self {
            tier,
            params: tier.params(),
            live: VecDeque::new(),
            last_accepted_ms: f64::NEG_INFINITY,
            next_id: 0,
            battery_ceiling: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn params(&self) -> TierParams {
        self.params
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Feed one mouse-move event at monotonic time `now_ms`.
    ///
    /// The acceptance timestamp is recorded before the cap check, so a
    /// cap-limited cycle still consumes the throttle window.
    pub fn pointer_move(&mut self, now_ms: f64, cursor: Vec2) -> SpawnOutcome {
        if now_ms - self.last_accepted_ms < self.params.interval_ms {
            return SpawnOutcome::Throttled;
        }
        self.last_accepted_ms = now_ms;

        if self.live.len() >= self.params.max_sparkles {
            let excess = self.live.len() - self.params.max_sparkles;
            for _ in 0..excess {
                self.live.pop_front();
            }
            return SpawnOutcome::Evicted(excess);
        }

        let jitter = Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * 2.0 * JITTER_RANGE_PX,
            (self.rng.gen::<f32>() - 0.5) * 2.0 * JITTER_RANGE_PX,
        );
        let size_px =
            self.rng.gen::<f32>() * (self.params.base_size_px - 2.0) + MIN_SIZE_PX;
        let duration_ms =
            self.params.base_duration_ms + self.rng.gen::<f64>() * DURATION_SPREAD_MS;

        let id = self.next_id;
        self.next_id += 1;
        self.live.push_back(LiveSparkle {
            id,
            spawned_at_ms: now_ms,
        });
        SpawnOutcome::Spawned(SparkleSpec {
            id,
            position: cursor + jitter,
            size_px,
            duration_ms,
        })
    }

    /// A removal timer fired (or an insert was rolled back). Returns whether
    /// the sparkle was still live; calling twice for the same id, or after a
    /// purge already dropped it, is a no-op.
    pub fn expire(&mut self, id: u64) -> bool {
        if let Some(idx) = self.live.iter().position(|s| s.id == id) {
            self.live.remove(idx);
            true
        } else {
            false
        }
    }

    /// Page-hidden purge: forget every live sparkle. Returns how many were
    /// dropped; the caller sweeps the matching DOM nodes.
    pub fn purge(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        n
    }

    /// Timestamp of the oldest live sparkle, if any. Diagnostic.
    pub fn oldest_spawned_at_ms(&self) -> Option<f64> {
        self.live.front().map(|s| s.spawned_at_ms)
    }

    /// Asynchronous battery reading. Below [`BATTERY_SAVER_LEVEL`] the
    /// emission parameters are cut down and locked in as a ceiling for
    /// future tightening retunes. Returns whether the saver was applied.
    pub fn apply_battery_level(&mut self, level: f64) -> bool {
        if level >= BATTERY_SAVER_LEVEL {
            return false;
        }
        self.params.interval_ms = (self.params.interval_ms * 3.0).max(BATTERY_MIN_INTERVAL_MS);
        self.params.max_sparkles = (self.params.max_sparkles / 3).max(BATTERY_MIN_SPARKLES);
        self.battery_ceiling = Some(self.params);
        true
    }

    /// Feed one FPS sample from the frame-rate monitor. Low FPS relaxes the
    /// settings (longer interval, smaller cap), high FPS tightens them back,
    /// both within fixed bounds. Returns the direction actually applied.
    pub fn retune(&mut self, fps: f64) -> Option<Retune> {
        let before = self.params;
        if fps < LOW_FPS_THRESHOLD && self.tier != Tier::Minimal {
            self.params.interval_ms =
                (self.params.interval_ms * RELAX_INTERVAL_FACTOR).min(MAX_INTERVAL_MS);
            self.params.max_sparkles = ((self.params.max_sparkles as f64 * RELAX_COUNT_FACTOR)
                as usize)
                .max(MIN_MAX_SPARKLES);
            if self.params != before {
                return Some(Retune::Relaxed);
            }
        } else if fps > HIGH_FPS_THRESHOLD && self.params.interval_ms > MIN_INTERVAL_MS {
            let mut interval =
                (self.params.interval_ms * TIGHTEN_INTERVAL_FACTOR).max(MIN_INTERVAL_MS);
            let mut cap = ((self.params.max_sparkles as f64 * TIGHTEN_COUNT_FACTOR).ceil()
                as usize)
                .min(MAX_MAX_SPARKLES);
            if let Some(ceiling) = self.battery_ceiling {
                interval = interval.max(ceiling.interval_ms);
                cap = cap.min(ceiling.max_sparkles);
            }
            self.params.interval_ms = interval;
            self.params.max_sparkles = cap;
            if self.params != before {
                return Some(Retune::Tightened);
            }
        }
        None
    }
}
