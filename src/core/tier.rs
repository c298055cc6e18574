//! Device performance classification.
//!
//! Browser signals are read by the glue layer and handed in as a
//! [`DeviceProfile`], so classification stays pure and can be exercised
//! host-side with synthetic profiles.

// Heuristic scoring weights. The score starts at a neutral baseline and is
// adjusted by hardware, network and user-agent signals.
pub const BASELINE_SCORE: i32 = 50;
pub const CORE_POINTS: i32 = 8; // per logical core
pub const CORE_POINTS_CAP: i32 = 32;
pub const MEMORY_POINTS_PER_GB: f64 = 4.0;
pub const MEMORY_POINTS_CAP: i32 = 20;
pub const MOBILE_PENALTY: i32 = 15;
pub const LEGACY_PENALTY: i32 = 25;

// Score thresholds (score >= threshold selects the tier).
pub const HIGH_THRESHOLD: i32 = 75;
pub const MEDIUM_THRESHOLD: i32 = 50;
pub const LOW_THRESHOLD: i32 = 25;

/// Emission aggressiveness bucket selected by estimated device capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
    Low,
    Minimal,
}

/// The parameter tuple a tier maps to. These are the starting values; the
/// frame-rate sampler and the battery probe adjust them at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierParams {
    /// Minimum time between two accepted spawns.
    pub interval_ms: f64,
    /// Cap on concurrently live sparkles.
    pub max_sparkles: usize,
    pub base_size_px: f32,
    pub base_duration_ms: f64,
}

impl Tier {
    pub fn params(self) -> TierParams {
        match self {
            Tier::High => TierParams {
                interval_ms: 30.0,
                max_sparkles: 50,
                base_size_px: 8.0,
                base_duration_ms: 1500.0,
            },
            Tier::Medium => TierParams {
                interval_ms: 60.0,
                max_sparkles: 30,
                base_size_px: 6.0,
                base_duration_ms: 1200.0,
            },
            Tier::Low => TierParams {
                interval_ms: 120.0,
                max_sparkles: 15,
                base_size_px: 4.0,
                base_duration_ms: 1000.0,
            },
            Tier::Minimal => TierParams {
                interval_ms: 200.0,
                max_sparkles: 8,
                base_size_px: 3.0,
                base_duration_ms: 800.0,
            },
        }
    }
}

/// Network quality bucket as reported by `connection.effectiveType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkKind {
    FourG,
    ThreeG,
    TwoG,
    SlowTwoG,
}

impl NetworkKind {
    pub fn from_effective_type(effective_type: &str) -> Option<Self> {
        match effective_type {
            "4g" => Some(NetworkKind::FourG),
            "3g" => Some(NetworkKind::ThreeG),
            "2g" => Some(NetworkKind::TwoG),
            "slow-2g" => Some(NetworkKind::SlowTwoG),
            _ => None,
        }
    }

    fn score_adjustment(self) -> i32 {
        match self {
            NetworkKind::FourG => 10,
            NetworkKind::ThreeG => 5,
            NetworkKind::TwoG => -10,
            NetworkKind::SlowTwoG => -20,
        }
    }
}

/// Snapshot of the device signals the classifier consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceProfile {
    pub logical_cores: u32,
    pub memory_gb: f64,
    pub network: Option<NetworkKind>,
    pub is_mobile: bool,
    pub is_legacy: bool,
}

impl Default for DeviceProfile {
    /// Mirrors the browser-side defaults used when the hint fields are
    /// absent (`hardwareConcurrency || 2`, `deviceMemory || 2`).
    fn default() -> Self {
        Self {
            logical_cores: 2,
            memory_gb: 2.0,
            network: None,
            is_mobile: false,
            is_legacy: false,
        }
    }
}

const MOBILE_UA_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

const LEGACY_UA_MARKERS: &[&str] = &["windows phone", "iemobile", "wpdesktop"];

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS.iter().any(|m| ua.contains(*m))
}

/// Legacy devices draw an extra penalty: known old platforms, or mobile
/// hardware with very few cores or very little memory.
pub fn is_legacy_device(user_agent: &str, is_mobile: bool, logical_cores: u32, memory_gb: f64) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    LEGACY_UA_MARKERS.iter().any(|m| ua.contains(*m))
        || (is_mobile && (logical_cores <= 2 || memory_gb <= 2.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub tier: Tier,
    pub score: i32,
}

pub fn classify(profile: &DeviceProfile) -> Classification {
    let mut score = BASELINE_SCORE;
    score += (profile.logical_cores as i32 * CORE_POINTS).min(CORE_POINTS_CAP);
    score += ((profile.memory_gb * MEMORY_POINTS_PER_GB) as i32).min(MEMORY_POINTS_CAP);
    if let Some(net) = profile.network {
        score += net.score_adjustment();
    }
    if profile.is_mobile {
        score -= MOBILE_PENALTY;
    }
    if profile.is_legacy {
        score -= LEGACY_PENALTY;
    }

    let tier = if score >= HIGH_THRESHOLD {
        Tier::High
    } else if score >= MEDIUM_THRESHOLD {
        Tier::Medium
    } else if score >= LOW_THRESHOLD {
        Tier::Low
    } else {
        Tier::Minimal
    };
    Classification { tier, score }
}
