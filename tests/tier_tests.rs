// Host-side tests for the pure performance classifier.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
#[path = "../src/core/tier.rs"]
mod tier;

use tier::*;

#[test]
fn desktop_profile_classifies_high() {
    let profile = DeviceProfile {
        logical_cores: 8,
        memory_gb: 8.0,
        network: Some(NetworkKind::FourG),
        is_mobile: false,
        is_legacy: false,
    };
    let c = classify(&profile);
    assert_eq!(c.tier, Tier::High);
    // 50 baseline + 32 cores (capped) + 20 memory (capped) + 10 network
    assert_eq!(c.score, 112);

    let params = c.tier.params();
    assert_eq!(params.interval_ms, 30.0);
    assert_eq!(params.max_sparkles, 50);
}

#[test]
fn low_end_mobile_profile_classifies_minimal() {
    let profile = DeviceProfile {
        logical_cores: 2,
        memory_gb: 1.0,
        network: Some(NetworkKind::SlowTwoG),
        is_mobile: true,
        is_legacy: true,
    };
    let c = classify(&profile);
    assert_eq!(c.tier, Tier::Minimal);

    let params = c.tier.params();
    assert_eq!(params.interval_ms, 200.0);
    assert_eq!(params.max_sparkles, 8);
}

#[test]
fn default_profile_classifies_medium() {
    // The browser fallbacks (2 cores, 2 GB, no network hint) land just
    // below the high threshold.
    let c = classify(&DeviceProfile::default());
    assert_eq!(c.score, 74);
    assert_eq!(c.tier, Tier::Medium);
}

#[test]
fn tier_thresholds_are_inclusive() {
    let base = DeviceProfile {
        logical_cores: 0,
        memory_gb: 0.0,
        network: None,
        is_mobile: false,
        is_legacy: false,
    };
    // Baseline alone sits exactly on the medium threshold.
    assert_eq!(classify(&base).score, 50);
    assert_eq!(classify(&base).tier, Tier::Medium);

    // 2 cores + 2.25 GB reaches exactly 75.
    let exactly_high = DeviceProfile {
        logical_cores: 2,
        memory_gb: 2.25,
        ..base.clone()
    };
    assert_eq!(classify(&exactly_high).score, 75);
    assert_eq!(classify(&exactly_high).tier, Tier::High);

    let low = DeviceProfile {
        network: Some(NetworkKind::TwoG),
        ..base.clone()
    };
    assert_eq!(classify(&low).score, 40);
    assert_eq!(classify(&low).tier, Tier::Low);

    let minimal = DeviceProfile {
        network: Some(NetworkKind::SlowTwoG),
        is_mobile: true,
        ..base
    };
    assert_eq!(classify(&minimal).score, 15);
    assert_eq!(classify(&minimal).tier, Tier::Minimal);
}

#[test]
fn core_and_memory_contributions_are_capped() {
    let many_cores = DeviceProfile {
        logical_cores: 64,
        ..DeviceProfile::default()
    };
    let four_cores = DeviceProfile {
        logical_cores: 4,
        ..DeviceProfile::default()
    };
    assert_eq!(classify(&many_cores).score, classify(&four_cores).score);

    let huge_memory = DeviceProfile {
        memory_gb: 64.0,
        ..DeviceProfile::default()
    };
    let five_gb = DeviceProfile {
        memory_gb: 5.0,
        ..DeviceProfile::default()
    };
    assert_eq!(classify(&huge_memory).score, classify(&five_gb).score);
}

#[test]
fn tier_parameter_table_matches_design() {
    for (tier, interval, max, size, duration) in [
        (Tier::High, 30.0, 50, 8.0, 1500.0),
        (Tier::Medium, 60.0, 30, 6.0, 1200.0),
        (Tier::Low, 120.0, 15, 4.0, 1000.0),
        (Tier::Minimal, 200.0, 8, 3.0, 800.0),
    ] {
        let p = tier.params();
        assert_eq!(p.interval_ms, interval);
        assert_eq!(p.max_sparkles, max);
        assert_eq!(p.base_size_px, size);
        assert_eq!(p.base_duration_ms, duration);
    }
}

#[test]
fn mobile_user_agent_detection() {
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15"
    ));
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36"
    ));
    assert!(!is_mobile_user_agent(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36"
    ));
    assert!(!is_mobile_user_agent(
        "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0"
    ));
}

#[test]
fn legacy_device_detection() {
    // Known old platforms regardless of hardware.
    assert!(is_legacy_device(
        "Mozilla/5.0 (Mobile; Windows Phone 8.1; IEMobile/11.0)",
        true,
        8,
        8.0
    ));
    // Modern mobile with weak hardware.
    assert!(is_legacy_device("Mozilla/5.0 (Linux; Android 9)", true, 2, 4.0));
    assert!(is_legacy_device("Mozilla/5.0 (Linux; Android 9)", true, 4, 2.0));
    // Modern mobile with decent hardware is not legacy.
    assert!(!is_legacy_device(
        "Mozilla/5.0 (Linux; Android 13)",
        true,
        8,
        6.0
    ));
    // Weak desktop hardware is not legacy either.
    assert!(!is_legacy_device(
        "Mozilla/5.0 (Windows NT 10.0)",
        false,
        2,
        2.0
    ));
}

#[test]
fn effective_type_parsing() {
    assert_eq!(
        NetworkKind::from_effective_type("4g"),
        Some(NetworkKind::FourG)
    );
    assert_eq!(
        NetworkKind::from_effective_type("3g"),
        Some(NetworkKind::ThreeG)
    );
    assert_eq!(
        NetworkKind::from_effective_type("2g"),
        Some(NetworkKind::TwoG)
    );
    assert_eq!(
        NetworkKind::from_effective_type("slow-2g"),
        Some(NetworkKind::SlowTwoG)
    );
    assert_eq!(NetworkKind::from_effective_type("5g"), None);
    assert_eq!(NetworkKind::from_effective_type(""), None);
}
