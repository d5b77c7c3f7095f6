use std::time::Duration;

use spindle::{Easing, TransitionConfig};

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_endpoints_fixed() {
    for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
        assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
    }
}

#[test]
fn test_easing_midpoints() {
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
    assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
    assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    assert!(Easing::EaseInOut.apply(0.2) < 0.2);
    assert!(Easing::EaseInOut.apply(0.8) > 0.8);
}

#[test]
fn test_easing_monotonic() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        let mut prev = 0.0;
        for i in 1..=10 {
            let t = i as f32 / 10.0;
            let val = easing.apply(t);
            assert!(val >= prev, "{:?} not monotonic at t={}", easing, t);
            prev = val;
        }
    }
}

// =============================================================================
// TransitionConfig Tests
// =============================================================================

#[test]
fn test_transition_config_eases_progress() {
    let config = TransitionConfig::new(Duration::from_millis(200), Easing::EaseIn);
    assert!((config.progress_at(Duration::from_millis(100)) - 0.25).abs() < 0.0001);
}

#[test]
fn test_transition_progress_clamped() {
    let config = TransitionConfig::new(Duration::from_millis(100), Easing::Linear);
    assert_eq!(config.progress_at(Duration::ZERO), 0.0);
    assert!((config.progress_at(Duration::from_millis(50)) - 0.5).abs() < 0.0001);
    assert_eq!(config.progress_at(Duration::from_millis(500)), 1.0);
}

#[test]
fn test_zero_duration_is_complete() {
    let config = TransitionConfig::new(Duration::ZERO, Easing::EaseIn);
    assert_eq!(config.progress_at(Duration::ZERO), 1.0);
}
