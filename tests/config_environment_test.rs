// ABOUTME: Tests for environment-driven engine and logging configuration
// ABOUTME: Defaults, overrides, unparseable fallbacks, and validation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use repcount::config::{env_flag, env_string_or, EngineConfig, ThresholdConfig};
use repcount::constants::{env_config, log_env};
use repcount::errors::ConfigError;
use repcount::logging::{LogFormat, LoggingConfig};
use repcount::models::TrackedArm;
use serial_test::serial;

const ENGINE_VARS: [&str; 6] = [
    env_config::UPPER_THRESHOLD_DEG,
    env_config::LOWER_THRESHOLD_DEG,
    env_config::MIN_VISIBILITY,
    env_config::TRACKED_ARM,
    env_config::FRAME_INTERVAL_MS,
    env_config::FORM_BASELINE,
];

fn clear_engine_env() {
    for key in ENGINE_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_engine_env();
    let config = EngineConfig::from_env().unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.thresholds, ThresholdConfig::default());
    assert!((config.min_visibility - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.tracked_arm, TrackedArm::Left);
    assert_eq!(config.frame_interval(), Duration::from_millis(33));
    assert_eq!(config.clock_interval(), Duration::from_secs(1));
    assert_eq!(config.form_baseline, 85);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_engine_env();
    env::set_var(env_config::UPPER_THRESHOLD_DEG, "150");
    env::set_var(env_config::LOWER_THRESHOLD_DEG, " 60.5 ");
    env::set_var(env_config::MIN_VISIBILITY, "0.7");
    env::set_var(env_config::TRACKED_ARM, "Right");
    env::set_var(env_config::FRAME_INTERVAL_MS, "50");
    env::set_var(env_config::FORM_BASELINE, "90");

    let config = EngineConfig::from_env().unwrap();
    clear_engine_env();

    assert!((config.thresholds.upper_degrees - 150.0).abs() < f64::EPSILON);
    assert!((config.thresholds.lower_degrees - 60.5).abs() < f64::EPSILON);
    assert!((config.min_visibility - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.tracked_arm, TrackedArm::Right);
    assert_eq!(config.frame_interval_ms, 50);
    assert_eq!(config.form_baseline, 90);
}

#[test]
#[serial]
fn test_unparseable_values_fall_back_to_defaults() {
    clear_engine_env();
    env::set_var(env_config::UPPER_THRESHOLD_DEG, "very high");
    env::set_var(env_config::TRACKED_ARM, "both");
    env::set_var(env_config::FRAME_INTERVAL_MS, "-5");

    let config = EngineConfig::from_env().unwrap();
    clear_engine_env();

    assert_eq!(config, EngineConfig::default());
}

#[test]
#[serial]
fn test_inverted_thresholds_are_rejected() {
    clear_engine_env();
    env::set_var(env_config::UPPER_THRESHOLD_DEG, "40");
    env::set_var(env_config::LOWER_THRESHOLD_DEG, "120");

    let result = EngineConfig::from_env();
    clear_engine_env();

    assert!(matches!(result, Err(ConfigError::InvalidThresholds { .. })));
}

#[test]
#[serial]
fn test_out_of_range_values_are_rejected() {
    clear_engine_env();
    env::set_var(env_config::MIN_VISIBILITY, "1.5");
    let visibility = EngineConfig::from_env();
    clear_engine_env();
    assert!(matches!(
        visibility,
        Err(ConfigError::ValueOutOfRange { field: "min_visibility", .. })
    ));

    env::set_var(env_config::FRAME_INTERVAL_MS, "0");
    let interval = EngineConfig::from_env();
    clear_engine_env();
    assert!(matches!(
        interval,
        Err(ConfigError::ValueOutOfRange { field: "frame_interval_ms", .. })
    ));

    env::set_var(env_config::FORM_BASELINE, "101");
    let baseline = EngineConfig::from_env();
    clear_engine_env();
    assert!(matches!(
        baseline,
        Err(ConfigError::ValueOutOfRange { field: "form_baseline", .. })
    ));
}

#[test]
fn test_engine_config_round_trips_through_json() {
    let config = EngineConfig {
        tracked_arm: TrackedArm::Right,
        ..EngineConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""tracked_arm":"right""#));
    let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

const LOG_VARS: [&str; 6] = [
    log_env::FILTER,
    log_env::FORMAT,
    log_env::INCLUDE_LOCATION,
    log_env::INCLUDE_SPANS,
    log_env::SERVICE_NAME,
    log_env::SERVICE_VERSION,
];

fn clear_log_env() {
    for key in LOG_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    clear_log_env();
    env::set_var(log_env::FILTER, "repcount=debug");
    env::set_var(log_env::FORMAT, "JSON");
    env::set_var(log_env::INCLUDE_SPANS, "yes");
    env::set_var(log_env::INCLUDE_LOCATION, "0");
    let config = LoggingConfig::from_env();
    clear_log_env();

    assert_eq!(config.level, "repcount=debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_spans);
    assert!(!config.include_location);
    assert_eq!(config.service_name, "repcount");

    let defaults = LoggingConfig::from_env();
    assert_eq!(defaults, LoggingConfig::default());
    assert_eq!(defaults.level, "info");
    assert_eq!(defaults.format, LogFormat::Pretty);
    assert_eq!(defaults.with_level("warn").level, "warn");
}

#[test]
#[serial]
fn test_logging_config_falls_back_like_engine_config() {
    clear_log_env();
    env::set_var(log_env::FILTER, "   ");
    env::set_var(log_env::FORMAT, "fancy");
    env::set_var(log_env::INCLUDE_SPANS, "sometimes");
    let config = LoggingConfig::from_env();
    clear_log_env();

    assert_eq!(config, LoggingConfig::default());
}

#[test]
fn test_log_format_parsing() {
    assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
    assert_eq!("Json".parse::<LogFormat>(), Ok(LogFormat::Json));
    assert!("fancy".parse::<LogFormat>().is_err());
    assert_eq!(LogFormat::Compact.to_string(), "compact");
}

#[test]
#[serial]
fn test_environment_switches() {
    const KEY: &str = "REPCOUNT_TEST_SWITCH";
    for (raw, expected) in [("1", true), ("ON", true), ("false", false), (" no ", false)] {
        env::set_var(KEY, raw);
        assert_eq!(env_flag(KEY, !expected), expected, "value {raw:?}");
    }
    env::set_var(KEY, "maybe");
    assert!(env_flag(KEY, true));
    env::remove_var(KEY);
    assert!(!env_flag(KEY, false));
    assert_eq!(env_string_or(KEY, "fallback"), "fallback");
}
