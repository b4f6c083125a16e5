// ABOUTME: Environment variable readers shared by engine and logging configuration
// ABOUTME: Unset values take the default; unparseable values warn and take the default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::str::FromStr;

use tracing::warn;

/// Parse an environment variable, falling back to `default` when unset or unparseable
#[must_use]
pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(
                env.key = %key,
                env.value = %raw,
                "Unparseable configuration value, using default"
            );
            default
        }),
        Err(_) => default,
    }
}

/// Read a string variable, falling back to `default` when unset or blank
#[must_use]
pub fn env_string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|raw| raw.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Read an on/off switch
///
/// `1`, `true`, `yes` and `on` enable it, `0`, `false`, `no` and `off`
/// disable it, anything else warns and keeps `default`.
#[must_use]
pub fn env_flag(key: &str, default: bool) -> bool {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(env.key = %key, env.value = %raw, "Unrecognised switch value, using default");
            default
        }
    }
}
