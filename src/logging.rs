// ABOUTME: Logging configuration and structured logging setup for the rep counter
// ABOUTME: Loads level, format, and switches from the environment and installs one fmt layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! Loaded with the same environment readers as `EngineConfig`, so a bad
//! `LOG_FORMAT` behaves like a bad threshold: a warning and the default.

use std::fmt;
use std::io;
use std::str::FromStr;

use anyhow::Result;
use repcount_core::config::{env_flag, env_parse_or, env_string_or};
use repcount_core::constants::{log_env, service_names};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `JSON` lines for log shipping
    Json,
    /// Multi-field human output
    #[default]
    Pretty,
    /// One line per event, no target
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

/// Where and how log events are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Source file and line on each event
    pub include_location: bool,
    /// Span open and close events; session spans carry `session.id`
    pub include_spans: bool,
    /// Service name on the startup event
    pub service_name: String,
    /// Service version on the startup event
    pub service_version: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: log_env::DEFAULT_FILTER.to_owned(),
            format: LogFormat::default(),
            include_location: false,
            include_spans: false,
            service_name: service_names::REPCOUNT.to_owned(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Load from `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`,
    /// `LOG_INCLUDE_SPANS`, `SERVICE_NAME` and `SERVICE_VERSION`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env_string_or(log_env::FILTER, &defaults.level),
            format: env_parse_or(log_env::FORMAT, defaults.format),
            include_location: env_flag(log_env::INCLUDE_LOCATION, defaults.include_location),
            include_spans: env_flag(log_env::INCLUDE_SPANS, defaults.include_spans),
            service_name: env_string_or(log_env::SERVICE_NAME, &defaults.service_name),
            service_version: env_string_or(log_env::SERVICE_VERSION, &defaults.service_version),
        }
    }

    /// Override the filter, e.g. from a `--verbose` flag
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.level)
            .unwrap_or_else(|_| EnvFilter::new(log_env::DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(self.output_layer())
            .with(filter)
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            log.level = %self.level,
            log.format = %self.format,
            "Logging initialized"
        );
        Ok(())
    }

    fn output_layer(&self) -> BoxedLayer {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let base = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Json => base.json().boxed(),
            LogFormat::Pretty => base.with_target(true).boxed(),
            LogFormat::Compact => base.compact().with_target(false).boxed(),
        }
    }
}

/// Install logging configured from the environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
