// ABOUTME: Configuration types shared across the workspace
// ABOUTME: Contains EngineConfig and ThresholdConfig used by the state machine and processing loop

/// Engine thresholds, confidence floor, and tick intervals
pub mod engine;
/// Environment variable readers with default fallback
pub mod environment;

pub use engine::{EngineConfig, ThresholdConfig};
pub use environment::{env_flag, env_parse_or, env_string_or};
