// ABOUTME: Engine configuration with documented defaults for retry, debounce, and staleness
// ABOUTME: Typed config structs validated once at composition time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! Engine configuration.
//!
//! All tunable behavior flows from these structs; nothing in the services
//! reads ad-hoc literals. Defaults match the documented product behavior:
//! 3 attempts with 500ms-4000ms exponential backoff, a 2000ms debounce
//! window, a 24h staleness horizon, and a 100-entry trigger history.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Retry behavior for store-facing operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per operation (fetch and persist independently)
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds
    pub initial_delay_ms: u64,
    /// Backoff cap, in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 4_000,
        }
    }
}

/// Debounce behavior for the recalculation trigger service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet window after the last profile edit, in milliseconds
    pub window_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { window_ms: 2_000 }
    }
}

/// When previously calculated goals are considered stale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StalenessConfig {
    /// Goals older than this many hours are recalculated
    pub max_age_hours: i64,
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self { max_age_hours: 24 }
    }
}

/// Diagnostic history sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum retained trigger events; oldest evicted first
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Retry behavior for store operations
    pub retry: RetryConfig,
    /// Debounce window for recalculation triggers
    pub debounce: DebounceConfig,
    /// Staleness horizon for persisted goals
    pub staleness: StalenessConfig,
    /// Trigger history sizing
    pub history: HistoryConfig,
}

impl EngineConfig {
    /// Validate the configuration once at composition time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any unusable setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                reason: "must be at least 1".into(),
            });
        }
        if self.retry.initial_delay_ms > self.retry.max_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "retry.initial_delay_ms",
                reason: format!(
                    "initial delay {}ms exceeds cap {}ms",
                    self.retry.initial_delay_ms, self.retry.max_delay_ms
                ),
            });
        }
        if self.staleness.max_age_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "staleness.max_age_hours",
                reason: "must be positive".into(),
            });
        }
        if self.history.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.capacity",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
