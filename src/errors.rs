// ABOUTME: Typed error taxonomy for goal calculation, persistence, and update coordination
// ABOUTME: All variants are recoverable at the caller; nothing below the service layer panics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Wellness

//! # Error Taxonomy
//!
//! Every failure mode of the engine surfaces as a [`GoalError`] variant.
//! The propagation policy: failures below the service layer never escape
//! as panics, and the caller always has a safe value to render - either
//! freshly calculated goals, medically bounded fallback goals, or the
//! previously persisted goals.

use thiserror::Error;
use uuid::Uuid;

/// Result alias for engine operations
pub type GoalResult<T> = Result<T, GoalError>;

/// Unified error type for goal engine operations
#[derive(Debug, Error)]
pub enum GoalError {
    /// The user's profile could not be loaded after exhausting retries.
    #[error("profile for user {user_id} could not be loaded: {source}")]
    ProfileNotFound {
        /// User whose profile fetch failed
        user_id: Uuid,
        /// Underlying store failure
        #[source]
        source: anyhow::Error,
    },

    /// A calculator produced an unusable result (non-finite arithmetic).
    /// Deterministic, so never retried; routed to fallback upstream.
    #[error("goal calculation failed for user {user_id}: {reason}")]
    CalculationFailed {
        /// User whose calculation failed
        user_id: Uuid,
        /// What went wrong
        reason: String,
    },

    /// Computed goals failed post-calculation domain validation.
    /// Violations are reported, never silently coerced.
    #[error("calculated goals failed validation: {}", issues.join("; "))]
    ValidationFailed {
        /// Individual validation issues found
        issues: Vec<String>,
    },

    /// Persisting goals failed after exhausting retries. The caller keeps
    /// the previously displayed goals.
    #[error("failed to persist goals for user {user_id} after {attempts} attempts: {source}")]
    StorageFailed {
        /// User whose goals could not be persisted
        user_id: Uuid,
        /// Attempts made before giving up
        attempts: u32,
        /// Underlying store failure
        #[source]
        source: anyhow::Error,
    },

    /// Another profile update is already in flight for this user. Never
    /// queued; the caller must re-issue after the current one completes.
    #[error("another profile update is already in flight for user {user_id}")]
    ConcurrentUpdate {
        /// User with the in-flight update
        user_id: Uuid,
    },

    /// Anything outside the taxonomy above.
    #[error("unexpected goal engine failure: {0}")]
    Unexpected(String),
}

impl GoalError {
    /// Whether re-issuing the same operation later can succeed.
    ///
    /// Calculation and validation failures are deterministic for a given
    /// profile; everything else is worth retrying once conditions change.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::ProfileNotFound { .. } | Self::StorageFailed { .. } | Self::ConcurrentUpdate { .. } => true,
            Self::CalculationFailed { .. } | Self::ValidationFailed { .. } | Self::Unexpected(_) => false,
        }
    }
}

/// Configuration validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting is outside its usable range
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why the value is unusable
        reason: String,
    },
}
