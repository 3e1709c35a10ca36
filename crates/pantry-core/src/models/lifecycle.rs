// ABOUTME: Recipe lifecycle state machine (Active, Trashed, Purged)
// ABOUTME: Encodes which transitions are allowed, which are no-ops, and which are rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a recipe
///
/// `Purged` is terminal: a purged recipe has no stored record, so the state
/// only ever appears as the target of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Visible in browse, search and match results
    #[default]
    Active,
    /// Soft-deleted, visible only in trash views
    Trashed,
    /// Permanently removed
    Purged,
}

/// Lifecycle operations a caller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Move to trash
    Delete,
    /// Bring back from trash
    Restore,
    /// Remove permanently
    Purge,
}

/// Result of applying an event to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Already in the target state; nothing to write
    Unchanged,
    /// Move to the given state
    MoveTo(LifecycleState),
}

/// An event that is not allowed from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} a recipe that is {from}")]
pub struct LifecycleViolation {
    /// State the recipe was in
    pub from: LifecycleState,
    /// Event that was rejected
    pub event: LifecycleEvent,
}

impl LifecycleState {
    /// Apply an event to this state
    ///
    /// Delete and restore are idempotent. Purge is only allowed from `Trashed`.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleViolation` for purge outside `Trashed` and for any
    /// event on a `Purged` recipe
    pub const fn apply(self, event: LifecycleEvent) -> Result<TransitionOutcome, LifecycleViolation> {
        match (self, event) {
            (Self::Active, LifecycleEvent::Delete) => Ok(TransitionOutcome::MoveTo(Self::Trashed)),
            (Self::Trashed, LifecycleEvent::Restore) => Ok(TransitionOutcome::MoveTo(Self::Active)),
            (Self::Trashed, LifecycleEvent::Purge) => Ok(TransitionOutcome::MoveTo(Self::Purged)),
            (Self::Trashed, LifecycleEvent::Delete) | (Self::Active, LifecycleEvent::Restore) => {
                Ok(TransitionOutcome::Unchanged)
            }
            (Self::Active, LifecycleEvent::Purge) | (Self::Purged, _) => {
                Err(LifecycleViolation { from: self, event })
            }
        }
    }

    /// Persisted representation: the soft-delete flag
    #[must_use]
    pub const fn is_trashed_flag(self) -> bool {
        matches!(self, Self::Trashed)
    }

    /// Rebuild the state of a stored record from its soft-delete flag
    #[must_use]
    pub const fn from_trashed_flag(is_trashed: bool) -> Self {
        if is_trashed {
            Self::Trashed
        } else {
            Self::Active
        }
    }

    /// Lowercase name for logs and messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trashed => "trashed",
            Self::Purged => "purged",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecycleEvent {
    /// Lowercase verb for logs and messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::Purge => "purge",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_and_restore_are_idempotent() {
        assert_eq!(
            LifecycleState::Active.apply(LifecycleEvent::Delete),
            Ok(TransitionOutcome::MoveTo(LifecycleState::Trashed))
        );
        assert_eq!(
            LifecycleState::Trashed.apply(LifecycleEvent::Delete),
            Ok(TransitionOutcome::Unchanged)
        );
        assert_eq!(
            LifecycleState::Trashed.apply(LifecycleEvent::Restore),
            Ok(TransitionOutcome::MoveTo(LifecycleState::Active))
        );
        assert_eq!(
            LifecycleState::Active.apply(LifecycleEvent::Restore),
            Ok(TransitionOutcome::Unchanged)
        );
    }

    #[test]
    fn test_purge_requires_trashed() {
        let violation = LifecycleState::Active
            .apply(LifecycleEvent::Purge)
            .unwrap_err();
        assert_eq!(violation.from, LifecycleState::Active);
        assert_eq!(violation.to_string(), "cannot purge a recipe that is active");

        assert_eq!(
            LifecycleState::Trashed.apply(LifecycleEvent::Purge),
            Ok(TransitionOutcome::MoveTo(LifecycleState::Purged))
        );
    }

    #[test]
    fn test_purged_is_terminal() {
        for event in [
            LifecycleEvent::Delete,
            LifecycleEvent::Restore,
            LifecycleEvent::Purge,
        ] {
            assert!(LifecycleState::Purged.apply(event).is_err());
        }
    }

    #[test]
    fn test_trashed_flag_round_trip() {
        assert!(LifecycleState::Trashed.is_trashed_flag());
        assert_eq!(
            LifecycleState::from_trashed_flag(false),
            LifecycleState::Active
        );
    }
}
