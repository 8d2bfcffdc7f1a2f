//! Controller error taxonomy.

use thiserror::Error;

use super::state::LifecycleState;
use crate::model::ValidationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    /// No native overlay module on this platform. Expected, not fatal.
    #[error("overlay capability unavailable: {reason}")]
    CapabilityUnavailable { reason: String },

    /// Rejected before any native call.
    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    /// The native surface returned an error or panicked.
    #[error("native call failed during {operation}: {message}")]
    NativeCallFailed {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} is not allowed while {state}")]
    InvalidStateTransition {
        operation: &'static str,
        state: LifecycleState,
    },
}

impl OverlayError {
    /// Operation name for native failures and illegal transitions.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            OverlayError::NativeCallFailed { operation, .. }
            | OverlayError::InvalidStateTransition { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
