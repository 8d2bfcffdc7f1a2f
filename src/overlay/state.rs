//! Lifecycle state of the overlay controller.

use std::fmt;

/// Where the controller is in its lifecycle.
///
/// ```text
/// Uninitialized → Initialized → (PermissionGranted | PermissionDenied)
///               → Showing ⇄ Hidden → Released
/// ```
///
/// `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
    PermissionGranted,
    PermissionDenied,
    Showing,
    Hidden,
    Released,
}

impl LifecycleState {
    /// A native binding is held in this state.
    pub fn is_bound(self) -> bool {
        !matches!(
            self,
            LifecycleState::Uninitialized | LifecycleState::Released
        )
    }

    /// Bound, but nothing has been shown yet.
    pub fn is_pre_show(self) -> bool {
        matches!(
            self,
            LifecycleState::Initialized
                | LifecycleState::PermissionGranted
                | LifecycleState::PermissionDenied
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Initialized => "initialized",
            LifecycleState::PermissionGranted => "permission-granted",
            LifecycleState::PermissionDenied => "permission-denied",
            LifecycleState::Showing => "showing",
            LifecycleState::Hidden => "hidden",
            LifecycleState::Released => "released",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
