//! Overlay lifecycle: native seams, controller and permission remediation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   init()    ┌────────────────────┐   acquire()   ┌───────────────┐
//! │    Caller    │ ──────────▶ │ OverlayController  │ ────────────▶ │ Capability-   │
//! │ (dispatcher) │ show/update │  state + config    │               │ Provider      │
//! └──────────────┘    hide     └─────────┬──────────┘               └───────────────┘
//!                                        │ guarded(render, ...)
//!                                        ▼
//!                              ┌────────────────────┐
//!                              │ OverlayCapability  │  (native surface)
//!                              └────────────────────┘
//! ```

pub mod capability;
pub mod controller;
pub mod error;
mod guard;
pub mod remediation;
pub mod state;

pub use capability::{CapabilityError, CapabilityProvider, HostContext, OverlayCapability};
pub use controller::{InitOutcome, OverlayController};
pub use error::OverlayError;
pub use remediation::{
    default_strategies, PermissionRequest, RemediationKind, SettingsLauncher,
    SystemSettingsLauncher,
};
pub use state::LifecycleState;
