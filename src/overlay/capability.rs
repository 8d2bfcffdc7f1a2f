//! Seams to the native overlay surface.
//!
//! The controller only ever talks to these traits. A native surface
//! implements [`OverlayCapability`]; a [`CapabilityProvider`] decides
//! whether one exists on the running platform.

use thiserror::Error;

use crate::platform::Platform;

/// Host process information passed to the surface at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Application identifier (package name, bundle id).
    pub app_id: String,
    /// Where the "application settings" remediation should send the user.
    /// `None` means `package:<app_id>`.
    pub settings_uri: Option<String>,
}

impl HostContext {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            settings_uri: None,
        }
    }

    pub fn with_settings_uri(mut self, uri: impl Into<String>) -> Self {
        self.settings_uri = Some(uri.into());
        self
    }

    /// Target opened by the application settings remediation.
    pub fn settings_target(&self) -> String {
        match &self.settings_uri {
            Some(uri) => uri.clone(),
            None => format!("package:{}", self.app_id),
        }
    }
}

/// Failure reported by a native surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The surface has no entry point for this call.
    #[error("not supported by this surface")]
    Unsupported,
    #[error("{0}")]
    Native(String),
}

/// A native overlay surface.
///
/// Implementations are not trusted: any call may return an error or
/// panic, and the controller reports both the same way. Not `Send`; the
/// owning thread makes every call.
pub trait OverlayCapability {
    /// One-time association with the host process.
    fn bind(&mut self, host: &HostContext) -> Result<(), CapabilityError>;

    fn is_bound(&self) -> bool;

    /// Draw (or redraw) the reticle with these parameters.
    fn render(
        &mut self,
        style: &str,
        color: &str,
        size: u32,
        thickness: u32,
        show_center_dot: bool,
        opacity: f64,
    ) -> Result<(), CapabilityError>;

    fn stop_rendering(&mut self) -> Result<(), CapabilityError>;

    fn has_overlay_permission(&self) -> Result<bool, CapabilityError>;

    /// Start the platform permission flow. Returns once the flow is handed
    /// off; the grant is observed later through
    /// [`has_overlay_permission`](Self::has_overlay_permission).
    fn request_overlay_permission(&mut self) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported)
    }

    /// Release every native resource. The surface is unusable afterwards.
    fn teardown(&mut self) -> Result<(), CapabilityError>;
}

/// Discovers the native overlay capability.
pub trait CapabilityProvider {
    /// Name used in logs and "unavailable" reasons.
    fn name(&self) -> &str;

    /// Whether this provider can work on `platform` at all.
    fn supports(&self, _platform: Platform) -> bool {
        true
    }

    /// A fresh, unbound surface, or `None` when the native module is
    /// missing.
    fn acquire(&self) -> Option<Box<dyn OverlayCapability>>;
}
