//! The overlay lifecycle controller.
//!
//! Single authority over the native surface. It binds the surface, keeps
//! the lifecycle state, validates every config before forwarding it and
//! reports every native failure as a value.
//!
//! The controller does not check the permission before `show`/`update`.
//! Refusing an unauthorized overlay is the native layer's job; callers
//! sequence `check_permission`/`request_permission` themselves.

use tracing::{debug, info, warn};

use super::capability::{CapabilityProvider, HostContext, OverlayCapability};
use super::error::OverlayError;
use super::guard::guarded;
use super::remediation::{
    default_strategies, PermissionRequest, RemediationKind, SettingsLauncher,
    SystemSettingsLauncher,
};
use super::state::LifecycleState;
use crate::model::{RenderParams, SightConfig};

/// Outcome of a successful [`OverlayController::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The surface was acquired and bound by this call.
    Bound,
    /// Already bound; nothing was done.
    AlreadyBound,
}

/// Owns the native binding, the lifecycle state and the current config.
///
/// Not thread-safe by design: every operation takes `&mut self`, so one
/// owner serializes all calls.
pub struct OverlayController {
    provider: Box<dyn CapabilityProvider>,
    host: HostContext,
    launcher: Box<dyn SettingsLauncher>,
    strategies: Vec<RemediationKind>,
    state: LifecycleState,
    config: Option<SightConfig>,
    handle: Option<Box<dyn OverlayCapability>>,
}

impl OverlayController {
    pub fn new(provider: impl CapabilityProvider + 'static, host: HostContext) -> Self {
        Self {
            provider: Box::new(provider),
            host,
            launcher: Box::new(SystemSettingsLauncher::new()),
            strategies: default_strategies(),
            state: LifecycleState::Uninitialized,
            config: None,
            handle: None,
        }
    }

    /// Replaces the launcher used by [`RemediationKind::AppSettings`].
    pub fn with_settings_launcher(mut self, launcher: impl SettingsLauncher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    /// Replaces the ordered remediation chain.
    pub fn with_strategies(mut self, strategies: Vec<RemediationKind>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    /// Whether a surface is held and reports itself bound.
    pub fn is_bound(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.is_bound())
    }

    /// Last successfully applied config. `None` before the first show and
    /// after release.
    pub fn current_config(&self) -> Option<&SightConfig> {
        self.config.as_ref()
    }

    /// Acquires and binds the native surface.
    ///
    /// A missing native module is an ordinary outcome:
    /// [`OverlayError::CapabilityUnavailable`], state left `Uninitialized`.
    pub fn init(&mut self) -> Result<InitOutcome, OverlayError> {
        match self.state {
            LifecycleState::Released => {
                return Err(self.illegal("init"));
            }
            state if state.is_bound() => {
                debug!(%state, "init: already bound");
                return Ok(InitOutcome::AlreadyBound);
            }
            _ => {}
        }

        let provider = &self.provider;
        let Some(mut capability) = guarded("init", || Ok(provider.acquire()))? else {
            let reason = format!("provider {} offers no overlay surface", provider.name());
            info!(%reason, "overlay capability unavailable");
            return Err(OverlayError::CapabilityUnavailable { reason });
        };

        let host = &self.host;
        guarded("init", || capability.bind(host))?;
        if !capability.is_bound() {
            let message = "surface did not report a binding".to_string();
            warn!(%message, "init failed");
            if let Err(err) = guarded("init", || capability.teardown()) {
                warn!(error = %err, "teardown of unbound surface failed");
            }
            return Err(OverlayError::NativeCallFailed {
                operation: "init",
                message,
            });
        }

        self.handle = Some(capability);
        self.transition(LifecycleState::Initialized);
        Ok(InitOutcome::Bound)
    }

    /// Current overlay grant. `false` when nothing is bound or the query
    /// fails.
    pub fn check_permission(&mut self) -> bool {
        let Some(handle) = self.handle.as_ref() else {
            return false;
        };
        let granted = guarded("check_permission", || handle.has_overlay_permission())
            .unwrap_or(false);
        if self.state.is_pre_show() {
            self.transition(if granted {
                LifecycleState::PermissionGranted
            } else {
                LifecycleState::PermissionDenied
            });
        }
        granted
    }

    /// Starts the permission flow without waiting for the decision.
    ///
    /// Strategies run in order until one hands off; when all fail the last
    /// failure is returned. Poll [`check_permission`](Self::check_permission)
    /// afterwards.
    pub fn request_permission(&mut self) -> Result<PermissionRequest, OverlayError> {
        if self.state == LifecycleState::Released {
            return Err(self.illegal("request_permission"));
        }
        if self.check_permission() {
            info!("overlay permission already granted");
            return Ok(PermissionRequest::AlreadyGranted);
        }

        let mut last_error = None;
        for kind in self.strategies.clone() {
            match self.run_strategy(kind) {
                Ok(()) => {
                    info!(strategy = %kind, "overlay permission requested");
                    return Ok(PermissionRequest::Requested(kind));
                }
                Err(err) => {
                    warn!(strategy = %kind, error = %err, "permission remediation failed");
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| OverlayError::CapabilityUnavailable {
            reason: "no permission remediation configured".to_string(),
        }))
    }

    fn run_strategy(&mut self, kind: RemediationKind) -> Result<(), OverlayError> {
        match kind {
            RemediationKind::DirectRequest => match self.handle.as_mut() {
                Some(handle) => {
                    guarded("request_permission", || handle.request_overlay_permission())
                }
                None => Err(OverlayError::CapabilityUnavailable {
                    reason: "no surface bound".to_string(),
                }),
            },
            RemediationKind::AppSettings => {
                let (launcher, host) = (&self.launcher, &self.host);
                guarded("open_app_settings", || launcher.open_app_settings(host))
            }
        }
    }

    /// Validates `config`, forwards it and marks the overlay showing.
    pub fn show(&mut self, config: &SightConfig) -> Result<(), OverlayError> {
        self.apply("show", config)
    }

    /// Same as [`show`](Self::show), for an overlay already on screen.
    ///
    /// Also forwarded from `Hidden`; the native layer may recreate the
    /// overlay, so a successful update leaves the state `Showing`.
    pub fn update(&mut self, config: &SightConfig) -> Result<(), OverlayError> {
        self.apply("update", config)
    }

    fn apply(&mut self, operation: &'static str, config: &SightConfig) -> Result<(), OverlayError> {
        let state = self.state;
        let handle = match self.handle.as_mut() {
            Some(handle) if state.is_bound() => handle,
            _ => return Err(OverlayError::InvalidStateTransition { operation, state }),
        };

        let params = RenderParams::try_from(config)?;
        debug!(operation, ?params, "forwarding sight");
        guarded(operation, || {
            handle.render(
                params.style,
                params.color,
                params.size,
                params.thickness,
                params.show_center_dot,
                params.opacity,
            )
        })?;

        self.config = Some(config.clone());
        self.transition(LifecycleState::Showing);
        Ok(())
    }

    /// Stops rendering. A no-op unless showing.
    pub fn hide(&mut self) -> Result<(), OverlayError> {
        match (self.state, self.handle.as_mut()) {
            (LifecycleState::Showing, Some(handle)) => {
                guarded("hide", || handle.stop_rendering())?;
                self.transition(LifecycleState::Hidden);
                Ok(())
            }
            (state, Some(_)) if state.is_bound() => Ok(()),
            (state, _) => Err(OverlayError::InvalidStateTransition {
                operation: "hide",
                state,
            }),
        }
    }

    /// Tears the surface down and enters the terminal state.
    ///
    /// The transition happens even when teardown fails; the failure is
    /// still returned. Later calls are no-ops.
    pub fn release(&mut self) -> Result<(), OverlayError> {
        if self.state == LifecycleState::Released {
            return Ok(());
        }
        let handle = self.handle.take();
        self.config = None;
        self.transition(LifecycleState::Released);

        match handle {
            Some(mut handle) => guarded("release", || handle.teardown()),
            None => Ok(()),
        }
    }

    fn illegal(&self, operation: &'static str) -> OverlayError {
        OverlayError::InvalidStateTransition {
            operation,
            state: self.state,
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        if self.state != next {
            info!(from = %self.state, to = %next, "overlay state");
            self.state = next;
        }
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(error = %err, "release on drop failed");
        }
    }
}
