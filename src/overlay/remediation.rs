//! Ways to get the overlay permission granted.
//!
//! Strategies are tried in order; each may fail on its own. None waits
//! for the user's decision.

use std::fmt;
use std::process::{Command, Stdio};

use tracing::debug;

use super::capability::{CapabilityError, HostContext};

/// One remediation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationKind {
    /// The surface's own permission request entry point.
    DirectRequest,
    /// Open the application settings page.
    AppSettings,
}

impl RemediationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RemediationKind::DirectRequest => "direct-request",
            RemediationKind::AppSettings => "app-settings",
        }
    }
}

impl fmt::Display for RemediationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default order: ask the surface, then send the user to settings.
pub fn default_strategies() -> Vec<RemediationKind> {
    vec![RemediationKind::DirectRequest, RemediationKind::AppSettings]
}

/// Result of a permission request. Says nothing about the user's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionRequest {
    /// Nothing to do.
    AlreadyGranted,
    /// This strategy was handed off successfully.
    Requested(RemediationKind),
}

/// Opens the application settings page.
pub trait SettingsLauncher {
    fn open_app_settings(&self, host: &HostContext) -> Result<(), CapabilityError>;
}

/// Hands [`HostContext::settings_target`] to the platform opener and
/// waits for it to exit.
///
/// The openers (`open`, `xdg-open`, `cmd /C start`) return once the page
/// is handed off, so a non-zero exit means nothing was opened.
#[derive(Debug, Clone, Default)]
pub struct SystemSettingsLauncher {
    program: Option<String>,
}

impl SystemSettingsLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `program <target>` instead of the platform opener.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn command(&self, target: &str) -> Command {
        if let Some(program) = &self.program {
            let mut cmd = Command::new(program);
            cmd.arg(target);
            return cmd;
        }
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

impl SettingsLauncher for SystemSettingsLauncher {
    fn open_app_settings(&self, host: &HostContext) -> Result<(), CapabilityError> {
        let target = host.settings_target();
        debug!(%target, "opening application settings");
        let status = self
            .command(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| CapabilityError::Native(format!("cannot open {target}: {e}")))?;
        if !status.success() {
            return Err(CapabilityError::Native(format!(
                "{target}: opener exited with {status}"
            )));
        }
        Ok(())
    }
}
