//! Application events for inter-module communication.
//!
//! These events represent high-level sight commands that any producer
//! (command loop, settings UI, hotkeys) can publish. The dispatcher turns
//! them into controller calls on the owning thread.

use crate::model::SightConfig;

/// Application-level events for decoupled communication between modules.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // === Lifecycle ===
    /// Bind the native overlay surface.
    Init,

    /// Release the surface (terminal).
    Release,

    /// Release, flush settings and stop the loop.
    Quit,

    // === Permission ===
    /// Query the overlay permission.
    CheckPermission,

    /// Start the permission flow.
    RequestPermission,

    // === Sight ===
    /// Show a catalog preset by id.
    ShowPreset(String),

    /// Show a complete config.
    Show(SightConfig),

    /// Change the config of the visible overlay.
    Update(SightConfig),

    /// Stop rendering.
    Hide,

    /// Hide when showing, otherwise show the last known sight.
    Toggle,

    /// Report state and current config.
    Status,
}

impl AppEvent {
    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::Init => "Bind overlay surface",
            AppEvent::Release => "Release overlay surface",
            AppEvent::Quit => "Quit",
            AppEvent::CheckPermission => "Check overlay permission",
            AppEvent::RequestPermission => "Request overlay permission",
            AppEvent::ShowPreset(_) => "Show preset",
            AppEvent::Show(_) => "Show sight",
            AppEvent::Update(_) => "Update sight",
            AppEvent::Hide => "Hide sight",
            AppEvent::Toggle => "Toggle sight",
            AppEvent::Status => "Report status",
        }
    }
}
