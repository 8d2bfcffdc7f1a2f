//! Headless overlay surface.
//!
//! Behaves like a native surface (binding, permission, refusal to draw
//! without it) but logs each frame instead of painting. Used on desktop
//! builds, which ship no native surface.

use tracing::info;

use crate::overlay::{CapabilityError, CapabilityProvider, HostContext, OverlayCapability};
use crate::parse_hex_color;

/// Provides a [`HeadlessSurface`] on every platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessProvider {
    granted: bool,
}

impl HeadlessProvider {
    /// Permission starts denied, as on a fresh install.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permission(mut self, granted: bool) -> Self {
        self.granted = granted;
        self
    }
}

impl CapabilityProvider for HeadlessProvider {
    fn name(&self) -> &str {
        "headless"
    }

    fn acquire(&self) -> Option<Box<dyn OverlayCapability>> {
        Some(Box::new(HeadlessSurface::new(self.granted)))
    }
}

/// What the surface is currently drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub style: String,
    pub rgb: (f64, f64, f64),
    pub size: u32,
    pub thickness: u32,
    pub show_center_dot: bool,
    pub opacity: f64,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    app_id: Option<String>,
    granted: bool,
    frame: Option<Frame>,
    frames_drawn: u64,
}

impl HeadlessSurface {
    pub fn new(granted: bool) -> Self {
        Self {
            granted,
            ..Self::default()
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl OverlayCapability for HeadlessSurface {
    fn bind(&mut self, host: &HostContext) -> Result<(), CapabilityError> {
        info!(app_id = %host.app_id, "headless surface bound");
        self.app_id = Some(host.app_id.clone());
        Ok(())
    }

    fn is_bound(&self) -> bool {
        self.app_id.is_some()
    }

    fn render(
        &mut self,
        style: &str,
        color: &str,
        size: u32,
        thickness: u32,
        show_center_dot: bool,
        opacity: f64,
    ) -> Result<(), CapabilityError> {
        if !self.is_bound() {
            return Err(CapabilityError::Native("surface not bound".to_string()));
        }
        if !self.granted {
            return Err(CapabilityError::Native(
                "overlay permission not granted".to_string(),
            ));
        }
        let rgb = parse_hex_color(color)
            .ok_or_else(|| CapabilityError::Native(format!("unparseable color {color:?}")))?;

        self.frames_drawn += 1;
        info!(
            style,
            color,
            size,
            thickness,
            show_center_dot,
            opacity,
            frame = self.frames_drawn,
            "headless surface: drawing sight"
        );
        self.frame = Some(Frame {
            style: style.to_string(),
            rgb,
            size,
            thickness,
            show_center_dot,
            opacity,
        });
        Ok(())
    }

    fn stop_rendering(&mut self) -> Result<(), CapabilityError> {
        if self.frame.take().is_some() {
            info!("headless surface: cleared");
        }
        Ok(())
    }

    fn has_overlay_permission(&self) -> Result<bool, CapabilityError> {
        Ok(self.granted)
    }

    /// The simulated system dialog grants immediately.
    fn request_overlay_permission(&mut self) -> Result<(), CapabilityError> {
        info!("headless surface: permission dialog accepted");
        self.granted = true;
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), CapabilityError> {
        self.frame = None;
        self.app_id = None;
        info!("headless surface torn down");
        Ok(())
    }
}
