//! Configuration constants and default values.
//!
//! This module contains the default sight parameters, validation limits
//! and the slider ranges advertised to settings UIs.

// === Visual Defaults ===

/// Default reticle color.
pub const DEFAULT_COLOR: &str = "#00FF00";

/// Default reticle size in device-independent pixels.
pub const DEFAULT_SIZE: u32 = 20;

/// Default stroke thickness in device-independent pixels.
pub const DEFAULT_THICKNESS: u32 = 1;

/// Center dot shown by default.
pub const DEFAULT_SHOW_CENTER_DOT: bool = true;

/// Default center dot size in device-independent pixels.
pub const DEFAULT_CENTER_DOT_SIZE: u32 = 3;

/// Default opacity.
pub const DEFAULT_OPACITY: f64 = 0.8;

// === Validation Limits ===

/// Smallest accepted reticle size.
pub const MIN_SIZE: u32 = 1;

/// Smallest accepted stroke thickness.
pub const MIN_THICKNESS: u32 = 1;

/// Smallest accepted center dot size (when the dot is shown).
pub const MIN_CENTER_DOT_SIZE: u32 = 1;

/// Lower opacity bound, inclusive.
pub const MIN_OPACITY: f64 = 0.0;

/// Upper opacity bound, inclusive.
pub const MAX_OPACITY: f64 = 1.0;

// === Slider Ranges ===
//
// UI hints only. Validation accepts anything above the minimums.

/// Size slider lower bound.
pub const SIZE_SLIDER_MIN: u32 = 5;

/// Size slider upper bound.
pub const SIZE_SLIDER_MAX: u32 = 100;

/// Thickness slider lower bound.
pub const THICKNESS_SLIDER_MIN: u32 = 1;

/// Thickness slider upper bound.
pub const THICKNESS_SLIDER_MAX: u32 = 10;

/// Opacity slider lower bound.
pub const OPACITY_SLIDER_MIN: f64 = 0.1;

/// Opacity slider upper bound.
pub const OPACITY_SLIDER_MAX: f64 = 1.0;

/// Example colors offered next to the color field.
pub const EXAMPLE_COLORS: [&str; 5] = ["#00FF00", "#FF0000", "#00FFFF", "#FFFF00", "#FF00FF"];

// === Persistence ===

/// Directory name used under the platform config root.
pub const CONFIG_DIR_NAME: &str = "sightfront";

/// File name of the persisted selection.
pub const CONFIG_FILE_NAME: &str = "config.json";
