//! Configuration model (pure Rust, no FFI).
//!
//! Sight value object, validation, presets and settings metadata.

pub mod constants;
pub mod metadata;
pub mod presets;
pub mod sight;

pub use metadata::{config_metadata, supported_styles};
pub use presets::{find_preset, presets, PresetSight};
pub use sight::{
    derive, validate, ConfigField, RenderParams, SightConfig, SightOverrides, SightStyle,
    StyleParseError, ValidationError,
};
