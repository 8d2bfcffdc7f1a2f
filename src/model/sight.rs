//! Sight configuration value object (pure Rust, no FFI).
//!
//! A [`SightConfig`] is complete and self-describing: every field is
//! always present, so applying one never depends on what was applied
//! before it. New configurations are made by copying an existing one and
//! overriding fields through [`SightConfig::derive`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::*;
use crate::is_hex_color;

/// Reticle shape.
///
/// Closed set: parsing an unknown name fails instead of falling back to a
/// default shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SightStyle {
    Cross,
    Dot,
    Tactical,
    Circle,
    Bracket,
    Chevron,
    Custom,
}

impl SightStyle {
    /// All styles, in catalog order.
    pub const ALL: [SightStyle; 7] = [
        SightStyle::Cross,
        SightStyle::Dot,
        SightStyle::Tactical,
        SightStyle::Circle,
        SightStyle::Bracket,
        SightStyle::Chevron,
        SightStyle::Custom,
    ];

    /// Wire name forwarded to the native surface.
    pub fn as_str(self) -> &'static str {
        match self {
            SightStyle::Cross => "cross",
            SightStyle::Dot => "dot",
            SightStyle::Tactical => "tactical",
            SightStyle::Circle => "circle",
            SightStyle::Bracket => "bracket",
            SightStyle::Chevron => "chevron",
            SightStyle::Custom => "custom",
        }
    }
}

impl fmt::Display for SightStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a style name is not one of [`SightStyle::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sight style {0:?}")]
pub struct StyleParseError(pub String);

impl FromStr for SightStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SightStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| StyleParseError(s.to_string()))
    }
}

/// Complete visual description of a reticle.
///
/// Fields are public for construction and inspection; treat a value as
/// immutable once built and use [`SightConfig::derive`] for variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightConfig {
    /// Reticle shape.
    pub style: SightStyle,
    /// `#RRGGBB` color.
    pub color: String,
    /// Overall size in device-independent pixels.
    pub size: u32,
    /// Stroke thickness in device-independent pixels.
    pub thickness: u32,
    /// Draw a dot at the center.
    pub show_center_dot: bool,
    /// Center dot size in device-independent pixels.
    pub center_dot_size: u32,
    /// Opacity in [0.0, 1.0].
    pub opacity: f64,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            style: SightStyle::Cross,
            color: DEFAULT_COLOR.to_string(),
            size: DEFAULT_SIZE,
            thickness: DEFAULT_THICKNESS,
            show_center_dot: DEFAULT_SHOW_CENTER_DOT,
            center_dot_size: DEFAULT_CENTER_DOT_SIZE,
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// Field names as they appear in serialized configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Style,
    Color,
    Size,
    Thickness,
    ShowCenterDot,
    CenterDotSize,
    Opacity,
}

impl ConfigField {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::Style => "style",
            ConfigField::Color => "color",
            ConfigField::Size => "size",
            ConfigField::Thickness => "thickness",
            ConfigField::ShowCenterDot => "showCenterDot",
            ConfigField::CenterDotSize => "centerDotSize",
            ConfigField::Opacity => "opacity",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First constraint violated by a config, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: ConfigField,
    pub reason: String,
}

impl ValidationError {
    fn new(field: ConfigField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Partial set of fields applied on top of a base config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SightOverrides {
    pub style: Option<SightStyle>,
    pub color: Option<String>,
    pub size: Option<u32>,
    pub thickness: Option<u32>,
    pub show_center_dot: Option<bool>,
    pub center_dot_size: Option<u32>,
    pub opacity: Option<f64>,
}

impl SightOverrides {
    /// True when no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == SightOverrides::default()
    }
}

impl SightConfig {
    /// Checks every field and reports the first violation.
    ///
    /// Order: style, color, size, thickness, centerDotSize, opacity. The
    /// style is always valid once typed; unknown names are rejected when
    /// parsing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_hex_color(&self.color) {
            return Err(ValidationError::new(
                ConfigField::Color,
                format!("expected #RRGGBB, got {:?}", self.color),
            ));
        }
        if self.size < MIN_SIZE {
            return Err(ValidationError::new(
                ConfigField::Size,
                format!("must be at least {MIN_SIZE}"),
            ));
        }
        if self.thickness < MIN_THICKNESS {
            return Err(ValidationError::new(
                ConfigField::Thickness,
                format!("must be at least {MIN_THICKNESS}"),
            ));
        }
        if self.show_center_dot && self.center_dot_size < MIN_CENTER_DOT_SIZE {
            return Err(ValidationError::new(
                ConfigField::CenterDotSize,
                format!("must be at least {MIN_CENTER_DOT_SIZE} when the center dot is shown"),
            ));
        }
        if !(MIN_OPACITY..=MAX_OPACITY).contains(&self.opacity) {
            // NaN fails the range check too.
            return Err(ValidationError::new(
                ConfigField::Opacity,
                format!(
                    "must be within [{MIN_OPACITY:.1}, {MAX_OPACITY:.1}], got {}",
                    self.opacity
                ),
            ));
        }
        Ok(())
    }

    /// Copies `self`, applies `overrides` and validates the result.
    pub fn derive(&self, overrides: &SightOverrides) -> Result<SightConfig, ValidationError> {
        let derived = SightConfig {
            style: overrides.style.unwrap_or(self.style),
            color: overrides
                .color
                .clone()
                .unwrap_or_else(|| self.color.clone()),
            size: overrides.size.unwrap_or(self.size),
            thickness: overrides.thickness.unwrap_or(self.thickness),
            show_center_dot: overrides.show_center_dot.unwrap_or(self.show_center_dot),
            center_dot_size: overrides.center_dot_size.unwrap_or(self.center_dot_size),
            opacity: overrides.opacity.unwrap_or(self.opacity),
        };
        derived.validate()?;
        Ok(derived)
    }
}

/// See [`SightConfig::validate`].
pub fn validate(config: &SightConfig) -> Result<(), ValidationError> {
    config.validate()
}

/// See [`SightConfig::derive`].
pub fn derive(
    base: &SightConfig,
    overrides: &SightOverrides,
) -> Result<SightConfig, ValidationError> {
    base.derive(overrides)
}

/// The primitive parameters handed to the native surface.
///
/// Only obtainable from a config that passed validation. The center dot
/// size is not part of the native render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams<'a> {
    pub style: &'static str,
    pub color: &'a str,
    pub size: u32,
    pub thickness: u32,
    pub show_center_dot: bool,
    pub opacity: f64,
}

impl<'a> TryFrom<&'a SightConfig> for RenderParams<'a> {
    type Error = ValidationError;

    fn try_from(config: &'a SightConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self {
            style: config.style.as_str(),
            color: &config.color,
            size: config.size,
            thickness: config.thickness,
            show_center_dot: config.show_center_dot,
            opacity: config.opacity,
        })
    }
}
