//! Built-in sight presets.
//!
//! The catalog is fixed and ordered. Each preset copies the default
//! config and overrides a few fields.

use std::sync::OnceLock;

use super::sight::{SightConfig, SightStyle};
use crate::{tr_key, Lang};

/// A named, pre-validated sight.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSight {
    /// Stable reference key. Never the display name.
    pub id: &'static str,
    /// English display name.
    pub display_name: &'static str,
    pub config: SightConfig,
}

impl PresetSight {
    /// Display name in the given language.
    pub fn localized_name(&self, lang: Lang) -> std::borrow::Cow<'static, str> {
        tr_key(self.display_name, lang)
    }
}

static CATALOG: OnceLock<Vec<PresetSight>> = OnceLock::new();

fn preset(id: &'static str, display_name: &'static str, config: SightConfig) -> PresetSight {
    PresetSight {
        id,
        display_name,
        config,
    }
}

fn build_catalog() -> Vec<PresetSight> {
    let base = SightConfig::default();
    vec![
        preset(
            "classic",
            "Classic Cross",
            SightConfig {
                style: SightStyle::Cross,
                ..base.clone()
            },
        ),
        preset(
            "tactical",
            "Tactical Red Dot",
            SightConfig {
                style: SightStyle::Tactical,
                color: "#FF0000".to_string(),
                ..base.clone()
            },
        ),
        preset(
            "dot",
            "Dot",
            SightConfig {
                style: SightStyle::Dot,
                color: "#FF0000".to_string(),
                ..base.clone()
            },
        ),
        preset(
            "circle",
            "Circle",
            SightConfig {
                style: SightStyle::Circle,
                color: "#00FFFF".to_string(),
                ..base.clone()
            },
        ),
        preset(
            "bracket",
            "Bracket",
            SightConfig {
                style: SightStyle::Bracket,
                color: "#FFFF00".to_string(),
                ..base.clone()
            },
        ),
        preset(
            "chevron",
            "Chevron",
            SightConfig {
                style: SightStyle::Chevron,
                color: "#FF00FF".to_string(),
                ..base.clone()
            },
        ),
        preset(
            "large",
            "Large Cross",
            SightConfig {
                style: SightStyle::Cross,
                size: 40,
                thickness: 2,
                ..base.clone()
            },
        ),
        preset(
            "small",
            "Small Cross",
            SightConfig {
                style: SightStyle::Cross,
                size: 12,
                thickness: 1,
                ..base
            },
        ),
    ]
}

/// The preset catalog, in display order.
pub fn presets() -> &'static [PresetSight] {
    CATALOG.get_or_init(build_catalog)
}

/// Looks up a preset by id.
pub fn find_preset(id: &str) -> Option<&'static PresetSight> {
    presets().iter().find(|p| p.id == id)
}
