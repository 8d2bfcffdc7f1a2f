//! Field metadata for settings UIs.
//!
//! Describes each [`SightConfig`](super::SightConfig) field as JSON: type,
//! default, the validation minimum and the slider range a UI should
//! offer.

use serde_json::{json, Value};

use super::constants::*;
use super::sight::SightStyle;

/// Names of every supported style, in catalog order.
pub fn supported_styles() -> Vec<&'static str> {
    SightStyle::ALL.iter().map(|s| s.as_str()).collect()
}

/// JSON description of every config field, keyed by serialized name.
pub fn config_metadata() -> Value {
    json!({
        "style": {
            "type": "string",
            "description": "Reticle shape",
            "enum": supported_styles(),
            "default": SightStyle::Cross.as_str(),
        },
        "color": {
            "type": "string",
            "description": "Reticle color (hex)",
            "pattern": "^#[0-9A-Fa-f]{6}$",
            "default": DEFAULT_COLOR,
            "examples": EXAMPLE_COLORS,
        },
        "size": {
            "type": "integer",
            "description": "Reticle size (dp)",
            "min": MIN_SIZE,
            "sliderMin": SIZE_SLIDER_MIN,
            "sliderMax": SIZE_SLIDER_MAX,
            "default": DEFAULT_SIZE,
        },
        "thickness": {
            "type": "integer",
            "description": "Stroke thickness (dp)",
            "min": MIN_THICKNESS,
            "sliderMin": THICKNESS_SLIDER_MIN,
            "sliderMax": THICKNESS_SLIDER_MAX,
            "default": DEFAULT_THICKNESS,
        },
        "showCenterDot": {
            "type": "boolean",
            "description": "Draw a center dot",
            "default": DEFAULT_SHOW_CENTER_DOT,
        },
        "centerDotSize": {
            "type": "integer",
            "description": "Center dot size (dp), required when the dot is shown",
            "min": MIN_CENTER_DOT_SIZE,
            "default": DEFAULT_CENTER_DOT_SIZE,
        },
        "opacity": {
            "type": "number",
            "description": "Reticle opacity",
            "min": MIN_OPACITY,
            "max": MAX_OPACITY,
            "sliderMin": OPACITY_SLIDER_MIN,
            "sliderMax": OPACITY_SLIDER_MAX,
            "default": DEFAULT_OPACITY,
        },
    })
}
