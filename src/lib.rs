//! Aiming-reticle overlay controller.
//!
//! The crate mediates between a sight configuration, the platform's
//! draw-over-other-apps permission and a native overlay surface it does
//! not implement. Everything here is pure Rust; native surfaces plug in
//! through [`overlay::OverlayCapability`].

pub mod events;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod platform;
pub mod storage;

use std::borrow::Cow;

// Re-export the main types for convenience
pub use events::{AppEvent, EventBus, EventPublisher};
pub use model::{PresetSight, SightConfig, SightOverrides, SightStyle, ValidationError};
pub use overlay::{LifecycleState, OverlayController, OverlayError};

/// True for exactly `#RRGGBB` (hex digits in either case).
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parse `#RRGGBB` into normalised floats [0..1].
pub fn parse_hex_color(s: &str) -> Option<(f64, f64, f64)> {
    if !is_hex_color(s) {
        return None;
    }
    let hex = &s[1..];
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0))
}

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    Zh,
}

/// Very small localisation helper for preset names and host messages.
pub fn tr_key(key: &str, lang: Lang) -> Cow<'static, str> {
    match (key, lang) {
        ("Classic Cross", Lang::Zh) => Cow::Borrowed("经典十字"),
        ("Tactical Red Dot", Lang::Zh) => Cow::Borrowed("战术红点"),
        ("Dot", Lang::Zh) => Cow::Borrowed("单点"),
        ("Circle", Lang::Zh) => Cow::Borrowed("圆形"),
        ("Bracket", Lang::Zh) => Cow::Borrowed("方括号"),
        ("Chevron", Lang::Zh) => Cow::Borrowed("倒V"),
        ("Large Cross", Lang::Zh) => Cow::Borrowed("大型十字"),
        ("Small Cross", Lang::Zh) => Cow::Borrowed("小型十字"),

        ("Overlay permission granted", Lang::Zh) => Cow::Borrowed("已授予悬浮窗权限"),
        ("Overlay permission missing", Lang::Zh) => Cow::Borrowed("没有悬浮窗权限"),
        ("Open settings to grant the overlay permission", Lang::Zh) => {
            Cow::Borrowed("请在设置中授予悬浮窗权限")
        }

        _ => Cow::Owned(key.to_string()),
    }
}
