//! Platform detection and capability provider selection.
//!
//! Native overlay surfaces live outside this crate. Each one is exposed
//! through a [`CapabilityProvider`] registered here in priority order;
//! the controller only sees the registry.

pub mod headless;

use std::fmt;

use tracing::debug;

use crate::overlay::{CapabilityProvider, OverlayCapability};

pub use headless::{HeadlessProvider, HeadlessSurface};

/// Operating system the binary was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    MacOs,
    Windows,
    Linux,
    Other,
}

impl Platform {
    /// Decided at compile time from `target_os`.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered providers for one platform. The first provider that supports
/// the platform and yields a surface wins.
pub struct ProviderRegistry {
    name: String,
    platform: Platform,
    providers: Vec<Box<dyn CapabilityProvider>>,
}

impl ProviderRegistry {
    pub fn new(platform: Platform) -> Self {
        Self {
            name: format!("registry({platform})"),
            platform,
            providers: Vec::new(),
        }
    }

    pub fn for_current_platform() -> Self {
        Self::new(Platform::current())
    }

    /// Appends `provider` at the lowest priority.
    pub fn register(mut self, provider: impl CapabilityProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Provider names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl CapabilityProvider for ProviderRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, platform: Platform) -> bool {
        platform == self.platform
    }

    fn acquire(&self) -> Option<Box<dyn OverlayCapability>> {
        self.providers
            .iter()
            .filter(|p| p.supports(self.platform))
            .find_map(|p| {
                let surface = p.acquire();
                debug!(
                    provider = p.name(),
                    found = surface.is_some(),
                    "probing overlay provider"
                );
                surface
            })
    }
}

/// Registry for the running platform. No native surface ships with the
/// crate, so only `headless` adds a provider.
pub fn default_registry(headless: bool) -> ProviderRegistry {
    let registry = ProviderRegistry::for_current_platform();
    if headless {
        registry.register(HeadlessProvider::new())
    } else {
        registry
    }
}
