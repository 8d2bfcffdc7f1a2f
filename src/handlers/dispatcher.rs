//! Event dispatcher for handling application events.
//!
//! The dispatcher owns the overlay controller and the selection store.
//! It receives events from the event bus and executes the corresponding
//! controller calls, one at a time, on the owning thread.
//!
//! # Architecture
//!
//! ```text
//! EventBus::drain() → Dispatcher::dispatch() → OverlayController / ConfigStore
//! ```

use thiserror::Error;
use tracing::{debug, warn};

use crate::events::{AppEvent, EventBus};
use crate::model::{find_preset, SightConfig};
use crate::overlay::{
    InitOutcome, LifecycleState, OverlayController, OverlayError, PermissionRequest,
    RemediationKind,
};
use crate::storage::{ConfigStore, SavedSight, StorageError};
use crate::{tr_key, Lang};

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Handled; text for the user.
    Message(String),
    /// Handled; stop the loop.
    Quit,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Applies [`AppEvent`]s to the controller it owns.
pub struct Dispatcher {
    controller: OverlayController,
    store: Option<ConfigStore>,
    lang: Lang,
}

impl Dispatcher {
    pub fn new(controller: OverlayController) -> Self {
        Self {
            controller,
            store: None,
            lang: Lang::default(),
        }
    }

    /// Persist every shown sight to `store`.
    pub fn with_store(mut self, store: ConfigStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn store(&self) -> Option<&ConfigStore> {
        self.store.as_ref()
    }

    /// Config new sights are derived from: the current one, else the
    /// stored selection, else the default.
    pub fn base_config(&mut self) -> SightConfig {
        if let Some(config) = self.controller.current_config() {
            return config.clone();
        }
        match self.store.as_mut() {
            Some(store) => store.load().config.clone(),
            None => SightConfig::default(),
        }
    }

    /// Dispatch all pending events from `bus`, in order.
    pub fn dispatch_all(&mut self, bus: &EventBus) -> Vec<Result<Reply, DispatchError>> {
        bus.drain()
            .into_iter()
            .map(|event| self.dispatch(event))
            .collect()
    }

    /// Dispatch a single event.
    pub fn dispatch(&mut self, event: AppEvent) -> Result<Reply, DispatchError> {
        debug!(event = event.description(), "dispatching");
        match event {
            AppEvent::Init => match self.controller.init()? {
                InitOutcome::Bound => self.reply("overlay surface bound"),
                InitOutcome::AlreadyBound => self.reply("overlay surface already bound"),
            },

            AppEvent::CheckPermission => {
                let key = if self.controller.check_permission() {
                    "Overlay permission granted"
                } else {
                    "Overlay permission missing"
                };
                self.reply(tr_key(key, self.lang))
            }

            AppEvent::RequestPermission => match self.controller.request_permission()? {
                PermissionRequest::AlreadyGranted => {
                    self.reply(tr_key("Overlay permission granted", self.lang))
                }
                PermissionRequest::Requested(RemediationKind::AppSettings) => self.reply(tr_key(
                    "Open settings to grant the overlay permission",
                    self.lang,
                )),
                PermissionRequest::Requested(kind) => {
                    self.reply(format!("permission requested ({kind}); check again later"))
                }
            },

            AppEvent::ShowPreset(id) => {
                let preset = find_preset(&id).ok_or(DispatchError::UnknownPreset(id))?;
                self.controller.show(&preset.config)?;
                self.remember(SavedSight {
                    preset_id: Some(preset.id.to_string()),
                    config: preset.config.clone(),
                });
                self.reply(format!("showing preset {}", preset.id))
            }

            AppEvent::Show(config) => {
                self.controller.show(&config)?;
                self.remember(SavedSight::custom(config));
                self.reply("showing sight")
            }

            AppEvent::Update(config) => {
                self.controller.update(&config)?;
                self.remember(SavedSight::custom(config));
                self.reply("sight updated")
            }

            AppEvent::Hide => {
                self.controller.hide()?;
                self.reply("sight hidden")
            }

            AppEvent::Toggle => {
                if self.controller.state() == LifecycleState::Showing {
                    self.controller.hide()?;
                    self.reply("sight hidden")
                } else {
                    let config = self.base_config();
                    self.controller.show(&config)?;
                    self.reply("showing sight")
                }
            }

            AppEvent::Status => {
                let sight = match self.controller.current_config() {
                    Some(config) => serde_json::to_string(config)
                        .unwrap_or_else(|_| "<unserializable>".to_string()),
                    None => "none".to_string(),
                };
                let state = self.controller.state();
                self.reply(format!("state: {state}, sight: {sight}"))
            }

            AppEvent::Release => {
                self.controller.release()?;
                self.flush()?;
                self.reply("overlay released")
            }

            AppEvent::Quit => {
                if let Err(err) = self.controller.release() {
                    warn!(error = %err, "release during quit failed");
                }
                if let Err(err) = self.flush() {
                    warn!(error = %err, "saving selection during quit failed");
                }
                Ok(Reply::Quit)
            }
        }
    }

    fn remember(&mut self, saved: SavedSight) {
        if let Some(store) = self.store.as_mut() {
            store.save(saved);
        }
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        match self.store.as_mut() {
            Some(store) => store.flush(),
            None => Ok(()),
        }
    }

    fn reply(&self, message: impl Into<String>) -> Result<Reply, DispatchError> {
        Ok(Reply::Message(message.into()))
    }
}
