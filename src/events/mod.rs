//! Event system for decoupled inter-module communication.
//!
//! The overlay controller is single-owner. Producers on any thread
//! publish [`AppEvent`]s; the owning thread drains the bus and hands each
//! event to the [`Dispatcher`](crate::handlers::Dispatcher).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Command     │     │  Settings   │     │   Hotkeys   │
//! │ loop        │     │     UI      │     │             │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()         │ publish()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     EventBus                        │
//! │                   (mpsc channel)                    │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │          Dispatcher (owns OverlayController)        │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use types::AppEvent;
