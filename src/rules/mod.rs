//! Engine interface and lifecycle notifications.
//!
//! Engines implement `GameEngine`; the application context constructs one
//! from the loaded catalog and reacts to its `LifecycleEvent`s. The core
//! never interprets game rules directly.

pub mod engine;
pub mod event;

pub use engine::GameEngine;
pub use event::{GameStage, LifecycleEvent, Notifier};
