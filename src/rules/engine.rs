//! Game engine trait.
//!
//! The engine runs rounds, judging, and scoring. The catalog side never
//! looks inside it; it only constructs one from a finished catalog and
//! settings, reads a few counters, and listens to its notifications.
//!
//! ## Implementation Notes
//!
//! - Counters read by status snapshots (`player_count` in particular) may
//!   change concurrently and should be cheap, lock-free reads
//! - `subscribe` may be called any number of times; each receiver gets
//!   every event emitted after the call, in order
//! - Emitting events must not wait on subscribers

use std::sync::Arc;

use crossbeam_channel::Receiver;

use super::event::LifecycleEvent;
use crate::cards::Card;
use crate::core::{PlayerSummary, Settings};
use crate::packs::Catalog;

/// External round/turn state machine.
pub trait GameEngine: Send + Sync + 'static {
    /// Build an engine over a fully loaded catalog.
    fn start(catalog: Arc<Catalog>, settings: &Settings) -> Self
    where
        Self: Sized;

    /// Current round number (0 before the first round).
    fn round(&self) -> u32;

    /// Current judge, if a round is running.
    fn judge(&self) -> Option<PlayerSummary>;

    /// Prompt card of the current round.
    fn current_prompt(&self) -> Option<Card>;

    /// Players currently connected.
    fn player_count(&self) -> usize;

    /// Response cards available to the engine.
    fn response_card_count(&self) -> usize;

    /// Prompt cards available to the engine.
    fn prompt_card_count(&self) -> usize;

    /// Open a lifecycle notification subscription.
    fn subscribe(&self) -> Receiver<LifecycleEvent>;
}
