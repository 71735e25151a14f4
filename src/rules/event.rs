//! Engine lifecycle notifications.
//!
//! The engine announces five kinds of events. Subscribers get their own
//! channel and receive events in emission order; emitting never blocks the
//! engine.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::PlayerSummary;

/// Stage of the game state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStage {
    /// Waiting for enough players.
    #[default]
    GameStarting,
    /// Players are choosing response cards.
    RoundInProgress,
    /// The judge is picking a winner.
    JudgingCards,
    /// A round winner has been announced.
    RoundEnded,
    /// Someone reached the winning score.
    GameEnd,
}

impl std::fmt::Display for GameStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStage::GameStarting => "GameStarting",
            GameStage::RoundInProgress => "RoundInProgress",
            GameStage::JudgingCards => "JudgingCards",
            GameStage::RoundEnded => "RoundEnded",
            GameStage::GameEnd => "GameEnd",
        };
        f.write_str(name)
    }
}

/// A lifecycle notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Something about the game changed (players joined, scores moved).
    StateChanged,
    /// A new round began; round, judge, and prompt are readable on the engine.
    RoundStarted,
    /// The stage machine moved.
    StageChanged { old: GameStage, new: GameStage },
    /// A round finished, possibly without a winner.
    RoundEnded {
        round: u32,
        winner: Option<PlayerSummary>,
    },
    /// The game finished.
    GameEnded { winners: Vec<PlayerSummary> },
}

impl LifecycleEvent {
    /// Short event name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::StateChanged => "state_changed",
            LifecycleEvent::RoundStarted => "round_started",
            LifecycleEvent::StageChanged { .. } => "stage_changed",
            LifecycleEvent::RoundEnded { .. } => "round_ended",
            LifecycleEvent::GameEnded { .. } => "game_ended",
        }
    }
}

/// Fan-out of lifecycle events to any number of subscribers.
///
/// Engines embed one of these. Subscribers whose receiver was dropped are
/// pruned on the next emit.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Mutex<Vec<Sender<LifecycleEvent>>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new subscription.
    pub fn subscribe(&self) -> Receiver<LifecycleEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Deliver an event to every live subscriber.
    pub fn emit(&self, event: LifecycleEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Registered subscriptions. Dropped receivers count until the next emit.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
