//! Lifecycle observer.
//!
//! Turns engine notifications into observable side effects: the status
//! title and log lines. Events are handled one at a time on a dedicated
//! thread, so a slow handler delays other handlers but never the engine.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use tracing::{debug, info, warn};

use super::status::StatusBoard;
use crate::core::join_names;
use crate::rules::{GameEngine, LifecycleEvent};

/// Status title for a server with `player_count` players.
#[must_use]
pub fn status_title(server_name: &str, player_count: usize) -> String {
    format!("{} ({})", server_name, player_count)
}

/// Apply the side effects of one event.
pub fn handle_event<E: GameEngine + ?Sized>(
    engine: &E,
    board: &StatusBoard,
    server_name: &str,
    event: &LifecycleEvent,
) {
    match event {
        LifecycleEvent::StateChanged => {
            board.set_title(status_title(server_name, engine.player_count()));
        }
        LifecycleEvent::RoundStarted => {
            let prompt = engine
                .current_prompt()
                .map_or_else(|| "none".to_string(), |c| c.to_string());
            let judge = engine
                .judge()
                .map_or_else(|| "nobody".to_string(), |j| j.to_string());
            info!(round = engine.round(), %prompt, %judge, "ROUND {}", engine.round());
        }
        LifecycleEvent::StageChanged { old, new } => {
            info!("Stage changed: {} -> {}", old, new);
        }
        LifecycleEvent::RoundEnded { round, winner } => {
            let winner = winner
                .as_ref()
                .map_or_else(|| "Nobody".to_string(), ToString::to_string);
            info!("Round {} ended: {} wins!", round, winner);
        }
        LifecycleEvent::GameEnded { winners } => {
            info!("Game ended. Winners: {}", join_names(winners));
        }
    }
    board.record_event();
}

/// Handle to the observer thread.
#[derive(Debug)]
pub struct LifecycleObserver {
    stop: Option<Sender<()>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl LifecycleObserver {
    /// Start observing `events` on a new thread.
    pub fn spawn<E: GameEngine>(
        engine: Arc<E>,
        events: Receiver<LifecycleEvent>,
        board: Arc<StatusBoard>,
        server_name: String,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(0);

        let worker = thread::Builder::new()
            .name("lifecycle-observer".to_string())
            .spawn(move || {
                Self::run(engine.as_ref(), &events, &stop_rx, &board, &server_name);
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            worker: Some(worker),
        })
    }

    fn run<E: GameEngine>(
        engine: &E,
        events: &Receiver<LifecycleEvent>,
        stop: &Receiver<()>,
        board: &StatusBoard,
        server_name: &str,
    ) {
        debug!("lifecycle observer started");
        loop {
            select! {
                recv(events) -> msg => match msg {
                    Ok(event) => handle_event(engine, board, server_name, &event),
                    Err(_) => break,
                },
                recv(stop) -> _ => {
                    // Finish what the engine already emitted.
                    for event in events.try_iter() {
                        handle_event(engine, board, server_name, &event);
                    }
                    break;
                }
            }
        }
        debug!("lifecycle observer stopped");
    }

    /// Stop the observer after it drains pending events, and wait for it.
    pub fn shutdown(&mut self) {
        self.stop.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("lifecycle observer panicked");
            }
        }
    }
}

impl Drop for LifecycleObserver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::cards::Card;
    use crate::core::{PlayerId, PlayerSummary, Settings};
    use crate::packs::Catalog;
    use crate::rules::{GameStage, Notifier};

    struct StubEngine {
        players: AtomicUsize,
        notifier: Notifier,
    }

    impl GameEngine for StubEngine {
        fn start(_catalog: Arc<Catalog>, _settings: &Settings) -> Self {
            Self {
                players: AtomicUsize::new(0),
                notifier: Notifier::new(),
            }
        }

        fn round(&self) -> u32 {
            1
        }

        fn judge(&self) -> Option<PlayerSummary> {
            Some(PlayerSummary::new(PlayerId::new(0), "Ada"))
        }

        fn current_prompt(&self) -> Option<Card> {
            None
        }

        fn player_count(&self) -> usize {
            self.players.load(Ordering::Relaxed)
        }

        fn response_card_count(&self) -> usize {
            0
        }

        fn prompt_card_count(&self) -> usize {
            0
        }

        fn subscribe(&self) -> Receiver<LifecycleEvent> {
            self.notifier.subscribe()
        }
    }

    fn stub() -> StubEngine {
        StubEngine::start(Arc::new(Catalog::default()), &Settings::default())
    }

    #[test]
    fn test_status_title() {
        assert_eq!(status_title("Party", 4), "Party (4)");
    }

    #[test]
    fn test_state_changed_updates_title() {
        let engine = stub();
        let board = StatusBoard::new("");
        engine.players.store(5, Ordering::Relaxed);

        handle_event(&engine, &board, "Party", &LifecycleEvent::StateChanged);

        assert_eq!(board.title(), "Party (5)");
        assert_eq!(board.events_handled(), 1);
    }

    #[test]
    fn test_log_only_events_are_counted() {
        let engine = stub();
        let board = StatusBoard::new("Party (0)");

        let events = [
            LifecycleEvent::RoundStarted,
            LifecycleEvent::StageChanged {
                old: GameStage::RoundInProgress,
                new: GameStage::JudgingCards,
            },
            LifecycleEvent::RoundEnded {
                round: 1,
                winner: None,
            },
            LifecycleEvent::GameEnded { winners: vec![] },
        ];
        for event in &events {
            handle_event(&engine, &board, "Party", event);
        }

        assert_eq!(board.title(), "Party (0)");
        assert_eq!(board.events_handled(), 4);
    }

    #[test]
    fn test_observer_thread_drains_on_shutdown() {
        let engine = Arc::new(stub());
        let board = Arc::new(StatusBoard::new(""));
        let events = engine.subscribe();

        let mut observer =
            LifecycleObserver::spawn(Arc::clone(&engine), events, Arc::clone(&board), "Party".into())
                .unwrap();

        engine.players.store(2, Ordering::Relaxed);
        for _ in 0..10 {
            engine.notifier.emit(LifecycleEvent::StateChanged);
        }
        observer.shutdown();

        assert_eq!(board.events_handled(), 10);
        assert_eq!(board.title(), "Party (2)");
    }
}
