//! Lobby engine implementation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use tracing::debug;

use crate::cards::{Card, CardKind};
use crate::core::{PlayerId, PlayerSummary, Settings};
use crate::packs::Catalog;
use crate::rules::{GameEngine, GameStage, LifecycleEvent, Notifier};

#[derive(Debug, Default)]
struct LobbyState {
    players: Vec<PlayerSummary>,
    next_id: u32,
    round: u32,
    stage: GameStage,
    judge: Option<PlayerSummary>,
    prompt: Option<Card>,
}

/// Minimal engine: tracks players and rounds, announces lifecycle events.
#[derive(Debug)]
pub struct LobbyEngine {
    catalog: Arc<Catalog>,
    settings: Settings,
    state: RwLock<LobbyState>,
    player_count: AtomicUsize,
    notifier: Notifier,
}

impl LobbyEngine {
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn stage(&self) -> GameStage {
        self.state.read().stage
    }

    /// Connected players in join order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerSummary> {
        self.state.read().players.clone()
    }

    /// Add a player. Returns `None` when the server is full.
    pub fn join(&self, name: impl Into<String>) -> Option<PlayerId> {
        let id = {
            let mut state = self.state.write();
            if state.players.len() >= self.settings.max_players {
                return None;
            }
            let id = PlayerId::new(state.next_id);
            state.next_id += 1;
            state.players.push(PlayerSummary::new(id, name));
            self.player_count.store(state.players.len(), Ordering::Relaxed);
            id
        };
        debug!(player = %id, "player joined");
        self.notifier.emit(LifecycleEvent::StateChanged);
        Some(id)
    }

    /// Remove a player. Returns `false` for unknown ids.
    pub fn leave(&self, id: PlayerId) -> bool {
        {
            let mut state = self.state.write();
            let before = state.players.len();
            state.players.retain(|p| p.id != id);
            if state.players.len() == before {
                return false;
            }
            if state.judge.as_ref().is_some_and(|j| j.id == id) {
                state.judge = None;
            }
            self.player_count.store(state.players.len(), Ordering::Relaxed);
        }
        debug!(player = %id, "player left");
        self.notifier.emit(LifecycleEvent::StateChanged);
        true
    }

    /// Start the next round.
    ///
    /// Returns the new round number, or `None` when nobody has joined, there
    /// are fewer players than `min_players`, or there are no prompt cards.
    pub fn begin_round(&self) -> Option<u32> {
        let prompt_count = self.catalog.prompt_card_count();
        let (round, old) = {
            let mut state = self.state.write();
            if state.players.is_empty()
                || state.players.len() < self.settings.min_players
                || prompt_count == 0
            {
                return None;
            }
            state.round += 1;
            let slot = (state.round - 1) as usize;

            state.prompt = self
                .catalog
                .cards_of(CardKind::Prompt)
                .nth(slot % prompt_count)
                .cloned();

            let keep_judge = self.settings.permanent_judge && state.judge.is_some();
            if !keep_judge {
                state.judge = Some(state.players[slot % state.players.len()].clone());
            }

            let old = std::mem::replace(&mut state.stage, GameStage::RoundInProgress);
            (state.round, old)
        };

        if old != GameStage::RoundInProgress {
            self.notifier.emit(LifecycleEvent::StageChanged {
                old,
                new: GameStage::RoundInProgress,
            });
        }
        self.notifier.emit(LifecycleEvent::RoundStarted);
        Some(round)
    }

    /// Move the current round to judging.
    pub fn begin_judging(&self) {
        self.transition(GameStage::JudgingCards);
    }

    /// Finish the current round.
    pub fn end_round(&self, winner: Option<PlayerId>) {
        let (round, winner) = {
            let state = self.state.read();
            let winner = winner.and_then(|id| state.players.iter().find(|p| p.id == id).cloned());
            (state.round, winner)
        };
        self.transition(GameStage::RoundEnded);
        self.notifier.emit(LifecycleEvent::RoundEnded { round, winner });
        self.notifier.emit(LifecycleEvent::StateChanged);
    }

    /// Finish the game.
    pub fn end_game(&self, winners: &[PlayerId]) {
        let winners = {
            let state = self.state.read();
            state
                .players
                .iter()
                .filter(|p| winners.contains(&p.id))
                .cloned()
                .collect()
        };
        self.transition(GameStage::GameEnd);
        self.notifier.emit(LifecycleEvent::GameEnded { winners });
    }

    fn transition(&self, new: GameStage) {
        let old = std::mem::replace(&mut self.state.write().stage, new);
        if old != new {
            self.notifier.emit(LifecycleEvent::StageChanged { old, new });
        }
    }
}

impl GameEngine for LobbyEngine {
    fn start(catalog: Arc<Catalog>, settings: &Settings) -> Self {
        Self {
            catalog,
            settings: settings.clone(),
            state: RwLock::new(LobbyState::default()),
            player_count: AtomicUsize::new(0),
            notifier: Notifier::new(),
        }
    }

    fn round(&self) -> u32 {
        self.state.read().round
    }

    fn judge(&self) -> Option<PlayerSummary> {
        self.state.read().judge.clone()
    }

    fn current_prompt(&self) -> Option<Card> {
        self.state.read().prompt.clone()
    }

    fn player_count(&self) -> usize {
        self.player_count.load(Ordering::Relaxed)
    }

    fn response_card_count(&self) -> usize {
        self.catalog.response_card_count()
    }

    fn prompt_card_count(&self) -> usize {
        self.catalog.prompt_card_count()
    }

    fn subscribe(&self) -> Receiver<LifecycleEvent> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::packs::Pack;

    fn catalog() -> Arc<Catalog> {
        let pack: Pack = Pack::finalize(
            serde_json::from_value(json!({
                "id": "base",
                "cards": [
                    {"id": "b1", "type": "prompt"},
                    {"id": "w1", "type": "response"},
                    {"id": "b2", "type": "prompt"}
                ]
            }))
            .unwrap(),
        );
        Arc::new(Catalog::from_packs(vec![pack]))
    }

    fn engine(settings: Settings) -> LobbyEngine {
        LobbyEngine::start(catalog(), &settings)
    }

    #[test]
    fn test_counts_come_from_catalog() {
        let e = engine(Settings::default());
        assert_eq!(e.prompt_card_count(), 2);
        assert_eq!(e.response_card_count(), 1);
        assert_eq!(e.round(), 0);
        assert_eq!(e.stage(), GameStage::GameStarting);
    }

    #[test]
    fn test_join_and_leave() {
        let e = engine(Settings::default().with_players(1, 2));
        let rx = e.subscribe();

        let a = e.join("Ada").unwrap();
        let b = e.join("Grace").unwrap();
        assert!(e.join("Lin").is_none());
        assert_eq!(e.player_count(), 2);

        assert!(e.leave(a));
        assert!(!e.leave(a));
        assert_eq!(e.player_count(), 1);
        assert_eq!(e.players()[0].id, b);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![LifecycleEvent::StateChanged; 3]);
    }

    #[test]
    fn test_round_needs_min_players() {
        let e = engine(Settings::default().with_players(2, 4));
        e.join("Ada");
        assert_eq!(e.begin_round(), None);

        e.join("Grace");
        assert_eq!(e.begin_round(), Some(1));
    }

    #[test]
    fn test_rounds_rotate_prompt_and_judge() {
        let e = engine(Settings::default().with_players(2, 4));
        e.join("Ada");
        e.join("Grace");

        e.begin_round();
        assert_eq!(e.current_prompt().unwrap().id().as_str(), "b1");
        assert_eq!(e.judge().unwrap().name, "Ada");

        e.begin_round();
        assert_eq!(e.current_prompt().unwrap().id().as_str(), "b2");
        assert_eq!(e.judge().unwrap().name, "Grace");

        e.begin_round();
        assert_eq!(e.current_prompt().unwrap().id().as_str(), "b1");
    }

    #[test]
    fn test_permanent_judge() {
        let e = engine(Settings::default().with_players(2, 4).with_permanent_judge(true));
        e.join("Ada");
        e.join("Grace");

        e.begin_round();
        e.begin_round();
        assert_eq!(e.judge().unwrap().name, "Ada");
    }

    #[test]
    fn test_event_sequence() {
        let e = engine(Settings::default().with_players(1, 4));
        let ada = e.join("Ada").unwrap();
        let rx = e.subscribe();

        e.begin_round();
        e.begin_judging();
        e.end_round(Some(ada));
        e.end_game(&[ada]);

        let summary = PlayerSummary::new(ada, "Ada");
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                LifecycleEvent::StageChanged {
                    old: GameStage::GameStarting,
                    new: GameStage::RoundInProgress
                },
                LifecycleEvent::RoundStarted,
                LifecycleEvent::StageChanged {
                    old: GameStage::RoundInProgress,
                    new: GameStage::JudgingCards
                },
                LifecycleEvent::StageChanged {
                    old: GameStage::JudgingCards,
                    new: GameStage::RoundEnded
                },
                LifecycleEvent::RoundEnded {
                    round: 1,
                    winner: Some(summary.clone())
                },
                LifecycleEvent::StateChanged,
                LifecycleEvent::StageChanged {
                    old: GameStage::RoundEnded,
                    new: GameStage::GameEnd
                },
                LifecycleEvent::GameEnded {
                    winners: vec![summary]
                },
            ]
        );
    }

    #[test]
    fn test_no_round_without_players() {
        // Unvalidated settings can allow zero players.
        let e = engine(Settings::default().with_players(0, 4));
        let rx = e.subscribe();

        assert_eq!(e.begin_round(), None);
        assert_eq!(e.round(), 0);
        assert!(e.judge().is_none());
        assert_eq!(rx.try_iter().count(), 0);

        e.join("Ada");
        assert_eq!(e.begin_round(), Some(1));
        assert_eq!(e.judge().unwrap().name, "Ada");
    }

    #[test]
    fn test_no_prompt_cards_no_round() {
        let e = LobbyEngine::start(Arc::new(Catalog::default()), &Settings::default().with_players(1, 2));
        e.join("Ada");
        assert_eq!(e.begin_round(), None);
        assert!(e.current_prompt().is_none());
    }
}
