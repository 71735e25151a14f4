//! Status reporting.
//!
//! `StatusBoard` holds the side effects of lifecycle notifications that
//! other parts of the process can look at (the status title, a count of
//! handled events). `StatusSnapshot` is the reporting object served to
//! status surfaces such as an HTTP status endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::packs::Pack;

/// Mutable status written by the lifecycle observer.
#[derive(Debug, Default)]
pub struct StatusBoard {
    title: RwLock<String>,
    events_handled: AtomicU64,
}

impl StatusBoard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: RwLock::new(title.into()),
            events_handled: AtomicU64::new(0),
        }
    }

    /// Current status title.
    #[must_use]
    pub fn title(&self) -> String {
        self.title.read().clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.write() = title.into();
    }

    /// Lifecycle events handled so far.
    #[must_use]
    pub fn events_handled(&self) -> u64 {
        self.events_handled.load(Ordering::Relaxed)
    }

    pub(crate) fn record_event(&self) {
        self.events_handled.fetch_add(1, Ordering::Relaxed);
    }
}

/// Pack entry in a status snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackInfo {
    pub id: String,
    pub name: String,
}

impl From<&Pack> for PackInfo {
    fn from(pack: &Pack) -> Self {
        Self {
            id: pack.id().as_str().to_string(),
            name: pack.name().to_string(),
        }
    }
}

/// Point-in-time server status.
///
/// Field names are part of the status surface contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub server_name: String,
    pub min_players: usize,
    pub current_player_count: usize,
    pub max_players: usize,
    pub white_card_count: usize,
    pub black_card_count: usize,
    pub pack_info: Vec<PackInfo>,
}

impl StatusSnapshot {
    /// Serialize for a status endpoint.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Total cards across both variants.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.white_card_count + self.black_card_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_board_title_and_counter() {
        let board = StatusBoard::new("Server (0)");
        assert_eq!(board.title(), "Server (0)");

        board.set_title("Server (3)");
        board.record_event();
        board.record_event();

        assert_eq!(board.title(), "Server (3)");
        assert_eq!(board.events_handled(), 2);
    }

    #[test]
    fn test_snapshot_field_names() {
        let snapshot = StatusSnapshot {
            server_name: "Friday".into(),
            min_players: 3,
            current_player_count: 1,
            max_players: 8,
            white_card_count: 2,
            black_card_count: 1,
            pack_info: vec![PackInfo {
                id: "base".into(),
                name: "Base Set".into(),
            }],
        };

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "server_name": "Friday",
                "min_players": 3,
                "current_player_count": 1,
                "max_players": 8,
                "white_card_count": 2,
                "black_card_count": 1,
                "pack_info": [{"id": "base", "name": "Base Set"}]
            })
        );
        assert_eq!(snapshot.card_count(), 3);
    }

    #[test]
    fn test_pack_info_from_pack() {
        let pack = Pack::from_json(r#"{"id": "x"}"#).unwrap();
        let info = PackInfo::from(&pack);
        assert_eq!(info.id, "x");
        assert_eq!(info.name, "Untitled Pack");
    }
}
