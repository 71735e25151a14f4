//! Lobby engine for exercising the catalog pipeline.
//!
//! A minimal `GameEngine` with no scoring or card dealing:
//! - Players join and leave up to `max_players`
//! - Each round takes the next prompt card from the catalog
//! - The judge rotates through players unless `permanent_judge` is set
//! - The caller decides when rounds and the game end
//!
//! Used by the `party-cards` binary and the integration tests.

mod engine;

pub use engine::LobbyEngine;
