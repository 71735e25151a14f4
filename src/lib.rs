//! # party-cards
//!
//! Content pack loading and card catalog for a party card game server.
//!
//! ## Design Principles
//!
//! 1. **Load Once, Read Forever**: Packs are parsed, linked, and indexed at
//!    startup. After that the catalog is immutable and shared freely.
//!
//! 2. **One Bad File Costs One Pack**: A malformed pack file is reported and
//!    skipped; it never aborts the load.
//!
//! 3. **Explicit Phases**: Parsing (`RawPack`) and linking (`Pack::finalize`)
//!    are separate, ordinary function calls.
//!
//! ## Architecture
//!
//! - **Tagged Cards**: Prompt and response cards share one ordered sequence,
//!   distinguished by a `CardKind` tag and indexed separately.
//!
//! - **Owner by Id**: Cards name their pack by `PackId`; there are no
//!   back-pointers.
//!
//! - **Explicit Context**: `AppContext` replaces a global singleton and is
//!   handed out by `Arc`.
//!
//! ## Modules
//!
//! - `cards`: Card ids, variants, payload, per-variant indexes
//! - `packs`: Pack parsing, linking, loading, and the catalog
//! - `core`: Settings and players
//! - `rules`: `GameEngine` trait and lifecycle notifications
//! - `lifecycle`: Startup orchestration, observer, status snapshot
//! - `games`: Engine implementations

pub mod core;
pub mod cards;
pub mod packs;
pub mod rules;
pub mod lifecycle;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    JsonSettingsFile, PlayerId, PlayerSummary, Settings, SettingsError, SettingsSource,
    DEFAULT_SETTINGS_PATH,
};

pub use crate::cards::{Attributes, Card, CardId, CardIndex, CardKind};

pub use crate::packs::{
    Catalog, ContentLoader, LoadFailure, LoadReport, Pack, PackError, PackId, PackResult, RawPack,
    Trophy,
};

pub use crate::rules::{GameEngine, GameStage, LifecycleEvent, Notifier};

pub use crate::lifecycle::{
    AppContext, ContextCell, ContextError, ContextOptions, PackInfo, StatusBoard, StatusSnapshot,
};
