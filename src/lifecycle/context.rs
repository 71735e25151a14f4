//! Application context.
//!
//! `AppContext` is the startup orchestrator and the holder of the
//! process-wide handles: settings, catalog, engine, status. It is built once
//! and handed out as an `Arc`.
//!
//! ## Startup Order
//!
//! 1. Load settings (fatal on failure)
//! 2. Load every pack and build the catalog (fatal if the content root
//!    can't be searched; broken files are skipped)
//! 3. Construct the engine from the finished catalog and settings
//! 4. Subscribe the lifecycle observer to the engine
//!
//! The engine is never constructed before steps 1 and 2 complete.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{info, warn};

use super::observer::{status_title, LifecycleObserver};
use super::status::{PackInfo, StatusBoard, StatusSnapshot};
use crate::core::{JsonSettingsFile, Settings, SettingsError, SettingsSource, DEFAULT_SETTINGS_PATH};
use crate::packs::{
    Catalog, ContentLoader, LoadFailure, PackError, DEFAULT_EXTENSION, DEFAULT_PACKS_DIR,
};
use crate::rules::GameEngine;

/// Startup errors.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("settings unavailable: {0}")]
    Settings(#[from] SettingsError),

    #[error("pack content unavailable: {0}")]
    Packs(#[from] PackError),

    #[error("failed to start lifecycle observer: {0}")]
    Observer(#[source] std::io::Error),

    /// An earlier initialization attempt failed; it is not retried.
    #[error("context initialization already failed: {0}")]
    InitFailed(String),
}

/// Where startup reads its inputs from.
#[derive(Clone, Debug)]
pub struct ContextOptions {
    pub packs_dir: PathBuf,
    pub settings_path: PathBuf,
    pub extension: String,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            packs_dir: PathBuf::from(DEFAULT_PACKS_DIR),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ContextOptions {
    #[must_use]
    pub fn with_packs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packs_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Process-wide handles, built once at startup.
pub struct AppContext<E: GameEngine> {
    settings: Settings,
    catalog: Arc<Catalog>,
    engine: Arc<E>,
    status: Arc<StatusBoard>,
    failures: Vec<LoadFailure>,
    observer: Mutex<Option<LifecycleObserver>>,
}

impl<E: GameEngine> AppContext<E> {
    /// Start up with settings from `options.settings_path`.
    pub fn bootstrap(options: &ContextOptions) -> Result<Arc<Self>, ContextError> {
        Self::bootstrap_with(options, &JsonSettingsFile::new(&options.settings_path))
    }

    /// Start up with settings from a custom source.
    pub fn bootstrap_with<S: SettingsSource + ?Sized>(
        options: &ContextOptions,
        settings: &S,
    ) -> Result<Arc<Self>, ContextError> {
        let settings = settings.load()?;

        let report = ContentLoader::new(&options.packs_dir)
            .with_extension(options.extension.as_str())
            .load()?;
        let (catalog, failures) = report.into_parts();
        let catalog = Arc::new(catalog);

        let engine = Arc::new(E::start(Arc::clone(&catalog), &settings));
        let status = Arc::new(StatusBoard::new(status_title(
            &settings.server_name,
            engine.player_count(),
        )));
        let observer = LifecycleObserver::spawn(
            Arc::clone(&engine),
            engine.subscribe(),
            Arc::clone(&status),
            settings.server_name.clone(),
        )
        .map_err(ContextError::Observer)?;

        let ctx = Self {
            settings,
            catalog,
            engine,
            status,
            failures,
            observer: Mutex::new(Some(observer)),
        };
        ctx.log_banner();
        Ok(Arc::new(ctx))
    }

    fn log_banner(&self) {
        let s = &self.settings;
        let white = self.engine.response_card_count();
        let black = self.engine.prompt_card_count();

        info!("========= GAME STARTING =========");
        info!("Player limit: [{}, {}]", s.min_players, s.max_players);
        info!("Hand size: {}", s.hand_size);
        info!("Permanent judge: {}", s.permanent_judge);
        info!("Points to win: {}", s.max_points);
        info!("Cards: {} ({}x white, {}x black)", white + black, white, black);
        info!("Packs:");
        for pack in self.catalog.packs() {
            info!("        [{}]", pack);
        }
        if !self.failures.is_empty() {
            warn!("{} pack file(s) failed to load", self.failures.len());
        }
        info!("=================================");
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    #[must_use]
    pub fn status(&self) -> &Arc<StatusBoard> {
        &self.status
    }

    /// Pack files skipped during startup.
    #[must_use]
    pub fn load_failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Current server status.
    ///
    /// Fields are read one by one without a common lock, so a snapshot taken
    /// while players join may mix old and new values.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            server_name: self.settings.server_name.clone(),
            min_players: self.settings.min_players,
            current_player_count: self.engine.player_count(),
            max_players: self.settings.max_players,
            white_card_count: self.engine.response_card_count(),
            black_card_count: self.engine.prompt_card_count(),
            pack_info: self.catalog.packs().iter().map(PackInfo::from).collect(),
        }
    }

    /// Stop the lifecycle observer after it handles pending events.
    pub fn shutdown(&self) {
        if let Some(mut observer) = self.observer.lock().take() {
            observer.shutdown();
        }
    }
}

impl<E: GameEngine> Drop for AppContext<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<E: GameEngine> std::fmt::Debug for AppContext<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .field("packs", &self.catalog.len())
            .field("failures", &self.failures.len())
            .finish()
    }
}

enum CellState<E: GameEngine> {
    Empty,
    Ready(Arc<AppContext<E>>),
    Failed(String),
}

/// At-most-once holder for an [`AppContext`].
///
/// The first caller of [`ContextCell::get_or_init`] runs the initializer;
/// concurrent callers block until it finishes and then share its outcome.
/// A failed initialization is remembered and never retried.
pub struct ContextCell<E: GameEngine> {
    state: Mutex<CellState<E>>,
}

impl<E: GameEngine> Default for ContextCell<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GameEngine> ContextCell<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CellState::Empty),
        }
    }

    /// Get the context, initializing it on first use.
    pub fn get_or_init<F>(&self, init: F) -> Result<Arc<AppContext<E>>, ContextError>
    where
        F: FnOnce() -> Result<Arc<AppContext<E>>, ContextError>,
    {
        let mut state = self.state.lock();
        match &*state {
            CellState::Ready(ctx) => return Ok(Arc::clone(ctx)),
            CellState::Failed(msg) => return Err(ContextError::InitFailed(msg.clone())),
            CellState::Empty => {}
        }

        match init() {
            Ok(ctx) => {
                *state = CellState::Ready(Arc::clone(&ctx));
                Ok(ctx)
            }
            Err(e) => {
                *state = CellState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// The context, if initialization already succeeded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<AppContext<E>>> {
        match &*self.state.lock() {
            CellState::Ready(ctx) => Some(Arc::clone(ctx)),
            _ => None,
        }
    }
}
