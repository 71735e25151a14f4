//! Startup orchestration and lifecycle side effects.
//!
//! ## Key Components
//!
//! - [`AppContext`]: Loads settings and packs, starts the engine, owns the handles
//! - [`ContextCell`]: Guards one-time construction of the context
//! - [`LifecycleObserver`]: Serial handler for engine notifications
//! - [`StatusBoard`]: Side effects readable by the rest of the process
//! - [`StatusSnapshot`]: Reporting object for status surfaces
//!
//! ## Example Usage
//!
//! ```no_run
//! use party_cards::games::lobby::LobbyEngine;
//! use party_cards::lifecycle::{AppContext, ContextCell, ContextOptions};
//!
//! let cell: ContextCell<LobbyEngine> = ContextCell::new();
//! let ctx = cell
//!     .get_or_init(|| AppContext::bootstrap(&ContextOptions::default()))
//!     .expect("startup failed");
//!
//! let status = ctx.snapshot();
//! println!("{}", status.to_json().unwrap());
//! ```

mod context;
mod observer;
mod status;

pub use context::{AppContext, ContextCell, ContextError, ContextOptions};
pub use observer::{handle_event, status_title, LifecycleObserver};
pub use status::{PackInfo, StatusBoard, StatusSnapshot};
