//! Card system: identifiers, variants, payload, and per-variant indexes.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a card within its pack
//! - `CardKind`: Variant tag (prompt or response)
//! - `Card`: Finalized card with its owning pack
//! - `Attributes`: Opaque variant-specific payload
//! - `CardIndex`: Identifier lookup for one variant of one pack

pub mod attributes;
pub mod definition;
pub mod index;

pub use attributes::{AttributeKey, Attributes};
pub use definition::{Card, CardId, CardKind};
pub use index::CardIndex;
