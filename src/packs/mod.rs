//! Content packs: parsing, linking, loading, and the catalog.
//!
//! ## Pipeline
//!
//! 1. [`ContentLoader`] finds pack files under a content root
//! 2. Each file is parsed into a [`RawPack`] (pure serde, defaults applied)
//! 3. [`Pack::finalize`] links cards to their pack and builds the
//!    per-variant indexes
//! 4. Loaded packs become a read-only [`Catalog`]
//!
//! A broken file never stops the load; it shows up in
//! [`LoadReport::failures`] instead. A content root that can't be searched
//! at all is an error.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod pack;
pub mod raw;

pub use catalog::Catalog;
pub use error::{PackError, PackResult};
pub use loader::{
    load_pack_file, parse_pack, ContentLoader, LoadFailure, LoadReport, DEFAULT_EXTENSION,
    DEFAULT_PACKS_DIR,
};
pub use pack::{Overwrite, Pack, PackId};
pub use raw::{RawCard, RawPack, Trophy, DEFAULT_PACK_ID, DEFAULT_PACK_NAME};
