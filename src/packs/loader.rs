//! Content pack discovery and loading.
//!
//! The loader walks a content root, parses every pack file it finds, and
//! keeps going when one of them is broken. A bad file costs exactly that
//! file's pack: the failure is logged with its path and recorded in the
//! returned [`LoadReport`].
//!
//! Discovered files are processed in sorted path order, so the resulting
//! pack order is the same on every platform.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::{debug, error, info, warn};

use super::catalog::Catalog;
use super::error::{PackError, PackResult};
use super::pack::Pack;
use super::raw::RawPack;

/// Directory searched for packs when none is configured.
pub const DEFAULT_PACKS_DIR: &str = "packs";

/// Extension of pack files when none is configured.
pub const DEFAULT_EXTENSION: &str = "json";

/// Parse one pack document.
pub fn parse_pack(text: &str) -> PackResult<Pack> {
    Ok(Pack::from_json(text)?)
}

/// Read and parse one pack file.
///
/// Duplicate card identifiers are logged as warnings.
pub fn load_pack_file(path: &Path) -> PackResult<Pack> {
    let text = std::fs::read_to_string(path).map_err(|source| PackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = RawPack::from_json(&text).map_err(|source| PackError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;

    let (pack, overwrites) = Pack::finalize_with_report(raw);
    for o in &overwrites {
        warn!(
            path = %path.display(),
            pack = %pack.id(),
            card = %o.id,
            kind = %o.kind,
            replaced = o.replaced,
            by = o.by,
            "duplicate card id, later declaration wins"
        );
    }
    Ok(pack)
}

/// A pack file that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: PackError,
}

/// Outcome of one load run.
#[derive(Debug, Default)]
pub struct LoadReport {
    packs: Vec<Pack>,
    failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Packs that loaded, in sorted path order.
    #[must_use]
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// Files that failed, in sorted path order.
    #[must_use]
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// True when every discovered file loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Split into the catalog and the failures.
    #[must_use]
    pub fn into_parts(self) -> (Catalog, Vec<LoadFailure>) {
        (Catalog::from_packs(self.packs), self.failures)
    }

    /// Build the catalog, dropping the failure list.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.into_parts().0
    }
}

/// Loads every pack under a content root.
///
/// ## Example
///
/// ```no_run
/// use party_cards::packs::ContentLoader;
///
/// let report = ContentLoader::new("packs").load().expect("packs directory");
/// for failure in report.failures() {
///     eprintln!("skipped {}", failure.path.display());
/// }
/// let catalog = report.into_catalog();
/// println!("{} packs", catalog.len());
/// ```
#[derive(Clone, Debug)]
pub struct ContentLoader {
    root: PathBuf,
    extension: String,
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PACKS_DIR)
    }
}

impl ContentLoader {
    /// Create a loader for `root` using the default extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Only consider files with this extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Find pack files under the root, sorted by path.
    ///
    /// The root itself must be a readable directory with a UTF-8 path;
    /// anything else is an error. Entries below it that can't be inspected
    /// are returned as failures rather than aborting discovery.
    pub fn discover(&self) -> PackResult<(Vec<PathBuf>, Vec<LoadFailure>)> {
        let root = self.root.to_str().ok_or_else(|| PackError::NonUtf8Root {
            path: self.root.clone(),
        })?;
        std::fs::read_dir(&self.root).map_err(|source| PackError::Io {
            path: self.root.clone(),
            source,
        })?;

        let pattern = format!(
            "{}/**/*.{}",
            glob::Pattern::escape(root),
            glob::Pattern::escape(&self.extension)
        );

        let mut paths = Vec::new();
        let mut failures = Vec::new();
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => failures.push(LoadFailure {
                    path: e.path().to_path_buf(),
                    error: PackError::Walk(e),
                }),
            }
        }
        paths.sort();
        Ok((paths, failures))
    }

    /// Load every pack under the root.
    ///
    /// Fails only when the root can't be searched. Per-file problems end up
    /// in [`LoadReport::failures`].
    pub fn load(&self) -> PackResult<LoadReport> {
        let (paths, failures) = self.discover().map_err(|e| {
            error!(root = %self.root.display(), error = %e, "failed to search for packs");
            e
        })?;
        for f in &failures {
            error!(path = %f.path.display(), error = %f.error, "failed to inspect pack path");
        }

        debug!(root = %self.root.display(), files = paths.len(), "discovered pack files");

        let mut report = LoadReport {
            packs: Vec::with_capacity(paths.len()),
            failures,
        };
        let mut seen = FxHashSet::default();
        for path in paths {
            match load_pack_file(&path) {
                Ok(pack) => {
                    if !seen.insert(pack.id().clone()) {
                        warn!(
                            path = %path.display(),
                            pack = %pack.id(),
                            "pack id already used by an earlier file"
                        );
                    }
                    debug!(path = %path.display(), pack = %pack, "loaded pack");
                    report.packs.push(pack);
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "failed to load pack");
                    report.failures.push(LoadFailure { path, error: e });
                }
            }
        }

        info!(
            root = %self.root.display(),
            loaded = report.packs.len(),
            failed = report.failures.len(),
            "pack loading finished"
        );
        Ok(report)
    }
}
