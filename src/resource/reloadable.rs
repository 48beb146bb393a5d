//! Check-on-access reload skeleton shared by every file-backed dictionary.
//!
//! A [`ReloadableResource`] owns a [`ResourceParser`] and the location of its
//! input. Callers ask for [`current_value`](ReloadableResource::current_value)
//! at the start of each token stream; the resource decides on the spot whether
//! the backing file must be reparsed.
//!
//! # Protocol
//!
//! ```text
//! current_value()
//!   ├─ no file configured ─────────────────────────────► published value
//!   ├─ checked less than `reload_interval` ago ────────► published value
//!   └─ due: take reload lock, re-test, stamp last check
//!        ├─ stat fails ───────────────────────────────► published value
//!        ├─ mtime <= last loaded mtime ────────────────► published value
//!        └─ read + parse
//!             ├─ Err: log, keep ───────────────────────► published value
//!             └─ Ok: swap in new value + mtime ────────► new value
//! ```
//!
//! Only the swap is synchronized. Values are handed out as `Arc`s, so a caller
//! keeps using the table it obtained even if a newer one is published while
//! it is still analyzing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant, SystemTime};

use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::error::Result;
use crate::resource::interval::{DEFAULT_RELOAD_INTERVAL, effective_interval};
use crate::resource::probe;

/// Turns dictionary text into an immutable in-memory value.
///
/// `Output::default()` is the value served while nothing has been loaded: an
/// empty word set, or an absent synonym table.
pub trait ResourceParser: Send + Sync {
    /// The parsed value handed to analysis components.
    type Output: Default + Send + Sync;

    /// Parse the complete content of the backing file (or inline lines
    /// joined with `\n`).
    fn parse(&self, content: &str) -> Result<Self::Output>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

/// Where a resource gets its content from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Nothing configured; the resource always serves the default value.
    None,
    /// Literal lines from the index configuration, parsed once.
    Inline(Vec<String>),
    /// A file polled for modification.
    File(PathBuf),
}

const NEVER_CHECKED: u64 = u64::MAX;

struct Published<T> {
    value: Arc<T>,
    modified_at: Option<SystemTime>,
}

/// A parsed value kept in sync with a file on disk.
pub struct ReloadableResource<P: ResourceParser> {
    source: ResourceSource,
    reload_interval: Duration,
    parser: P,
    current: RwLock<Published<P::Output>>,
    /// Serializes the staleness check with the publish.
    reload_lock: Mutex<()>,
    epoch: Instant,
    /// Milliseconds since `epoch` of the last staleness check.
    last_checked_at: AtomicU64,
    reload_count: AtomicUsize,
}

impl<P: ResourceParser> ReloadableResource<P> {
    /// Create a resource for any source.
    ///
    /// Inline sources are parsed immediately and a parse failure is returned
    /// to the caller. File sources are loaded lazily on first
    /// access. A zero interval is replaced by [`DEFAULT_RELOAD_INTERVAL`].
    pub fn new(source: ResourceSource, reload_interval: Duration, parser: P) -> Result<Self> {
        let mut resource = Self::unloaded(source, reload_interval, parser);

        if let ResourceSource::Inline(lines) = &resource.source {
            let value = resource.parser.parse(&lines.join("\n"))?;
            resource.current = RwLock::new(Published {
                value: Arc::new(value),
                modified_at: Some(SystemTime::now()),
            });
            resource.reload_count.store(1, Ordering::Release);
        }

        Ok(resource)
    }

    /// Create a resource polling the file at `path`.
    pub fn from_path<T: Into<PathBuf>>(path: T, reload_interval: Duration, parser: P) -> Self {
        Self::unloaded(ResourceSource::File(path.into()), reload_interval, parser)
    }

    /// Create a resource from literal lines.
    pub fn from_lines(lines: Vec<String>, parser: P) -> Result<Self> {
        Self::new(ResourceSource::Inline(lines), DEFAULT_RELOAD_INTERVAL, parser)
    }

    /// Create a resource with nothing configured.
    pub fn empty(parser: P) -> Self {
        Self::unloaded(ResourceSource::None, DEFAULT_RELOAD_INTERVAL, parser)
    }

    /// Create a resource that always serves an already built `value`.
    pub fn fixed(value: P::Output, parser: P) -> Self {
        let resource = Self::empty(parser);
        *resource.current.write() = Published {
            value: Arc::new(value),
            modified_at: Some(SystemTime::now()),
        };
        resource
    }

    fn unloaded(source: ResourceSource, reload_interval: Duration, parser: P) -> Self {
        ReloadableResource {
            source,
            reload_interval: effective_interval(reload_interval),
            parser,
            current: RwLock::new(Published {
                value: Arc::new(P::Output::default()),
                modified_at: None,
            }),
            reload_lock: Mutex::new(()),
            epoch: Instant::now(),
            last_checked_at: AtomicU64::new(NEVER_CHECKED),
            reload_count: AtomicUsize::new(0),
        }
    }

    /// The live value, reloading it first if the backing file changed.
    ///
    /// Never fails: I/O and parse errors are logged and the previously
    /// published value is returned.
    pub fn current_value(&self) -> Arc<P::Output> {
        if let ResourceSource::File(path) = &self.source {
            if self.check_due(self.now_millis()) {
                self.check_for_update(path);
            }
        }
        Arc::clone(&self.current.read().value)
    }

    /// Modification time of the file the current value was parsed from.
    ///
    /// For inline sources this is the construction time; `None` until a file
    /// has been loaded successfully.
    pub fn last_modified_at(&self) -> Option<SystemTime> {
        self.current.read().modified_at
    }

    /// Whether a file was configured, i.e. whether the value can ever change.
    pub fn is_reloadable(&self) -> bool {
        matches!(self.source, ResourceSource::File(_))
    }

    /// Number of successful parses so far.
    pub fn reload_count(&self) -> usize {
        self.reload_count.load(Ordering::Acquire)
    }

    /// The configured backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ResourceSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Minimum time between two staleness checks.
    pub fn reload_interval(&self) -> Duration {
        self.reload_interval
    }

    /// The parser this resource feeds.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    fn now_millis(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn check_due(&self, now: u64) -> bool {
        let last = self.last_checked_at.load(Ordering::Acquire);
        let interval = u64::try_from(self.reload_interval.as_millis()).unwrap_or(u64::MAX);
        last == NEVER_CHECKED || now.saturating_sub(last) >= interval
    }

    fn check_for_update(&self, path: &Path) {
        let _guard = self.reload_lock.lock();

        // Another caller may have finished the check while this one waited.
        let now = self.now_millis();
        if !self.check_due(now) {
            return;
        }
        self.last_checked_at.store(now, Ordering::Release);

        let previous = self.current.read().modified_at;
        let modified = match probe::last_modified(path) {
            Ok(modified) => modified,
            Err(e) => {
                if previous.is_some() {
                    warn!(
                        "{}: cannot stat {}, keeping loaded value: {}",
                        self.parser.name(),
                        path.display(),
                        e
                    );
                } else {
                    debug!(
                        "{}: {} is not available yet: {}",
                        self.parser.name(),
                        path.display(),
                        e
                    );
                }
                return;
            }
        };

        if previous.is_some_and(|seen| modified <= seen) {
            debug!("{}: {} is unchanged", self.parser.name(), path.display());
            return;
        }

        match self.load(path) {
            Ok(value) => {
                {
                    let mut current = self.current.write();
                    current.value = Arc::new(value);
                    current.modified_at = Some(modified);
                }
                let count = self.reload_count.fetch_add(1, Ordering::AcqRel) + 1;
                info!(
                    "{}: loaded {} (load #{})",
                    self.parser.name(),
                    path.display(),
                    count
                );
            }
            Err(e) => {
                warn!(
                    "{}: failed to load {}, keeping previous value: {}",
                    self.parser.name(),
                    path.display(),
                    e
                );
            }
        }
    }

    fn load(&self, path: &Path) -> Result<P::Output> {
        let content = probe::read_text(path)?;
        self.parser.parse(&content)
    }
}

impl<P: ResourceParser> fmt::Debug for ReloadableResource<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadableResource")
            .field("parser", &self.parser.name())
            .field("source", &self.source)
            .field("reload_interval", &self.reload_interval)
            .field("reload_count", &self.reload_count())
            .finish()
    }
}
