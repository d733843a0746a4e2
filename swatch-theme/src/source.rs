//! # Stylesheet Sources
//!
//! Where stylesheets come from.
//!
//! A [StylesheetSource] produces a shared [Stylesheet] on demand. Two sources ship
//! with the crate:
//!
//! - [StaticStylesheet]: a stylesheet built in code.
//! - [JsonStylesheet]: a JSON document backed by two files, a bundled default
//!   that ships with the application and a writable copy in a cache directory that
//!   may be replaced at runtime (for example by a downloaded skin).
//!
//! ## Two-Tier Loading
//!
//! On every load that misses the memo, [JsonStylesheet] compares the modification
//! times of both files:
//!
//! 1. If the writable copy exists and is not older than the bundled one, it is parsed.
//! 2. Otherwise, or if the writable copy cannot be read or parsed, the bundled
//!    document is parsed and copied over the writable one. A bundled document that
//!    fails to parse is an error.
//! 3. If neither file can be read, the result is an empty stylesheet and a warning.
//!
//! ## Memoization
//!
//! Parsed stylesheets are memoized process-wide per file pair, unresolved policy
//! and registry. A load within the
//! memo window of a previous parse returns the same [Arc], so one re-theme pass over
//! many components parses the document once. The window is the only invalidation:
//! a file replaced within the window is picked up after it expires.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime};

use once_cell::sync::Lazy;

use crate::config::StyleConfig;
use crate::error::StyleResult;
use crate::json::{JsonStyleParser, UnresolvedPolicy};
use crate::registry::PropertyRegistry;
use crate::stylesheet::Stylesheet;

/// Default memo window of [JsonStylesheet].
pub const DEFAULT_MEMO_TTL: Duration = Duration::from_millis(2500);

/// Something that can produce a stylesheet.
pub trait StylesheetSource: Send + Sync + Debug {
    /// The name this source is registered under.
    fn name(&self) -> &str;

    /// Produce the stylesheet.
    fn load(&self) -> StyleResult<Arc<Stylesheet>>;
}

/// A stylesheet defined in code.
#[derive(Debug, Clone)]
pub struct StaticStylesheet {
    name: String,
    sheet: Arc<Stylesheet>,
}

impl StaticStylesheet {
    /// Wrap a stylesheet.
    pub fn new(name: impl Into<String>, sheet: Stylesheet) -> Self {
        Self {
            name: name.into(),
            sheet: Arc::new(sheet),
        }
    }

    /// Wrap an already shared stylesheet.
    pub fn shared(name: impl Into<String>, sheet: Arc<Stylesheet>) -> Self {
        Self {
            name: name.into(),
            sheet,
        }
    }
}

impl StylesheetSource for StaticStylesheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> StyleResult<Arc<Stylesheet>> {
        Ok(self.sheet.clone())
    }
}

/// File pair, unresolved policy and address of a custom registry.
type MemoKey = (PathBuf, PathBuf, UnresolvedPolicy, Option<usize>);

static MEMO: Lazy<Mutex<HashMap<MemoKey, (Instant, Arc<Stylesheet>)>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// A JSON stylesheet backed by a bundled document and a writable copy.
#[derive(Debug, Clone)]
pub struct JsonStylesheet {
    name: String,
    bundled: PathBuf,
    writable: PathBuf,
    memo_ttl: Duration,
    policy: UnresolvedPolicy,
    registry: Option<Arc<PropertyRegistry>>,
}

impl JsonStylesheet {
    /// Create a source reading `bundled` and keeping its writable copy at `writable`.
    pub fn new(name: impl Into<String>, bundled: impl Into<PathBuf>, writable: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            bundled: bundled.into(),
            writable: writable.into(),
            memo_ttl: DEFAULT_MEMO_TTL,
            policy: UnresolvedPolicy::default(),
            registry: None,
        }
    }

    /// Create a source whose writable copy lives where `config` says.
    pub fn from_config(name: impl Into<String>, bundled: impl Into<PathBuf>, config: &StyleConfig) -> Self {
        Self::new(name, bundled, config.writable_path())
            .with_memo_ttl(config.memo_ttl)
            .with_unresolved_policy(config.unresolved_policy)
    }

    /// Set the memo window.
    pub fn with_memo_ttl(mut self, ttl: Duration) -> Self {
        self.memo_ttl = ttl;
        self
    }

    /// Set what happens to properties no binding resolves.
    pub fn with_unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve properties against `registry` instead of the global one.
    pub fn with_registry(mut self, registry: Arc<PropertyRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The bundled document.
    pub fn bundled_path(&self) -> &Path {
        &self.bundled
    }

    /// The writable copy.
    pub fn writable_path(&self) -> &Path {
        &self.writable
    }

    fn memo_key(&self) -> MemoKey {
        let registry = self.registry.as_ref().map(|registry| Arc::as_ptr(registry) as usize);
        (self.bundled.clone(), self.writable.clone(), self.policy, registry)
    }

    fn parse(&self, document: &str, path: &Path) -> StyleResult<Stylesheet> {
        let registry = match &self.registry {
            Some(registry) => registry.clone(),
            None => PropertyRegistry::global(),
        };
        JsonStyleParser::new(&registry)
            .with_policy(self.policy)
            .parse_str(document)
            .map_err(|e| e.with_path(path))
    }

    fn read(&self, path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(document) => {
                log::info!("Loading stylesheet '{}' from {}", self.name, path.display());
                Some(document)
            },
            Err(e) => {
                log::warn!("Failed to read stylesheet {}: {}", path.display(), e);
                None
            },
        }
    }

    fn prefers_writable(&self) -> bool {
        let Some(writable) = modified(&self.writable) else {
            return false;
        };
        match modified(&self.bundled) {
            Some(bundled) => writable >= bundled,
            None => true,
        }
    }

    fn refresh_writable_copy(&self) {
        if let Some(parent) = self.writable.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create stylesheet cache {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = fs::copy(&self.bundled, &self.writable) {
            log::warn!(
                "Failed to copy {} to {}: {}",
                self.bundled.display(),
                self.writable.display(),
                e
            );
        }
    }

    fn load_uncached(&self) -> StyleResult<Stylesheet> {
        let mut writable_error = None;
        let writable_first = self.prefers_writable();

        if writable_first {
            if let Some(document) = self.read(&self.writable) {
                match self.parse(&document, &self.writable) {
                    Ok(sheet) => return Ok(sheet),
                    Err(e) => {
                        log::warn!("Ignoring stylesheet copy: {}, using the bundled document", e);
                        writable_error = Some(e);
                    },
                }
            }
        }

        if let Some(document) = self.read(&self.bundled) {
            let sheet = self.parse(&document, &self.bundled)?;
            self.refresh_writable_copy();
            return Ok(sheet);
        }

        if let Some(e) = writable_error {
            return Err(e);
        }
        if !writable_first {
            if let Some(document) = self.read(&self.writable) {
                return self.parse(&document, &self.writable);
            }
        }

        log::warn!(
            "Stylesheet '{}' has no readable document, using an empty stylesheet",
            self.name
        );
        Ok(Stylesheet::new())
    }
}

impl StylesheetSource for JsonStylesheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> StyleResult<Arc<Stylesheet>> {
        let key = self.memo_key();
        let mut memo = MEMO.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((parsed_at, sheet)) = memo.get(&key) {
            if parsed_at.elapsed() < self.memo_ttl {
                log::debug!("Stylesheet '{}' served from memo", self.name);
                return Ok(sheet.clone());
            }
        }

        let sheet = Arc::new(self.load_uncached()?);
        memo.insert(key, (Instant::now(), sheet.clone()));
        Ok(sheet)
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|metadata| metadata.modified()).ok()
}
