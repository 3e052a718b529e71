//! In-memory class path roots
//!
//! An [`Archive`] stands in for a jar or class directory named by a URL.
//! Resolvers acquire an archive with [`Archive::open`] when a listing first
//! needs it and give it back with [`Archive::release`] at shutdown.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;

use crate::common::error::{Error, Result};
use crate::vfs::file_object::ResolvableHandle;

/// Textual form of one class path entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Url(String);

impl Url {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Url {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Url {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// A class path root resident in memory
pub trait Archive: Send + Sync + fmt::Debug {
    fn url(&self) -> &Url;

    /// Acquire the archive and snapshot its entries
    ///
    /// Every successful `open` must be matched by exactly one `release`.
    fn open(&self) -> Result<Vec<ResolvableHandle>>;

    /// Give back one acquisition obtained from `open`
    fn release(&self) -> Result<()>;
}

/// Archive backed by an ordered map of internal path to bytes
#[derive(Debug)]
pub struct MemoryArchive {
    url: Url,
    entries: BTreeMap<String, Bytes>,
    open_count: AtomicUsize,
}

impl MemoryArchive {
    pub fn new(url: impl Into<Url>) -> Self {
        Self {
            url: url.into(),
            entries: BTreeMap::new(),
            open_count: AtomicUsize::new(0),
        }
    }

    /// Add an entry; `path` uses `/` separators, e.g. `java/lang/Object.class`
    pub fn with_entry(mut self, path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Bytes>) {
        self.entries.insert(path.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Acquisitions not yet released
    pub fn open_handles(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl Archive for MemoryArchive {
    fn url(&self) -> &Url {
        &self.url
    }

    fn open(&self) -> Result<Vec<ResolvableHandle>> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .iter()
            .map(|(path, content)| ResolvableHandle::new(path.clone(), self.url.as_str(), content.clone()))
            .collect())
    }

    fn release(&self) -> Result<()> {
        self.open_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| count.checked_sub(1))
            .map(|_| ())
            .map_err(|_| Error::archive_error(self.url.as_str(), "released without an open acquisition"))
    }
}

/// Lookup table from URL text to archive
///
/// Both platform entries and loader URLs are resolved here. Cloning shares
/// the archives.
#[derive(Debug, Clone, Default)]
pub struct ArchiveRegistry {
    archives: HashMap<Url, Arc<dyn Archive>>,
}

impl ArchiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an archive under its own URL, replacing any previous one
    pub fn register(&mut self, archive: Arc<dyn Archive>) -> Option<Arc<dyn Archive>> {
        self.archives.insert(archive.url().clone(), archive)
    }

    pub fn with_archive(mut self, archive: Arc<dyn Archive>) -> Self {
        self.register(archive);
        self
    }

    pub fn resolve(&self, url: &Url) -> Option<Arc<dyn Archive>> {
        self.archives.get(url).cloned()
    }

    /// Resolve every URL in order, skipping those with no registered archive
    pub fn resolve_all<'a>(&self, urls: impl IntoIterator<Item = &'a Url>) -> Vec<Arc<dyn Archive>> {
        urls.into_iter()
            .filter_map(|url| {
                let archive = self.resolve(url);
                if archive.is_none() {
                    log::warn!("no archive registered for class path entry {}, skipping", url);
                }
                archive
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }
}
