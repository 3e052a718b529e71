//! Location resolvers
//!
//! Each supported [`Location`] maps to one strategy producing a [`Listing`]:
//!
//! - **PLATFORM_CLASS_PATH**: roots named by the configured bootstrap class path
//! - **CLASS_PATH**: roots named by the URLs of the manager's loader chain
//! - **SOURCE_PATH**: always empty, sources are registered as strings
//!
//! Any other location is rejected. A listing acquires its archives lazily,
//! while it is iterated, and releases them only when the file manager shuts
//! down.

mod classpath;
mod platform;

pub use classpath::UserClasspathResolver;
pub use platform::PlatformResolver;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::consts::PACKAGE_SEPARATOR;
use crate::common::error::{Error, ReleaseFailure, Result};
use crate::vfs::archive::Archive;
use crate::vfs::file_object::{FileObject, Kind, ResolvableHandle};
use crate::vfs::Location;

/// Which handles a listing yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFilter {
    package: String,
    kinds: Vec<Kind>,
    recurse: bool,
}

impl PackageFilter {
    pub fn new(package: impl Into<String>, kinds: &[Kind], recurse: bool) -> Self {
        Self {
            package: package.into(),
            kinds: kinds.to_vec(),
            recurse,
        }
    }

    /// Exact package match, or nested match when recursing
    pub fn matches_package(&self, package: &str) -> bool {
        if package == self.package {
            return true;
        }
        if !self.recurse {
            return false;
        }
        if self.package.is_empty() {
            return true;
        }
        package.len() > self.package.len()
            && package.starts_with(self.package.as_str())
            && package[self.package.len()..].starts_with(PACKAGE_SEPARATOR)
    }

    pub fn matches(&self, handle: &ResolvableHandle) -> bool {
        self.kinds.contains(&handle.kind()) && self.matches_package(&handle.package_name())
    }
}

/// Identifier of a listing within one file manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(pub u64);

#[derive(Debug)]
struct RootListing {
    roots: Vec<Arc<dyn Archive>>,
    filter: PackageFilter,
    /// Indices into `roots`, in acquisition order
    acquired: Vec<usize>,
    released: bool,
}

impl RootListing {
    fn acquire(&mut self, index: usize) -> Result<Vec<ResolvableHandle>> {
        let archive = &self.roots[index];
        let handles = archive.open()?;
        if !self.acquired.contains(&index) {
            self.acquired.push(index);
        } else {
            // Already holding an acquisition for this root: give the extra one back
            archive.release()?;
        }
        Ok(handles.into_iter().filter(|h| self.filter.matches(h)).collect())
    }

    fn release(&mut self) -> Vec<ReleaseFailure> {
        if self.released {
            return Vec::new();
        }
        self.released = true;

        let mut failures = Vec::new();
        for index in self.acquired.drain(..) {
            let archive = &self.roots[index];
            if let Err(e) = archive.release() {
                failures.push(ReleaseFailure::new(archive.url().as_str(), e.to_string()));
            }
        }
        failures
    }
}

#[derive(Debug, Clone)]
enum ListingSource {
    Empty,
    Roots(Arc<Mutex<RootListing>>),
}

/// A lazily-acquired, closeable sequence of resolvable handles
///
/// Cloning shares the underlying state: the file manager keeps one clone in
/// its registry and hands the other to the caller.
#[derive(Debug, Clone)]
pub struct Listing {
    id: ListingId,
    location: Location,
    source: ListingSource,
}

impl Listing {
    /// The pre-built empty listing; iterating and releasing it do nothing
    pub fn empty(id: ListingId, location: Location) -> Self {
        Self {
            id,
            location,
            source: ListingSource::Empty,
        }
    }

    pub(crate) fn over_roots(
        id: ListingId,
        location: Location,
        roots: Vec<Arc<dyn Archive>>,
        filter: PackageFilter,
    ) -> Self {
        let state = RootListing {
            roots,
            filter,
            acquired: Vec::new(),
            released: false,
        };
        Self {
            id,
            location,
            source: ListingSource::Roots(Arc::new(Mutex::new(state))),
        }
    }

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_empty_listing(&self) -> bool {
        matches!(self.source, ListingSource::Empty)
    }

    /// Number of roots this listing may acquire
    pub fn root_count(&self) -> usize {
        match &self.source {
            ListingSource::Empty => 0,
            ListingSource::Roots(state) => state.lock().roots.len(),
        }
    }

    /// Whether shutdown has released this listing's archives
    ///
    /// Always `false` for the empty listing: it holds nothing, so there is
    /// nothing to release, and it stays iterable (and empty) after close.
    pub fn is_released(&self) -> bool {
        match &self.source {
            ListingSource::Empty => false,
            ListingSource::Roots(state) => state.lock().released,
        }
    }

    pub fn iter(&self) -> ListingIter {
        ListingIter {
            state: match &self.source {
                ListingSource::Empty => None,
                ListingSource::Roots(state) => Some(Arc::clone(state)),
            },
            next_root: 0,
            pending: Vec::new().into_iter(),
            done: false,
        }
    }

    /// Release every acquired archive once; later calls are no-ops
    pub(crate) fn release(&self) -> Vec<ReleaseFailure> {
        match &self.source {
            ListingSource::Empty => Vec::new(),
            ListingSource::Roots(state) => state.lock().release(),
        }
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = Result<ResolvableHandle>;
    type IntoIter = ListingIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Listing`], acquiring each root on first visit
#[derive(Debug)]
pub struct ListingIter {
    state: Option<Arc<Mutex<RootListing>>>,
    next_root: usize,
    pending: std::vec::IntoIter<ResolvableHandle>,
    done: bool,
}

impl Iterator for ListingIter {
    type Item = Result<ResolvableHandle>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(handle) = self.pending.next() {
                return Some(Ok(handle));
            }
            if self.done {
                return None;
            }
            let Some(state) = &self.state else {
                self.done = true;
                return None;
            };

            let mut state = state.lock();
            if state.released {
                self.done = true;
                return Some(Err(Error::Closed));
            }
            if self.next_root >= state.roots.len() {
                self.done = true;
                return None;
            }

            let index = self.next_root;
            self.next_root += 1;
            match state.acquire(index) {
                Ok(handles) => self.pending = handles.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Resolver strategy for one location
#[derive(Debug)]
pub enum LocationResolver<'a> {
    Platform(PlatformResolver<'a>),
    Classpath(UserClasspathResolver<'a>),
    SourcePath,
}

impl<'a> LocationResolver<'a> {
    /// Produce the listing for this strategy
    pub fn list(&self, id: ListingId, filter: PackageFilter) -> Listing {
        match self {
            LocationResolver::Platform(resolver) => resolver.list(id, filter),
            LocationResolver::Classpath(resolver) => resolver.list(id, filter),
            LocationResolver::SourcePath => Listing::empty(id, Location::SourcePath),
        }
    }
}
