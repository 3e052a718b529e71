//! Class loader introspection
//!
//! The file manager never loads classes. It only needs to see which class
//! path entries the loaders above it were built from, so a loader is
//! modelled as an opaque capability with a parent and an optional URL set.
//!
//! The loader hierarchy is assumed acyclic, as guaranteed by the host that
//! builds it; the walker does not re-check this.

use std::fmt;
use std::sync::Arc;

use crate::vfs::Url;

/// A node in the loader chain
pub trait ClassLoader: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Next loader towards the root, `None` at the root
    fn parent(&self) -> Option<Arc<dyn ClassLoader>>;

    /// URLs this loader was built from, or `None` if it does not expose any
    fn urls(&self) -> Option<Vec<Url>>;
}

/// Loader backed by an explicit list of class path URLs
#[derive(Debug, Clone)]
pub struct UrlClassLoader {
    name: String,
    urls: Vec<Url>,
    parent: Option<Arc<dyn ClassLoader>>,
}

impl UrlClassLoader {
    pub fn new(name: impl Into<String>, urls: Vec<Url>, parent: Option<Arc<dyn ClassLoader>>) -> Self {
        Self {
            name: name.into(),
            urls,
            parent,
        }
    }
}

impl ClassLoader for UrlClassLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<Arc<dyn ClassLoader>> {
        self.parent.clone()
    }

    fn urls(&self) -> Option<Vec<Url>> {
        Some(self.urls.clone())
    }
}

/// Loader that exposes no enumerable URLs (bootstrap, platform or custom loaders)
#[derive(Debug, Clone)]
pub struct OpaqueClassLoader {
    name: String,
    parent: Option<Arc<dyn ClassLoader>>,
}

impl OpaqueClassLoader {
    pub fn new(name: impl Into<String>, parent: Option<Arc<dyn ClassLoader>>) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }
}

impl ClassLoader for OpaqueClassLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<Arc<dyn ClassLoader>> {
        self.parent.clone()
    }

    fn urls(&self) -> Option<Vec<Url>> {
        None
    }
}

/// Collect the URLs of `start` and every ancestor, closest loader first
///
/// Loaders without URLs contribute nothing and do not stop the walk.
/// Duplicates are kept.
pub fn collect_urls(start: &dyn ClassLoader) -> Vec<Url> {
    let mut urls = Vec::new();
    collect_into(&mut urls, start);

    let mut next = start.parent();
    while let Some(loader) = next {
        collect_into(&mut urls, loader.as_ref());
        next = loader.parent();
    }

    urls
}

fn collect_into(collector: &mut Vec<Url>, loader: &dyn ClassLoader) {
    log::debug!("collecting URLs from class loader {}", loader.name());
    if let Some(found) = loader.urls() {
        collector.extend(found);
    }
}
