use std::sync::Arc;

use crate::common::classloader::{collect_urls, ClassLoader};
use crate::vfs::archive::ArchiveRegistry;
use crate::vfs::Location;

use super::{Listing, ListingId, PackageFilter};

/// Resolves CLASS_PATH from the URLs exposed by a loader chain
///
/// The chain is walked on every call, so entries added to a loader between
/// two listings are picked up.
#[derive(Debug)]
pub struct UserClasspathResolver<'a> {
    loader: &'a Arc<dyn ClassLoader>,
    archives: &'a ArchiveRegistry,
}

impl<'a> UserClasspathResolver<'a> {
    pub fn new(loader: &'a Arc<dyn ClassLoader>, archives: &'a ArchiveRegistry) -> Self {
        Self { loader, archives }
    }

    pub fn list(&self, id: ListingId, filter: PackageFilter) -> Listing {
        let urls = collect_urls(self.loader.as_ref());
        if urls.is_empty() {
            log::debug!("no class path URLs visible from loader {}", self.loader.name());
            return Listing::empty(id, Location::ClassPath);
        }

        log::debug!("creating listing for {} class path URL(s)", urls.len());
        let roots = self.archives.resolve_all(&urls);
        Listing::over_roots(id, Location::ClassPath, roots, filter)
    }
}
