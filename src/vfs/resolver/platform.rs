use crate::common::config::Config;
use crate::vfs::archive::{ArchiveRegistry, Url};
use crate::vfs::Location;

use super::{Listing, ListingId, PackageFilter};

/// Resolves PLATFORM_CLASS_PATH from the configured bootstrap entries
///
/// The class path string comes from [`Config`]; nothing is read from the
/// environment here.
#[derive(Debug)]
pub struct PlatformResolver<'a> {
    config: &'a Config,
    archives: &'a ArchiveRegistry,
}

impl<'a> PlatformResolver<'a> {
    pub fn new(config: &'a Config, archives: &'a ArchiveRegistry) -> Self {
        Self { config, archives }
    }

    /// Bootstrap entries, in class path order
    pub fn entries(&self) -> Vec<Url> {
        self.config
            .platform_entries()
            .into_iter()
            .map(Url::from)
            .collect()
    }

    pub fn list(&self, id: ListingId, filter: PackageFilter) -> Listing {
        log::debug!(
            "creating listing for platform class path: {}",
            self.config.platform_class_path
        );
        let entries = self.entries();
        let roots = self.archives.resolve_all(&entries);
        Listing::over_roots(id, Location::PlatformClassPath, roots, filter)
    }
}
