//! Virtual File Manager
//!
//! Answers the compiler driver's file-management questions from memory:
//! lookups are served by the location resolvers, writes go to the output
//! collector, and every listing handed out is remembered so that shutdown
//! can release it.
//!
//! Operations this embedding never needs (input lookup by name, same-file
//! checks, option handling) fail with [`Error::UnsupportedOperation`] instead
//! of guessing.

use std::sync::Arc;

use crate::common::classloader::ClassLoader;
use crate::common::config::Config;
use crate::common::consts::{CLASS_FILE_SUFFIX, INTERNAL_SEPARATOR, PACKAGE_SEPARATOR};
use crate::common::error::{Error, ReleaseFailure, Result};
use crate::vfs::resolver::{LocationResolver, PlatformResolver, UserClasspathResolver};
use crate::vfs::{
    ArchiveRegistry, CompiledClassDefinition, FileObject, Kind, Listing, ListingId,
    MemoryOutputCollector, OutputCollector, OutputSink, PackageFilter, ResolvableHandle,
    SourceFile,
};
use crate::vfs::Location;

/// Lifecycle of a file manager; `Closed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Open,
    Closed,
}

/// File manager serving one compilation attempt entirely from memory
#[derive(Debug)]
pub struct VirtualFileManager {
    config: Config,
    /// The manager's own loader; CLASS_PATH is whatever its chain exposes
    loader: Arc<dyn ClassLoader>,
    archives: ArchiveRegistry,
    output: Box<dyn OutputCollector>,
    sources: Vec<SourceFile>,
    /// Every listing handed out, in registration order
    to_close: Vec<Listing>,
    next_listing_id: u64,
    state: ManagerState,
}

impl VirtualFileManager {
    /// Create a manager that collects output with a [`MemoryOutputCollector`]
    pub fn new(config: Config, loader: Arc<dyn ClassLoader>, archives: ArchiveRegistry) -> Self {
        Self::with_collector(config, loader, archives, Box::new(MemoryOutputCollector::new()))
    }

    pub fn with_collector(
        config: Config,
        loader: Arc<dyn ClassLoader>,
        archives: ArchiveRegistry,
        output: Box<dyn OutputCollector>,
    ) -> Self {
        log::debug!(
            "creating file manager for loader {} with {} archive(s)",
            loader.name(),
            archives.len()
        );
        Self {
            config,
            loader,
            archives,
            output,
            sources: Vec::new(),
            to_close: Vec::new(),
            next_listing_id: 0,
            state: ManagerState::Open,
        }
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of listings registered for release
    pub fn registered_listings(&self) -> usize {
        self.to_close.len()
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            ManagerState::Open => Ok(()),
            ManagerState::Closed => Err(Error::Closed),
        }
    }

    /// Register an in-memory source unit
    pub fn add_source_file(&mut self, source: impl Into<String>) -> Result<&SourceFile> {
        self.ensure_open()?;
        let source = SourceFile::new(source, self.sources.len());
        log::debug!("adding source file {}", source.uri());
        self.sources.push(source);
        Ok(&self.sources[self.sources.len() - 1])
    }

    /// Sources registered so far, in registration order
    pub fn source_files(&self) -> &[SourceFile] {
        &self.sources
    }

    /// No compiler options are supported; always `None`
    pub fn is_supported_option(&self, option: &str) -> Option<usize> {
        log::debug!("is_supported_option({})", option);
        None
    }

    /// Always `None`: compiler plugins are never loaded through this manager
    pub fn get_class_loader(&self, location: Location) -> Option<Arc<dyn ClassLoader>> {
        log::debug!("get_class_loader({})", location);
        None
    }

    fn resolver_for(&self, location: Location) -> Result<LocationResolver<'_>> {
        match location {
            Location::PlatformClassPath => Ok(LocationResolver::Platform(PlatformResolver::new(
                &self.config,
                &self.archives,
            ))),
            Location::ClassPath => Ok(LocationResolver::Classpath(UserClasspathResolver::new(
                &self.loader,
                &self.archives,
            ))),
            Location::SourcePath => Ok(LocationResolver::SourcePath),
            other => Err(Error::unsupported_location(other, "list")),
        }
    }

    /// List the handles under `package_name` at `location`
    ///
    /// The returned listing is registered and will be released by [`close`].
    ///
    /// [`close`]: VirtualFileManager::close
    pub fn list(
        &mut self,
        location: Location,
        package_name: &str,
        kinds: &[Kind],
        recurse: bool,
    ) -> Result<Listing> {
        log::debug!("list({},{},{:?},{})", location, package_name, kinds, recurse);
        self.ensure_open()?;

        let id = ListingId(self.next_listing_id);
        let filter = PackageFilter::new(package_name, kinds, recurse);
        let listing = self.resolver_for(location)?.list(id, filter);

        self.next_listing_id += 1;
        self.to_close.push(listing.clone());
        Ok(listing)
    }

    /// Binary name of a handle: `javax/validation/Foo.class` becomes `javax.validation.Foo`
    pub fn infer_binary_name(&self, location: Location, file: &ResolvableHandle) -> Result<String> {
        self.ensure_open()?;
        if location == Location::SourcePath {
            return Err(Error::unsupported_location(location, "infer_binary_name"));
        }

        let dotted = file
            .class_name()
            .replace(INTERNAL_SEPARATOR, &PACKAGE_SEPARATOR.to_string());
        dotted
            .strip_suffix(CLASS_FILE_SUFFIX)
            .map(str::to_string)
            .ok_or_else(|| Error::NotAClassFile {
                name: file.class_name().to_string(),
            })
    }

    pub fn is_same_file(&self, a: &dyn FileObject, b: &dyn FileObject) -> Result<bool> {
        log::debug!("is_same_file({},{})", a.uri(), b.uri());
        Err(Error::unsupported("is_same_file"))
    }

    pub fn handle_option(
        &mut self,
        current: &str,
        remaining: &mut dyn Iterator<Item = String>,
    ) -> Result<bool> {
        log::debug!("handle_option({},{:?})", current, remaining.size_hint());
        Err(Error::unsupported("handle_option"))
    }

    /// Only SOURCE_PATH is reported present (and it is always empty)
    pub fn has_location(&self, location: Location) -> bool {
        log::debug!("has_location({})", location);
        location == Location::SourcePath
    }

    pub fn get_java_file_for_input(
        &self,
        location: Location,
        class_name: &str,
        kind: Kind,
    ) -> Result<ResolvableHandle> {
        log::debug!("get_java_file_for_input({},{},{})", location, class_name, kind);
        Err(Error::unsupported("get_java_file_for_input"))
    }

    pub fn get_java_file_for_output(
        &mut self,
        location: Location,
        class_name: &str,
        kind: Kind,
        sibling: Option<&dyn FileObject>,
    ) -> Result<OutputSink> {
        log::debug!(
            "get_java_file_for_output({},{},{},{:?})",
            location,
            class_name,
            kind,
            sibling.map(|s| s.uri())
        );
        self.ensure_open()?;
        self.output.class_output(location, class_name, kind, sibling)
    }

    pub fn get_file_for_input(
        &self,
        location: Location,
        package_name: &str,
        relative_name: &str,
    ) -> Result<ResolvableHandle> {
        log::debug!("get_file_for_input({},{},{})", location, package_name, relative_name);
        Err(Error::unsupported("get_file_for_input"))
    }

    /// Sink for a resource such as `META-INF/spring-configuration-metadata.json`
    pub fn get_file_for_output(
        &mut self,
        location: Location,
        package_name: &str,
        relative_name: &str,
        sibling: Option<&dyn FileObject>,
    ) -> Result<OutputSink> {
        log::debug!(
            "get_file_for_output({},{},{},{:?})",
            location,
            package_name,
            relative_name,
            sibling.map(|s| s.uri())
        );
        self.ensure_open()?;
        self.output
            .resource_output(location, package_name, relative_name, sibling)
    }

    /// No-op in every state: nothing is buffered outside the output collector
    pub fn flush(&self) {
        log::debug!("flush()");
    }

    /// Release every registered listing, in registration order
    ///
    /// All listings get a release attempt even if some fail; failures are
    /// reported together afterwards. The manager is closed either way.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.state = ManagerState::Closed;

        let failures = self.release_all();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Release { failures })
        }
    }

    fn release_all(&mut self) -> Vec<ReleaseFailure> {
        let listings = std::mem::take(&mut self.to_close);
        log::debug!("releasing {} listing(s)", listings.len());

        let mut failures = Vec::new();
        for listing in &listings {
            failures.extend(listing.release());
        }
        failures
    }

    /// Classes written through [`get_java_file_for_output`], available after close
    ///
    /// [`get_java_file_for_output`]: VirtualFileManager::get_java_file_for_output
    pub fn compiled_classes(&self) -> Vec<CompiledClassDefinition> {
        self.output.compiled_classes()
    }
}

impl Drop for VirtualFileManager {
    fn drop(&mut self) {
        if self.state == ManagerState::Closed {
            return;
        }
        self.state = ManagerState::Closed;
        for failure in self.release_all() {
            log::warn!("failed to release {} while dropping file manager", failure);
        }
    }
}
