//! memfm - in-memory file manager for embedded Java compilation
//!
//! Serves the file-management contract of a Java compiler driver without
//! touching a filesystem. Sources arrive as strings, type lookups are answered
//! from in-memory archives named by the class loader chain, and compiled
//! classes are collected in memory for immediate definition.
//!
//! ## Architecture
//!
//! - **common::classloader**: loader capability and the URL walker
//! - **vfs::resolver**: platform, user class path and source path listings
//! - **vfs::output**: output sinks and the output collector contract
//! - **common::manager**: the [`VirtualFileManager`] orchestrating all of it
//!
//! ## Lookup Flow
//!
//! ```text
//! driver ──list(CLASS_PATH)──▶ VirtualFileManager ──▶ UserClasspathResolver
//!                                   │                      │
//!                                   │               collect_urls(loader chain)
//!                                   │                      │
//!                                   │               ArchiveRegistry ──▶ Listing (registered)
//!                                   │
//!                              close() ──▶ release every registered Listing once
//! ```

pub mod common;
pub mod vfs;

pub use common::{
    collect_urls, ClassLoader, Config, Error, ManagerState, OpaqueClassLoader, ReleaseFailure,
    Result, UrlClassLoader, VirtualFileManager,
};
pub use vfs::{
    Archive, ArchiveRegistry, CompiledClassDefinition, FileObject, Kind, Listing, ListingId,
    Location, MemoryArchive, MemoryOutputCollector, OutputCollector, OutputSink, ResolvableHandle,
    SourceFile, Url,
};
