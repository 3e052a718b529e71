//! In-memory building blocks of the virtual compilation filesystem
//!
//! - **location**: logical locations the driver asks about
//! - **file_object**: kinds, the file object contract and resolvable handles
//! - **archive**: in-memory class path roots and the URL registry
//! - **resolver**: per-location strategies producing closeable listings
//! - **source**: in-memory compilation units
//! - **output**: output sinks and the output collector contract

pub mod archive;
pub mod file_object;
pub mod location;
pub mod output;
pub mod resolver;
pub mod source;

pub use archive::{Archive, ArchiveRegistry, MemoryArchive, Url};
pub use file_object::{FileObject, Kind, ResolvableHandle};
pub use location::Location;
pub use output::{CompiledClassDefinition, MemoryOutputCollector, OutputCollector, OutputEntry, OutputSink};
pub use resolver::{Listing, ListingId, ListingIter, PackageFilter};
pub use source::SourceFile;
