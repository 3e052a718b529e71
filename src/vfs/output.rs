//! Compilation output kept in memory
//!
//! The file manager forwards every output request to an [`OutputCollector`]
//! and never looks at the bytes itself. [`MemoryOutputCollector`] is the
//! default collector: sinks write into shared buffers that the collector
//! turns into [`CompiledClassDefinition`]s once compilation is over.

use std::io;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;

use crate::common::consts::{CLASS_FILE_SUFFIX, INTERNAL_SEPARATOR, PACKAGE_SEPARATOR};
use crate::common::error::Result;
use crate::vfs::file_object::{FileObject, Kind};
use crate::vfs::Location;

/// Writable destination handed to the compiler for one output
#[derive(Debug, Clone)]
pub struct OutputSink {
    uri: String,
    kind: Kind,
    buffer: Arc<Mutex<BytesMut>>,
}

impl OutputSink {
    fn new(uri: String, kind: Kind, buffer: Arc<Mutex<BytesMut>>) -> Self {
        Self { uri, kind, buffer }
    }

    /// Bytes written so far
    pub fn contents(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buffer.lock())
    }
}

impl io::Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileObject for OutputSink {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn kind(&self) -> Kind {
        self.kind
    }
}

/// One output produced during compilation
#[derive(Debug, Clone)]
pub struct OutputEntry {
    location: Location,
    /// Binary class name for class outputs, relative path for resources
    name: String,
    kind: Kind,
    buffer: Arc<Mutex<BytesMut>>,
}

impl OutputEntry {
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buffer.lock())
    }

    fn matches(&self, location: Location, name: &str, kind: Kind) -> bool {
        self.location == location && self.kind == kind && self.name == name
    }
}

/// A compiled class ready to be defined by the embedding pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledClassDefinition {
    class_name: String,
    bytes: Bytes,
}

impl CompiledClassDefinition {
    pub fn new(class_name: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            class_name: class_name.into(),
            bytes,
        }
    }

    /// Dotted binary name, e.g. `com.foo.Bar`
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Internal path of the class file, e.g. `com/foo/Bar.class`
    pub fn filename(&self) -> String {
        format!(
            "{}{}",
            self.class_name.replace(PACKAGE_SEPARATOR, &INTERNAL_SEPARATOR.to_string()),
            Kind::Class.extension()
        )
    }
}

/// Buffers compilation output on behalf of the file manager
pub trait OutputCollector: Send + std::fmt::Debug {
    /// Sink for a class or source output keyed by binary class name
    fn class_output(
        &mut self,
        location: Location,
        class_name: &str,
        kind: Kind,
        sibling: Option<&dyn FileObject>,
    ) -> Result<OutputSink>;

    /// Sink for an arbitrary resource keyed by package and relative name
    fn resource_output(
        &mut self,
        location: Location,
        package_name: &str,
        relative_name: &str,
        sibling: Option<&dyn FileObject>,
    ) -> Result<OutputSink>;

    /// Every class output, in request order
    fn compiled_classes(&self) -> Vec<CompiledClassDefinition>;
}

/// Default collector holding every output in memory
#[derive(Debug, Default)]
pub struct MemoryOutputCollector {
    entries: Vec<OutputEntry>,
}

impl MemoryOutputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    /// Outputs that are not class files (resources, generated sources)
    pub fn resources(&self) -> Vec<&OutputEntry> {
        self.entries.iter().filter(|e| e.kind != Kind::Class).collect()
    }

    fn sink_for(&mut self, location: Location, name: String, kind: Kind, uri: String) -> OutputSink {
        let buffer = Arc::new(Mutex::new(BytesMut::new()));
        let entry = OutputEntry {
            location,
            name,
            kind,
            buffer: Arc::clone(&buffer),
        };

        match self.entries.iter_mut().find(|e| e.matches(location, &entry.name, kind)) {
            Some(existing) => {
                log::debug!("replacing earlier output {} at {}", entry.name, location);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }

        OutputSink::new(uri, kind, buffer)
    }
}

impl OutputCollector for MemoryOutputCollector {
    fn class_output(
        &mut self,
        location: Location,
        class_name: &str,
        kind: Kind,
        sibling: Option<&dyn FileObject>,
    ) -> Result<OutputSink> {
        log::debug!(
            "class output {} ({}) at {}, sibling {:?}",
            class_name,
            kind,
            location,
            sibling.map(|s| s.uri())
        );
        let uri = format!(
            "{}{}",
            class_name.replace(PACKAGE_SEPARATOR, &INTERNAL_SEPARATOR.to_string()),
            kind.extension()
        );
        Ok(self.sink_for(location, class_name.to_string(), kind, uri))
    }

    fn resource_output(
        &mut self,
        location: Location,
        package_name: &str,
        relative_name: &str,
        sibling: Option<&dyn FileObject>,
    ) -> Result<OutputSink> {
        log::debug!(
            "resource output {}/{} at {}, sibling {:?}",
            package_name,
            relative_name,
            location,
            sibling.map(|s| s.uri())
        );
        let name = if package_name.is_empty() {
            relative_name.to_string()
        } else {
            format!(
                "{}{}{}",
                package_name.replace(PACKAGE_SEPARATOR, &INTERNAL_SEPARATOR.to_string()),
                INTERNAL_SEPARATOR,
                relative_name
            )
        };
        let kind = Kind::from_path(&name);
        // A class file written as a resource shares its entry with class_output
        if let Some(stem) = name.strip_suffix(CLASS_FILE_SUFFIX) {
            let binary_name = stem.replace(INTERNAL_SEPARATOR, &PACKAGE_SEPARATOR.to_string());
            return Ok(self.sink_for(location, binary_name, Kind::Class, name));
        }
        Ok(self.sink_for(location, name.clone(), kind, name))
    }

    fn compiled_classes(&self) -> Vec<CompiledClassDefinition> {
        self.entries
            .iter()
            .filter(|e| e.kind == Kind::Class)
            .map(|e| CompiledClassDefinition::new(e.name.clone(), e.bytes()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_class_output_collected() {
        let mut collector = MemoryOutputCollector::new();
        let mut sink = collector
            .class_output(Location::ClassOutput, "com.foo.Bar", Kind::Class, None)
            .unwrap();
        assert_eq!(sink.uri(), "com/foo/Bar.class");
        sink.write_all(&[0xCA, 0xFE]).unwrap();
        sink.write_all(&[0xBA, 0xBE]).unwrap();

        let classes = collector.compiled_classes();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class_name(), "com.foo.Bar");
        assert_eq!(classes[0].bytes().to_vec(), vec![0xCAu8, 0xFE, 0xBA, 0xBE]);
        assert_eq!(classes[0].filename(), "com/foo/Bar.class");
    }

    #[test]
    fn test_resource_output_is_not_a_class() {
        let mut collector = MemoryOutputCollector::new();
        let mut sink = collector
            .resource_output(Location::ClassOutput, "", "META-INF/metadata.json", None)
            .unwrap();
        sink.write_all(b"{}").unwrap();

        let nested = collector
            .resource_output(Location::ClassOutput, "com.foo", "messages.properties", None)
            .unwrap();
        assert_eq!(nested.uri(), "com/foo/messages.properties");

        assert!(collector.compiled_classes().is_empty());
        let resources = collector.resources();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].name(), "META-INF/metadata.json");
        assert_eq!(resources[0].bytes().to_vec(), b"{}".to_vec());
    }

    #[test]
    fn test_rerequest_replaces_in_place() {
        let mut collector = MemoryOutputCollector::new();
        let mut first = collector
            .class_output(Location::ClassOutput, "a.A", Kind::Class, None)
            .unwrap();
        first.write_all(b"old").unwrap();
        collector
            .class_output(Location::ClassOutput, "b.B", Kind::Class, None)
            .unwrap();
        let mut again = collector
            .class_output(Location::ClassOutput, "a.A", Kind::Class, None)
            .unwrap();
        again.write_all(b"new").unwrap();

        let classes = collector.compiled_classes();
        let names: Vec<_> = classes.iter().map(|c| c.class_name()).collect();
        assert_eq!(names, vec!["a.A", "b.B"]);
        assert_eq!(classes[0].bytes().to_vec(), b"new".to_vec());
    }

    #[test]
    fn test_class_file_resource_keyed_by_binary_name() {
        let mut collector = MemoryOutputCollector::new();
        let mut class_sink = collector
            .class_output(Location::ClassOutput, "com.foo.Bar", Kind::Class, None)
            .unwrap();
        class_sink.write_all(b"first").unwrap();
        let mut resource_sink = collector
            .resource_output(Location::ClassOutput, "com.foo", "Bar.class", None)
            .unwrap();
        assert_eq!(resource_sink.uri(), "com/foo/Bar.class");
        assert_eq!(resource_sink.kind(), Kind::Class);
        resource_sink.write_all(b"second").unwrap();

        let classes = collector.compiled_classes();
        let names: Vec<_> = classes.iter().map(|c| c.class_name()).collect();
        assert_eq!(names, vec!["com.foo.Bar"]);
        assert_eq!(classes[0].bytes().to_vec(), b"second".to_vec());
        assert!(collector.resources().is_empty());
    }

    #[test]
    fn test_class_file_resource_in_unnamed_package() {
        let mut collector = MemoryOutputCollector::new();
        collector
            .resource_output(Location::ClassOutput, "", "Main.class", None)
            .unwrap();
        let classes = collector.compiled_classes();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class_name(), "Main");
    }
}
