//! File-like handles exchanged with the compiler driver
//!
//! Nothing here refers to a real file: a "file" is an in-memory value that
//! satisfies the driver's file object contract.

use std::fmt;

use bytes::Bytes;

use crate::common::consts::{
    CLASS_FILE_SUFFIX, HTML_FILE_SUFFIX, INTERNAL_SEPARATOR, PACKAGE_SEPARATOR, SOURCE_FILE_SUFFIX,
};

/// Kind of file object, derived from its name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Source,
    Class,
    Html,
    Other,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Source, Kind::Class, Kind::Html, Kind::Other];

    /// Suffix including the dot, empty for `Other`
    pub fn extension(&self) -> &'static str {
        match self {
            Kind::Source => SOURCE_FILE_SUFFIX,
            Kind::Class => CLASS_FILE_SUFFIX,
            Kind::Html => HTML_FILE_SUFFIX,
            Kind::Other => "",
        }
    }

    /// Classify a path or name by its suffix
    pub fn from_path(path: &str) -> Kind {
        if path.ends_with(CLASS_FILE_SUFFIX) {
            Kind::Class
        } else if path.ends_with(SOURCE_FILE_SUFFIX) {
            Kind::Source
        } else if path.ends_with(HTML_FILE_SUFFIX) {
            Kind::Html
        } else {
            Kind::Other
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Source => "SOURCE",
            Kind::Class => "CLASS",
            Kind::Html => "HTML",
            Kind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// Common contract of every file-like value handed to or from the driver
pub trait FileObject: fmt::Debug {
    /// URI-like name identifying this object
    fn uri(&self) -> &str;

    fn kind(&self) -> Kind;

    /// Whether this object could hold the type `simple_name` of the given kind
    fn is_name_compatible(&self, simple_name: &str, kind: Kind) -> bool {
        if self.kind() != kind {
            return false;
        }
        let file_name = self
            .uri()
            .rsplit(INTERNAL_SEPARATOR)
            .next()
            .unwrap_or_default();
        file_name == format!("{}{}", simple_name, kind.extension())
    }
}

/// One discoverable class or resource produced by a location resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvableHandle {
    /// Internal path relative to the archive root, e.g. `java/lang/String.class`
    class_name: String,
    kind: Kind,
    /// URL of the archive this handle was found in
    origin: String,
    content: Bytes,
}

impl ResolvableHandle {
    pub fn new(class_name: impl Into<String>, origin: impl Into<String>, content: Bytes) -> Self {
        let class_name = class_name.into();
        let kind = Kind::from_path(&class_name);
        Self {
            class_name,
            kind,
            origin: origin.into(),
            content,
        }
    }

    /// Internal path of this entry, using `/` separators
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Dotted package containing this entry, empty for the unnamed package
    pub fn package_name(&self) -> String {
        match self.class_name.rfind(INTERNAL_SEPARATOR) {
            Some(index) => self.class_name[..index].replace(INTERNAL_SEPARATOR, &PACKAGE_SEPARATOR.to_string()),
            None => String::new(),
        }
    }
}

impl FileObject for ResolvableHandle {
    fn uri(&self) -> &str {
        &self.class_name
    }

    fn kind(&self) -> Kind {
        self.kind
    }
}
