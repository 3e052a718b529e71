use std::fmt;

/// Logical role a set of lookup roots plays during compilation
///
/// Supplied by the compiler driver; the file manager only models a subset
/// of these (see [`VirtualFileManager::list`](crate::VirtualFileManager::list)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    PlatformClassPath,
    ClassPath,
    SourcePath,
    ClassOutput,
    SourceOutput,
    AnnotationProcessorPath,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::PlatformClassPath,
        Location::ClassPath,
        Location::SourcePath,
        Location::ClassOutput,
        Location::SourceOutput,
        Location::AnnotationProcessorPath,
    ];

    /// Toolchain name of this location
    pub fn name(&self) -> &'static str {
        match self {
            Location::PlatformClassPath => "PLATFORM_CLASS_PATH",
            Location::ClassPath => "CLASS_PATH",
            Location::SourcePath => "SOURCE_PATH",
            Location::ClassOutput => "CLASS_OUTPUT",
            Location::SourceOutput => "SOURCE_OUTPUT",
            Location::AnnotationProcessorPath => "ANNOTATION_PROCESSOR_PATH",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
