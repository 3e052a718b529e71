use crate::common::classpath::ClasspathResolver;
use crate::common::consts::PATH_SEPARATOR;

/// Configuration for a virtual file manager
///
/// The platform class path is handed to the platform resolver as-is; it is
/// never re-read from the environment once the manager exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bootstrap entries backing PLATFORM_CLASS_PATH, joined by `path_separator`
    pub platform_class_path: String,
    /// Separator between class path entries
    pub path_separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_class_path: String::new(),
            path_separator: PATH_SEPARATOR,
        }
    }
}

impl Config {
    /// Build a configuration whose platform class path comes from the environment
    ///
    /// See [`ClasspathResolver::resolve_platform_class_path`] for the priority order.
    pub fn from_env() -> Self {
        Self::default()
            .with_platform_class_path(ClasspathResolver::resolve_platform_class_path(None))
    }

    pub fn with_platform_class_path(mut self, class_path: impl Into<String>) -> Self {
        self.platform_class_path = class_path.into();
        self
    }

    pub fn with_path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }

    /// Individual platform class path entries, in order
    pub fn platform_entries(&self) -> Vec<String> {
        ClasspathResolver::parse_entries(&self.platform_class_path, self.path_separator)
    }
}
