//! Platform class path resolution
//!
//! The platform (bootstrap) class path is resolved once, when a [`Config`] is
//! built, following this priority order:
//! 1. An explicit value supplied by the embedding caller (highest priority)
//! 2. The `MEMFM_BOOT_CLASS_PATH` environment variable
//! 3. Empty (no platform library)
//!
//! [`Config`]: crate::common::config::Config

use std::env;

use crate::common::consts::BOOT_CLASS_PATH_ENV;

/// Class path string helpers
pub struct ClasspathResolver;

impl ClasspathResolver {
    /// Resolve the platform class path string
    ///
    /// Never fails: an unset or empty environment variable means an empty
    /// platform library, which is a valid configuration.
    pub fn resolve_platform_class_path(explicit: Option<&str>) -> String {
        if let Some(class_path) = explicit {
            log::debug!("platform class path from caller: {}", class_path);
            return class_path.to_string();
        }

        if let Ok(class_path) = env::var(BOOT_CLASS_PATH_ENV) {
            if !class_path.is_empty() {
                log::debug!("platform class path from {}: {}", BOOT_CLASS_PATH_ENV, class_path);
                return class_path;
            }
        }

        log::debug!("no platform class path configured");
        String::new()
    }

    /// Split a class path string into its non-empty, trimmed entries
    pub fn parse_entries(class_path: &str, separator: char) -> Vec<String> {
        if class_path.is_empty() {
            return vec![];
        }

        class_path
            .split(separator)
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}
