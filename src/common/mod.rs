//! Common utilities and definitions shared across modules
//!
//! This module contains the error type, configuration, constants, class path
//! string handling, class loader introspection and the file manager itself.

pub mod classloader;
pub mod classpath;
pub mod config;
pub mod consts;
pub mod error;
pub mod manager;

// Re-export commonly used items for convenience
pub use classloader::{collect_urls, ClassLoader, OpaqueClassLoader, UrlClassLoader};
pub use config::Config;
pub use error::{Error, ReleaseFailure, Result};
pub use manager::{ManagerState, VirtualFileManager};
