// File name suffixes recognized by Kind
pub const CLASS_FILE_SUFFIX: &str = ".class";
pub const SOURCE_FILE_SUFFIX: &str = ".java";
pub const HTML_FILE_SUFFIX: &str = ".html";

// Internal names use '/', binary names use '.'
pub const INTERNAL_SEPARATOR: char = '/';
pub const PACKAGE_SEPARATOR: char = '.';

// URI scheme for in-memory source units
pub const SOURCE_URI_SCHEME: &str = "string:///";

// Environment variable consulted by Config::from_env for the platform class path
pub const BOOT_CLASS_PATH_ENV: &str = "MEMFM_BOOT_CLASS_PATH";

// Platform class path entry separator
#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = ':';
