//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default backend API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default backend request timeout in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default geocoding region bias
pub const DEFAULT_REGION: &str = "kr";

/// Default geocoding result language
pub const DEFAULT_LANGUAGE: &str = "ko";

/// Default number of nearby stores to return
pub const DEFAULT_LIMIT: usize = 4;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "samguk-map";
