//! Shared constants for the ipscale CLI.

/// Public IP endpoint. Responds with `{"ip": "<address>"}`.
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://api.ipify.org?format=json";

/// Request timeout for the public IP lookup, in seconds.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".ipscalerc.toml";

/// Spinner tick interval in milliseconds.
pub const SPINNER_TICK_MS: u64 = 100;
