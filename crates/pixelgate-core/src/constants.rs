/// Content type of the metadata record returned by the info operation
pub const INFO_CONTENT_TYPE: &str = "application/json";

/// Content type used when the output buffer matches no known image signature
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8088;

/// Default request body limit in megabytes
pub const DEFAULT_MAX_BODY_SIZE_MB: usize = 20;

/// Default deadline for a single engine or storage call
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;
