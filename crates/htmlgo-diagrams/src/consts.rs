//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default HTTP timeout for Kroki requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Public Kroki instance.
pub const DEFAULT_KROKI_URL: &str = "https://kroki.io";
