//! Canonical schema constants for structured logging and events
//!
//! These constants keep logging and error reporting consistent across crates.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Path and spec identifiers
pub const FIELD_PATH: &str = "path";
pub const FIELD_SPEC: &str = "spec";

// Collection sizes
pub const FIELD_SPEC_COUNT: &str = "spec_count";
pub const FIELD_MATCH_COUNT: &str = "match_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
