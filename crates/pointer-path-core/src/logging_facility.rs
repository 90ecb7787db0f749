//! Structured logging facility
//!
//! This module provides the canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use pointer_path_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error
//!
//! Orchestration entry points own start/end/error events. Path traversal and
//! compilation only emit `tracing::debug!` and `tracing::trace!`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{active_profile, init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
