//! Lifecycle logging macros for copy and build runs
//!
//! Each macro stamps the canonical `component`, `op` and `event` fields so
//! test capture and log pipelines can filter on them.

/// Log the start of a run, with at least one context field
///
/// # Example
///
/// ```
/// # use pointer_path_core::log_op_start;
/// log_op_start!("copy", spec_count = 2);
/// log_op_start!("build", spec_count = 1, path = "/person");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, $($field:tt)+) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($field)+
        );
    };
}

/// Log the successful end of a run
///
/// # Example
///
/// ```
/// # use pointer_path_core::log_op_end;
/// log_op_end!("copy", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
}

/// Log a failed run with the error's stable kind and code
///
/// The error is converted into an [`ExError`](crate::errors::ExError) for
/// its classification; the original is consumed.
///
/// # Example
///
/// ```
/// # use pointer_path_core::{log_op_error, errors::PointerError};
/// let err = PointerError::MissingParent { path: "/person/nothing/value".to_string() };
/// log_op_error!("copy", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            error = %ex_err,
        );
    }};
}
