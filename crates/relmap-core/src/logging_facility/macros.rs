//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use relmap_core::log_op_start;
/// log_op_start!("subtract_maps");
/// log_op_start!("subtract_maps", domain = "classes");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use relmap_core::log_op_end;
/// log_op_end!("subtract_maps", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```ignore
/// # use relmap_core::{log_op_error, errors::RelmapError};
/// let err = RelmapError::EmptyKey { bucket: "added".to_string() };
/// log_op_error!("subtract", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::RmError;
        let rm_err: RmError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?rm_err.kind(),
            err.code = rm_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::RmError;
        let rm_err: RmError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?rm_err.kind(),
            err.code = rm_err.code(),
            $($field)*
        );
    }};
}
