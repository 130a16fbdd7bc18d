//! Reaction of the kernel to runtime errors.
//!
//! - **Error**: reported as a warning, the caller carries on.
//! - **Critical**: reported as an error, the caller gives up the failed feature.
//! - **Fatal**: the system cannot go on and the fatal error path is taken.

use crate::KernelErrorLevel::{Critical, Error, Fatal};
use crate::fatal_error::{FatalReason, fatal_error_handler};
use crate::KernelError;
use log::{error, warn};

/// Handles a `KernelError` by severity.
///
/// # Parameters
/// - `p_err`: The error to handle.
///
/// # Returns
/// - Returns for `Error` and `Critical` errors. Does not return for `Fatal` errors: the error
///   is passed as context to [`fatal_error_handler`] with [`FatalReason::KernelPanic`].
pub fn error_handler(p_err: &KernelError) {
    match p_err.severity() {
        Fatal => fatal_error_handler(FatalReason::KernelPanic, Some(p_err)),
        Critical => error!("{}", p_err),
        Error => warn!("{}", p_err),
    }
}
