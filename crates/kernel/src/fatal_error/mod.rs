//! Fatal error management.
//!
//! Any module can declare a cleanup hook with [`crate::fatal_error_hook!`]. The application
//! passes the list of hooks to [`crate::boot`], which arms them once. When the system meets an
//! unrecoverable condition, [`fatal_error_handler`] runs every armed hook in order, flushes the
//! log and then resets or halts the system, depending on the `reset-on-fatal-error` feature.

mod dispatcher;
mod hooks;
mod reason;

pub use dispatcher::*;
pub use hooks::*;
pub use reason::*;

#[cfg(test)]
pub(crate) use dispatcher::tests as dispatcher_tests;

use crate::KernelResult;
use crate::data::Kernel;

/// Arms the fatal error hooks, in the given order.
///
/// Meant for the startup phase, before any fault can happen. [`crate::boot`] calls it with
/// [`crate::BootConfig::fatal_hooks`].
///
/// # Errors
/// - [`crate::KernelError::FatalHooksAlreadyArmed`] on a second call.
/// - [`crate::KernelError::DuplicateFatalHook`] or [`crate::KernelError::FatalHookRegistryFull`]
///   if the list cannot be registered.
pub fn arm_fatal_error_hooks(
    p_hooks: &[&'static FatalErrorHook],
) -> KernelResult<&'static HookRegistry> {
    Kernel::arm_fatal_hooks(p_hooks)
}

/// Returns the armed hooks. Empty until [`arm_fatal_error_hooks`] succeeds.
pub fn fatal_error_hooks() -> &'static HookRegistry {
    Kernel::fatal_hooks()
}
