//! Kernel-wide singletons.
//!
//! Every global is written once during [`crate::boot`] and only read afterwards, so the fatal
//! error path can reach them without taking a lock.

use crate::KernelError::FatalHooksAlreadyArmed;
use crate::KernelResult;
use crate::fatal_error::{FatalErrorHook, HookRegistry};
use crate::logger::Logger;
use crate::platform::{IdlePlatform, Platform};
use spin::Once;

static G_LOGGER: Logger = Logger::new();
static G_PLATFORM: Once<&'static dyn Platform> = Once::new();
static G_FATAL_HOOKS: Once<HookRegistry> = Once::new();
static G_NO_FATAL_HOOKS: HookRegistry = HookRegistry::new();
static G_IDLE_PLATFORM: IdlePlatform = IdlePlatform;

pub(crate) struct Kernel;

impl Kernel {
    /// Returns the kernel logger.
    pub(crate) fn logger() -> &'static Logger {
        &G_LOGGER
    }

    /// Returns the installed platform, or [`IdlePlatform`] before boot.
    pub(crate) fn platform() -> &'static dyn Platform {
        match G_PLATFORM.get() {
            Some(l_platform) => *l_platform,
            None => &G_IDLE_PLATFORM,
        }
    }

    /// Installs the platform. Only the first call has an effect.
    pub(crate) fn install_platform(p_platform: &'static dyn Platform) {
        G_PLATFORM.call_once(|| p_platform);
    }

    /// Returns the armed fatal error hooks, or an empty registry if none were armed.
    pub(crate) fn fatal_hooks() -> &'static HookRegistry {
        G_FATAL_HOOKS.get().unwrap_or(&G_NO_FATAL_HOOKS)
    }

    /// Builds the global hook registry from `p_hooks`.
    ///
    /// # Errors
    /// - [`crate::KernelError::FatalHooksAlreadyArmed`] if the hooks were already armed.
    /// - Any error of [`HookRegistry::from_hooks`].
    pub(crate) fn arm_fatal_hooks(
        p_hooks: &[&'static FatalErrorHook],
    ) -> KernelResult<&'static HookRegistry> {
        if G_FATAL_HOOKS.is_completed() {
            return Err(FatalHooksAlreadyArmed);
        }

        let l_registry = HookRegistry::from_hooks(p_hooks)?;
        let mut l_armed = false;
        let l_global = G_FATAL_HOOKS.call_once(|| {
            l_armed = true;
            l_registry
        });

        if l_armed {
            Ok(l_global)
        } else {
            Err(FatalHooksAlreadyArmed)
        }
    }
}
