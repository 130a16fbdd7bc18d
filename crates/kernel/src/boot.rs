use crate::KernelError::{AlreadyBooted, LoggerAlreadyInstalled};
use crate::data::Kernel;
use crate::fatal_error::{FatalErrorHook, K_FATAL_TERMINAL_ACTION, arm_fatal_error_hooks};
use crate::ident::{K_KERNEL_NAME, K_KERNEL_VERSION};
use crate::KernelResult;
use crate::logger::LogBackend;
use crate::platform::Platform;
use core::sync::atomic::{AtomicBool, Ordering};
use log::{LevelFilter, debug, info};

static G_BOOTED: AtomicBool = AtomicBool::new(false);

/// Configuration parameters for the kernel boot process.
pub struct BootConfig {
    /// Least severe level written to the log.
    pub log_level: LevelFilter,
    /// Where the log goes.
    pub log_backend: &'static dyn LogBackend,
    /// Uptime source for the log timestamps, in milliseconds.
    pub log_timestamp: Option<fn() -> u32>,
    /// Reset and halt primitives.
    pub platform: &'static dyn Platform,
    /// Hooks run on a fatal error, in this order.
    pub fatal_hooks: &'static [&'static FatalErrorHook],
}

/// Initializes the kernel.
///
/// This function performs the following steps:
/// 1. Configures the kernel logger and installs it behind the `log` facade.
/// 2. Installs the platform used by the fatal error path.
/// 3. Arms the fatal error hooks.
///
/// Once it returns, any fatal error runs the hooks and ends with the platform's terminal
/// action.
///
/// # Parameters
/// - `p_config`: The [`BootConfig`] containing all necessary parameters for booting.
///
/// # Errors
/// - [`crate::KernelError::AlreadyBooted`] on a second call.
/// - [`crate::KernelError::LoggerAlreadyInstalled`] if another `log` implementation was set.
/// - Any error raised while arming the fatal error hooks.
pub fn boot(p_config: BootConfig) -> KernelResult<()> {
    if G_BOOTED.swap(true, Ordering::AcqRel) {
        return Err(AlreadyBooted);
    }

    //////////////////////////
    // Logger initialization
    //////////////////////////
    let l_logger = Kernel::logger();
    l_logger.set_level(p_config.log_level);
    l_logger.set_backend(p_config.log_backend);
    if let Some(l_source) = p_config.log_timestamp {
        l_logger.set_timestamp(l_source);
    }
    log::set_logger(l_logger).map_err(|_| LoggerAlreadyInstalled)?;
    log::set_max_level(p_config.log_level);
    info!("Booting {} version {}", K_KERNEL_NAME, K_KERNEL_VERSION);

    ////////////////////////////////////
    // Fatal error path
    ////////////////////////////////////
    Kernel::install_platform(p_config.platform);
    let l_hooks = arm_fatal_error_hooks(p_config.fatal_hooks)?;
    for l_hook in l_hooks.iter() {
        debug!("Fatal error hook {} armed", l_hook.name());
    }
    info!(
        "{} fatal error hook(s) armed, {:?} on fatal error",
        l_hooks.len(),
        K_FATAL_TERMINAL_ACTION
    );

    Ok(())
}
