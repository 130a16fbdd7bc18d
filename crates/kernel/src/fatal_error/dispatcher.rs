use crate::data::Kernel;
use crate::fatal_error::{FatalReason, HookRegistry};
use crate::logger::Logger;
use crate::platform::Platform;
use core::fmt::Debug;
use core::panic::Location;
use log::Level;

/// What the system does once every hook has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    /// Restart the system.
    Reset,
    /// Stop in an endless loop.
    Halt,
}

impl TerminalAction {
    /// Action selected by the `reset-on-fatal-error` feature.
    pub const fn from_config() -> Self {
        if cfg!(feature = "reset-on-fatal-error") {
            TerminalAction::Reset
        } else {
            TerminalAction::Halt
        }
    }
}

/// Terminal action of this build.
pub const K_FATAL_TERMINAL_ACTION: TerminalAction = TerminalAction::from_config();

/// Runs the fatal error sequence over a set of hooks.
pub struct FatalErrorDispatcher<'a> {
    registry: &'a HookRegistry,
    logger: &'a Logger,
    platform: &'a dyn Platform,
    action: TerminalAction,
}

impl<'a> FatalErrorDispatcher<'a> {
    pub fn new(
        p_registry: &'a HookRegistry,
        p_logger: &'a Logger,
        p_platform: &'a dyn Platform,
        p_action: TerminalAction,
    ) -> Self {
        FatalErrorDispatcher {
            registry: p_registry,
            logger: p_logger,
            platform: p_platform,
            action: p_action,
        }
    }

    /// Handles one fatal error. Never returns.
    ///
    /// 1. Reports the reason and the context.
    /// 2. Runs every hook once, in registry order.
    /// 3. Flushes the log and switches it to synchronous mode.
    /// 4. Resets or halts the system, depending on the terminal action.
    ///
    /// # Parameters
    /// - `p_reason`: cause of the error.
    /// - `p_context`: state captured where the error occurred. Only printed.
    pub fn dispatch(&self, p_reason: FatalReason, p_context: Option<&dyn Debug>) -> ! {
        self.logger.push(
            Level::Error,
            module_path!(),
            format_args!("Fatal error {}: {}", p_reason.code(), p_reason),
        );
        if let Some(l_context) = p_context {
            self.logger
                .push(Level::Error, module_path!(), format_args!("{:?}", l_context));
        }

        for l_handler in self.registry.for_each() {
            l_handler();
        }

        self.logger.panic();

        match self.action {
            TerminalAction::Reset => {
                self.logger
                    .push(Level::Error, module_path!(), format_args!("Resetting system"));
                self.platform.reboot()
            }
            TerminalAction::Halt => {
                self.logger
                    .push(Level::Error, module_path!(), format_args!("Halting system"));
                self.platform.halt()
            }
        }
    }
}

/// Entry point of the fatal error path.
///
/// Called by the exception handlers, the panic handler and [`oops`]. Runs the hooks armed by
/// [`crate::boot`] then resets or halts the system, depending on the `reset-on-fatal-error`
/// feature.
pub fn fatal_error_handler(p_reason: FatalReason, p_context: Option<&dyn Debug>) -> ! {
    FatalErrorDispatcher::new(
        Kernel::fatal_hooks(),
        Kernel::logger(),
        Kernel::platform(),
        K_FATAL_TERMINAL_ACTION,
    )
    .dispatch(p_reason, p_context)
}

/// Raises a fatal error on purpose. The caller location is reported as context.
#[track_caller]
pub fn oops() -> ! {
    fatal_error_handler(FatalReason::KernelOops, Some(Location::caller()))
}
