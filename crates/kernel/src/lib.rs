#![cfg_attr(not(test), no_std)]
mod boot;
mod data;
mod errors_mgt;
mod fatal_error;
mod ident;
mod logger;
mod platform;
#[cfg(target_arch = "arm")]
mod semihosting;
mod types;

use crate::data::Kernel;
pub use boot::{BootConfig, boot};
pub use errors_mgt::error_handler;
pub use fatal_error::*;
pub use ident::{K_KERNEL_NAME, K_KERNEL_VERSION};
pub use logger::{K_LOG_BUFFER_LEN, K_LOG_MSG_SIZE, LogBackend, LogRecord, Logger};
#[cfg(target_arch = "arm")]
pub use platform::CortexM;
pub use platform::{IdlePlatform, Platform};
#[cfg(target_arch = "arm")]
pub use semihosting::SemihostingBackend;
pub use types::*;

/// Returns the kernel logger, installed behind the `log` facade by [`boot`].
pub fn logger() -> &'static Logger {
    Kernel::logger()
}
