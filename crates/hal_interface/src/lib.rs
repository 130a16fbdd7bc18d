//! Hardware abstraction for the PWM outputs of the board.
//!
//! The PWM drivers themselves live in the native `drivers` library; this crate
//! binds them and exposes a [`PwmChannel`] interface that the rest of the
//! firmware (and the host tests) program against.

#![cfg_attr(not(test), no_std)]

mod bindings;
mod errors;
mod pwm;

pub use bindings::HalInterfaceResult;
pub use errors::*;
pub use pwm::*;

/// Initializes the native drivers library.
///
/// Must be called once, before any [`HalPwm`] is used.
#[cfg(target_os = "none")]
pub fn init() {
    unsafe { bindings::hal_init() }
}
