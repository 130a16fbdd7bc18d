//! This module defines the `HalError` and `HalErrorLevel` enumerations and their associated
//! functionality. It provides a structured way to represent PWM hardware abstraction layer
//! errors with different severity levels.

use crate::HalError::{
    DeviceNotReady, PeriodOutOfRange, PulseOutOfRange, WriteError, WrongInterfaceId,
};
use crate::HalErrorLevel::{Critical, Error, Fatal};
use core::fmt::{Display, Formatter};

pub type HalResult<T> = Result<T, HalError>;

/// Represents the severity levels of hardware abstraction layer (HAL) errors.
///
/// # Variants
///
/// - `Fatal`
///   The hardware cannot be used anymore and the system must be stopped.
///
/// - `Critical`
///   The device is unusable but the rest of the system can keep running.
///
/// - `Error`
///   The request was rejected; the device is still usable with other settings.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalErrorLevel {
    Fatal,
    Critical,
    Error,
}

impl HalErrorLevel {
    /// Converts the `HalErrorLevel` enum variant into a corresponding string slice representation.
    ///
    /// # Returns
    ///
    /// - `"HAL Fatal error : "` for `HalErrorLevel::Fatal` variant.
    /// - `"HAL Critical error : "` for `HalErrorLevel::Critical` variant.
    /// - `"HAL Error : "` for `HalErrorLevel::Error` variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fatal => "HAL Fatal error : ",
            Critical => "HAL Critical error : ",
            Error => "HAL Error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalError {
    WrongInterfaceId(u8),
    DeviceNotReady(&'static str),
    PeriodOutOfRange(&'static str, u32),
    PulseOutOfRange(&'static str, u32),
    WriteError(&'static str),
}

impl HalError {
    /// Returns the severity level of the `HalError` instance.
    ///
    /// A rejected period or pulse is a plain `Error`: the caller is expected to retry with
    /// another setting. A device that does not exist or is not ready is `Critical`.
    pub fn severity(&self) -> HalErrorLevel {
        match self {
            WrongInterfaceId(_) => Critical,
            DeviceNotReady(_) => Critical,
            PeriodOutOfRange(_, _) => Error,
            PulseOutOfRange(_, _) => Error,
            WriteError(_) => Error,
        }
    }
}

impl Display for HalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.severity().as_str())?;
        match self {
            WrongInterfaceId(l_id) => write!(f, "Interface ID {} does not exist", l_id),
            DeviceNotReady(l_name) => write!(f, "PWM device {} is not ready", l_name),
            PeriodOutOfRange(l_name, l_period) => {
                write!(f, "Period {} ns is not supported by {}", l_period, l_name)
            }
            PulseOutOfRange(l_name, l_pulse) => {
                write!(f, "Pulse {} ns does not fit the period of {}", l_pulse, l_name)
            }
            WriteError(l_name) => write!(f, "Error during write on interface {}", l_name),
        }
    }
}
