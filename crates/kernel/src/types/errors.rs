use crate::KernelError::{
    AlreadyBooted, DuplicateFatalHook, FatalHookRegistryFull, FatalHooksAlreadyArmed, HalError,
    LoggerAlreadyInstalled, PwmCalibrationFailed, PwmNotInitialized, PwmNotReady,
};
use crate::KernelErrorLevel::{Critical, Error, Fatal};
use core::fmt::{Display, Formatter};
use hal_interface::{HalError as HalErrorDef, HalErrorLevel};

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq)]
pub enum KernelErrorLevel {
    Error,
    Critical,
    Fatal,
}

impl KernelErrorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fatal => "Fatal error : ",
            Critical => "Critical error : ",
            Error => "Error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelError {
    HalError(HalErrorDef),
    FatalHookRegistryFull(&'static str),
    DuplicateFatalHook(&'static str),
    FatalHooksAlreadyArmed,
    AlreadyBooted,
    LoggerAlreadyInstalled,
    PwmNotReady(&'static str),
    PwmNotInitialized(&'static str),
    PwmCalibrationFailed(&'static str),
}

impl KernelError {
    /// Returns the severity level of the kernel error.
    ///
    /// HAL errors keep the severity given by the HAL. Errors that leave a part of the firmware
    /// unusable are `Critical`, the others are plain `Error`s.
    pub fn severity(&self) -> KernelErrorLevel {
        match self {
            HalError(l_err) => match l_err.severity() {
                HalErrorLevel::Fatal => Fatal,
                HalErrorLevel::Critical => Critical,
                HalErrorLevel::Error => Error,
            },
            FatalHookRegistryFull(_) => Critical,
            DuplicateFatalHook(_) => Critical,
            FatalHooksAlreadyArmed => Error,
            AlreadyBooted => Error,
            LoggerAlreadyInstalled => Error,
            PwmNotReady(_) => Critical,
            PwmNotInitialized(_) => Error,
            PwmCalibrationFailed(_) => Critical,
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        // HAL errors carry their own prefix
        if let HalError(l_err) = self {
            return l_err.fmt(f);
        }

        f.write_str(self.severity().as_str())?;
        match self {
            HalError(_) => Ok(()),
            FatalHookRegistryFull(l_name) => write!(
                f,
                "Cannot register fatal error hook {} : hook table is full",
                l_name
            ),
            DuplicateFatalHook(l_name) => {
                write!(f, "Fatal error hook {} is already registered", l_name)
            }
            FatalHooksAlreadyArmed => f.write_str("Fatal error hooks are already armed"),
            AlreadyBooted => f.write_str("Kernel is already booted"),
            LoggerAlreadyInstalled => f.write_str("Another logger is already installed"),
            PwmNotReady(l_name) => write!(f, "PWM device {} is not ready", l_name),
            PwmNotInitialized(l_name) => write!(f, "PWM output {} is not initialized", l_name),
            PwmCalibrationFailed(l_name) => {
                write!(f, "No supported period found for PWM device {}", l_name)
            }
        }
    }
}

impl From<HalErrorDef> for KernelError {
    fn from(p_err: HalErrorDef) -> Self {
        HalError(p_err)
    }
}
