use crate::HalError::{
    DeviceNotReady, PeriodOutOfRange, PulseOutOfRange, WriteError, WrongInterfaceId,
};
use crate::HalResult;

/// Represents the result codes returned by the native PWM drivers.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(dead_code)]
pub enum HalInterfaceResult {
    /// Operation successful.
    OK = 0,
    /// The provided interface ID is invalid.
    ErrWrongInterfaceId = 1,
    /// The PWM device has not been initialized.
    ErrNotReady = 2,
    /// The timer behind the channel cannot produce the requested period.
    ErrPeriodOutOfRange = 3,
    /// The requested pulse is longer than the period.
    ErrPulseOutOfRange = 4,
    /// The driver failed to update the timer registers.
    ErrWriteError = 5,
}

impl HalInterfaceResult {
    /// Converts a driver result code into a `HalResult<()>`.
    ///
    /// # Parameters
    /// - `p_id`: identifier of the interface the call was made on.
    /// - `p_name`: name of that interface, used to build the error.
    /// - `p_period`: period of the request, in nanoseconds.
    /// - `p_pulse`: pulse of the request, in nanoseconds.
    ///
    /// # Returns
    /// - `Ok(())` for [`HalInterfaceResult::OK`], the matching [`crate::HalError`] otherwise.
    pub fn to_result(
        &self,
        p_id: u8,
        p_name: &'static str,
        p_period: u32,
        p_pulse: u32,
    ) -> HalResult<()> {
        match self {
            HalInterfaceResult::OK => Ok(()),
            HalInterfaceResult::ErrWrongInterfaceId => Err(WrongInterfaceId(p_id)),
            HalInterfaceResult::ErrNotReady => Err(DeviceNotReady(p_name)),
            HalInterfaceResult::ErrPeriodOutOfRange => Err(PeriodOutOfRange(p_name, p_period)),
            HalInterfaceResult::ErrPulseOutOfRange => Err(PulseOutOfRange(p_name, p_pulse)),
            HalInterfaceResult::ErrWriteError => Err(WriteError(p_name)),
        }
    }
}

#[cfg(target_os = "none")]
unsafe extern "C" {
    pub fn hal_init();

    pub fn pwm_is_ready(p_id: u8) -> bool;

    pub fn pwm_set(
        p_id: u8,
        p_channel: u32,
        p_period_ns: u32,
        p_pulse_ns: u32,
        p_flags: u8,
    ) -> HalInterfaceResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HalError;

    #[test]
    fn driver_codes_map_to_errors() {
        assert_eq!(HalInterfaceResult::OK.to_result(0, "PWM_LED0", 10, 5), Ok(()));
        assert_eq!(
            HalInterfaceResult::ErrPeriodOutOfRange.to_result(0, "PWM_LED0", 10, 5),
            Err(HalError::PeriodOutOfRange("PWM_LED0", 10))
        );
        assert_eq!(
            HalInterfaceResult::ErrPulseOutOfRange.to_result(0, "PWM_LED0", 10, 50),
            Err(HalError::PulseOutOfRange("PWM_LED0", 50))
        );
        assert_eq!(
            HalInterfaceResult::ErrWrongInterfaceId.to_result(3, "PWM_LED0", 10, 5),
            Err(HalError::WrongInterfaceId(3))
        );
        assert_eq!(
            HalInterfaceResult::ErrNotReady.to_result(0, "PWM_LED0", 10, 5),
            Err(HalError::DeviceNotReady("PWM_LED0"))
        );
    }
}
