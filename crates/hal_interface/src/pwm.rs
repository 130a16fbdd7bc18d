use crate::HalError::PulseOutOfRange;
use crate::HalResult;
use core::fmt::Display;
use core::ops::{Div, Mul};

/// A duration in nanoseconds, the unit every PWM period and pulse is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Nanoseconds(pub u32);

impl Display for Nanoseconds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ns", self.0)
    }
}

impl Nanoseconds {
    /// Returns half of this duration, rounded down.
    pub const fn halved(&self) -> Self {
        Nanoseconds(self.0 >> 1)
    }

    /// Converts the value of the current instance into a `u32`.
    pub const fn to_u32(&self) -> u32 {
        self.0
    }
}

impl Mul<u32> for Nanoseconds {
    type Output = Nanoseconds;

    fn mul(self, p_rhs: u32) -> Nanoseconds {
        Nanoseconds(self.0.saturating_mul(p_rhs))
    }
}

impl Div<u32> for Nanoseconds {
    type Output = Nanoseconds;

    fn div(self, p_rhs: u32) -> Nanoseconds {
        Nanoseconds(self.0 / p_rhs)
    }
}

/// PWM period or pulse of `p_ns` nanoseconds.
pub const fn pwm_nsec(p_ns: u32) -> Nanoseconds {
    Nanoseconds(p_ns)
}

/// PWM period or pulse of `p_us` microseconds.
pub const fn pwm_usec(p_us: u32) -> Nanoseconds {
    Nanoseconds(p_us * 1_000)
}

/// PWM period or pulse of `p_ms` milliseconds.
pub const fn pwm_msec(p_ms: u32) -> Nanoseconds {
    Nanoseconds(p_ms * 1_000_000)
}

/// PWM period or pulse of `p_s` seconds. Only up to 4 s fit in the 32 bits nanosecond range.
pub const fn pwm_sec(p_s: u32) -> Nanoseconds {
    Nanoseconds(p_s * 1_000_000_000)
}

/// Signal polarity of a PWM channel.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PwmPolarity {
    /// The pulse is the high part of the period.
    Normal = 0,
    /// The pulse is the low part of the period.
    Inverted = 1,
}

/// A single PWM output, as seen by the applications.
///
/// Implementations talk to a driver that keeps its own state, so every operation only needs a
/// shared reference. This lets a channel be reached from a fatal error hook without locking.
pub trait PwmChannel: Sync {
    /// Name of the output, for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns `true` once the underlying device is initialized and usable.
    fn is_ready(&self) -> bool;

    /// Programs the channel with a new period and pulse width.
    ///
    /// A period of 0 stops the signal.
    ///
    /// # Errors
    /// Returns the driver error if the hardware cannot produce the requested signal.
    fn set(&self, p_period: Nanoseconds, p_pulse: Nanoseconds) -> HalResult<()>;
}

/// Checks that a pulse fits inside its period.
///
/// # Errors
/// Returns [`crate::HalError::PulseOutOfRange`] when `p_pulse` is longer than `p_period`.
pub fn check_pulse(
    p_name: &'static str,
    p_period: Nanoseconds,
    p_pulse: Nanoseconds,
) -> HalResult<()> {
    if p_pulse > p_period {
        Err(PulseOutOfRange(p_name, p_pulse.0))
    } else {
        Ok(())
    }
}

/// A PWM channel driven by the native drivers library.
///
/// The interface ID is the one given to the output in the drivers allocation, so the whole
/// description is known at build time and a `HalPwm` can live in a `static`.
#[derive(Debug)]
pub struct HalPwm {
    #[cfg_attr(not(target_os = "none"), allow(dead_code))]
    name: &'static str,
    interface_id: u8,
    channel: u32,
    polarity: PwmPolarity,
}

impl HalPwm {
    /// Describes channel `p_channel` of the PWM device allocated to `p_interface_id`.
    pub const fn new(
        p_name: &'static str,
        p_interface_id: u8,
        p_channel: u32,
        p_polarity: PwmPolarity,
    ) -> Self {
        HalPwm {
            name: p_name,
            interface_id: p_interface_id,
            channel: p_channel,
            polarity: p_polarity,
        }
    }

    /// Returns the interface ID of the PWM device.
    pub fn interface_id(&self) -> u8 {
        self.interface_id
    }

    /// Returns the channel number on the PWM device.
    pub fn channel(&self) -> u32 {
        self.channel
    }

    /// Returns the configured polarity.
    pub fn polarity(&self) -> PwmPolarity {
        self.polarity
    }
}

#[cfg(target_os = "none")]
impl PwmChannel for HalPwm {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_ready(&self) -> bool {
        unsafe { crate::bindings::pwm_is_ready(self.interface_id) }
    }

    fn set(&self, p_period: Nanoseconds, p_pulse: Nanoseconds) -> HalResult<()> {
        check_pulse(self.name, p_period, p_pulse)?;

        unsafe {
            crate::bindings::pwm_set(
                self.interface_id,
                self.channel,
                p_period.0,
                p_pulse.0,
                self.polarity as u8,
            )
        }
        .to_result(self.interface_id, self.name, p_period.0, p_pulse.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HalError;

    #[test]
    fn time_helpers_produce_nanoseconds() {
        assert_eq!(pwm_sec(1), Nanoseconds(1_000_000_000));
        assert_eq!(pwm_msec(20), Nanoseconds(20_000_000));
        assert_eq!(pwm_usec(250), Nanoseconds(250_000));
        assert_eq!(pwm_nsec(42), Nanoseconds(42));
        assert_eq!(pwm_sec(1) / 128, Nanoseconds(7_812_500));
        assert_eq!(pwm_sec(1) / 4, Nanoseconds(250_000_000));
    }

    #[test]
    fn halving_rounds_down() {
        assert_eq!(Nanoseconds(7).halved(), Nanoseconds(3));
        assert_eq!(Nanoseconds(0).halved(), Nanoseconds(0));
    }

    #[test]
    fn multiplication_saturates() {
        assert_eq!(Nanoseconds(u32::MAX) * 4, Nanoseconds(u32::MAX));
        assert_eq!(Nanoseconds(10) * 4, Nanoseconds(40));
    }

    #[test]
    fn pulse_must_fit_period() {
        assert_eq!(check_pulse("PWM_LED0", Nanoseconds(10), Nanoseconds(10)), Ok(()));
        assert_eq!(check_pulse("PWM_LED0", Nanoseconds(0), Nanoseconds(0)), Ok(()));
        assert_eq!(
            check_pulse("PWM_LED0", Nanoseconds(10), Nanoseconds(11)),
            Err(HalError::PulseOutOfRange("PWM_LED0", 11))
        );
    }

    #[test]
    fn hal_pwm_keeps_its_allocation() {
        const K_PWM: HalPwm = HalPwm::new("PWM_LED0", 255, 1, PwmPolarity::Inverted);
        assert_eq!(K_PWM.interface_id(), 255u8);
        assert_eq!(K_PWM.channel(), 1);
        assert_eq!(K_PWM.polarity(), PwmPolarity::Inverted);
    }
}
