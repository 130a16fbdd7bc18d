use crate::pwm_calibrate_max_period;
use hal_interface::{Nanoseconds, PwmChannel, pwm_sec};
use kernel::KernelError::{PwmNotInitialized, PwmNotReady};
use kernel::{KernelResult, error_handler, fatal_error_hook};
use log::{error, info};
use spin::Once;

/// Shortest LED period looked for by the calibration.
pub const K_MIN_PERIOD: Nanoseconds = Nanoseconds(pwm_sec(1).0 / 128);

/// LED period tried first by the calibration.
pub const K_MAX_PERIOD: Nanoseconds = Nanoseconds(pwm_sec(1).0 / 4);

/// Name reported for the LED before its channel is bound.
const K_PWM_LED0_NAME: &str = "PWM_LED0";

static G_PWM_LED0: Once<&'static dyn PwmChannel> = Once::new();

/// A LED driven by a PWM channel.
pub struct PwmLed<'a> {
    pwm: &'a dyn PwmChannel,
}

impl<'a> PwmLed<'a> {
    pub fn new(p_pwm: &'a dyn PwmChannel) -> Self {
        PwmLed { pwm: p_pwm }
    }

    pub fn name(&self) -> &'static str {
        self.pwm.name()
    }

    /// # Errors
    /// [`kernel::KernelError::PwmNotReady`] if the PWM device is not initialized.
    pub fn check_ready(&self) -> KernelResult<()> {
        if self.pwm.is_ready() {
            Ok(())
        } else {
            Err(PwmNotReady(self.pwm.name()))
        }
    }

    /// Finds the longest period between `p_min` and `p_max` the channel accepts.
    ///
    /// See [`pwm_calibrate_max_period`].
    pub fn calibrate(&self, p_min: Nanoseconds, p_max: Nanoseconds) -> KernelResult<Nanoseconds> {
        pwm_calibrate_max_period(self.pwm, p_min, p_max)
    }

    /// Blinks the LED at `p_period` with a 50 % duty cycle.
    ///
    /// # Errors
    /// The driver error if the period is refused.
    pub fn start(&self, p_period: Nanoseconds) -> KernelResult<()> {
        self.pwm.set(p_period, p_period.halved())?;
        Ok(())
    }

    /// Checks the device, calibrates it and starts blinking at the longest accepted period.
    ///
    /// A failed calibration is reported and leaves the signal stopped (period 0), so the
    /// caller can carry on without a blinking LED.
    ///
    /// # Returns
    /// The period the LED runs at, 0 if the calibration failed.
    ///
    /// # Errors
    /// - [`kernel::KernelError::PwmNotReady`] if the PWM device is not ready.
    /// - The driver error if the final setting is refused.
    pub fn start_calibrated(
        &self,
        p_min: Nanoseconds,
        p_max: Nanoseconds,
    ) -> KernelResult<Nanoseconds> {
        self.check_ready()?;

        let l_period = match self.calibrate(p_min, p_max) {
            Ok(l_period) => l_period,
            Err(l_err) => {
                error_handler(&l_err);
                Nanoseconds(0)
            }
        };
        self.start(l_period)?;
        Ok(l_period)
    }

    /// Stops the PWM signal.
    ///
    /// # Errors
    /// The driver error if the channel cannot be programmed.
    pub fn switch_off(&self) -> KernelResult<()> {
        self.pwm.set(Nanoseconds(0), Nanoseconds(0))?;
        Ok(())
    }
}

/// Binds the LED to its PWM channel. Only the first call has an effect.
pub fn pwm_led0_init(p_pwm: &'static dyn PwmChannel) {
    G_PWM_LED0.call_once(|| p_pwm);
}

/// Returns the LED bound by [`pwm_led0_init`].
///
/// # Errors
/// [`kernel::KernelError::PwmNotInitialized`] if no channel was bound yet.
pub fn pwm_led0() -> KernelResult<PwmLed<'static>> {
    G_PWM_LED0
        .get()
        .map(|l_pwm| PwmLed::new(*l_pwm))
        .ok_or(PwmNotInitialized(K_PWM_LED0_NAME))
}

/// Calibrates the LED and starts blinking it at the longest accepted period.
///
/// See [`PwmLed::start_calibrated`].
///
/// # Returns
/// The period the LED blinks at, 0 if no period was accepted.
///
/// # Errors
/// - [`kernel::KernelError::PwmNotInitialized`] if the channel was not bound.
/// - [`kernel::KernelError::PwmNotReady`] if the PWM device is not ready.
/// - The driver error if the final setting is refused.
pub fn pwm_led0_start() -> KernelResult<Nanoseconds> {
    let l_led = pwm_led0()?;
    let l_period = l_led.start_calibrated(K_MIN_PERIOD, K_MAX_PERIOD)?;

    info!("{} running with period {}", l_led.name(), l_period);
    Ok(l_period)
}

fn pwm_led0_off_on_fatal_error() {
    // Nothing to switch off if the LED never started
    let Ok(l_led) = pwm_led0() else {
        return;
    };

    match l_led.switch_off() {
        Ok(()) => info!("Switched off {}", l_led.name()),
        Err(l_err) => error!("{}", l_err),
    }
}

fatal_error_hook!(pwm_led0_off, pwm_led0_off_on_fatal_error);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::MockPwm;
    use kernel::KernelError;

    #[test]
    fn period_bounds() {
        assert_eq!(K_MIN_PERIOD, Nanoseconds(7_812_500));
        assert_eq!(K_MAX_PERIOD, Nanoseconds(250_000_000));
        assert!(K_MAX_PERIOD >= K_MIN_PERIOD * 4);
    }

    #[test]
    fn not_ready_device_is_reported() {
        let l_pwm = MockPwm::new(false, 0, u32::MAX);
        let l_led = PwmLed::new(&l_pwm);

        assert_eq!(l_led.check_ready(), Err(KernelError::PwmNotReady("MOCK_PWM")));
    }

    #[test]
    fn start_uses_half_duty_cycle() {
        let l_pwm = MockPwm::new(true, 0, u32::MAX);
        let l_led = PwmLed::new(&l_pwm);

        l_led.start(Nanoseconds(1_000)).unwrap();
        assert_eq!(l_pwm.last_request(), Some((1_000, 500)));

        l_led.switch_off().unwrap();
        assert_eq!(l_pwm.last_request(), Some((0, 0)));
    }

    #[test]
    fn refused_period_is_a_hal_error() {
        let l_pwm = MockPwm::new(true, 0, 1_000);
        let l_led = PwmLed::new(&l_pwm);

        let l_err = l_led.start(Nanoseconds(2_000)).unwrap_err();
        assert!(matches!(l_err, KernelError::HalError(_)));
    }

    #[test]
    fn calibration_goes_through_the_led() {
        let l_pwm = MockPwm::new(true, 0, K_MAX_PERIOD.0 / 2);
        let l_led = PwmLed::new(&l_pwm);

        assert_eq!(
            l_led.calibrate(K_MIN_PERIOD, K_MAX_PERIOD),
            Ok(Nanoseconds(125_000_000))
        );
    }

    #[test]
    fn failed_calibration_leaves_the_signal_stopped() {
        let l_pwm = MockPwm::new(true, 0, K_MIN_PERIOD.0 * 2);
        let l_led = PwmLed::new(&l_pwm);

        assert_eq!(
            l_led.start_calibrated(K_MIN_PERIOD, K_MAX_PERIOD),
            Ok(Nanoseconds(0))
        );
        assert_eq!(l_pwm.last_request(), Some((0, 0)));
    }

    #[test]
    fn not_ready_device_is_never_programmed() {
        let l_pwm = MockPwm::new(false, 0, u32::MAX);
        let l_led = PwmLed::new(&l_pwm);

        assert_eq!(
            l_led.start_calibrated(K_MIN_PERIOD, K_MAX_PERIOD),
            Err(KernelError::PwmNotReady("MOCK_PWM"))
        );
        assert!(l_pwm.requests().is_empty());
    }

    static LED0: MockPwm = MockPwm::new(true, 0, K_MAX_PERIOD.0);

    // Single test: the LED can only be bound once per process
    #[test]
    fn pwm_led0_lifecycle() {
        assert_eq!(pwm_led0_start(), Err(KernelError::PwmNotInitialized("PWM_LED0")));

        // The hook is harmless before the LED is bound
        (pwm_led0_off.handler())();
        assert_eq!(LED0.last_request(), None);

        pwm_led0_init(&LED0);
        assert_eq!(pwm_led0_start(), Ok(K_MAX_PERIOD));
        assert_eq!(
            LED0.last_request(),
            Some((K_MAX_PERIOD.0, K_MAX_PERIOD.0 / 2))
        );

        assert_eq!(pwm_led0_off.name(), "pwm_led0_off");
        (pwm_led0_off.handler())();
        assert_eq!(LED0.last_request(), Some((0, 0)));
    }
}
