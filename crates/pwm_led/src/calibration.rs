use hal_interface::{Nanoseconds, PwmChannel};
use kernel::KernelError::PwmCalibrationFailed;
use kernel::KernelResult;
use log::{debug, info};

/// Finds the longest period the PWM channel accepts.
///
/// Starting from `p_max_period`, the channel is programmed with the period and half of it as
/// pulse. Each time the driver refuses the setting, the period is halved.
///
/// # Parameters
/// - `p_pwm`: The channel to calibrate. It is left running at the returned period.
/// - `p_min_period`: Shortest period of interest.
/// - `p_max_period`: Period tried first.
///
/// # Returns
/// The first accepted period. It is never below `4 * p_min_period`.
///
/// # Errors
/// [`kernel::KernelError::PwmCalibrationFailed`] if the period falls below `4 * p_min_period`
/// before the driver accepts one.
pub fn pwm_calibrate_max_period(
    p_pwm: &dyn PwmChannel,
    p_min_period: Nanoseconds,
    p_max_period: Nanoseconds,
) -> KernelResult<Nanoseconds> {
    info!("Calibrating {}...", p_pwm.name());

    let l_floor = p_min_period * 4;
    let mut l_period = p_max_period;

    // Any driver error is taken as "period too long"
    while let Err(l_err) = p_pwm.set(l_period, l_period.halved()) {
        debug!("{} refused by {}: {:?}", l_period, p_pwm.name(), l_err);

        l_period = l_period / 2;
        if l_period < l_floor {
            return Err(PwmCalibrationFailed(p_pwm.name()));
        }
    }

    info!(
        "Done calibrating {}; maximum/minimum periods {}/{}",
        p_pwm.name(),
        l_period,
        p_min_period
    );
    Ok(l_period)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hal_interface::HalError::PeriodOutOfRange;
    use hal_interface::HalResult;
    use kernel::KernelError;
    use spin::Mutex;
    use std::vec::Vec;

    /// Channel accepting periods inside `[min, max]` and recording every request.
    pub(crate) struct MockPwm {
        ready: bool,
        min: u32,
        max: u32,
        requests: Mutex<Vec<(u32, u32)>>,
    }

    impl MockPwm {
        pub(crate) const fn new(p_ready: bool, p_min: u32, p_max: u32) -> Self {
            MockPwm {
                ready: p_ready,
                min: p_min,
                max: p_max,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn requests(&self) -> Vec<(u32, u32)> {
            self.requests.lock().clone()
        }

        pub(crate) fn last_request(&self) -> Option<(u32, u32)> {
            self.requests.lock().last().copied()
        }
    }

    impl PwmChannel for MockPwm {
        fn name(&self) -> &'static str {
            "MOCK_PWM"
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn set(&self, p_period: Nanoseconds, p_pulse: Nanoseconds) -> HalResult<()> {
            self.requests.lock().push((p_period.0, p_pulse.0));

            // Switching off is always possible
            if p_period.0 == 0 {
                return Ok(());
            }
            if p_period.0 < self.min || p_period.0 > self.max {
                return Err(PeriodOutOfRange(self.name(), p_period.0));
            }
            hal_interface::check_pulse(self.name(), p_period, p_pulse)
        }
    }

    const P: u32 = 1_000;

    #[test]
    fn longest_period_accepted_first_try() {
        let l_pwm = MockPwm::new(true, 2 * P, u32::MAX);

        let l_period = pwm_calibrate_max_period(&l_pwm, Nanoseconds(P), Nanoseconds(8 * P));

        assert_eq!(l_period, Ok(Nanoseconds(8 * P)));
        assert_eq!(l_pwm.requests(), [(8 * P, 4 * P)]);
    }

    #[test]
    fn period_is_halved_until_accepted() {
        let l_pwm = MockPwm::new(true, 0, 4 * P);

        let l_period = pwm_calibrate_max_period(&l_pwm, Nanoseconds(P), Nanoseconds(8 * P));

        assert_eq!(l_period, Ok(Nanoseconds(4 * P)));
        assert_eq!(l_pwm.requests(), [(8 * P, 4 * P), (4 * P, 2 * P)]);
    }

    #[test]
    fn floor_is_four_times_the_minimum() {
        let l_pwm = MockPwm::new(true, 0, 2 * P);

        let l_period = pwm_calibrate_max_period(&l_pwm, Nanoseconds(P), Nanoseconds(8 * P));

        assert_eq!(l_period, Err(KernelError::PwmCalibrationFailed("MOCK_PWM")));
        // 2P is never tried
        assert_eq!(l_pwm.requests(), [(8 * P, 4 * P), (4 * P, 2 * P)]);
    }

    #[test]
    fn result_never_below_floor() {
        for l_accepted_max in [P, 3 * P, 5 * P, 9 * P, 17 * P, 40 * P] {
            let l_pwm = MockPwm::new(true, 0, l_accepted_max);

            match pwm_calibrate_max_period(&l_pwm, Nanoseconds(P), Nanoseconds(32 * P)) {
                Ok(l_period) => {
                    assert!(l_period >= Nanoseconds(4 * P));
                    assert!(l_period.0 <= l_accepted_max);
                }
                Err(l_err) => {
                    assert_eq!(l_err, KernelError::PwmCalibrationFailed("MOCK_PWM"));
                    assert!(l_accepted_max < 4 * P);
                }
            }
        }
    }

    #[test]
    fn odd_maximum_is_rounded_down() {
        let l_pwm = MockPwm::new(true, 0, 4 * P);

        let l_period = pwm_calibrate_max_period(&l_pwm, Nanoseconds(P), Nanoseconds(8 * P + 1));

        assert_eq!(l_period, Ok(Nanoseconds(4 * P)));
    }
}
