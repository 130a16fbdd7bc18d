#![no_std]
#![no_main]

//! PwmOops firmware entry point.
//!
//! Blinks PWM_LED0 at the longest period its timer accepts, waits two seconds and raises a
//! kernel oops. The `pwm_led0_off` fatal error hook then switches the LED off before the
//! system halts (or resets with the `reset-on-fatal-error` feature).

mod exceptions;
mod systick;

use cortex_m_rt::entry;
use hal_interface::{HalPwm, PwmPolarity};
use kernel::{
    BootConfig, CortexM, FatalErrorHook, FatalReason, KernelResult, Mhz, Milliseconds,
    SemihostingBackend, error_handler,
};
use log::{LevelFilter, info};

/// Core clock after reset (HSI).
const K_CORE_FREQUENCY: Mhz = Mhz(16_000_000);

/// Delay between the LED start and the oops.
const K_OOPS_DELAY: Milliseconds = Milliseconds::from_seconds(2);

/// Interface ID of the LED timer in the drivers allocation.
const K_PWM_LED0_ID: u8 = 0;

static PWM_LED0: HalPwm = HalPwm::new("PWM_LED0", K_PWM_LED0_ID, 1, PwmPolarity::Normal);

static FATAL_HOOKS: [&FatalErrorHook; 1] = [&pwm_led::pwm_led0_off];

static PLATFORM: CortexM = CortexM;
static LOG_BACKEND: SemihostingBackend = SemihostingBackend;

#[entry]
fn main() -> ! {
    let Some(mut l_cp) = cortex_m::Peripherals::take() else {
        kernel::fatal_error_handler(
            FatalReason::KernelPanic,
            Some(&"Cortex-M peripherals already taken"),
        )
    };

    // Start systick
    systick::init_systick(&mut l_cp.SYST, K_CORE_FREQUENCY, Milliseconds(1));

    // Initialize drivers
    hal_interface::init();

    // Start kernel
    if let Err(l_err) = kernel::boot(BootConfig {
        log_level: LevelFilter::Info,
        log_backend: &LOG_BACKEND,
        log_timestamp: Some(systick::uptime_ms),
        platform: &PLATFORM,
        fatal_hooks: &FATAL_HOOKS,
    }) {
        error_handler(&l_err);
        park();
    }

    // A failed calibration leaves the LED off but still goes on to the oops
    if let Err(l_err) = start_led() {
        error_handler(&l_err);
        park();
    }

    systick::sleep(K_OOPS_DELAY, || {
        kernel::logger().process();
    });

    kernel::oops()
}

fn start_led() -> KernelResult<()> {
    pwm_led::pwm_led0_init(&PWM_LED0);
    let l_period = pwm_led::pwm_led0_start()?;
    info!("Oops in {} with LED period {}", K_OOPS_DELAY, l_period);
    Ok(())
}

/// Keeps flushing the log once the application gave up.
fn park() -> ! {
    loop {
        kernel::logger().process();
        cortex_m::asm::wfi();
    }
}
