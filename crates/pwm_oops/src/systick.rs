use core::sync::atomic::{AtomicU32, Ordering};
use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::exception;
use kernel::{Mhz, Milliseconds};

static G_TICKS_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Starts the SysTick timer.
///
/// # Parameters
/// - `p_syst`: The SysTick peripheral.
/// - `p_core_frequency`: Frequency of the core clock feeding SysTick.
/// - `p_period`: Interval between two ticks.
pub fn init_systick(p_syst: &mut SYST, p_core_frequency: Mhz, p_period: Milliseconds) {
    p_syst.set_clock_source(SystClkSource::Core);
    p_syst.clear_current();
    p_syst.set_reload(p_core_frequency.ticks_in(p_period) - 1);
    p_syst.enable_interrupt();
    p_syst.enable_counter();
}

#[exception]
fn SysTick() {
    HAL_IncTick();
}

/// Increments the tick counter. Exported for the native drivers.
#[unsafe(no_mangle)]
pub extern "C" fn HAL_IncTick() {
    G_TICKS_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Returns the number of ticks since SysTick started. Exported for the native drivers.
#[unsafe(no_mangle)]
pub extern "C" fn HAL_GetTick() -> u32 {
    G_TICKS_COUNTER.load(Ordering::Relaxed)
}

/// Busy waits for at least `ms` ticks. Exported for the native drivers.
#[unsafe(no_mangle)]
pub extern "C" fn HAL_Delay(mut ms: u32) {
    if ms == 0 {
        ms = 1;
    }
    let l_start = HAL_GetTick();
    while HAL_GetTick().wrapping_sub(l_start) < ms {}
}

/// Uptime in milliseconds, used for the log timestamps.
pub fn uptime_ms() -> u32 {
    HAL_GetTick()
}

/// Waits for `p_duration`, calling `p_idle` after every tick.
pub fn sleep(p_duration: Milliseconds, p_idle: impl Fn()) {
    let l_start = HAL_GetTick();
    while HAL_GetTick().wrapping_sub(l_start) < p_duration.to_u32() {
        p_idle();
        cortex_m::asm::wfi();
    }
}
