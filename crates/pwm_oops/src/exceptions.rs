//! Faults and panics, all routed to the kernel fatal error path.

use core::panic::PanicInfo;
use cortex_m_rt::{ExceptionFrame, exception};
use kernel::{FatalReason, fatal_error_handler};

/// Cortex-M HardFault exception handler.
///
/// # Parameters
/// - `p_frame`: The CPU-provided exception frame captured at the time of the fault, logged as
///   context.
#[exception]
unsafe fn HardFault(p_frame: &ExceptionFrame) -> ! {
    fatal_error_handler(FatalReason::CpuException, Some(p_frame))
}

/// Handler of every interrupt with no dedicated handler.
#[exception]
unsafe fn DefaultHandler(p_irqn: i16) {
    fatal_error_handler(FatalReason::SpuriousIrq, Some(&p_irqn))
}

#[panic_handler]
fn panic(p_info: &PanicInfo) -> ! {
    fatal_error_handler(FatalReason::KernelPanic, Some(p_info))
}
