//! Terminal primitives of the fatal error path.

/// Architecture operations ending a fatal error.
///
/// Both operations never return. They are called once, at the very end of the fatal dispatch,
/// after every hook has run and the log has been flushed.
pub trait Platform: Sync {
    /// Restarts the system.
    fn reboot(&self) -> !;

    /// Stops the system by spinning forever.
    fn halt(&self) -> ! {
        #[allow(clippy::empty_loop)]
        loop {
            core::hint::spin_loop();
        }
    }
}

/// Platform used until [`crate::boot`] installs the real one.
///
/// It has no restart primitive, so a reset request halts instead.
pub struct IdlePlatform;

impl Platform for IdlePlatform {
    fn reboot(&self) -> ! {
        self.halt()
    }
}

/// Cortex-M terminal primitives.
#[cfg(target_arch = "arm")]
pub struct CortexM;

#[cfg(target_arch = "arm")]
impl Platform for CortexM {
    fn reboot(&self) -> ! {
        cortex_m::peripheral::SCB::sys_reset()
    }

    fn halt(&self) -> ! {
        // Nothing else may run once the system is halted
        cortex_m::interrupt::disable();

        #[allow(clippy::empty_loop)]
        loop {
            cortex_m::asm::nop();
        }
    }
}
