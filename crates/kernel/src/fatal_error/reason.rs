use core::fmt::{Display, Formatter};

/// Cause of a fatal error, as reported by the environment.
///
/// The dispatcher does not act on the reason, it only reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    /// The CPU raised a fault exception.
    CpuException,
    /// An interrupt fired with no handler attached.
    SpuriousIrq,
    /// Stack corruption was detected.
    StackCheckFail,
    /// Explicit abort request from the firmware.
    KernelOops,
    /// Rust panic, or a kernel error of fatal severity.
    KernelPanic,
    /// Any other reason code.
    Unknown(u32),
}

impl FatalReason {
    /// Numeric reason code.
    pub const fn code(&self) -> u32 {
        match self {
            FatalReason::CpuException => 0,
            FatalReason::SpuriousIrq => 1,
            FatalReason::StackCheckFail => 2,
            FatalReason::KernelOops => 3,
            FatalReason::KernelPanic => 4,
            FatalReason::Unknown(l_code) => *l_code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FatalReason::CpuException => "CPU exception",
            FatalReason::SpuriousIrq => "Unhandled interrupt",
            FatalReason::StackCheckFail => "Stack overflow",
            FatalReason::KernelOops => "Kernel oops",
            FatalReason::KernelPanic => "Kernel panic",
            FatalReason::Unknown(_) => "Unknown error",
        }
    }
}

impl From<u32> for FatalReason {
    fn from(p_code: u32) -> Self {
        match p_code {
            0 => FatalReason::CpuException,
            1 => FatalReason::SpuriousIrq,
            2 => FatalReason::StackCheckFail,
            3 => FatalReason::KernelOops,
            4 => FatalReason::KernelPanic,
            l_code => FatalReason::Unknown(l_code),
        }
    }
}

impl Display for FatalReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oops_and_panic_codes() {
        assert_eq!(FatalReason::KernelOops.code(), 3);
        assert_eq!(FatalReason::from(4), FatalReason::KernelPanic);
    }

    #[test]
    fn unknown_codes_are_kept() {
        assert_eq!(FatalReason::from(42), FatalReason::Unknown(42));
        assert_eq!(FatalReason::from(1), FatalReason::SpuriousIrq);
        assert_eq!(FatalReason::Unknown(42).as_str(), "Unknown error");
    }
}
