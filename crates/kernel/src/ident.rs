/// Name printed at boot.
pub const K_KERNEL_NAME: &str = "PwmOops";

/// Version of the kernel crate.
pub const K_KERNEL_VERSION: &str = env!("CARGO_PKG_VERSION");
