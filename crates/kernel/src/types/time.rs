use core::fmt::Display;

/// A wrapper struct representing a duration in milliseconds.
///
/// # Fields
///
/// * `0` - The inner `u32` value representing the duration in milliseconds.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Milliseconds(pub u32);

impl Display for Milliseconds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

impl Milliseconds {
    /// Converts a number of seconds into `Milliseconds`.
    pub const fn from_seconds(p_seconds: u32) -> Self {
        Milliseconds(p_seconds * 1000)
    }

    /// Converts the value of the current instance into a `u32`.
    pub const fn to_u32(&self) -> u32 {
        self.0
    }
}

/// A frequency in hertz.
///
/// Holds the core clock frequency reported by the drivers, used to program the SysTick reload
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mhz(pub u32);

impl Mhz {
    /// Converts the value of the current instance into a `u32`.
    pub const fn to_u32(&self) -> u32 {
        self.0
    }

    /// Number of core clock cycles elapsing during `p_period`.
    pub const fn ticks_in(&self, p_period: Milliseconds) -> u32 {
        (self.0 / 1000) * p_period.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_to_millis() {
        assert_eq!(Milliseconds::from_seconds(2), Milliseconds(2000));
        assert_eq!(Milliseconds::from_seconds(0).to_u32(), 0);
    }

    #[test]
    fn systick_reload_for_one_millisecond() {
        assert_eq!(Mhz(216_000_000).ticks_in(Milliseconds(1)), 216_000);
        assert_eq!(Mhz(16_000_000).ticks_in(Milliseconds(1)), 16_000);
    }
}
