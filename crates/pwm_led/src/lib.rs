#![cfg_attr(not(test), no_std)]
//! PWM LED application.
//!
//! Finds the longest period the PWM driver accepts, drives the LED at half duty cycle and
//! switches it off when the system meets a fatal error.

mod calibration;
mod led;

pub use calibration::pwm_calibrate_max_period;
pub use led::*;
