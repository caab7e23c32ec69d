//! Unified error type for knobpad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.
//!
//! The knob pipeline itself never fails at runtime; errors only come from
//! configuration and from the firmware's I/O collaborators.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Knob configuration was rejected.
    Config(ConfigError),

    /// USB endpoint write failed (bus disabled or host not listening).
    Usb,

    /// I²C transaction to the display failed.
    Display,
}

/// Reasons a [`KnobConfig`](crate::config::KnobConfig) is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `gesture_window_ms` is zero, no tap could ever group.
    ZeroGestureWindow,
    /// `long_press_ms` is zero, every press would toggle the mode.
    ZeroLongPress,
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroGestureWindow => write!(f, "gesture window must be non-zero"),
            ConfigError::ZeroLongPress => write!(f, "long-press threshold must be non-zero"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "invalid knob config: {}", e),
            Error::Usb => write!(f, "USB write failed"),
            Error::Display => write!(f, "display I2C error"),
        }
    }
}
