//! Application-wide constants and runtime knob configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::error::ConfigError;
use crate::knob::gesture::ClickPolicy;

// Knob timing

/// Maximum span (ms) from the first release of a tap group to its last.
pub const GESTURE_WINDOW_MS: u64 = 500;

/// Continuous hold (ms) required to toggle between volume and scroll mode.
pub const LONG_PRESS_MS: u64 = 3000;

/// Button input is ignored for this long (ms) after a long-press fires.
pub const CLICK_COOLDOWN_MS: u64 = 500;

/// Swap clockwise / counter-clockwise to match the physical wiring.
///
/// With `false`, a falling edge on channel A while channel B reads high is
/// counter-clockwise. Boards that route A/B the other way round set this.
pub const ENCODER_DIRECTION_INVERTED: bool = false;

/// Push-button pulls the pin low when pressed (internal pull-up).
pub const BUTTON_ACTIVE_LOW: bool = true;

/// Knob sampling period (ms). Must stay well under the fastest detent
/// period, the decoder only sees one edge per sample.
pub const POLL_INTERVAL_MS: u64 = 1;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "knobpad";
pub const USB_PRODUCT: &str = "Knobpad Media Knob";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Depth of the knob → USB action queue.
pub const ACTION_QUEUE_DEPTH: usize = 16;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder A      → P0.03
//   Encoder B      → P0.04
//   Encoder switch → P0.02
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

// Display

/// SSD1306 panel geometry (128×32).
pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 32;

/// Runtime configuration for the knob pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobConfig {
    /// Tap grouping window (ms).
    pub gesture_window_ms: u64,
    /// Hold duration (ms) that toggles the mode.
    pub long_press_ms: u64,
    /// Suppression period (ms) after a long-press.
    pub click_cooldown_ms: u64,
    /// Swap rotation direction.
    pub encoder_direction_inverted: bool,
    /// Button reads low when pressed.
    pub button_active_low: bool,
    /// How taps are grouped into clicks.
    pub click_policy: ClickPolicy,
}

impl KnobConfig {
    pub const DEFAULT: Self = Self {
        gesture_window_ms: GESTURE_WINDOW_MS,
        long_press_ms: LONG_PRESS_MS,
        click_cooldown_ms: CLICK_COOLDOWN_MS,
        encoder_direction_inverted: ENCODER_DIRECTION_INVERTED,
        button_active_low: BUTTON_ACTIVE_LOW,
        click_policy: ClickPolicy::Windowed,
    };

    /// Reject thresholds that would make the classifier degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gesture_window_ms == 0 {
            return Err(ConfigError::ZeroGestureWindow);
        }
        if self.long_press_ms == 0 {
            return Err(ConfigError::ZeroLongPress);
        }
        Ok(())
    }
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
