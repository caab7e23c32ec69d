//! User interface subsystem - OLED mode display + rotary knob input.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×32 OLED via I²C, shows "VOLUME" / "SCROLL"
//! - **Knob**: quadrature encoder with push-button, polled every
//!   `POLL_INTERVAL_MS`

pub mod display;
pub mod knob_task;
