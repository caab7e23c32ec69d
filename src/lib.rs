//! Host-testable library for knobpad.
//!
//! Everything that decides *what* the knob does lives here and builds
//! without any embedded dependency: the quadrature decoder, the button
//! gesture classifier, the volume/scroll mode machine and the translation
//! of actions into USB HID reports.
//!
//! Usage: `cargo test` (host) - the firmware in `main.rs` is only built
//! with `--features embedded` for the nRF52840 target.
//!
//! ```
//! use knobpad::knob::{Action, Knob, PinSample};
//!
//! let mut knob = Knob::default();
//! let idle = PinSample { channel_a: true, channel_b: false, button: false };
//! let step = PinSample { channel_a: false, ..idle };
//!
//! knob.prime(idle);
//! assert!(knob.tick(idle, 0).is_empty());
//! assert_eq!(knob.tick(step, 1).actions.as_slice(), &[Action::VolumeUp]);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod hid;
pub mod knob;

pub use config::KnobConfig;
pub use error::{ConfigError, Error};
pub use knob::{Action, Knob, Mode, ModeChange, PinSample, Resolution};
