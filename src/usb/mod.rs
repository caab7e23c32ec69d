//! USB Device subsystem - presents a composite HID device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  We create a **composite device** with two HID
//! interfaces:
//!
//! - Interface 0: Keyboard (boot protocol) - arrow keys in scroll mode
//! - Interface 1: Consumer Control - volume and media keys
//!
//! The writer task reads knob actions from the action channel and writes
//! press/release reports to the matching HID endpoint.

pub mod hid_device;
