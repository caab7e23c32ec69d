//! Consumer Control HID support - media keys and volume.
//!
//! Consumer Control is a separate HID usage page (0x0C). The knob uses it
//! for volume up/down and play/next/previous; it is transmitted as its own
//! USB HID report alongside the keyboard report.

/// Consumer control report size (one little-endian 16-bit usage).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Usage page 0x0C codes for the knob's volume and media actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerUsage {
    PlayPause = 0x00CD,
    NextTrack = 0x00B5,
    PrevTrack = 0x00B6,
    VolumeUp = 0x00E9,
    VolumeDown = 0x00EA,
}

/// Consumer Control HID report. A zero usage means "released".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    pub usage: u16,
}

impl ConsumerReport {
    /// The release report sent after every media key press.
    pub const fn empty() -> Self {
        Self { usage: 0 }
    }

    pub const fn new(usage: ConsumerUsage) -> Self {
        Self {
            usage: usage as u16,
        }
    }

    /// Write the report into `buf`, returning the byte count, or 0 if
    /// `buf` cannot hold it.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match buf.get_mut(..CONSUMER_REPORT_SIZE) {
            Some(dst) => {
                dst.copy_from_slice(&self.usage.to_le_bytes());
                CONSUMER_REPORT_SIZE
            }
            None => 0,
        }
    }
}

/// USB HID Report Descriptor for Consumer Control.
///
/// This is a minimal descriptor for a single 16-bit usage.
pub const CONSUMER_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];
