//! HID report types and the knob action → USB report translation.
//!
//! Volume and media actions go out on the Consumer Control interface,
//! scroll actions as Up/Down arrow key taps on the keyboard interface.

pub mod consumer;
pub mod keyboard;

#[cfg(test)]
mod tests;

use crate::knob::Action;
use consumer::{ConsumerReport, ConsumerUsage};
use keyboard::{KeyboardReport, KEY_DOWN_ARROW, KEY_UP_ARROW};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Consumer(ConsumerReport),
}

impl HidReport {
    /// The "key down" report for an action.
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::VolumeUp => Self::consumer(ConsumerUsage::VolumeUp),
            Action::VolumeDown => Self::consumer(ConsumerUsage::VolumeDown),
            Action::Play => Self::consumer(ConsumerUsage::PlayPause),
            Action::Next => Self::consumer(ConsumerUsage::NextTrack),
            Action::Previous => Self::consumer(ConsumerUsage::PrevTrack),
            Action::ScrollUp => Self::Keyboard(KeyboardReport::single_key(KEY_UP_ARROW)),
            Action::ScrollDown => Self::Keyboard(KeyboardReport::single_key(KEY_DOWN_ARROW)),
        }
    }

    /// The all-released report on the same interface.
    pub fn released(&self) -> Self {
        match self {
            HidReport::Keyboard(_) => HidReport::Keyboard(KeyboardReport::empty()),
            HidReport::Consumer(_) => HidReport::Consumer(ConsumerReport::empty()),
        }
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Consumer(c) => c.serialize(buf),
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, HidReport::Keyboard(_))
    }

    pub fn is_consumer(&self) -> bool {
        matches!(self, HidReport::Consumer(_))
    }

    fn consumer(usage: ConsumerUsage) -> Self {
        HidReport::Consumer(ConsumerReport::new(usage))
    }
}
