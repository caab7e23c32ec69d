//! Single-edge quadrature decoder.
//!
//! A step is reported on every high→low transition of channel A; the level
//! of channel B at that sample picks the direction. There is no gray-code
//! validation, so the caller must sample at least ~10× faster than the
//! fastest detent rate or steps get lost.

use super::PinSample;

/// Direction of one encoder detent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// The opposite direction.
    pub const fn reversed(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// Channel A level as of the end of the previous tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderState {
    pub last_channel_a: bool,
}

impl EncoderState {
    pub const fn new(last_channel_a: bool) -> Self {
        Self { last_channel_a }
    }
}

impl Default for EncoderState {
    /// Channel A idles high behind its pull-up.
    fn default() -> Self {
        Self::new(true)
    }
}

/// Decode one sample with the default polarity (B high → counter-clockwise).
///
/// `state` is updated on every call, whether or not a step fired.
pub fn decode(sample: PinSample, state: &mut EncoderState) -> Option<Rotation> {
    let falling = state.last_channel_a && !sample.channel_a;
    state.last_channel_a = sample.channel_a;

    if !falling {
        return None;
    }

    if sample.channel_b {
        Some(Rotation::CounterClockwise)
    } else {
        Some(Rotation::Clockwise)
    }
}

/// [`decode`] plus the board's direction calibration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder {
    state: EncoderState,
    inverted: bool,
}

impl Decoder {
    pub const fn new(inverted: bool) -> Self {
        Self {
            state: EncoderState::new(true),
            inverted,
        }
    }

    /// Seed the edge detector from the first observed sample so a board that
    /// powers up with A low does not report a phantom step.
    pub fn prime(&mut self, sample: PinSample) {
        self.state.last_channel_a = sample.channel_a;
    }

    pub fn decode(&mut self, sample: PinSample) -> Option<Rotation> {
        let rotation = decode(sample, &mut self.state)?;
        if self.inverted {
            Some(rotation.reversed())
        } else {
            Some(rotation)
        }
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }
}
