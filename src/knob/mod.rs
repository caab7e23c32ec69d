//! Rotary knob input pipeline.
//!
//! Called once per poll tick with the three sampled pin levels:
//!
//! ```text
//! PinSample ─┬─> Decoder ────> Rotation ─┐
//!            └─> Classifier ─> Gesture ──┴─> Resolver ─> Actions + ModeChange
//! ```
//!
//! Nothing here blocks or reads a clock; the caller passes a monotonic
//! millisecond timestamp with each sample. Calls must not overlap.

pub mod encoder;
pub mod gesture;
pub mod resolver;


pub use encoder::{Decoder, EncoderState, Rotation};
pub use gesture::{classify, Classifier, ClassifierState, ClickPolicy, Gesture, GestureTiming};
pub use resolver::{resolve, Action, Actions, Mode, ModeChange, Resolution, Resolver};

use crate::config::KnobConfig;
use crate::error::ConfigError;

/// One tick's logical pin levels (`button` is `true` while pressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSample {
    pub channel_a: bool,
    pub channel_b: bool,
    pub button: bool,
}

impl PinSample {
    /// Build a sample from raw GPIO levels. Encoder channels pass through,
    /// the button is converted to "pressed" according to its polarity.
    pub const fn from_levels(
        a_high: bool,
        b_high: bool,
        button_high: bool,
        button_active_low: bool,
    ) -> Self {
        Self {
            channel_a: a_high,
            channel_b: b_high,
            button: button_high != button_active_low,
        }
    }
}

/// Decoder, classifier and resolver state for one physical knob.
#[derive(Clone, Debug)]
pub struct Knob {
    decoder: Decoder,
    classifier: Classifier,
    resolver: Resolver,
}

impl Knob {
    pub fn new(config: KnobConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            decoder: Decoder::new(config.encoder_direction_inverted),
            classifier: Classifier::from_config(&config),
            resolver: Resolver::new(),
        })
    }

    /// Seed the encoder edge detector from the first real sample.
    pub fn prime(&mut self, sample: PinSample) {
        self.decoder.prime(sample);
    }

    /// Run the whole pipeline for one tick.
    pub fn tick(&mut self, sample: PinSample, now_ms: u64) -> Resolution {
        let rotation = self.decoder.decode(sample);
        let gesture = self.classifier.classify(sample.button, now_ms);
        let resolution = self.resolver.resolve(rotation, gesture);

        #[cfg(feature = "defmt")]
        {
            if let Some(change) = resolution.mode_change {
                defmt::info!("Knob: mode -> {}", change.label);
            }
        }

        resolution
    }

    pub fn mode(&self) -> Mode {
        self.resolver.mode()
    }

    pub fn encoder_state(&self) -> EncoderState {
        self.decoder.state()
    }
}

impl Default for Knob {
    fn default() -> Self {
        Self {
            decoder: Decoder::new(KnobConfig::DEFAULT.encoder_direction_inverted),
            classifier: Classifier::default(),
            resolver: Resolver::new(),
        }
    }
}
