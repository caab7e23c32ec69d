//! Knob sampling loop.
//!
//! Three GPIO inputs with internal pull-ups:
//!   - A      - encoder channel A
//!   - B      - encoder channel B
//!   - SWITCH - encoder push-button
//!
//! The pins are sampled on a fixed ticker and fed through the knob
//! pipeline once per tick. Results are handed off with `try_send` /
//! `signal`, so a slow USB host never stretches the poll period.

use defmt::{debug, warn};
use embassy_nrf::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};
use knobpad::config::{ACTION_QUEUE_DEPTH, POLL_INTERVAL_MS};
use knobpad::{Action, Knob, Mode, PinSample};

/// The knob's input pins and the button's electrical polarity.
pub struct KnobPins {
    pub a: Input<'static>,
    pub b: Input<'static>,
    pub switch: Input<'static>,
    pub button_active_low: bool,
}

impl KnobPins {
    fn sample(&self) -> PinSample {
        PinSample::from_levels(
            self.a.is_high(),
            self.b.is_high(),
            self.switch.is_high(),
            self.button_active_low,
        )
    }
}

/// Run the knob pipeline forever at `POLL_INTERVAL_MS`.
pub async fn knob_task(
    mut knob: Knob,
    pins: KnobPins,
    actions: Sender<'static, CriticalSectionRawMutex, Action, ACTION_QUEUE_DEPTH>,
    mode: &'static Signal<CriticalSectionRawMutex, Mode>,
) -> ! {
    knob.prime(pins.sample());
    mode.signal(knob.mode());

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        let out = knob.tick(pins.sample(), Instant::now().as_millis());

        for &action in out.actions.iter() {
            debug!("Knob: {}", action);
            if actions.try_send(action).is_err() {
                warn!("Knob: action queue full, dropping {}", action);
            }
        }

        if let Some(change) = out.mode_change {
            mode.signal(change.mode);
        }
    }
}
