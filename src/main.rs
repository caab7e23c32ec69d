//! knobpad firmware for nRF52840.
//!
//! Task layout:
//!
//! ```text
//! knob_task ──Action──> hid_writer_task ──> USB (keyboard / consumer)
//!     │
//!     └──Mode──> display_task ──> SSD1306
//! ```
//!
//! The pure knob logic lives in the `knobpad` library and is tested on the
//! host; this binary only wires pins, USB and the display to it.

#![no_std]
#![no_main]

mod ui;
mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_usb::UsbDevice;
use knobpad::config::ACTION_QUEUE_DEPTH;
use knobpad::{Action, Knob, KnobConfig, Mode};
use ui::knob_task::KnobPins;
use usb::hid_device::{ReportWriter, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static ACTIONS: Channel<CriticalSectionRawMutex, Action, ACTION_QUEUE_DEPTH> = Channel::new();
static MODE: Signal<CriticalSectionRawMutex, Mode> = Signal::new();

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_task(keyboard: ReportWriter, consumer: ReportWriter) -> ! {
    usb::hid_device::hid_writer_task(keyboard, consumer, ACTIONS.receiver()).await
}

#[embassy_executor::task]
async fn display_task(i2c: Twim<'static, peripherals::TWISPI0>) -> ! {
    ui::display::display_task(i2c, &MODE).await
}

#[embassy_executor::task]
async fn knob_task(knob: Knob, pins: KnobPins) -> ! {
    ui::knob_task::knob_task(knob, pins, ACTIONS.sender(), &MODE).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("knobpad starting");

    let config = KnobConfig::default();
    let knob = unwrap!(Knob::new(config));

    let usb = usb::hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(hid_task(usb.keyboard_writer, usb.consumer_writer)));

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    unwrap!(spawner.spawn(display_task(i2c)));

    let pins = KnobPins {
        a: Input::new(p.P0_03, Pull::Up),
        b: Input::new(p.P0_04, Pull::Up),
        switch: Input::new(p.P0_02, Pull::Up),
        button_active_low: config.button_active_low,
    };
    unwrap!(spawner.spawn(knob_task(knob, pins)));

    info!("knobpad running: mode {}", Mode::default().label());
}
