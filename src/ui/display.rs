//! SSD1306 OLED mode display.
//!
//! The panel shows a single line: the label of the current knob mode.
//! Every update clears the frame buffer and redraws from scratch.

use defmt::{error, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use knobpad::{Error, Mode};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Replace the screen contents with `label`, top-left aligned.
pub fn draw_mode<I2C>(display: &mut Display<I2C>, label: &str) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();
    Text::with_baseline(label, Point::zero(), text_style(), Baseline::Top)
        .draw(display)
        .map_err(|_| Error::Display)?;
    display.flush().map_err(|_| Error::Display)
}

/// Redraw the mode label whenever the knob signals a new mode.
pub async fn display_task<I2C>(
    i2c: I2C,
    mode: &'static Signal<CriticalSectionRawMutex, Mode>,
) -> !
where
    I2C: embedded_hal::i2c::I2c,
{
    let mut display = match init(i2c) {
        Ok(display) => Some(display),
        Err(e) => {
            error!("Display: init failed: {}", e);
            None
        }
    };

    loop {
        let current = mode.wait().await;
        if let Some(display) = display.as_mut() {
            if let Err(e) = draw_mode(display, current.label()) {
                warn!("Display: {}", e);
            }
        }
    }
}
