//! Desktop simulator for the wiegand-emu credential code editor.
//!
//! Renders the wiegand-core editor in an SDL2 window via
//! `embedded-graphics-simulator`, drawing through the same 128x64 monochrome
//! framebuffer the device uses. The transmitting LED is shown as a dot in the
//! top-right corner.
//!
//! # Key bindings
//!
//! | Key                | Device key |
//! |--------------------|------------|
//! | Arrow keys         | Up/Down/Left/Right |
//! | Enter / Space      | Ok         |
//! | Backspace / Escape | Back (exit)|
//!
//! Set `RUST_LOG=debug` to trace editor commands and indicator changes.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use embedded_hal::digital::{ErrorType, OutputPin};
use log::{error, info};

use wiegand_core::blink::{BlinkIndicator, BlinkPattern, INDICATOR_COLOR};
use wiegand_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, LayoutConfig};
use wiegand_core::framebuffer::FrameBuffer;
use wiegand_core::ui::{CodeView, Drawable, Theme};
use wiegand_core::{Control, EditorApp, InputEvent, InputKey, InputType};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// LCD backlight colour behind unset pixels.
const BACKLIGHT: Rgb565 = Rgb565::new(31, 32, 0);

/// Colour of set pixels.
const INK: Rgb565 = Rgb565::BLACK;

/// Slower than the device blink so it survives ~30 FPS frame sampling.
const SIM_BLINK: BlinkPattern = BlinkPattern::new(
    embassy_time::Duration::from_millis(150),
    embassy_time::Duration::from_millis(300),
);

/// Centre of the simulated LED.
const LED_CENTER: Point = Point::new(DISPLAY_WIDTH_PX as i32 - 6, 5);

/// Diameter of the simulated LED in pixels.
const LED_DIAMETER: u32 = 5;

// ---------------------------------------------------------------------------
// Simulated LED
// ---------------------------------------------------------------------------

/// Output pin whose level is shared with the render loop.
struct SimLed {
    level: Rc<Cell<bool>>,
}

impl ErrorType for SimLed {
    type Error = Infallible;
}

impl OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        Ok(())
    }
}

fn draw_led(display: &mut SimulatorDisplay<Rgb565>, lit: bool) {
    let color = if lit {
        Rgb565::from(INDICATOR_COLOR)
    } else {
        BACKLIGHT
    };
    let _ = Circle::with_center(LED_CENTER, LED_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display);
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a device key.
fn keycode_to_input(keycode: Keycode) -> Option<InputKey> {
    match keycode {
        Keycode::Up => Some(InputKey::Up),
        Keycode::Down => Some(InputKey::Down),
        Keycode::Left => Some(InputKey::Left),
        Keycode::Right => Some(InputKey::Right),
        Keycode::Return | Keycode::KpEnter | Keycode::Space => Some(InputKey::Ok),
        Keycode::Backspace | Keycode::Escape => Some(InputKey::Back),
        _ => None,
    }
}

fn map_pixel(color: BinaryColor) -> Rgb565 {
    match color {
        BinaryColor::On => INK,
        BinaryColor::Off => BACKLIGHT,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting wiegand-emu simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: arrows=edit  Enter/Space=toggle transmit  Backspace/Esc=exit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Wiegand Emu Simulator", &output_settings);

    let led_level = Rc::new(Cell::new(false));
    let led = SimLed {
        level: Rc::clone(&led_level),
    };
    let app = EditorApp::new(BlinkIndicator::new(led, SIM_BLINK));

    let mut canvas = FrameBuffer::new();
    let mut view = CodeView::new(LayoutConfig::default(), Theme::mono());

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(BACKLIGHT);
    let _ = view.draw_if_dirty(&mut canvas);
    let _ = canvas.flush(&mut display, map_pixel);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown {
                    keycode, repeat, ..
                } => {
                    if let Some(key) = keycode_to_input(keycode) {
                        let kind = if repeat {
                            InputType::Repeat
                        } else {
                            InputType::Press
                        };
                        app.post_input(InputEvent::new(key, kind));
                    }
                }

                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(key) = keycode_to_input(keycode) {
                        app.post_input(InputEvent::new(key, InputType::Release));
                    }
                }

                _ => {}
            }
        }

        // --- Editor -------------------------------------------------------
        if app.process_pending() == Control::Exit {
            break 'running;
        }

        let now = embassy_time::Instant::now();
        if let Err(e) = app.lock(|editor| editor.indicator_mut().poll(now)) {
            error!("LED error: {:?}", e);
        }

        // --- Render -------------------------------------------------------
        view.update(app.snapshot());
        let _ = view.draw_if_dirty(&mut canvas);
        let _ = canvas.flush(&mut display, map_pixel);
        draw_led(&mut display, led_level.get());

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    // Dropping the app switches the LED off if it is still blinking.
    drop(app);
    info!("Simulator exiting (LED lit: {})", led_level.get());
}
