//! Pointer injection backends.
//!
//! The control loop only talks to the [`PointerBackend`] trait; the OS
//! primitive behind it is swappable, and tests substitute a recording
//! implementation.

use anyhow::{anyhow, bail, Result};
use enigo::{Coordinate, Direction, Enigo, Mouse, Settings};

use crate::control::{Button, PointerIntent};
use crate::resolution::Resolution;

/// The OS-level primitive that moves the cursor and synthesizes button
/// events.
pub trait PointerBackend {
    /// Moves the pointer to absolute screen coordinates.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Presses `button` down.
    fn button_down(&mut self, button: Button) -> Result<()>;

    /// Releases `button`.
    fn button_up(&mut self, button: Button) -> Result<()>;

    /// Dispatches one [`PointerIntent`].
    fn dispatch(&mut self, intent: &PointerIntent) -> Result<()> {
        match *intent {
            PointerIntent::Move(x, y) => self.move_to(x, y),
            PointerIntent::ButtonDown(button) => self.button_down(button),
            PointerIntent::ButtonUp(button) => self.button_up(button),
        }
    }
}

/// Injects pointer events through the platform input stack via [`enigo`].
pub struct EnigoBackend {
    enigo: Enigo,
}

impl EnigoBackend {
    /// Connects to the platform input stack.
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("failed to initialize input backend: {e}"))?;
        Ok(Self { enigo })
    }

    /// Queries the size of the main display.
    pub fn screen_resolution(&self) -> Result<Resolution> {
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| anyhow!("failed to query display size: {e}"))?;
        if width <= 0 || height <= 0 {
            bail!("display reported degenerate size {width}x{height}");
        }
        Ok(Resolution::new(width as u32, height as u32))
    }
}

fn enigo_button(button: Button) -> enigo::Button {
    match button {
        Button::Left => enigo::Button::Left,
        Button::Right => enigo::Button::Right,
        Button::Middle => enigo::Button::Middle,
    }
}

impl PointerBackend for EnigoBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| anyhow!("pointer move to ({x}, {y}) failed: {e}"))
    }

    fn button_down(&mut self, button: Button) -> Result<()> {
        self.enigo
            .button(enigo_button(button), Direction::Press)
            .map_err(|e| anyhow!("button press failed: {e}"))
    }

    fn button_up(&mut self, button: Button) -> Result<()> {
        self.enigo
            .button(enigo_button(button), Direction::Release)
            .map_err(|e| anyhow!("button release failed: {e}"))
    }
}

/// Logs intents instead of injecting them. Useful for dry runs.
#[derive(Debug, Default)]
pub struct TraceBackend;

impl PointerBackend for TraceBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        log::trace!("pointer move -> ({x}, {y})");
        Ok(())
    }

    fn button_down(&mut self, button: Button) -> Result<()> {
        log::debug!("button down: {button:?}");
        Ok(())
    }

    fn button_up(&mut self, button: Button) -> Result<()> {
        log::debug!("button up: {button:?}");
        Ok(())
    }
}
