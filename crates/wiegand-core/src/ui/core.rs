// src/ui/core.rs
//! Core UI traits and types

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Colour type this element draws with
    type Color: PixelColor;

    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = Self::Color>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);

    /// Draw only if dirty, then mark clean. Returns whether anything was drawn.
    fn draw_if_dirty<D: DrawTarget<Color = Self::Color>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.draw(display)?;
        self.mark_clean();
        Ok(true)
    }
}

/// Foreground/background colour pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme<C: PixelColor> {
    pub foreground: C,
    pub background: C,
}

impl<C: PixelColor> Theme<C> {
    pub const fn new(foreground: C, background: C) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

impl Theme<BinaryColor> {
    /// Set pixels on a clear background, as on the device LCD
    pub const fn mono() -> Self {
        Self::new(BinaryColor::On, BinaryColor::Off)
    }
}
