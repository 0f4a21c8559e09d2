// src/ui/code_view.rs
//! Code editor view: six hex digits and a cursor marker

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::config::LayoutConfig;
use crate::editor::Snapshot;
use crate::ui::core::{Drawable, Theme};

/// Renders an editor [`Snapshot`].
///
/// Each digit is drawn at `layout.digit_origin(i)` and a filled square marks
/// the digit under the cursor. The view only becomes dirty when a new snapshot
/// differs from the one it last drew.
pub struct CodeView<C: PixelColor> {
    layout: LayoutConfig,
    theme: Theme<C>,
    snapshot: Snapshot,
    dirty: bool,
}

impl<C: PixelColor> CodeView<C> {
    pub fn new(layout: LayoutConfig, theme: Theme<C>) -> Self {
        Self {
            layout,
            theme,
            snapshot: Snapshot::default(),
            dirty: true,
        }
    }

    /// Replace the displayed snapshot, marking dirty on change.
    pub fn update(&mut self, snapshot: Snapshot) {
        if snapshot != self.snapshot {
            self.snapshot = snapshot;
            self.dirty = true;
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

impl<C: PixelColor> Drawable for CodeView<C> {
    type Color = C;

    fn draw<D: DrawTarget<Color = C>>(&self, display: &mut D) -> Result<(), D::Error> {
        // Clear background.
        self.bounds()
            .into_styled(PrimitiveStyle::with_fill(self.theme.background))
            .draw(display)?;

        let style = MonoTextStyle::new(&FONT_6X10, self.theme.foreground);
        for (index, digit) in self.snapshot.digits.iter().enumerate() {
            let mut text = String::<4>::new();
            write!(&mut text, "{}", digit).ok();
            Text::with_baseline(
                &text,
                self.layout.digit_origin(index),
                style,
                Baseline::Alphabetic,
            )
            .draw(display)?;
        }

        self.layout
            .marker_area(self.snapshot.cursor)
            .into_styled(PrimitiveStyle::with_fill(self.theme.foreground))
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.layout.screen_bounds()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
