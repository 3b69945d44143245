//! Display sink abstraction
//!
//! Screens never talk to the panel directly. They issue four primitives
//! against a [`DisplaySink`]:
//!
//! - [`fill_rect`](DisplaySink::fill_rect): opaque fill, no refresh
//! - [`draw_text`](DisplaySink::draw_text): text inside a rectangle, no refresh
//! - [`clear`](DisplaySink::clear): wipe the whole buffer
//! - [`refresh`](DisplaySink::refresh): push the buffer to the e-ink panel
//!
//! Sinks swallow their own failures. A failed draw leaves the screen
//! visibly incomplete but must never stop the state machine, so none of
//! the primitives return a `Result`.

pub mod compositor;
pub mod recording;

pub use compositor::Compositor;
pub use recording::{DrawCommand, RecordingSink};

use embedded_graphics::primitives::Rectangle;
pub use embedded_graphics::text::Alignment;

use crate::ui::EinkColor;

/// Which configured font a piece of text is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// Titles, buttons, deck list
    Menu,
    /// The question side of a card
    Front,
    /// The answer side of a card
    Back,
}

/// How a string is drawn inside its rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: FontKind,
    /// Point size
    pub size: u32,
    /// `None` keeps the rasterizer's default foreground
    pub color: Option<EinkColor>,
    pub alignment: Alignment,
}

impl TextStyle {
    /// Centered text in the default foreground.
    pub fn new(font: FontKind, size: u32) -> Self {
        Self {
            font,
            size,
            color: None,
            alignment: Alignment::Center,
        }
    }

    pub fn with_color(mut self, color: EinkColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Something that can put pixels on the panel.
pub trait DisplaySink {
    /// Fill `rect` opaquely. `None` uses the rasterizer's default background.
    fn fill_rect(&mut self, rect: Rectangle, color: Option<EinkColor>);

    /// Draw `text` inside `rect` on top of whatever is already there.
    fn draw_text(&mut self, rect: Rectangle, text: &str, style: &TextStyle);

    /// Reset the whole buffer.
    fn clear(&mut self);

    /// Commit the buffer to the panel. This is the slow, visible step.
    fn refresh(&mut self);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn fill_rect(&mut self, rect: Rectangle, color: Option<EinkColor>) {
        (**self).fill_rect(rect, color)
    }

    fn draw_text(&mut self, rect: Rectangle, text: &str, style: &TextStyle) {
        (**self).draw_text(rect, text, style)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }
}
