//! In-memory display sink
//!
//! Records every primitive instead of drawing it. Used by tests and handy
//! for dumping what a screen would have drawn.

use embedded_graphics::primitives::Rectangle;

use crate::display::{DisplaySink, TextStyle};
use crate::ui::EinkColor;

/// One recorded primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Fill {
        rect: Rectangle,
        color: Option<EinkColor>,
    },
    Text {
        rect: Rectangle,
        text: String,
        style: TextStyle,
    },
    Clear,
    Refresh,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<DrawCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the most recent refresh, excluding it.
    ///
    /// After a screen draw this is exactly what the last frame painted.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let end = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Refresh)
            .unwrap_or(self.commands.len());
        let start = self.commands[..end]
            .iter()
            .rposition(|c| *c == DrawCommand::Refresh)
            .map_or(0, |i| i + 1);
        &self.commands[start..end]
    }

    /// Every string drawn in the last frame, in paint order.
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn refresh_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == DrawCommand::Refresh)
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl DisplaySink for RecordingSink {
    fn fill_rect(&mut self, rect: Rectangle, color: Option<EinkColor>) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn draw_text(&mut self, rect: Rectangle, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_owned(),
            style: *style,
        });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn refresh(&mut self) {
        self.commands.push(DrawCommand::Refresh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FontKind;
    use embedded_graphics::prelude::*;

    #[test]
    fn test_last_frame_spans_between_refreshes() {
        let mut sink = RecordingSink::new();
        let r = Rectangle::new(Point::zero(), Size::new(1, 1));
        let style = TextStyle::new(FontKind::Menu, 8);

        sink.draw_text(r, "first", &style);
        sink.refresh();
        sink.clear();
        sink.draw_text(r, "second", &style);
        sink.refresh();

        assert_eq!(sink.last_frame_texts(), ["second"]);
        assert_eq!(sink.last_frame()[0], DrawCommand::Clear);
        assert_eq!(sink.refresh_count(), 2);
    }
}
