//! Shown when a deck has nothing left to review. Any tap goes back.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::{DisplaySink, FontKind, TextStyle};
use crate::screens::frame::Frame;
use crate::ui::Action;

pub fn draw<D: DisplaySink + ?Sized>(frame: &mut Frame<'_, D>, deck: &str) {
    let regions = *frame.regions;
    frame.display.clear();

    let back = frame.back_button_rect();
    frame.button(Action::Back, back, "Back");

    let content = regions.content;
    let half = Size::new(content.size.width, content.size.height / 2);
    let top_half = Rectangle::new(content.top_left, half);
    let bottom_half = Rectangle::new(
        content.top_left + Point::new(0, half.height as i32),
        half,
    );

    frame.label(
        top_half,
        "Done!",
        TextStyle::new(FontKind::Menu, frame.config.size_card),
    );
    frame.label(
        bottom_half,
        &format!("No more cards due in {deck}"),
        TextStyle::new(FontKind::Menu, frame.config.size_menu),
    );

    frame.scene.add(Action::Dismiss, content);
    frame.scene.add(Action::Dismiss, regions.action);
}
