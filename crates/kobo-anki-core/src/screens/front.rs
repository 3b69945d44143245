//! Question side of a card
//!
//! Painted over a blank fill instead of a clear so flipping between the
//! two sides does not flash the panel. Any tap below the back button
//! reveals the answer.

use crate::display::{DisplaySink, FontKind, TextStyle};
use crate::screens::frame::Frame;
use crate::ui::{Action, vcenter};

pub fn draw<D: DisplaySink + ?Sized>(frame: &mut Frame<'_, D>, question: &str) {
    let regions = *frame.regions;
    frame.blank();

    let back = frame.back_button_rect();
    frame.button(Action::Back, back, "Back");

    let size = frame.config.size_card;
    frame.label(
        vcenter(regions.content, size),
        question,
        TextStyle::new(FontKind::Front, size),
    );

    frame.scene.add(Action::ShowAnswer, regions.content);
    frame.scene.add(Action::ShowAnswer, regions.action);
}
