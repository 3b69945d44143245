//! Answer side of a card with the rating grid

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::cards::Rating;
use crate::display::{DisplaySink, FontKind, TextStyle};
use crate::screens::frame::Frame;
use crate::ui::{Action, vcenter};

/// Rating buttons in grid order: top left, top right, bottom left, bottom right.
pub const RATING_GRID: [Rating; 4] = [Rating::Hard, Rating::Good, Rating::Again, Rating::Easy];

pub fn draw<D: DisplaySink + ?Sized>(frame: &mut Frame<'_, D>, question: &str, answer: &str) {
    let regions = *frame.regions;
    frame.blank();

    let gap = frame.gap();
    let back = frame.back_button_rect();
    frame.button(Action::Back, back, "Back");

    // Question repeated small, just under the back button
    let question_rect = Rectangle::new(
        Point::new(
            regions.content.top_left.x,
            back.top_left.y + (back.size.height + gap) as i32,
        ),
        Size::new(
            regions.content.size.width,
            (regions.content.size.height / 3).saturating_sub(gap),
        ),
    );
    let muted = frame.palette.muted;
    frame.label(
        question_rect,
        question,
        TextStyle::new(FontKind::Front, frame.config.size_menu).with_color(muted),
    );

    let size = frame.config.size_card;
    frame.label(
        vcenter(regions.content, size),
        answer,
        TextStyle::new(FontKind::Back, size),
    );

    for (rating, rect) in RATING_GRID.into_iter().zip(frame.action_grid()) {
        frame.button(Action::Rate(rating), rect, rating.label());
    }
}
