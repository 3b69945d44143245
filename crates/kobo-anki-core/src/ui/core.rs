//! Core UI types shared by the scene, the input path and the screens

use std::fmt;

use embedded_graphics::prelude::*;

use crate::cards::Rating;

/// A resolved touch in screen pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for TouchPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Actions a touch target can trigger
///
/// Each variant corresponds to one touch-target identifier. The identifier
/// is resolved into a variant when the target is registered in the scene,
/// so dispatch never compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Clear the panel and quit
    Exit,
    /// Swap which face of a card is the question
    ToggleReverse,
    /// Previous page of the deck list
    PrevPage,
    /// Next page of the deck list
    NextPage,
    /// Open the deck at this index of the full deck list
    OpenDeck(usize),
    /// Return to the deck list
    Back,
    /// Reveal the answer
    ShowAnswer,
    /// Grade the current card
    Rate(Rating),
    /// Tap anywhere on the done screen
    Dismiss,
}

impl fmt::Display for Action {
    /// Writes the touch-target identifier, e.g. `deck-3` or `good`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Exit => f.write_str("exit"),
            Action::ToggleReverse => f.write_str("reverse"),
            Action::PrevPage => f.write_str("prev"),
            Action::NextPage => f.write_str("next"),
            Action::OpenDeck(index) => write!(f, "deck-{index}"),
            Action::Back => f.write_str("back"),
            Action::ShowAnswer => f.write_str("show"),
            Action::Rate(rating) => f.write_str(rating.id()),
            Action::Dismiss => f.write_str("any"),
        }
    }
}
