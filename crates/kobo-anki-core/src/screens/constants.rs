//! Layout constants shared by the screens
//!
//! Percentages are of the full screen height; divisors are of the screen
//! width.

/// Title shown at the top of the deck list
pub const APP_TITLE: &str = "Kobo Anki";

/// Space above the deck list title
pub const TITLE_TOP_MARGIN_PCT: u32 = 5;

/// Height the title gets on top of the navigation band
pub const TITLE_EXTRA_HEIGHT_PCT: u32 = 8;

/// Height of one deck row
pub const DECK_ROW_HEIGHT_PCT: u32 = 7;

/// Deck names and due counts sit `width / 20` in from the edges
pub const DECK_ROW_INDENT_DIVISOR: u32 = 20;

/// Gap between buttons is `width / 30`
pub const BUTTON_GAP_DIVISOR: u32 = 30;

/// Back button is a quarter of the action band, less its gaps
pub const BACK_BUTTON_HEIGHT_DIVISOR: u32 = 4;
