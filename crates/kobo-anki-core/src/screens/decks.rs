//! Deck list screen
//!
//! Title, one row per deck on the current page with its due count, and a
//! 2×2 grid: page back/forward, reverse toggle, quit.

use core::ops::Range;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::{Alignment, DisplaySink, FontKind, TextStyle};
use crate::screens::constants::{
    APP_TITLE, DECK_ROW_HEIGHT_PCT, DECK_ROW_INDENT_DIVISOR, TITLE_EXTRA_HEIGHT_PCT,
    TITLE_TOP_MARGIN_PCT,
};
use crate::screens::frame::Frame;
use crate::ui::{Action, LayoutRegions, vcenter};

/// Where the title and the deck rows go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckListLayout {
    pub title: Rectangle,
    /// Top edge of the first deck row
    pub rows_top: i32,
    pub row_height: u32,
    /// How many rows fit between the title and the action band, at least one
    pub per_page: usize,
}

impl DeckListLayout {
    pub fn new(regions: &LayoutRegions) -> Self {
        let screen_h = regions.screen.height;
        let title = Rectangle::new(
            Point::new(regions.nav.top_left.x, (screen_h * TITLE_TOP_MARGIN_PCT / 100) as i32),
            Size::new(
                regions.nav.size.width,
                regions.nav.size.height + screen_h * TITLE_EXTRA_HEIGHT_PCT / 100,
            ),
        );
        let rows_top = title.top_left.y + title.size.height as i32;
        let rows_height = (regions.action.top_left.y - rows_top).max(0) as u32;
        let row_height = screen_h * DECK_ROW_HEIGHT_PCT / 100;
        let per_page = rows_height.checked_div(row_height).unwrap_or(0).max(1) as usize;

        Self {
            title,
            rows_top,
            row_height,
            per_page,
        }
    }

    /// Bounds of the `slot`-th row on a page.
    pub fn row(&self, regions: &LayoutRegions, slot: usize) -> Rectangle {
        Rectangle::new(
            Point::new(
                regions.content.top_left.x,
                self.rows_top + (slot as u32 * self.row_height) as i32,
            ),
            Size::new(regions.content.size.width, self.row_height),
        )
    }
}

/// Which slice of the deck list is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Clamp `requested` into `[0, total_pages - 1]`. There is always at
    /// least one page, even with no decks.
    pub fn new(deck_count: usize, per_page: usize, requested: i64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = deck_count.div_ceil(per_page).max(1);
        let page = requested.clamp(0, total_pages as i64 - 1) as usize;
        Self {
            page,
            per_page,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Indices into the full deck list shown on this page.
    pub fn visible(&self, deck_count: usize) -> Range<usize> {
        let start = (self.page * self.per_page).min(deck_count);
        start..(start + self.per_page).min(deck_count)
    }
}

/// Draw the deck list. `due_count` is asked only for the decks on screen.
pub fn draw<D, F>(
    frame: &mut Frame<'_, D>,
    decks: &[String],
    page: usize,
    reverse: bool,
    mut due_count: F,
) -> Pagination
where
    D: DisplaySink + ?Sized,
    F: FnMut(&str) -> usize,
{
    let regions = *frame.regions;
    let layout = DeckListLayout::new(&regions);
    let pagination = Pagination::new(decks.len(), layout.per_page, page as i64);

    frame.display.clear();
    frame.label(
        layout.title,
        APP_TITLE,
        TextStyle::new(FontKind::Menu, frame.config.size_title),
    );

    let row_size = frame.config.size_menu.saturating_mul(3) / 4;
    let indent = regions.screen.width / DECK_ROW_INDENT_DIVISOR;
    for (slot, index) in pagination.visible(decks.len()).enumerate() {
        let name = &decks[index];
        let row = layout.row(&regions, slot);
        frame.scene.add(Action::OpenDeck(index), row);

        let name_rect = Rectangle::new(
            row.top_left + Point::new(indent as i32, 0),
            Size::new(row.size.width / 2, row.size.height),
        );
        frame.label(
            vcenter(name_rect, row_size),
            name,
            TextStyle::new(FontKind::Menu, row_size).with_alignment(Alignment::Left),
        );

        let due_rect = Rectangle::new(
            row.top_left,
            Size::new(row.size.width.saturating_sub(indent), row.size.height),
        );
        let muted = frame.palette.muted;
        frame.label(
            vcenter(due_rect, row_size),
            &format!("{} due", due_count(name)),
            TextStyle::new(FontKind::Menu, row_size)
                .with_color(muted)
                .with_alignment(Alignment::Right),
        );
    }

    let [prev, next, toggle, quit] = frame.action_grid();
    if pagination.has_prev() {
        frame.button(Action::PrevPage, prev, "< Prev");
    } else {
        frame.button_disabled(prev, "< Prev");
    }
    if pagination.has_next() {
        frame.button(Action::NextPage, next, "Next >");
    } else {
        frame.button_disabled(next, "Next >");
    }
    frame.button(
        Action::ToggleReverse,
        toggle,
        if reverse { "Normal" } else { "Reverse" },
    );
    frame.button(Action::Exit, quit, "Quit");

    pagination
}
