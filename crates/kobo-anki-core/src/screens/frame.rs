//! Drawing context handed to each screen
//!
//! Borrows everything a draw routine needs for one frame so the routines
//! can stay free functions and the manager keeps ownership.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::UiConfig;
use crate::display::{DisplaySink, FontKind, TextStyle};
use crate::screens::constants::{BACK_BUTTON_HEIGHT_DIVISOR, BUTTON_GAP_DIVISOR};
use crate::ui::widgets::{draw_button, draw_button_disabled, draw_label};
use crate::ui::{Action, LayoutRegions, Palette, Scene, inset, split_h, split_v};

pub struct Frame<'a, D: ?Sized> {
    pub display: &'a mut D,
    pub scene: &'a mut Scene,
    pub palette: &'a Palette,
    pub regions: &'a LayoutRegions,
    pub config: &'a UiConfig,
}

impl<D: DisplaySink + ?Sized> Frame<'_, D> {
    /// Space between buttons.
    pub fn gap(&self) -> u32 {
        self.regions.screen.width / BUTTON_GAP_DIVISOR
    }

    /// Style for button captions.
    pub fn button_style(&self) -> TextStyle {
        TextStyle::new(FontKind::Menu, self.config.size_menu / 2)
    }

    pub fn button(&mut self, action: Action, rect: Rectangle, label: &str) {
        let style = self.button_style();
        draw_button(
            &mut *self.display,
            &mut *self.scene,
            self.palette,
            action,
            rect,
            label,
            style,
        );
    }

    pub fn button_disabled(&mut self, rect: Rectangle, label: &str) {
        let style = self.button_style();
        draw_button_disabled(&mut *self.display, self.palette, rect, label, style);
    }

    pub fn label(&mut self, rect: Rectangle, text: &str, style: TextStyle) {
        draw_label(&mut *self.display, rect, text, style);
    }

    /// Paint the whole screen with the background color. Cheaper on the
    /// eye than a clear because the panel does not flash.
    pub fn blank(&mut self) {
        self.display
            .fill_rect(self.regions.full_screen(), Some(self.palette.background));
    }

    /// Full-width strip at the very top, half the height of a rating button.
    pub fn back_button_rect(&self) -> Rectangle {
        let gap = self.gap();
        let height =
            self.regions.action.size.height.saturating_sub(2 * gap) / BACK_BUTTON_HEIGHT_DIVISOR;
        Rectangle::new(
            Point::new((gap / 2) as i32, (gap / 2) as i32),
            Size::new(self.regions.screen.width.saturating_sub(gap), height),
        )
    }

    /// The 2×2 button grid of the action band: top left, top right,
    /// bottom left, bottom right.
    pub fn action_grid(&self) -> [Rectangle; 4] {
        let gap = self.gap();
        let rows = split_v(inset(self.regions.action, gap / 2), 2, gap);
        let top = split_h(rows[0], 2, gap);
        let bottom = split_h(rows[1], 2, gap);
        [top[0], top[1], bottom[0], bottom[1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingSink;

    #[test]
    fn test_stock_panel_geometry() {
        let mut sink = RecordingSink::new();
        let mut scene = Scene::new();
        let regions = LayoutRegions::new(Size::new(1072, 1448));
        let frame = Frame {
            display: &mut sink,
            scene: &mut scene,
            palette: &Palette::default(),
            regions: &regions,
            config: &UiConfig::default(),
        };

        assert_eq!(frame.gap(), 35);
        assert_eq!(
            frame.back_button_rect(),
            Rectangle::new(Point::new(17, 17), Size::new(1037, 62))
        );

        let [top_left, top_right, bottom_left, bottom_right] = frame.action_grid();
        assert_eq!(top_left, Rectangle::new(Point::new(17, 1146), Size::new(501, 124)));
        assert_eq!(top_right.top_left, Point::new(553, 1146));
        assert_eq!(bottom_left.top_left, Point::new(17, 1305));
        assert_eq!(bottom_right.top_left, Point::new(553, 1305));
    }
}
