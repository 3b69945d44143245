//! Stateless drawing helpers shared by the screens
//!
//! A widget paints itself through the display sink and, when it is
//! interactive, registers its touch target in the scene. There is no widget
//! object to keep around: the next frame draws everything again.

use embedded_graphics::primitives::Rectangle;

use crate::display::{DisplaySink, TextStyle};
use crate::ui::core::Action;
use crate::ui::layout::vcenter;
use crate::ui::scene::Scene;
use crate::ui::styling::Palette;

/// Filled button that triggers `action` when tapped.
///
/// The target is registered before anything is painted so the scene
/// order matches the paint order.
pub fn draw_button<D: DisplaySink + ?Sized>(
    display: &mut D,
    scene: &mut Scene,
    palette: &Palette,
    action: Action,
    rect: Rectangle,
    label: &str,
    style: TextStyle,
) {
    scene.add(action, rect);
    display.fill_rect(rect, Some(palette.button));
    display.draw_text(vcenter(rect, style.size), label, &style);
}

/// Grayed-out button with no touch target.
pub fn draw_button_disabled<D: DisplaySink + ?Sized>(
    display: &mut D,
    palette: &Palette,
    rect: Rectangle,
    label: &str,
    style: TextStyle,
) {
    display.fill_rect(rect, Some(palette.button_disabled));
    display.draw_text(
        vcenter(rect, style.size),
        label,
        &style.with_color(palette.label_disabled),
    );
}

/// Plain text in `rect`. Not touchable.
pub fn draw_label<D: DisplaySink + ?Sized>(
    display: &mut D,
    rect: Rectangle,
    text: &str,
    style: TextStyle,
) {
    display.draw_text(rect, text, &style);
}
