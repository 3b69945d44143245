//! Percentage layout and rectangle splitting
//!
//! All arithmetic truncates, never rounds: the same screen size always
//! yields the same pixels, and any remainder is left as slack at the far
//! edge instead of being spread across parts.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Approximate rendered height of a line of text, in pixels per point.
const TEXT_HEIGHT_PX_PER_POINT: u32 = 2;

/// Navigation / title band: top 8% of the screen
const NAV_PCT: [u32; 4] = [0, 0, 100, 8];

/// Content band: the next 70%
const CONTENT_PCT: [u32; 4] = [0, 8, 100, 70];

/// Action band: bottom 22%
const ACTION_PCT: [u32; 4] = [0, 78, 100, 22];

/// Build a rectangle from screen percentages.
///
/// Each component is `pct * dimension / 100` on its own axis.
///
/// ```
/// use embedded_graphics::prelude::*;
/// use kobo_anki_core::ui::rect_pct;
///
/// let r = rect_pct(0, 78, 100, 22, Size::new(1072, 1448));
/// assert_eq!(r.top_left, Point::new(0, 1129));
/// assert_eq!(r.size, Size::new(1072, 318));
/// ```
pub fn rect_pct(x_pct: u32, y_pct: u32, w_pct: u32, h_pct: u32, screen: Size) -> Rectangle {
    Rectangle::new(
        Point::new(
            (screen.width * x_pct / 100) as i32,
            (screen.height * y_pct / 100) as i32,
        ),
        Size::new(screen.width * w_pct / 100, screen.height * h_pct / 100),
    )
}

/// Size of one part when `extent` is divided into `n` parts with `gap` between them.
fn part_extent(extent: u32, n: usize, gap: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    let total_gap = gap.saturating_mul(n as u32 - 1);
    extent.saturating_sub(total_gap) / n as u32
}

/// Split `r` into `n` side-by-side columns separated by `gap` pixels.
pub fn split_h(r: Rectangle, n: usize, gap: u32) -> Vec<Rectangle> {
    let w = part_extent(r.size.width, n, gap);
    (0..n)
        .map(|i| {
            Rectangle::new(
                Point::new(r.top_left.x + (i as u32 * (w + gap)) as i32, r.top_left.y),
                Size::new(w, r.size.height),
            )
        })
        .collect()
}

/// Split `r` into `n` stacked rows separated by `gap` pixels.
pub fn split_v(r: Rectangle, n: usize, gap: u32) -> Vec<Rectangle> {
    let h = part_extent(r.size.height, n, gap);
    (0..n)
        .map(|i| {
            Rectangle::new(
                Point::new(r.top_left.x, r.top_left.y + (i as u32 * (h + gap)) as i32),
                Size::new(r.size.width, h),
            )
        })
        .collect()
}

/// Shrink `r` by `d` pixels on every side.
pub fn inset(r: Rectangle, d: u32) -> Rectangle {
    Rectangle::new(
        r.top_left + Point::new(d as i32, d as i32),
        Size::new(
            r.size.width.saturating_sub(2 * d),
            r.size.height.saturating_sub(2 * d),
        ),
    )
}

/// Rendered height estimate for text of the given point size.
pub const fn text_height_px(size: u32) -> u32 {
    size.saturating_mul(TEXT_HEIGHT_PX_PER_POINT)
}

/// Move the top of `r` down so text of point size `size` sits vertically centered.
///
/// The offset is clamped to zero when the rectangle is shorter than the text.
pub fn vcenter(r: Rectangle, size: u32) -> Rectangle {
    let offset = r.size.height.saturating_sub(text_height_px(size)) / 2;
    Rectangle::new(
        r.top_left + Point::new(0, offset as i32),
        Size::new(r.size.width, r.size.height - offset),
    )
}

/// The three fixed bands every screen is composed from.
///
/// Computed once from the detected screen size and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegions {
    pub screen: Size,
    pub nav: Rectangle,
    pub content: Rectangle,
    pub action: Rectangle,
}

impl LayoutRegions {
    pub fn new(screen: Size) -> Self {
        let pct = |p: [u32; 4]| rect_pct(p[0], p[1], p[2], p[3], screen);
        Self {
            screen,
            nav: pct(NAV_PCT),
            content: pct(CONTENT_PCT),
            action: pct(ACTION_PCT),
        }
    }

    /// The whole panel as one rectangle.
    pub fn full_screen(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KOBO: Size = Size::new(1072, 1448);

    #[test]
    fn test_rect_pct_action_band() {
        let r = rect_pct(0, 78, 100, 22, KOBO);
        assert_eq!(
            r,
            Rectangle::new(Point::new(0, 1129), Size::new(1072, 318)),
            "action band must truncate per axis"
        );
    }

    #[test]
    fn test_layout_regions() {
        let regions = LayoutRegions::new(KOBO);
        assert_eq!(regions.nav, Rectangle::new(Point::zero(), Size::new(1072, 115)));
        assert_eq!(
            regions.content,
            Rectangle::new(Point::new(0, 115), Size::new(1072, 1013))
        );
        assert_eq!(
            regions.action,
            Rectangle::new(Point::new(0, 1129), Size::new(1072, 318))
        );
    }

    #[test]
    fn test_split_h_leaves_slack_at_far_edge() {
        let r = Rectangle::new(Point::new(10, 20), Size::new(101, 40));
        let cols = split_h(r, 2, 10);
        assert_eq!(cols.len(), 2);
        // (101 - 10) / 2 = 45, one pixel unused
        assert_eq!(cols[0], Rectangle::new(Point::new(10, 20), Size::new(45, 40)));
        assert_eq!(cols[1], Rectangle::new(Point::new(65, 20), Size::new(45, 40)));
    }

    #[test]
    fn test_split_v_action_grid() {
        let action = LayoutRegions::new(KOBO).action;
        let gap = KOBO.width / 30;
        let inner = inset(action, gap / 2);
        assert_eq!(inner, Rectangle::new(Point::new(17, 1146), Size::new(1038, 284)));

        let rows = split_v(inner, 2, gap);
        assert_eq!(rows[0], Rectangle::new(Point::new(17, 1146), Size::new(1038, 124)));
        assert_eq!(rows[1], Rectangle::new(Point::new(17, 1305), Size::new(1038, 124)));
    }

    #[test]
    fn test_split_with_oversized_gap_clamps_to_zero() {
        let r = Rectangle::new(Point::zero(), Size::new(10, 10));
        let cols = split_h(r, 3, 20);
        assert!(cols.iter().all(|c| c.size.width == 0), "parts must clamp, not underflow");
        assert!(split_v(r, 0, 5).is_empty());
    }

    #[test]
    fn test_vcenter_huge_size_pins_to_top() {
        let r = Rectangle::new(Point::new(0, 100), Size::new(200, 100));
        assert_eq!(text_height_px(u32::MAX), u32::MAX);
        assert_eq!(vcenter(r, u32::MAX), r);
    }

    #[test]
    fn test_vcenter() {
        let r = Rectangle::new(Point::new(0, 100), Size::new(200, 100));
        // text height 2 * 20 = 40, offset (100 - 40) / 2 = 30
        assert_eq!(
            vcenter(r, 20),
            Rectangle::new(Point::new(0, 130), Size::new(200, 70))
        );
    }

    #[test]
    fn test_vcenter_clamps_when_text_taller_than_rect() {
        let r = Rectangle::new(Point::new(5, 5), Size::new(50, 10));
        assert_eq!(vcenter(r, 28), r, "offset must clamp to zero");
    }

    proptest! {
        #[test]
        fn test_rect_pct_truncates_per_axis(
            x in 0u32..=100, y in 0u32..=100, w in 0u32..=100, h in 0u32..=100,
            sw in 1u32..4000, sh in 1u32..4000,
        ) {
            let r = rect_pct(x, y, w, h, Size::new(sw, sh));
            prop_assert_eq!(r.top_left.x as u32, x * sw / 100);
            prop_assert_eq!(r.top_left.y as u32, y * sh / 100);
            prop_assert_eq!(r.size.width, w * sw / 100);
            prop_assert_eq!(r.size.height, h * sh / 100);
        }

        #[test]
        fn test_split_parts_stay_inside(
            width in 0u32..2000, n in 1usize..8, gap in 0u32..50,
        ) {
            let r = Rectangle::new(Point::new(3, 7), Size::new(width, 30));
            let cols = split_h(r, n, gap);
            prop_assert_eq!(cols.len(), n);
            let first = cols[0].size.width;
            for c in &cols {
                prop_assert_eq!(c.size.width, first);
            }
            if first > 0 {
                let last = cols[n - 1];
                prop_assert!(last.top_left.x + last.size.width as i32 <= r.top_left.x + width as i32);
            }
        }
    }
}
