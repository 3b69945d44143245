//! Rotated panel to screen coordinates
//!
//! The digitizer is mounted a quarter turn from the logical screen: its X
//! axis runs down the screen and its Y axis runs right to left.

use embedded_graphics::prelude::*;

use crate::ui::TouchPoint;

/// Largest raw X the digitizer reports
pub const DEFAULT_TOUCH_MAX_X: i32 = 1440;

/// Largest raw Y the digitizer reports
pub const DEFAULT_TOUCH_MAX_Y: i32 = 1020;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTransform {
    max_x: i32,
    max_y: i32,
    screen: Size,
}

impl AxisTransform {
    pub fn new(max_x: i32, max_y: i32, screen: Size) -> Self {
        Self {
            max_x: max_x.max(1),
            max_y: max_y.max(1),
            screen,
        }
    }

    /// Digitizer limits of the stock panel on a screen of `screen` pixels.
    pub fn for_screen(screen: Size) -> Self {
        Self::new(DEFAULT_TOUCH_MAX_X, DEFAULT_TOUCH_MAX_Y, screen)
    }

    /// Map a raw digitizer reading to screen pixels. Both divisions truncate.
    pub fn apply(&self, raw_x: i32, raw_y: i32) -> TouchPoint {
        let (max_x, max_y) = (i64::from(self.max_x), i64::from(self.max_y));
        let x = (max_y - i64::from(raw_y)) * i64::from(self.screen.width) / max_y;
        let y = i64::from(raw_x) * i64::from(self.screen.height) / max_x;
        TouchPoint::new(x as i32, y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KOBO: Size = Size::new(1072, 1448);

    #[test]
    fn test_center_maps_to_center() {
        let t = AxisTransform::for_screen(KOBO);
        assert_eq!(t.apply(720, 510), TouchPoint::new(536, 724));
    }

    #[test]
    fn test_corners() {
        let t = AxisTransform::for_screen(KOBO);
        assert_eq!(t.apply(0, 1020), TouchPoint::new(0, 0), "top left");
        assert_eq!(t.apply(0, 0), TouchPoint::new(1072, 0), "top right");
        assert_eq!(t.apply(1440, 1020), TouchPoint::new(0, 1448), "bottom left");
    }

    proptest! {
        #[test]
        fn test_in_range_readings_stay_on_screen(x in 0..=1440i32, y in 0..=1020i32) {
            let p = AxisTransform::for_screen(KOBO).apply(x, y);
            prop_assert!((0..=1072).contains(&p.x));
            prop_assert!((0..=1448).contains(&p.y));
        }

        #[test]
        fn test_matches_truncating_formula(x in 0..=1440i32, y in 0..=1020i32) {
            let p = AxisTransform::for_screen(KOBO).apply(x, y);
            prop_assert_eq!(p.x, (1020 - y) * 1072 / 1020);
            prop_assert_eq!(p.y, x * 1448 / 1440);
        }
    }
}
