//! Immediate-mode UI building blocks
//!
//! Nothing here survives a frame: every screen draw recomputes rectangles
//! from the [`layout`] helpers, paints them through a
//! [`DisplaySink`](crate::display::DisplaySink) with the [`widgets`], and
//! registers touch targets in a freshly cleared [`Scene`].

pub mod core;
pub mod layout;
pub mod scene;
pub mod styling;
pub mod widgets;

pub use self::core::{Action, TouchPoint};
pub use layout::{LayoutRegions, inset, rect_pct, split_h, split_v, vcenter};
pub use scene::{Element, Scene};
pub use styling::{EinkColor, Palette};

/// Screen width used when the rasterizer cannot report one
pub const DEFAULT_SCREEN_WIDTH_PX: u32 = 1072;

/// Screen height used when the rasterizer cannot report one
pub const DEFAULT_SCREEN_HEIGHT_PX: u32 = 1448;
