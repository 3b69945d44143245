//! Rasterizer argument builder
//!
//! Turns draw primitives into FBInk command lines. This module only builds
//! arguments; running the tool is the device binary's job. Keeping the two
//! apart lets the exact argument grammar be checked without a panel.
//!
//! Grammar, per primitive:
//!
//! | primitive | arguments                                                        |
//! |-----------|------------------------------------------------------------------|
//! | fill      | `-k top=Y,left=X,width=W,height=H -b [-B COLOR] [-H]`            |
//! | text      | `-t regular=PATH,size=S,top=Y,left=L,right=R -O -b [-m] [-C COLOR] [-H] TEXT` |
//! | text (no font) | `-y ROW -S SCALE -O -b [-m] [-C COLOR] [-H] TEXT`          |
//! | clear     | `-c [-H]`                                                        |
//! | refresh   | `-s`                                                             |
//!
//! `-b` skips the refresh, `-O` draws text without a background box so
//! earlier fills stay visible, `-m` centers, `-H` inverts for dark mode.

use std::path::{Path, PathBuf};

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::UiConfig;
use crate::display::{Alignment, FontKind, TextStyle};
use crate::ui::EinkColor;

/// Rows the bitmap fallback font divides the screen into
const FALLBACK_TEXT_ROWS: i32 = 20;

/// Point size to bitmap-font scale divisor
const FALLBACK_SCALE_DIVISOR: u32 = 8;

/// Right-aligned text starts this far (2/3) into its rectangle
const RIGHT_ALIGN_NUMERATOR: u32 = 2;
const RIGHT_ALIGN_DENOMINATOR: u32 = 3;

/// Resolved font file per [`FontKind`]; `None` means "use the bitmap font".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontPaths {
    pub menu: Option<PathBuf>,
    pub front: Option<PathBuf>,
    pub back: Option<PathBuf>,
}

impl FontPaths {
    pub fn get(&self, kind: FontKind) -> Option<&Path> {
        match kind {
            FontKind::Menu => self.menu.as_deref(),
            FontKind::Front => self.front.as_deref(),
            FontKind::Back => self.back.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Compositor {
    fonts: FontPaths,
    dark_mode: bool,
    screen: Size,
}

impl Compositor {
    pub fn new(fonts: FontPaths, dark_mode: bool, screen: Size) -> Self {
        Self {
            fonts,
            dark_mode,
            screen,
        }
    }

    pub fn from_config(config: &UiConfig, screen: Size) -> Self {
        Self::new(config.font_paths(), config.dark_mode, screen)
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    fn push_invert(&self, args: &mut Vec<String>) {
        if self.dark_mode {
            args.push("-H".into());
        }
    }

    /// Arguments for an opaque fill without refresh.
    pub fn fill_args(&self, rect: Rectangle, color: Option<EinkColor>) -> Vec<String> {
        let region = format!(
            "top={},left={},width={},height={}",
            rect.top_left.y, rect.top_left.x, rect.size.width, rect.size.height
        );
        let mut args = vec!["-k".into(), region, "-b".into()];
        if let Some(color) = color {
            args.push("-B".into());
            args.push(color.name().into());
        }
        self.push_invert(&mut args);
        args
    }

    /// Arguments for background-less text without refresh.
    pub fn text_args(&self, rect: Rectangle, text: &str, style: &TextStyle) -> Vec<String> {
        let mut args = match self.fonts.get(style.font) {
            Some(path) => self.truetype_placement(rect, path, style),
            None => self.bitmap_placement(rect, style),
        };
        args.push("-O".into());
        args.push("-b".into());
        if style.alignment == Alignment::Center {
            args.push("-m".into());
        }
        if let Some(color) = style.color {
            args.push("-C".into());
            args.push(color.name().into());
        }
        self.push_invert(&mut args);
        args.push(text.into());
        args
    }

    fn truetype_placement(&self, rect: Rectangle, path: &Path, style: &TextStyle) -> Vec<String> {
        let right_edge = rect.top_left.x + rect.size.width as i32;
        let right = (self.screen.width as i32 - right_edge).max(0);
        let left = match style.alignment {
            // Push the left margin in so the text hugs the right edge
            Alignment::Right => {
                rect.top_left.x
                    + (rect.size.width * RIGHT_ALIGN_NUMERATOR / RIGHT_ALIGN_DENOMINATOR) as i32
            }
            _ => rect.top_left.x,
        };
        let spec = format!(
            "regular={},size={},top={},left={},right={}",
            path.display(),
            style.size,
            rect.top_left.y,
            left,
            right
        );
        vec!["-t".into(), spec]
    }

    // Degraded mode: the bitmap font only knows text rows and a scale, and
    // can only tell centered from not-centered.
    fn bitmap_placement(&self, rect: Rectangle, style: &TextStyle) -> Vec<String> {
        let height = self.screen.height.max(1) as i32;
        let row = rect.top_left.y * FALLBACK_TEXT_ROWS / height;
        let scale = style.size / FALLBACK_SCALE_DIVISOR;
        vec!["-y".into(), row.to_string(), "-S".into(), scale.to_string()]
    }

    /// Arguments for a full buffer clear.
    pub fn clear_args(&self) -> Vec<String> {
        let mut args = vec!["-c".into()];
        self.push_invert(&mut args);
        args
    }

    /// Arguments for committing the buffer to the panel.
    pub fn refresh_args(&self) -> Vec<String> {
        vec!["-s".into()]
    }
}
