//! FBInk subprocess display sink
//!
//! Every primitive is one blocking run of the `fbink` tool. A failed run is
//! logged at debug level and otherwise ignored: a half-drawn screen is
//! better than a dead reviewer.

use std::path::{Path, PathBuf};
use std::process::Command;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use kobo_anki_core::display::{Compositor, DisplaySink, TextStyle};
use kobo_anki_core::ui::{DEFAULT_SCREEN_HEIGHT_PX, DEFAULT_SCREEN_WIDTH_PX, EinkColor};
use log::{debug, info};

/// Where FBInk is usually installed on a reader, most specific first
const FBINK_LOCATIONS: [&str; 4] = [
    "./bin/fbink",
    "/mnt/onboard/.adds/nm/fbink",
    "/usr/local/bin/fbink",
    "/usr/bin/fbink",
];

/// Last resort: let `PATH` find it
const FBINK_FALLBACK: &str = "fbink";

/// The FBInk binary to run.
pub fn find_fbink() -> PathBuf {
    FBINK_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(FBINK_FALLBACK))
}

/// Value following `key` in FBInk's state dump, e.g. `viewWidth: 1072`
/// or `viewWidth=1072`.
fn dimension(dump: &str, key: &str) -> Option<u32> {
    dump.match_indices(key).find_map(|(at, _)| {
        let rest = dump[at + key.len()..].trim_start_matches([':', '=', ' ', '\t']);
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..end].parse().ok()
    })
}

/// Screen size from the output of `fbink -e`, per axis falling back to
/// the stock panel.
pub fn parse_screen_size(dump: &str) -> Size {
    Size::new(
        dimension(dump, "viewWidth").unwrap_or(DEFAULT_SCREEN_WIDTH_PX),
        dimension(dump, "viewHeight").unwrap_or(DEFAULT_SCREEN_HEIGHT_PX),
    )
}

/// Ask FBInk for the panel size.
pub fn detect_screen(binary: &Path) -> Size {
    let size = match Command::new(binary).arg("-e").output() {
        Ok(output) => parse_screen_size(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            debug!("{} -e failed: {}", binary.display(), e);
            Size::new(DEFAULT_SCREEN_WIDTH_PX, DEFAULT_SCREEN_HEIGHT_PX)
        }
    };
    info!("Detected screen: {}x{}", size.width, size.height);
    size
}

pub struct FbinkSink {
    binary: PathBuf,
    compositor: Compositor,
}

impl FbinkSink {
    pub fn new(binary: impl Into<PathBuf>, compositor: Compositor) -> Self {
        Self {
            binary: binary.into(),
            compositor,
        }
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    fn run(&self, args: &[String]) {
        debug!("fbink: {args:?}");
        match Command::new(&self.binary).args(args).output() {
            Ok(output) if !output.status.success() => debug!(
                "fbink error: {}, output: {}{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            ),
            Ok(_) => {}
            Err(e) => debug!("fbink error: cannot run {}: {}", self.binary.display(), e),
        }
    }
}

impl DisplaySink for FbinkSink {
    fn fill_rect(&mut self, rect: Rectangle, color: Option<EinkColor>) {
        self.run(&self.compositor.fill_args(rect, color));
    }

    fn draw_text(&mut self, rect: Rectangle, text: &str, style: &TextStyle) {
        self.run(&self.compositor.text_args(rect, text, style));
    }

    fn clear(&mut self) {
        self.run(&self.compositor.clear_args());
    }

    fn refresh(&mut self) {
        self.run(&self.compositor.refresh_args());
    }
}
