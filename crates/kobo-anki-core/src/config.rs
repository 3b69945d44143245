//! Configuration files
//!
//! Both files are plain `key = value` lines. Blank lines and lines starting
//! with `#` are skipped, unknown keys are ignored, and a value that does not
//! parse leaves the default in place. A missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};

use crate::display::compositor::FontPaths;
use crate::input::debounce::DEFAULT_COOLDOWN;

/// Name of the scheduler/data config, looked up in the working directory
pub const CORE_CONFIG_FILE: &str = "anki-core.conf";

/// Name of the display config
pub const UI_CONFIG_FILE: &str = "anki-fbink.conf";

/// Iterate over the `key = value` pairs of a config file body.
pub fn key_values(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
}

fn parse_flag(value: &str) -> bool {
    value == "true" || value == "1"
}

/// Parse `value` into `slot`, keeping the old value when it does not parse.
/// Point sizes outside this range are pulled back into it
pub const POINT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=512;

fn parse_size(key: &str, value: &str, slot: &mut u32) {
    parse_into(key, value, slot);
    let clamped = (*slot).clamp(*POINT_SIZE_RANGE.start(), *POINT_SIZE_RANGE.end());
    if clamped != *slot {
        warn!("Clamping {key} = {} to {clamped}", *slot);
        *slot = clamped;
    }
}

fn parse_into<T: std::str::FromStr>(key: &str, value: &str, slot: &mut T) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!("Ignoring {key} = {value:?}: not a number"),
    }
}

/// Card data location and scheduler parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// Directory holding one `<deck>.csv` per deck
    pub data_dir: PathBuf,
    /// Start with question and answer swapped
    pub reverse: bool,
    /// Target probability of recall
    pub request_retention: f64,
    /// Longest interval the scheduler may assign, in days
    pub maximum_interval: f64,
    /// Allow same-day learning steps
    pub enable_short_term: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("words"),
            reverse: false,
            request_retention: 0.9,
            maximum_interval: 36500.0,
            enable_short_term: false,
        }
    }
}

impl CoreConfig {
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for (key, value) in key_values(text) {
            match key {
                "data_dir" => config.data_dir = PathBuf::from(value),
                "reverse" => config.reverse = parse_flag(value),
                "request_retention" => parse_into(key, value, &mut config.request_retention),
                "maximum_interval" => parse_into(key, value, &mut config.maximum_interval),
                "enable_short_term" => config.enable_short_term = parse_flag(value),
                _ => debug!("Unknown core config key {key:?}"),
            }
        }
        config
    }

    /// Load from `path`, falling back to defaults when it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                debug!("No core config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Fonts, sizes and input timing for the e-ink front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub font_dir: Option<PathBuf>,
    pub font_front: Option<String>,
    pub font_back: Option<String>,
    pub font_menu: Option<String>,
    /// Point size of screen titles
    pub size_title: u32,
    /// Point size of card text
    pub size_card: u32,
    /// Point size of menus and buttons
    pub size_menu: u32,
    /// Invert every draw
    pub dark_mode: bool,
    /// Minimum time between two accepted taps
    pub touch_cooldown: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_dir: None,
            font_front: None,
            font_back: None,
            font_menu: None,
            size_title: 24,
            size_card: 28,
            size_menu: 16,
            dark_mode: false,
            touch_cooldown: DEFAULT_COOLDOWN,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

impl UiConfig {
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for (key, value) in key_values(text) {
            match key {
                "font_dir" => config.font_dir = non_empty(value).map(PathBuf::from),
                "font_front" => config.font_front = non_empty(value),
                "font_back" => config.font_back = non_empty(value),
                "font_menu" => config.font_menu = non_empty(value),
                "size_title" => parse_size(key, value, &mut config.size_title),
                "size_card" => parse_size(key, value, &mut config.size_card),
                "size_menu" => parse_size(key, value, &mut config.size_menu),
                "darkmode" => config.dark_mode = parse_flag(value),
                "touch_cooldown" => {
                    let mut millis = config.touch_cooldown.as_millis() as u64;
                    parse_into(key, value, &mut millis);
                    config.touch_cooldown = Duration::from_millis(millis);
                }
                _ => debug!("Unknown UI config key {key:?}"),
            }
        }
        config
    }

    /// Load from the first readable path, or defaults if none is.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        for path in paths {
            if let Ok(text) = fs::read_to_string(path) {
                debug!("UI config from {}", path.as_ref().display());
                return Self::parse(&text);
            }
        }
        debug!("No UI config found, using defaults");
        Self::default()
    }

    /// Where the UI config is looked for: the working directory, then the data directory.
    pub fn search_paths(data_dir: &Path) -> [PathBuf; 2] {
        [
            Path::new(".").join(UI_CONFIG_FILE),
            data_dir.join(UI_CONFIG_FILE),
        ]
    }

    /// Font file per kind. A kind only gets a file when both the directory
    /// and its file name are configured.
    pub fn font_paths(&self) -> FontPaths {
        let resolve = |name: &Option<String>| {
            let dir = self.font_dir.as_ref()?;
            name.as_ref().map(|n| dir.join(n))
        };
        FontPaths {
            menu: resolve(&self.font_menu),
            front: resolve(&self.font_front),
            back: resolve(&self.font_back),
        }
    }
}
