//! evdev touchscreen driver
//!
//! Finds the touch controller, grabs it so the reader's own UI does not
//! see the same taps, and turns raw `input_event` records into screen
//! points through the core decoder and axis transform.

use std::fs::{self, File};
use std::io::{self, Read};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use kobo_anki_core::input::event::EVENT_RECORD_LEN;
use kobo_anki_core::input::{AxisTransform, EventRecord, ReportAccumulator, TouchInput};
use kobo_anki_core::ui::TouchPoint;
use log::{debug, info, warn};
use thiserror::Error;

/// Kernel registry of input devices
pub const INPUT_DEVICES: &str = "/proc/bus/input/devices";

/// Name fragments of the touch controllers found in Kobo readers
const TOUCH_KEYWORDS: [&str; 5] = ["touch", "cyttsp", "elan", "ft5", "wacom"];

/// Tried in order when the registry names no touch controller
const FALLBACK_DEVICES: [&str; 4] = [
    "/dev/input/event1",
    "/dev/input/event0",
    "/dev/input/event2",
    "/dev/input/event3",
];

/// `_IOW('E', 0x90, int)`
const EVIOCGRAB: libc::c_ulong = 0x4004_4590;

/// How long a read waits when there is no device at all
const NO_DEVICE_POLL: Duration = Duration::from_secs(1);

/// Pause after a failed read so a broken device does not spin the CPU
const READ_ERROR_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum TouchError {
    #[error("cannot open touch device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot grab touch device {path}: {source}")]
    Grab {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot change blocking mode of {path}: {source}")]
    Mode {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("touch device {0} is not open")]
    NotOpen(PathBuf),
}

/// First `eventN` handler of a block in `devices` that looks like a touch controller.
///
/// `devices` has the layout of `/proc/bus/input/devices`: blank-line
/// separated blocks, one `H: Handlers=` line each.
pub fn find_touch_handler(devices: &str) -> Option<&str> {
    let mut in_touch_block = false;
    for line in devices.lines() {
        let lower = line.to_ascii_lowercase();
        if TOUCH_KEYWORDS.iter().any(|k| lower.contains(k)) {
            in_touch_block = true;
        }
        if in_touch_block
            && let Some(handlers) = line.strip_prefix("H: Handlers=")
            && let Some(event) = handlers.split_whitespace().find(|h| h.starts_with("event"))
        {
            return Some(event);
        }
        if line.trim().is_empty() {
            in_touch_block = false;
        }
    }
    None
}

/// Device node of the touchscreen, best guess.
pub fn find_touch_device() -> PathBuf {
    if let Ok(devices) = fs::read_to_string(INPUT_DEVICES)
        && let Some(handler) = find_touch_handler(&devices)
    {
        return Path::new("/dev/input").join(handler);
    }
    debug!("No touch controller in {INPUT_DEVICES}, trying fallbacks");
    FALLBACK_DEVICES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DEVICES[0]))
}

pub struct EvdevTouch {
    path: PathBuf,
    device: Option<File>,
    grabbed: bool,
    transform: AxisTransform,
    accumulator: ReportAccumulator,
}

impl EvdevTouch {
    pub fn open(path: impl Into<PathBuf>, transform: AxisTransform) -> Result<Self, TouchError> {
        let path = path.into();
        let device = File::open(&path).map_err(|source| TouchError::Open {
            path: path.clone(),
            source,
        })?;
        info!("Touch device {}", path.display());
        Ok(Self {
            path,
            device: Some(device),
            grabbed: false,
            transform,
            accumulator: ReportAccumulator::new(),
        })
    }

    /// A driver with no device behind it. Reads block and never yield a touch.
    pub fn disconnected(path: impl Into<PathBuf>, transform: AxisTransform) -> Self {
        Self {
            path: path.into(),
            device: None,
            grabbed: false,
            transform,
            accumulator: ReportAccumulator::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    /// Take the device for ourselves.
    pub fn grab(&mut self) -> Result<(), TouchError> {
        let Some(device) = &self.device else {
            return Err(TouchError::NotOpen(self.path.clone()));
        };
        // SAFETY: the descriptor is owned by `device` and stays open for the call
        let ret = unsafe { libc::ioctl(device.as_raw_fd(), EVIOCGRAB as _, 1 as libc::c_int) };
        if ret != 0 {
            return Err(TouchError::Grab {
                path: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }
        self.grabbed = true;
        Ok(())
    }

    /// Give the device back and close it. Fine to call more than once.
    pub fn release(&mut self) {
        if let Some(device) = self.device.take()
            && self.grabbed
        {
            // SAFETY: as in `grab`
            let ret = unsafe { libc::ioctl(device.as_raw_fd(), EVIOCGRAB as _, 0 as libc::c_int) };
            if ret != 0 {
                warn!(
                    "Releasing {}: {}",
                    self.path.display(),
                    io::Error::last_os_error()
                );
            }
        }
        self.grabbed = false;
    }

    fn set_nonblocking(&self, nonblocking: bool) -> Result<(), TouchError> {
        let Some(device) = &self.device else {
            return Err(TouchError::NotOpen(self.path.clone()));
        };
        let mode_err = || TouchError::Mode {
            path: self.path.clone(),
            source: io::Error::last_os_error(),
        };
        let fd = device.as_raw_fd();
        // SAFETY: plain flag manipulation on a descriptor we own
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(mode_err());
        }
        let flags = if nonblocking {
            flags | libc::O_NONBLOCK
        } else {
            flags & !libc::O_NONBLOCK
        };
        // SAFETY: as above
        if unsafe { libc::fcntl(fd, libc::F_SETFL, flags) } < 0 {
            return Err(mode_err());
        }
        Ok(())
    }
}

impl TouchInput for EvdevTouch {
    fn read_touch(&mut self) -> Option<TouchPoint> {
        let Some(device) = &mut self.device else {
            thread::sleep(NO_DEVICE_POLL);
            return None;
        };

        let mut buf = [0u8; EVENT_RECORD_LEN];
        loop {
            match device.read(&mut buf) {
                Ok(n) => {
                    let record = EventRecord::from_bytes(&buf[..n])?;
                    if let Some((x, y)) = self.accumulator.push(record.decode()) {
                        debug!("Raw: x={x} y={y}");
                        return Some(self.transform.apply(x, y));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!("Touch read failed: {e}");
                    thread::sleep(READ_ERROR_BACKOFF);
                    return None;
                }
            }
        }
    }

    fn drain(&mut self) {
        if self.device.is_none() {
            return;
        }
        if let Err(e) = self.set_nonblocking(true) {
            debug!("{e}");
            return;
        }

        let mut discarded = 0usize;
        if let Some(device) = &mut self.device {
            let mut buf = [0u8; EVENT_RECORD_LEN];
            while matches!(device.read(&mut buf), Ok(n) if n > 0) {
                discarded += 1;
            }
        }
        self.accumulator.reset();

        if let Err(e) = self.set_nonblocking(false) {
            warn!("{e}");
        }
        if discarded > 0 {
            debug!("Drained {discarded} stale touch records");
        }
    }
}

impl Drop for EvdevTouch {
    fn drop(&mut self) {
        self.release();
    }
}
