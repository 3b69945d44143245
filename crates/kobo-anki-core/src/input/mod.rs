//! Touch input: record decoding, axis mapping and the cooldown filter
//!
//! The device driver itself lives in the binary. This module holds the
//! parts that are plain arithmetic on bytes and timestamps:
//!
//! - [`event`]: typed view over raw `input_event` records and the
//!   per-report axis accumulator
//! - [`transform`]: rotated-panel to screen coordinate mapping
//! - [`debounce`]: the "last accepted touch" cooldown
//!
//! [`TouchFilter`] glues a [`TouchInput`] source to the cooldown and is
//! what the screen manager reads from.

pub mod debounce;
pub mod event;
pub mod transform;

use std::time::{Duration, Instant};

use log::debug;

pub use debounce::Cooldown;
pub use event::{Axis, EventRecord, RawEvent, ReportAccumulator};
pub use transform::AxisTransform;

use crate::ui::TouchPoint;

/// A source of resolved touch points in screen pixels.
pub trait TouchInput {
    /// Block for the next complete touch report.
    ///
    /// `None` means the read produced nothing usable (short read, device
    /// error). Callers simply try again.
    fn read_touch(&mut self) -> Option<TouchPoint>;

    /// Throw away every record buffered right now without blocking.
    fn drain(&mut self);
}

impl<T: TouchInput + ?Sized> TouchInput for &mut T {
    fn read_touch(&mut self) -> Option<TouchPoint> {
        (**self).read_touch()
    }

    fn drain(&mut self) {
        (**self).drain()
    }
}

/// Applies the cooldown to a touch source.
///
/// Draining counts as an accepted touch: the cooldown restarts once a
/// redraw has finished, so taps that landed during the slow refresh and
/// slipped past the drain are still dropped.
#[derive(Debug)]
pub struct TouchFilter<I> {
    input: I,
    cooldown: Cooldown,
}

impl<I: TouchInput> TouchFilter<I> {
    pub fn new(input: I, cooldown: Duration) -> Self {
        Self {
            input,
            cooldown: Cooldown::new(cooldown),
        }
    }

    /// Next touch that survives the cooldown, or `None` if it was dropped.
    pub fn next_touch(&mut self) -> Option<TouchPoint> {
        let point = self.input.read_touch()?;
        if self.cooldown.accept(Instant::now()) {
            Some(point)
        } else {
            debug!("Touch ignored (cooldown) at ({}, {})", point.x, point.y);
            None
        }
    }

    pub fn drain(&mut self) {
        self.input.drain();
        self.cooldown.stamp(Instant::now());
    }

    pub fn inner(&self) -> &I {
        &self.input
    }

    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn into_inner(self) -> I {
        self.input
    }
}
