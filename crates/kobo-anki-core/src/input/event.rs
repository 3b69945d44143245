//! Raw evdev record decoding
//!
//! Wire layout of one `struct input_event` on Linux, little endian:
//!
//! | offset        | size       | field                          |
//! |---------------|------------|--------------------------------|
//! | 0             | 2 × `long` | timestamp (ignored)            |
//! | `TS`          | 2          | `type: u16`                    |
//! | `TS + 2`      | 2          | `code: u16`                    |
//! | `TS + 4`      | 4          | `value: i32`                   |
//!
//! `TS` is twice the native word size: 8 on the 32-bit readers this runs
//! on (a 16-byte record), 16 on a 64-bit host.

use core::mem::size_of;

/// Length of the timestamp prefix
pub const TIMESTAMP_LEN: usize = 2 * size_of::<usize>();

/// Length of one complete record
pub const EVENT_RECORD_LEN: usize = TIMESTAMP_LEN + 8;

pub const EV_SYN: u16 = 0x00;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0x00;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// What a single record means to the touch decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// Position update on one axis, in raw device units
    Abs { axis: Axis, value: i32 },
    /// End of one report
    SynReport,
    /// Anything else (pressure, tracking id, key events, ...)
    Ignored,
}

/// One complete record, copied out of the read buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    bytes: [u8; EVENT_RECORD_LEN],
}

impl EventRecord {
    /// Take the first record of `buf`. `None` on a short read.
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        let bytes = buf.get(..EVENT_RECORD_LEN)?.try_into().ok()?;
        Some(Self { bytes })
    }

    /// Build a record from its fields with a zero timestamp.
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        let mut bytes = [0; EVENT_RECORD_LEN];
        bytes[TIMESTAMP_LEN..TIMESTAMP_LEN + 2].copy_from_slice(&event_type.to_le_bytes());
        bytes[TIMESTAMP_LEN + 2..TIMESTAMP_LEN + 4].copy_from_slice(&code.to_le_bytes());
        bytes[TIMESTAMP_LEN + 4..].copy_from_slice(&value.to_le_bytes());
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; EVENT_RECORD_LEN] {
        &self.bytes
    }

    pub fn event_type(&self) -> u16 {
        u16::from_le_bytes([self.bytes[TIMESTAMP_LEN], self.bytes[TIMESTAMP_LEN + 1]])
    }

    pub fn code(&self) -> u16 {
        u16::from_le_bytes([self.bytes[TIMESTAMP_LEN + 2], self.bytes[TIMESTAMP_LEN + 3]])
    }

    pub fn value(&self) -> i32 {
        let v = TIMESTAMP_LEN + 4;
        i32::from_le_bytes([
            self.bytes[v],
            self.bytes[v + 1],
            self.bytes[v + 2],
            self.bytes[v + 3],
        ])
    }

    pub fn decode(&self) -> RawEvent {
        match (self.event_type(), self.code()) {
            (EV_ABS, ABS_X | ABS_MT_POSITION_X) => RawEvent::Abs {
                axis: Axis::X,
                value: self.value(),
            },
            (EV_ABS, ABS_Y | ABS_MT_POSITION_Y) => RawEvent::Abs {
                axis: Axis::Y,
                value: self.value(),
            },
            (EV_SYN, SYN_REPORT) => RawEvent::SynReport,
            _ => RawEvent::Ignored,
        }
    }
}

/// Collects axis updates until a report completes.
///
/// A report only counts once both axes have been seen. Reports missing an
/// axis are not finalized; the values seen so far carry into the next one,
/// which is what single-axis moves on these controllers need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportAccumulator {
    x: Option<i32>,
    y: Option<i32>,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one decoded record. Returns the raw `(x, y)` when it completes a report.
    pub fn push(&mut self, event: RawEvent) -> Option<(i32, i32)> {
        match event {
            RawEvent::Abs { axis: Axis::X, value } => self.x = Some(value),
            RawEvent::Abs { axis: Axis::Y, value } => self.y = Some(value),
            RawEvent::SynReport => {
                if let (Some(x), Some(y)) = (self.x, self.y) {
                    *self = Self::default();
                    return Some((x, y));
                }
            }
            RawEvent::Ignored => {}
        }
        None
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(acc: &mut ReportAccumulator, records: &[EventRecord]) -> Vec<(i32, i32)> {
        records
            .iter()
            .filter_map(|r| acc.push(r.decode()))
            .collect()
    }

    #[test]
    fn test_field_offsets_are_fixed() {
        let record = EventRecord::new(EV_ABS, ABS_MT_POSITION_Y, -2);
        let bytes = record.as_bytes();
        assert_eq!(bytes.len(), TIMESTAMP_LEN + 8);
        assert_eq!(&bytes[TIMESTAMP_LEN..TIMESTAMP_LEN + 2], &[3, 0]);
        assert_eq!(&bytes[TIMESTAMP_LEN + 2..TIMESTAMP_LEN + 4], &[54, 0]);
        assert_eq!(&bytes[TIMESTAMP_LEN + 4..], &[0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(record.value(), -2);
    }

    #[test]
    fn test_short_read_is_no_record() {
        let full = EventRecord::new(EV_SYN, SYN_REPORT, 0);
        assert!(EventRecord::from_bytes(&full.as_bytes()[..EVENT_RECORD_LEN - 1]).is_none());
        assert_eq!(EventRecord::from_bytes(full.as_bytes()), Some(full));
    }

    #[test]
    fn test_decode_both_code_variants() {
        for code in [ABS_X, ABS_MT_POSITION_X] {
            assert_eq!(
                EventRecord::new(EV_ABS, code, 7).decode(),
                RawEvent::Abs { axis: Axis::X, value: 7 }
            );
        }
        for code in [ABS_Y, ABS_MT_POSITION_Y] {
            assert_eq!(
                EventRecord::new(EV_ABS, code, 9).decode(),
                RawEvent::Abs { axis: Axis::Y, value: 9 }
            );
        }
        assert_eq!(EventRecord::new(EV_SYN, SYN_REPORT, 0).decode(), RawEvent::SynReport);
        // ABS_MT_TRACKING_ID, EV_KEY BTN_TOUCH
        assert_eq!(EventRecord::new(EV_ABS, 0x39, 1).decode(), RawEvent::Ignored);
        assert_eq!(EventRecord::new(0x01, 0x14a, 1).decode(), RawEvent::Ignored);
    }

    #[test]
    fn test_report_needs_both_axes() {
        let mut acc = ReportAccumulator::new();
        let touches = feed(
            &mut acc,
            &[
                EventRecord::new(EV_ABS, ABS_MT_POSITION_X, 100),
                EventRecord::new(EV_SYN, SYN_REPORT, 0),
                EventRecord::new(EV_ABS, 0x39, 4),
                EventRecord::new(EV_ABS, ABS_MT_POSITION_Y, 200),
                EventRecord::new(EV_SYN, SYN_REPORT, 0),
            ],
        );
        assert_eq!(touches, [(100, 200)]);
    }

    #[test]
    fn test_accumulator_resets_after_report() {
        let mut acc = ReportAccumulator::new();
        let touches = feed(
            &mut acc,
            &[
                EventRecord::new(EV_ABS, ABS_X, 1),
                EventRecord::new(EV_ABS, ABS_Y, 2),
                EventRecord::new(EV_SYN, SYN_REPORT, 0),
                EventRecord::new(EV_ABS, ABS_X, 3),
                EventRecord::new(EV_SYN, SYN_REPORT, 0),
            ],
        );
        assert_eq!(touches, [(1, 2)], "the second report lacks a fresh Y");
    }
}
