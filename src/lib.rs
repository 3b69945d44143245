//! Device side of kobo-anki
//!
//! The parts that only make sense on the reader: the evdev touch driver,
//! the FBInk display sink and the FSRS scheduler adapter. Everything else
//! lives in `kobo-anki-core`.

pub mod fbink;
pub mod scheduler;
pub mod touch;
