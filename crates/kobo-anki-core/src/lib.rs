//! Hardware-independent core library for kobo-anki
//!
//! This crate contains all platform-agnostic logic for the e-ink flashcard
//! reviewer: percentage layout, the per-frame hit-test scene, the rasterizer
//! argument builder, touch record decoding and cooldown filtering, the card
//! model with its store/scheduler seams, and the four-screen review state
//! machine.
//!
//! Nothing in here touches a device node or spawns a process. The device
//! binary plugs real implementations into the [`display::DisplaySink`],
//! [`input::TouchInput`], [`cards::CardStore`] and [`cards::Scheduler`]
//! traits; tests plug in recording and scripted ones.

pub mod cards;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod screens;
pub mod ui;
