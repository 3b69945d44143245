//! FSRS scheduling through the `rs-fsrs` crate

use chrono::{DateTime, Utc};
use kobo_anki_core::cards::{Card, CardState, Rating, Schedule, Scheduler};
use kobo_anki_core::config::CoreConfig;
use log::debug;
use rs_fsrs::{FSRS, Parameters};

pub struct FsrsScheduler {
    fsrs: FSRS,
}

impl FsrsScheduler {
    pub fn new(config: &CoreConfig) -> Self {
        let parameters = Parameters {
            request_retention: config.request_retention,
            maximum_interval: config.maximum_interval as _,
            enable_short_term: config.enable_short_term,
            ..Default::default()
        };
        Self {
            fsrs: FSRS::new(parameters),
        }
    }
}

fn to_fsrs_rating(rating: Rating) -> rs_fsrs::Rating {
    match rating {
        Rating::Again => rs_fsrs::Rating::Again,
        Rating::Hard => rs_fsrs::Rating::Hard,
        Rating::Good => rs_fsrs::Rating::Good,
        Rating::Easy => rs_fsrs::Rating::Easy,
    }
}

fn to_fsrs_state(state: CardState) -> rs_fsrs::State {
    match state {
        CardState::New => rs_fsrs::State::New,
        CardState::Learning => rs_fsrs::State::Learning,
        CardState::Review => rs_fsrs::State::Review,
        CardState::Relearning => rs_fsrs::State::Relearning,
    }
}

fn from_fsrs_state(state: rs_fsrs::State) -> CardState {
    match state {
        rs_fsrs::State::New => CardState::New,
        rs_fsrs::State::Learning => CardState::Learning,
        rs_fsrs::State::Review => CardState::Review,
        rs_fsrs::State::Relearning => CardState::Relearning,
    }
}

/// Unset timestamps count as "now": never-reviewed cards are due immediately.
fn to_fsrs_card(schedule: &Schedule, now: DateTime<Utc>) -> rs_fsrs::Card {
    let mut card = rs_fsrs::Card::new();
    card.due = schedule.due.unwrap_or(now);
    card.stability = schedule.stability;
    card.difficulty = schedule.difficulty;
    card.elapsed_days = schedule.elapsed_days as _;
    card.scheduled_days = schedule.scheduled_days as _;
    card.reps = schedule.reps as _;
    card.lapses = schedule.lapses as _;
    card.state = to_fsrs_state(schedule.state);
    card.last_review = schedule.last_review.unwrap_or(now);
    card
}

fn from_fsrs_card(card: rs_fsrs::Card) -> Schedule {
    Schedule {
        due: Some(card.due),
        stability: card.stability,
        difficulty: card.difficulty,
        elapsed_days: card.elapsed_days.max(0) as u64,
        scheduled_days: card.scheduled_days.max(0) as u64,
        reps: card.reps.max(0) as u64,
        lapses: card.lapses.max(0) as u64,
        state: from_fsrs_state(card.state),
        last_review: Some(card.last_review),
    }
}

impl Scheduler for FsrsScheduler {
    fn review(&self, card: &mut Card, rating: Rating, now: DateTime<Utc>) {
        let before = to_fsrs_card(&card.schedule, now);
        let next = self.fsrs.next(before, now, to_fsrs_rating(rating)).card;
        card.schedule = from_fsrs_card(next);
        debug!(
            "Reviewed {:?} as {}: due {:?} ({:?})",
            card.front,
            rating.label(),
            card.schedule.due,
            card.schedule.state
        );
    }
}
