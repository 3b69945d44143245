//! Cards, decks and the two collaborators the review loop leans on
//!
//! - [`CardStore`] lists, loads and saves decks.
//! - [`Scheduler`] turns a rating into the card's next due date.
//!
//! The engine holds cards by value and uses a card's front text as its key
//! inside a deck. Both collaborators are traits so the state machine can be
//! driven against in-memory fakes.

pub mod csv_store;

pub use csv_store::CsvDeckStore;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::StoreError;

/// Review outcome chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Touch-target identifier of the button that gives this rating.
    pub const fn id(self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }

    /// Button caption.
    pub const fn label(self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }
}

/// Learning phase of a card, stored as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    New,
    Learning,
    Review,
    Relearning,
}

impl CardState {
    pub const fn code(self) -> u8 {
        match self {
            CardState::New => 0,
            CardState::Learning => 1,
            CardState::Review => 2,
            CardState::Relearning => 3,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CardState::New),
            1 => Some(CardState::Learning),
            2 => Some(CardState::Review),
            3 => Some(CardState::Relearning),
            _ => None,
        }
    }
}

/// Scheduler-owned review fields. The engine never interprets them beyond `due`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule {
    /// `None` means never scheduled, which is always due
    pub due: Option<DateTime<Utc>>,
    pub stability: f64,
    pub difficulty: f64,
    pub elapsed_days: u64,
    pub scheduled_days: u64,
    pub reps: u64,
    pub lapses: u64,
    pub state: CardState,
    pub last_review: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Card {
    pub front: String,
    pub back: String,
    pub schedule: Schedule,
}

impl Card {
    /// A never-reviewed card.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            schedule: Schedule::default(),
        }
    }

    /// Whether the card's review time is not in the future.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.schedule.due.is_none_or(|due| due <= now)
    }
}

/// Persistent home of the decks.
pub trait CardStore {
    /// Deck names in display order.
    fn list_decks(&self) -> Vec<String>;

    /// Every card of `deck`.
    fn load_cards(&self, deck: &str) -> Result<Vec<Card>, StoreError>;

    /// Replace the stored contents of `deck` with `cards`.
    fn save_cards(&mut self, deck: &str, cards: &[Card]) -> Result<(), StoreError>;
}

/// Spaced-repetition algorithm. Opaque to the engine.
pub trait Scheduler {
    /// Update `card.schedule` for a review with `rating` at `now`.
    fn review(&self, card: &mut Card, rating: Rating, now: DateTime<Utc>);
}

pub fn count_due_cards(cards: &[Card], now: DateTime<Utc>) -> usize {
    cards.iter().filter(|c| c.is_due(now)).count()
}

/// Any due card, chosen uniformly, or `None` when nothing is due.
pub fn random_due_card<'a, R: Rng + ?Sized>(
    cards: &'a [Card],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a Card> {
    cards.iter().filter(|c| c.is_due(now)).choose(rng)
}

/// The card whose front text is `front`.
pub fn find_card_mut<'a>(cards: &'a mut [Card], front: &str) -> Option<&'a mut Card> {
    cards.iter_mut().find(|c| c.front == front)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card_due_in(front: &str, now: DateTime<Utc>, offset: Duration) -> Card {
        let mut card = Card::new(front, "back");
        card.schedule.due = Some(now + offset);
        card
    }

    #[test]
    fn test_due_boundaries() {
        let now = Utc::now();
        assert!(Card::new("a", "b").is_due(now), "unscheduled cards are due");
        assert!(card_due_in("a", now, Duration::zero()).is_due(now));
        assert!(!card_due_in("a", now, Duration::seconds(1)).is_due(now));
    }

    #[test]
    fn test_random_due_card_only_picks_due() {
        let now = Utc::now();
        let cards = vec![
            card_due_in("later", now, Duration::days(2)),
            card_due_in("now", now, Duration::hours(-1)),
            card_due_in("tomorrow", now, Duration::days(1)),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = random_due_card(&cards, now, &mut rng).map(|c| c.front.as_str());
            assert_eq!(picked, Some("now"));
        }
        assert_eq!(count_due_cards(&cards, now), 1);
    }

    #[test]
    fn test_random_due_card_none_when_nothing_due() {
        let now = Utc::now();
        let cards = vec![card_due_in("later", now, Duration::days(2))];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_due_card(&cards, now, &mut rng).is_none());
        assert!(random_due_card(&[], now, &mut rng).is_none());
    }

    #[test]
    fn test_find_card_by_front() {
        let mut cards = vec![Card::new("huis", "house"), Card::new("boom", "tree")];
        let card = find_card_mut(&mut cards, "boom").expect("card exists");
        card.back = "TREE".into();
        assert_eq!(cards[1].back, "TREE");
        assert!(find_card_mut(&mut cards, "kat").is_none());
    }

    #[test]
    fn test_state_codes() {
        for state in [
            CardState::New,
            CardState::Learning,
            CardState::Review,
            CardState::Relearning,
        ] {
            assert_eq!(CardState::from_code(state.code()), Some(state));
        }
        assert_eq!(CardState::from_code(9), None);
    }
}
