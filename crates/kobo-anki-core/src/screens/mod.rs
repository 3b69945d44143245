//! The four-screen review state machine
//!
//! [`ScreenManager`] is the session: it owns the display sink, the touch
//! source, the card store and the scheduler, plus everything that persists
//! between taps (current screen, deck, card, page, reverse mode). The
//! binary builds one, calls [`start`](ScreenManager::start) and then
//! [`run`](ScreenManager::run). Tests drive
//! [`handle_touch`](ScreenManager::handle_touch) and
//! [`dispatch`](ScreenManager::dispatch) directly.
//!
//! Every transition that changes what is on screen ends in a full redraw:
//! the scene is rebuilt, the panel refreshed, and input drained so taps
//! made during the refresh are not acted on.

pub mod back;
pub mod constants;
pub mod decks;
pub mod done;
pub mod frame;
pub mod front;

use chrono::Utc;
use embedded_graphics::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cards::{
    Card, CardStore, Rating, Scheduler, count_due_cards, find_card_mut, random_due_card,
};
use crate::config::UiConfig;
use crate::display::DisplaySink;
use crate::input::{TouchFilter, TouchInput};
use crate::ui::{Action, LayoutRegions, Palette, Scene, TouchPoint};

pub use decks::Pagination;
use frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Decks,
    Front,
    Back,
    Done,
}

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct ScreenManager<D, I, S, K> {
    display: D,
    input: TouchFilter<I>,
    store: S,
    scheduler: K,
    config: UiConfig,
    regions: LayoutRegions,
    palette: Palette,
    scene: Scene,
    rng: StdRng,

    screen: Screen,
    reverse: bool,
    decks: Vec<String>,
    page: usize,
    current_deck: Option<String>,
    cards: Vec<Card>,
    current_card: Option<Card>,
}

impl<D, I, S, K> ScreenManager<D, I, S, K>
where
    D: DisplaySink,
    I: TouchInput,
    S: CardStore,
    K: Scheduler,
{
    pub fn new(
        display: D,
        input: I,
        store: S,
        scheduler: K,
        config: UiConfig,
        screen_size: Size,
    ) -> Self {
        let input = TouchFilter::new(input, config.touch_cooldown);
        Self {
            display,
            input,
            store,
            scheduler,
            config,
            regions: LayoutRegions::new(screen_size),
            palette: Palette::default(),
            scene: Scene::new(),
            rng: StdRng::from_entropy(),
            screen: Screen::Decks,
            reverse: false,
            decks: Vec::new(),
            page: 0,
            current_deck: None,
            cards: Vec::new(),
            current_card: None,
        }
    }

    /// Start with the faces of every card swapped.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Replace the card picker's random source, for reproducible sessions.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Draw the deck list. Call once before feeding touches.
    pub fn start(&mut self) {
        self.show(Screen::Decks);
    }

    /// Read, filter and dispatch touches until the user quits.
    pub fn run(&mut self) {
        loop {
            let Some(point) = self.input.next_touch() else {
                continue;
            };
            if self.handle_touch(point) == Flow::Exit {
                info!("Exit requested");
                return;
            }
        }
    }

    /// Resolve a touch against the current scene and act on it.
    pub fn handle_touch(&mut self, point: TouchPoint) -> Flow {
        let action = self.scene.hit_test(point);
        debug!(
            "Touch: x={} y={} action={:?} screen={:?}",
            point.x, point.y, action, self.screen
        );
        match action {
            Some(action) => self.dispatch(action),
            None => Flow::Continue,
        }
    }

    /// Apply `action` to the current screen. Actions a screen does not
    /// handle are ignored.
    pub fn dispatch(&mut self, action: Action) -> Flow {
        match (self.screen, action) {
            (Screen::Decks, Action::Exit) => {
                self.display.clear();
                self.display.refresh();
                return Flow::Exit;
            }
            (Screen::Decks, Action::ToggleReverse) => {
                self.reverse = !self.reverse;
                self.show(Screen::Decks);
            }
            (Screen::Decks, Action::PrevPage) if self.page > 0 => {
                self.page -= 1;
                self.show(Screen::Decks);
            }
            (Screen::Decks, Action::NextPage) if self.has_next_page() => {
                self.page += 1;
                self.show(Screen::Decks);
            }
            (Screen::Decks, Action::OpenDeck(index)) if index < self.decks.len() => {
                self.open_deck(index);
            }
            (Screen::Front | Screen::Back, Action::Back) => self.show(Screen::Decks),
            (Screen::Front, Action::ShowAnswer) => self.show(Screen::Back),
            (Screen::Back, Action::Rate(rating)) => self.rate(rating),
            (Screen::Done, _) => self.show(Screen::Decks),
            (screen, action) => debug!("{action} does nothing on {screen:?}"),
        }
        Flow::Continue
    }

    fn has_next_page(&self) -> bool {
        let per_page = decks::DeckListLayout::new(&self.regions).per_page;
        Pagination::new(self.decks.len(), per_page, self.page as i64).has_next()
    }

    fn open_deck(&mut self, index: usize) {
        let deck = self.decks[index].clone();
        self.cards = match self.store.load_cards(&deck) {
            Ok(cards) => cards,
            Err(e) => {
                warn!("Cannot load deck {deck}: {e}");
                Vec::new()
            }
        };
        info!("Opened deck {} ({} cards)", deck, self.cards.len());
        self.current_deck = Some(deck);
        self.next_card();
    }

    fn rate(&mut self, rating: Rating) {
        let now = Utc::now();
        if let Some(current) = &self.current_card
            && let Some(card) = find_card_mut(&mut self.cards, &current.front)
        {
            self.scheduler.review(card, rating, now);
            if let Some(deck) = &self.current_deck
                && let Err(e) = self.store.save_cards(deck, &self.cards)
            {
                warn!("Rating lost, cannot save deck {deck}: {e}");
            }
        }
        self.next_card();
    }

    /// Pick a fresh due card and show it, or the done screen.
    fn next_card(&mut self) {
        self.current_card = random_due_card(&self.cards, Utc::now(), &mut self.rng).cloned();
        match &self.current_card {
            Some(card) => {
                debug!("Next card: {}", card.front);
                self.show(Screen::Front);
            }
            None => self.show(Screen::Done),
        }
    }

    /// The face shown as the question, honouring reverse mode.
    fn question(&self) -> &str {
        match &self.current_card {
            Some(card) if self.reverse => &card.back,
            Some(card) => &card.front,
            None => "",
        }
    }

    fn answer(&self) -> &str {
        match &self.current_card {
            Some(card) if self.reverse => &card.front,
            Some(card) => &card.back,
            None => "",
        }
    }

    /// Switch to `screen` and draw it from scratch.
    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::Decks {
            self.decks = self.store.list_decks();
        }

        let question = self.question().to_owned();
        let answer = self.answer().to_owned();
        let deck = self.current_deck.clone().unwrap_or_default();

        self.scene.clear();
        let mut frame = Frame {
            display: &mut self.display,
            scene: &mut self.scene,
            palette: &self.palette,
            regions: &self.regions,
            config: &self.config,
        };
        match screen {
            Screen::Decks => {
                let store = &self.store;
                let now = Utc::now();
                let due_count = |name: &str| {
                    store
                        .load_cards(name)
                        .map(|cards| count_due_cards(&cards, now))
                        .unwrap_or(0)
                };
                let pagination =
                    decks::draw(&mut frame, &self.decks, self.page, self.reverse, due_count);
                self.page = pagination.page;
            }
            Screen::Front => front::draw(&mut frame, &question),
            Screen::Back => back::draw(&mut frame, &question, &answer),
            Screen::Done => done::draw(&mut frame, &deck),
        }

        self.display.refresh();
        self.input.drain();
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn decks(&self) -> &[String] {
        &self.decks
    }

    pub fn current_deck(&self) -> Option<&str> {
        self.current_deck.as_deref()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current_card.as_ref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn regions(&self) -> &LayoutRegions {
        &self.regions
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn input(&self) -> &I {
        self.input.inner()
    }

    /// Hand back the display and touch source, e.g. to release the device.
    pub fn into_parts(self) -> (D, I) {
        (self.display, self.input.into_inner())
    }
}
