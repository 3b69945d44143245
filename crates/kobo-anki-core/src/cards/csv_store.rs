//! One CSV file per deck
//!
//! `<data_dir>/<deck>.csv`, header row first. Rows carry either just
//! `front,back` (a freshly exported deck) or the full scheduled form:
//!
//! ```text
//! front,back,due,stability,difficulty,elapsed_days,scheduled_days,reps,lapses,state,last_review
//! ```
//!
//! Timestamps are RFC 3339; bare `YYYY-MM-DD` dates are accepted on read.
//! An empty timestamp means "never".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use csv::StringRecord;
use log::{debug, warn};

use crate::cards::{Card, CardState, CardStore, Schedule};
use crate::error::StoreError;

const DECK_EXTENSION: &str = "csv";

/// Columns written on save, and the minimum a row needs to carry a schedule.
const HEADER: [&str; 11] = [
    "front",
    "back",
    "due",
    "stability",
    "difficulty",
    "elapsed_days",
    "scheduled_days",
    "reps",
    "lapses",
    "state",
    "last_review",
];

#[derive(Debug, Clone)]
pub struct CsvDeckStore {
    data_dir: PathBuf,
}

impl CsvDeckStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn deck_path(&self, deck: &str) -> PathBuf {
        self.data_dir.join(format!("{deck}.{DECK_EXTENSION}"))
    }
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Parse a numeric field, treating anything malformed as zero.
fn number<T: std::str::FromStr + Default>(record: &StringRecord, index: usize) -> T {
    record
        .get(index)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

fn card_from_record(record: &StringRecord) -> Option<Card> {
    if record.len() < 2 {
        return None;
    }
    let mut card = Card::new(&record[0], &record[1]);
    if record.len() >= HEADER.len() {
        card.schedule = Schedule {
            due: parse_time(&record[2]),
            stability: number(record, 3),
            difficulty: number(record, 4),
            elapsed_days: number(record, 5),
            scheduled_days: number(record, 6),
            reps: number(record, 7),
            lapses: number(record, 8),
            state: CardState::from_code(number(record, 9)).unwrap_or_default(),
            last_review: parse_time(&record[10]),
        };
    }
    Some(card)
}

fn card_to_record(card: &Card) -> [String; 11] {
    let s = &card.schedule;
    [
        card.front.clone(),
        card.back.clone(),
        format_time(s.due),
        format!("{:.4}", s.stability),
        format!("{:.4}", s.difficulty),
        s.elapsed_days.to_string(),
        s.scheduled_days.to_string(),
        s.reps.to_string(),
        s.lapses.to_string(),
        s.state.code().to_string(),
        format_time(s.last_review),
    ]
}

impl CardStore for CsvDeckStore {
    fn list_decks(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list decks in {}: {}", self.data_dir.display(), e);
                return Vec::new();
            }
        };

        let mut decks: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == DECK_EXTENSION))
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?;
                if name.starts_with('.') {
                    return None;
                }
                Some(path.file_stem()?.to_str()?.to_owned())
            })
            .collect();
        decks.sort();
        decks
    }

    fn load_cards(&self, deck: &str) -> Result<Vec<Card>, StoreError> {
        let path = self.deck_path(deck);
        let csv_err = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };

        let file = fs::File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::UnknownDeck(deck.to_owned()),
            _ => StoreError::Io {
                path: path.clone(),
                source,
            },
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut cards = Vec::new();
        for record in reader.records() {
            if let Some(card) = card_from_record(&record.map_err(csv_err)?) {
                cards.push(card);
            }
        }
        debug!("Loaded {} cards from {}", cards.len(), path.display());
        Ok(cards)
    }

    fn save_cards(&mut self, deck: &str, cards: &[Card]) -> Result<(), StoreError> {
        let path = self.deck_path(deck);
        let csv_err = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
        writer.write_record(HEADER).map_err(csv_err)?;
        for card in cards {
            writer.write_record(card_to_record(card)).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Saved {} cards to {}", cards.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, CsvDeckStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let store = CsvDeckStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_list_decks_sorted_without_hidden_files() {
        let (_dir, store) = store_with(&[
            ("french.csv", "front,back\n"),
            ("dutch.csv", "front,back\n"),
            (".scratch.csv", "front,back\n"),
            ("notes.txt", "x"),
        ]);
        assert_eq!(store.list_decks(), ["dutch", "french"]);
    }

    #[test]
    fn test_list_decks_missing_dir_is_empty() {
        let store = CsvDeckStore::new("/no/such/dir");
        assert!(store.list_decks().is_empty());
    }

    #[test]
    fn test_load_two_column_deck() {
        let (_dir, store) = store_with(&[(
            "dutch.csv",
            "front,back\nhuis,house\n\"boom, de\",tree\nlonely\n",
        )]);
        let cards = store.load_cards("dutch").unwrap();
        assert_eq!(cards.len(), 2, "short rows are skipped");
        assert_eq!(cards[1].front, "boom, de");
        assert_eq!(cards[0].schedule, Schedule::default());
    }

    #[test]
    fn test_load_scheduled_row_with_date_only_due() {
        let (_dir, store) = store_with(&[(
            "dutch.csv",
            "front,back,due,stability,difficulty,elapsed_days,scheduled_days,reps,lapses,state,last_review\n\
             huis,house,2024-03-01,3.1731,5.2800,0,3,1,0,2,2024-02-27T08:15:00Z\n",
        )]);
        let card = &store.load_cards("dutch").unwrap()[0];
        assert_eq!(card.schedule.due, Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(card.schedule.scheduled_days, 3);
        assert_eq!(card.schedule.state, CardState::Review);
        assert_eq!(
            card.schedule.last_review,
            Some(Utc.with_ymd_and_hms(2024, 2, 27, 8, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_deck_is_an_error() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(
            store.load_cards("dutch"),
            Err(StoreError::UnknownDeck(name)) if name == "dutch"
        ));
    }

    #[test]
    fn test_save_writes_full_header_and_schedule() {
        let (dir, mut store) = store_with(&[]);
        let mut card = Card::new("huis", "house");
        card.schedule.due = Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        card.schedule.stability = 3.17312;
        card.schedule.reps = 1;
        card.schedule.state = CardState::Learning;

        store
            .save_cards("dutch", &[card, Card::new("boom", "tree")])
            .unwrap();

        let written = fs::read_to_string(dir.path().join("dutch.csv")).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(
            lines[1],
            "huis,house,2024-03-01T12:00:00Z,3.1731,0.0000,0,0,1,0,1,"
        );
        assert_eq!(lines[2], "boom,tree,,0.0000,0.0000,0,0,0,0,0,");

        let reloaded = store.load_cards("dutch").unwrap();
        assert_eq!(reloaded[0].schedule.state, CardState::Learning);
        assert_eq!(reloaded[1].schedule.due, None);
    }
}
