/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use chrono::NaiveDate;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::store::{KvStore, StoreErr};

/// Fixed key the selector keeps its per-day record under.
pub const SELECTION_STATE_KEY: &str = "wordleState";

lazy_static! {
    /// Day zero of the deterministic rotation. Every player who uses the same reference date and
    /// the same answer list sees the same word on any given calendar day.
    pub static ref DEFAULT_REFERENCE_DATE: NaiveDate =
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("reference date is a real calendar date");
}

///
/// How the word of the day gets picked. The two policies are interchangeable from the caller's
/// point of view but keep very different state:
///
///   * Deterministic derives the word purely from the calendar date and the list, so the
///     persisted record is only a cache and the policy survives losing it entirely.
///   * RandomNoRepeat draws uniformly from the words not used yet and must remember the draw,
///     so the persisted record is load-bearing.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    Deterministic { reference: NaiveDate },
    RandomNoRepeat,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Deterministic {
            reference: *DEFAULT_REFERENCE_DATE,
        }
    }
}

/// The outcome of selecting a word for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelection {
    pub word: String,
    /// Days elapsed since the reference date. None under the random policy, which has no notion
    /// of a day index.
    pub day_number: Option<i64>,
}

#[derive(Error, Debug)]
pub enum SelectErr {
    #[error("the answer word list is empty")]
    EmptyWordList,
    #[error("failed to persist the day's selection")]
    Store(#[from] StoreErr),
}

/// Cache record written by the deterministic policy (useful for diagnostics and for skipping
/// recomputation; correctness never depends on it).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct DeterministicRecord {
    last_date: NaiveDate,
    word: String,
    day_number: i64,
}

/// Durable record kept by the random policy: the day's word plus every word already used in the
/// current rotation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct RandomRecord {
    last_date: NaiveDate,
    word: String,
    used_words: Vec<String>,
}

pub struct WordSelector {
    policy: SelectionPolicy,
}

impl WordSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    /// A selector on the deterministic rotation anchored at [`DEFAULT_REFERENCE_DATE`].
    pub fn deterministic() -> Self {
        Self::new(SelectionPolicy::default())
    }

    pub fn random_no_repeat() -> Self {
        Self::new(SelectionPolicy::RandomNoRepeat)
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    ///
    /// Picks the target word for `today` from `words`, consulting & updating the persisted state
    /// in `store`.
    ///
    /// Exactly one word is active per calendar day: calling this again with the same date always
    /// returns the same word, no matter how many times the process restarts in between (as long
    /// as the same store comes back).
    ///
    /// `today` is injected rather than read from a clock so callers decide what "today" means
    /// (local midnight, in practice) and tests can pin arbitrary dates.
    ///
    pub fn select(
        &self,
        words: &[String],
        today: NaiveDate,
        store: &mut dyn KvStore,
    ) -> Result<DaySelection, SelectErr> {
        if words.is_empty() {
            return Err(SelectErr::EmptyWordList);
        }

        match &self.policy {
            SelectionPolicy::Deterministic { reference } => {
                select_by_date(*reference, words, today, store)
            }
            SelectionPolicy::RandomNoRepeat => select_random(words, today, store),
        }
    }
}

/// Deterministic policy: the word at index (days since reference) mod (list length). A date
/// before the reference still lands on a valid index thanks to euclidean remainder.
fn select_by_date(
    reference: NaiveDate,
    words: &[String],
    today: NaiveDate,
    store: &mut dyn KvStore,
) -> Result<DaySelection, SelectErr> {
    let day_number = (today - reference).num_days();
    let idx = day_number.rem_euclid(words.len() as i64) as usize;
    let word = words[idx].clone();

    let record = DeterministicRecord {
        last_date: today,
        word: word.clone(),
        day_number,
    };
    save_record(store, &record)?;

    Ok(DaySelection {
        word,
        day_number: Some(day_number),
    })
}

///
/// Random policy: on the first call of a new day, draw uniformly from the words that have not
/// been used yet and remember the draw. Repeat calls within the same day return the remembered
/// word untouched.
///
/// When every word has been used once the used-set resets and the rotation starts over, so no
/// word can repeat before the whole list has had its turn. (At the reset boundary the word just
/// used is back in the pool immediately, so a back-to-back repeat across the boundary is
/// possible.)
///
fn select_random(
    words: &[String],
    today: NaiveDate,
    store: &mut dyn KvStore,
) -> Result<DaySelection, SelectErr> {
    let prior = load_record(store);

    if let Some(record) = &prior {
        if record.last_date == today {
            return Ok(DaySelection {
                word: record.word.clone(),
                day_number: None,
            });
        }
    }

    let mut used_words = prior.map(|record| record.used_words).unwrap_or_default();

    let used: HashSet<&str> = used_words.iter().map(|w| w.as_str()).collect();
    let mut pool: Vec<&str> = words
        .iter()
        .map(|w| w.as_str())
        .filter(|w| !used.contains(w))
        .collect();

    if pool.is_empty() {
        log::debug!("all {} words used, starting the rotation over", words.len());
        used_words.clear();
        pool = words.iter().map(|w| w.as_str()).collect();
    }

    let word = {
        use rand::prelude::IndexedRandom;
        // the pool cannot be empty here: words is non-empty and an empty pool was just refilled
        pool.choose(&mut rand::rng())
            .expect("candidate pool is non-empty")
            .to_string()
    };

    used_words.push(word.clone());
    let record = RandomRecord {
        last_date: today,
        word: word.clone(),
        used_words,
    };
    save_record(store, &record)?;

    Ok(DaySelection {
        word,
        day_number: None,
    })
}

/// Reads the selector's record out of the store. A missing record and an unparseable one are
/// treated the same: start fresh for the current day (the bad record gets overwritten on the
/// next save). Corrupt state must never take the game down.
fn load_record(store: &dyn KvStore) -> Option<RandomRecord> {
    let raw = store.get(SELECTION_STATE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(err) => {
            log::warn!("discarding unreadable day-selection record: {}", err);
            None
        }
    }
}

fn save_record<T: Serialize>(store: &mut dyn KvStore, record: &T) -> Result<(), StoreErr> {
    let payload = serde_json::to_string(record)?;
    store.set(SELECTION_STATE_KEY, payload)
}
