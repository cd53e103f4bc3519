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

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{data::Data, keyboard::KeyboardState, prelude::*, score::Colorings, select::DaySelection};
use crate::store::{KvStore, StoreErr};

/// Fixed key one day's session is persisted under.
pub const GAME_STATE_KEY: &str = "gameState";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessErr {
    /// The two messages below are the only ones a player ever sees; they are surfaced verbatim.
    #[error("Word must be 5 letters long")]
    NotFiveLetters,
    #[error("Not a valid English word")]
    NotAWord,
    #[error("the game is already over")]
    GameOver,
}

///
/// One day's play session: the target word, the guesses made so far, and the in-progress guess
/// being typed.
///
/// The scorer never sees a bad guess: submit() rejects anything that isn't exactly 5 letters or
/// isn't in the accepted dictionary before scoring, which is the precondition the scorer relies
/// on.
///
/// Serializes to the field-named record the embedding app persists between launches; everything
/// derivable (keyboard statuses, per-row colorings) is recomputed instead of stored.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    current_guess: String,
    guesses: Vec<String>,
    /// Target words of previous days' finished sessions, oldest first.
    history: Vec<String>,
    target_word: String,
    day_number: Option<i64>,
    game_over: bool,
    won: bool,
    /// The last user-visible rejection message, cleared by any further input.
    error: Option<String>,
    #[serde(skip)]
    keyboard: KeyboardState,
}

impl Game {
    /// A fresh session for the given day's selection.
    pub fn for_day(selection: &DaySelection) -> Self {
        Self {
            current_guess: String::new(),
            guesses: Vec::new(),
            history: Vec::new(),
            target_word: selection.word.clone(),
            day_number: selection.day_number,
            game_over: false,
            won: false,
            error: None,
            keyboard: KeyboardState::new(),
        }
    }

    ///
    /// Brings back the persisted session if it is still about today's word, otherwise starts a
    /// fresh one.
    ///
    /// Three ways the stored record can be unusable, none of them fatal:
    ///   * nothing stored yet -> fresh session
    ///   * stored but unparseable or internally inconsistent -> discarded with a warning
    ///   * stored for an earlier day -> fresh session, with the finished day's target moved
    ///     into history
    ///
    pub fn restore_or_start(store: &dyn KvStore, selection: &DaySelection) -> Self {
        let stored = match store.get(GAME_STATE_KEY) {
            Some(raw) => match serde_json::from_str::<Game>(&raw) {
                Ok(game) if game.is_coherent() => Some(game),
                Ok(_) => {
                    log::warn!("discarding inconsistent stored game session");
                    None
                }
                Err(err) => {
                    log::warn!("discarding unreadable stored game session: {}", err);
                    None
                }
            },
            None => None,
        };

        match stored {
            Some(mut game) if game.target_word == selection.word => {
                game.day_number = selection.day_number;
                game.rebuild_keyboard();
                game
            }
            Some(old) => {
                let mut game = Self::for_day(selection);
                game.history = old.history;
                game.history.push(old.target_word);
                game
            }
            None => Self::for_day(selection),
        }
    }

    pub fn save(&self, store: &mut dyn KvStore) -> Result<(), StoreErr> {
        let payload = serde_json::to_string(self)?;
        store.set(GAME_STATE_KEY, payload)
    }

    /// Appends a typed letter to the in-progress guess. Ignores anything that isn't an ASCII
    /// letter, extra letters past 5, and all input once the game is over.
    pub fn push_letter(&mut self, letter: char) {
        if self.game_over {
            return;
        }
        self.error = None;

        if letter.is_ascii_alphabetic() && self.current_guess.len() < WORD_SIZE {
            self.current_guess.push(letter.to_ascii_lowercase());
        }
    }

    /// Removes the last letter of the in-progress guess (backspace).
    pub fn pop_letter(&mut self) {
        if self.game_over {
            return;
        }
        self.error = None;
        self.current_guess.pop();
    }

    ///
    /// Submits the in-progress guess. On success the guess is scored against the target, folded
    /// into the keyboard statuses, and recorded; the returned colorings are what the grid row
    /// shows. On rejection nothing is consumed and the rejection message is kept in error() for
    /// the UI to display.
    ///
    pub fn submit(&mut self, data: &Data) -> Result<Colorings, GuessErr> {
        if self.game_over {
            return Err(GuessErr::GameOver);
        }

        let guess = normalize_wordle_word(&self.current_guess);
        if guess.chars().count() != WORD_SIZE {
            return Err(self.reject(GuessErr::NotFiveLetters));
        }
        if !data.is_valid(&guess) {
            return Err(self.reject(GuessErr::NotAWord));
        }

        let colorings = Colorings::with_guess_target(&guess, &self.target_word);
        self.keyboard.merge(&guess, &colorings);

        self.won = guess == self.target_word;
        self.guesses.push(guess);
        self.current_guess.clear();
        self.error = None;
        self.game_over = self.won || self.guesses.len() == NUM_TURNS;

        Ok(colorings)
    }

    fn reject(&mut self, err: GuessErr) -> GuessErr {
        self.error = Some(err.to_string());
        err
    }

    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Recomputes the coloring row for each submitted guess, in order.
    pub fn colorings(&self) -> impl Iterator<Item = Colorings> + '_ {
        self.guesses
            .iter()
            .map(|guess| Colorings::with_guess_target(guess, &self.target_word))
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn day_number(&self) -> Option<i64> {
        self.day_number
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// The last rejection message, if the most recent submit was rejected.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn turns_left(&self) -> usize {
        NUM_TURNS - self.guesses.len()
    }

    /// A stored record has to make sense before it is trusted; a record that parses but breaks
    /// these shape rules would panic the scorer or index out of range later.
    fn is_coherent(&self) -> bool {
        is_wordle_str(&self.target_word)
            && self.guesses.len() <= NUM_TURNS
            && self.guesses.iter().all(|g| is_wordle_str(g))
            && self.current_guess.len() <= WORD_SIZE
            && self.current_guess.bytes().all(|b| is_normal_wordle_char(&b))
    }

    /// Replays every stored guess into the keyboard statuses (they are not persisted).
    fn rebuild_keyboard(&mut self) {
        let mut keyboard = KeyboardState::new();
        for guess in &self.guesses {
            keyboard.merge(guess, &Colorings::with_guess_target(guess, &self.target_word));
        }
        self.keyboard = keyboard;
    }
}
