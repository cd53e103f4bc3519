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

use super::prelude::*;
use super::score::{Coloring, Colorings};

/// The best status seen so far for a single letter key, across every guess made this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyStatus {
    #[default]
    Unused,
    Absent,
    Present,
    Correct,
}

impl KeyStatus {
    /// Precedence of the status. Invariant: a key's status only ever moves up this ranking, so
    /// Correct is never downgraded and Present is never downgraded to Absent.
    fn rank(&self) -> u8 {
        use KeyStatus::*;
        match self {
            Unused => 0,
            Absent => 1,
            Present => 2,
            Correct => 3,
        }
    }
}

impl From<Coloring> for KeyStatus {
    fn from(c: Coloring) -> Self {
        match c {
            Coloring::Absent => KeyStatus::Absent,
            Coloring::Present => KeyStatus::Present,
            Coloring::Correct => KeyStatus::Correct,
        }
    }
}

/// Best-seen status for every letter of the alphabet, indexed by alphabet position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardState([KeyStatus; ALPHABET_SIZE]);

impl Default for KeyboardState {
    fn default() -> Self {
        Self([KeyStatus::Unused; ALPHABET_SIZE])
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The best-seen status of a letter key. Anything outside a-z/A-Z reports Unused.
    pub fn status(&self, letter: char) -> KeyStatus {
        if letter.is_ascii_alphabetic() {
            self.0[letter_idx(letter.to_ascii_lowercase() as u8)]
        } else {
            KeyStatus::Unused
        }
    }

    ///
    /// Fold one scored guess into the per-key statuses. Each square can only upgrade its letter's
    /// key, never downgrade it: a key already Correct stays Correct, and a key already Present
    /// only changes when the new square is Correct.
    ///
    pub fn merge(&mut self, guess: &str, colorings: &Colorings) {
        debug_assert!(is_wordle_str(guess));

        for (i, b) in guess.as_bytes().iter().enumerate() {
            let slot = &mut self.0[letter_idx(*b)];
            let incoming = KeyStatus::from(colorings[i]);
            if incoming.rank() > slot.rank() {
                *slot = incoming;
            }
        }
    }

    /// Iterates (letter, status) pairs for all 26 keys in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (char, KeyStatus)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, status)| ((b'a' + idx as u8) as char, *status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordle::score::Coloring::*;

    #[test]
    fn test_starts_all_unused() {
        let keys = KeyboardState::new();
        assert!(keys.iter().all(|(_, status)| status == KeyStatus::Unused));
    }

    #[test]
    fn test_merge_records_each_square() {
        let mut keys = KeyboardState::new();
        keys.merge("drain", &[Absent, Present, Present, Absent, Correct].into());

        assert_eq!(keys.status('d'), KeyStatus::Absent);
        assert_eq!(keys.status('r'), KeyStatus::Present);
        assert_eq!(keys.status('a'), KeyStatus::Present);
        assert_eq!(keys.status('i'), KeyStatus::Absent);
        assert_eq!(keys.status('n'), KeyStatus::Correct);
        assert_eq!(keys.status('z'), KeyStatus::Unused);
    }

    #[test]
    fn test_correct_is_never_downgraded() {
        let mut keys = KeyboardState::new();
        keys.merge("roman", &[Absent, Absent, Absent, Absent, Correct].into());
        assert_eq!(keys.status('n'), KeyStatus::Correct);

        // an 'n' square scored Present or Absent later must not touch the key
        keys.merge("nasal", &[Present, Absent, Absent, Absent, Absent].into());
        assert_eq!(keys.status('n'), KeyStatus::Correct);

        keys.merge("nudge", &[Absent, Absent, Absent, Absent, Absent].into());
        assert_eq!(keys.status('n'), KeyStatus::Correct);
    }

    #[test]
    fn test_present_only_upgrades_to_correct() {
        let mut keys = KeyboardState::new();
        keys.merge("tales", &[Absent, Present, Absent, Absent, Absent].into());
        assert_eq!(keys.status('a'), KeyStatus::Present);

        keys.merge("chart", &[Absent, Absent, Absent, Absent, Absent].into());
        assert_eq!(keys.status('a'), KeyStatus::Present, "present must survive absent");

        keys.merge("apron", &[Correct, Absent, Absent, Absent, Absent].into());
        assert_eq!(keys.status('a'), KeyStatus::Correct);
    }

    #[test]
    fn test_repeated_letter_takes_best_square() {
        let mut keys = KeyboardState::new();
        // the same letter appears twice in one guess with different colorings; the key should
        // show the better of the two
        keys.merge("geese", &[Absent, Present, Correct, Absent, Absent].into());
        assert_eq!(keys.status('e'), KeyStatus::Correct);
        assert_eq!(keys.status('g'), KeyStatus::Absent);
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let mut keys = KeyboardState::new();
        keys.merge("tales", &[Absent, Present, Absent, Absent, Absent].into());
        assert_eq!(keys.status('A'), KeyStatus::Present);
        assert_eq!(keys.status('?'), KeyStatus::Unused);
    }
}
