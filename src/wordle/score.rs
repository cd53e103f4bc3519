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

use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};
use self::Coloring::*;
use super::prelude::*;

///
/// The three different colors that a square in the grid can be...
///   * Absent = the letter is not matched to any remaining occurrence in the target (also shown
///              for extra copies of a letter beyond the target's count of that letter)
///   * Present = the letter is in the target, but not in this position
///   * Correct = the letter is in the target at this position
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coloring {
    Absent,
    Present,
    Correct,
}

impl Coloring {
    /// All three colorings (make sure this actually matches the definition above)
    pub const ALL: [Coloring; 3] = [Absent, Present, Correct];
    /// The number of possible colorings
    pub const NUM: usize = Self::ALL.len();

    /// Gives the best emoji to represent the coloring (used for debug printing)
    pub fn emoji(&self) -> &'static str {
        use Coloring::*;
        match self {
            Absent => "⬛",
            Present => "🟨",
            Correct => "🟩",
        }
    }
}

/// An array of Colorings, one for each square in a single guess row.
pub type ColoringsArray = [Coloring; WORD_SIZE];

/// The array of Colorings, but in a struct, so that we can attach some useful functions to a
/// complete row of Colorings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Colorings(pub ColoringsArray);

/// Automatic conversion of [Coloring; WORD_SIZE] -> Colorings
impl From<ColoringsArray> for Colorings {
    fn from(arr: ColoringsArray) -> Self {
        Self(arr)
    }
}

/// Delegate indexing of the struct to it's inner value
impl Index<usize> for Colorings {
    type Output = Coloring;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Delegate mutable indexing of the struct to it's inner value
impl IndexMut<usize> for Colorings {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Colorings {
    ///
    /// Compute what colors would be shown given some guess & target. For example if the guess was
    /// "tares" and the target was "scare" we should compute [Absent, Present, Present, Present, Present]
    ///
    /// This is implemented by:
    /// * creating an empty [Coloring; WORD_SIZE] where all colors are defaulted to Absent
    /// * computing a "budget" for each letter in the alphabet (based on their frequency in the target)
    /// * performing a "GREEN pass" which marks all correctly positioned letters (and updates the budget)
    /// * performing a "YELLOW pass" to mark all present letters (based on the remaining budget for
    ///   each letter)
    ///
    /// The YELLOW pass walks the guess left-to-right, so when a letter repeats, earlier positions
    /// consume the target's occurrences first and later positions fall back to Absent once the
    /// budget runs out. Each target occurrence backs at most one Correct/Present square.
    ///
    /// Both arguments must already be valid lowercase 5-letter words (callers normalize & reject
    /// anything else before scoring); output for other inputs is unspecified.
    ///
    pub fn with_guess_target(guess: &str, target: &str) -> Self {
        debug_assert!(is_wordle_str(guess));
        debug_assert!(is_wordle_str(target));

        let mut out = Self::default();
        let mut target_letter_counts = count_letters(target);
        let target_bytes = target.as_bytes();
        let guess_bytes = guess.as_bytes();

        // GREEN pass
        for i in 0..WORD_SIZE {
            let gc = guess_bytes[i];
            let tc = target_bytes[i];

            if gc == tc {
                target_letter_counts[letter_idx(gc)] -= 1;
                out[i] = Correct;
            }
        }

        // YELLOW pass
        for i in 0..WORD_SIZE {
            if out[i] != Correct {
                let gc = guess_bytes[i];
                let counter = &mut target_letter_counts[letter_idx(gc)];
                if *counter > 0 {
                    *counter -= 1;
                    out[i] = Present;
                }
            }
        }

        out
    }

    /// Whether this row means the guess was the target (all squares green)
    pub fn is_all_correct(&self) -> bool {
        self.0.iter().all(|c| c == &Correct)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coloring> + '_ {
        self.0.iter().copied()
    }
}

impl Default for Colorings {
    fn default() -> Self {
        Self([Absent; WORD_SIZE])
    }
}

impl Display for Colorings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..WORD_SIZE {
            f.write_str(self[i].emoji())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("tares", "scare", [Absent, Present, Present, Present, Present])]
    #[test_case("spare", "scare", [Correct, Absent, Correct, Correct, Correct])]
    #[test_case("share", "scare", [Correct, Absent, Correct, Correct, Correct])]
    #[test_case("scare", "scare", [Correct, Correct, Correct, Correct, Correct])]
    #[test_case("tales", "apron", [Absent, Present, Absent, Absent, Absent])]
    #[test_case("drain", "apron", [Absent, Present, Present, Absent, Correct])]
    #[test_case("roman", "apron", [Present, Present, Absent, Present, Correct])]
    #[test_case("speed", "erase", [Present, Absent, Present, Present, Absent])]
    #[test_case("hello", "hello", [Correct, Correct, Correct, Correct, Correct])]
    #[test_case("alloy", "loyal", [Present, Present, Present, Present, Present])]
    #[test_case("lanes", "legal", [Correct, Present, Absent, Present, Absent])]
    #[test_case("leary", "legal", [Correct, Correct, Present, Absent, Absent])]
    #[test_case("lemma", "legal", [Correct, Correct, Absent, Absent, Present])]
    #[test_case("arles", "ledge", [Absent, Absent, Present, Present, Absent])]
    #[test_case("elite", "ledge", [Present, Present, Absent, Absent, Correct])]
    #[test_case("geese", "creep", [Absent, Present, Correct, Absent, Absent])]
    fn test_coloring(guess: &str, target: &str, expected_coloring: ColoringsArray) {
        assert_eq!(
            Colorings::with_guess_target(guess, target),
            Colorings(expected_coloring),
            "guess={}, target={}",
            guess,
            target
        );
    }

    #[test]
    fn test_scoring_is_pure() {
        let a = Colorings::with_guess_target("speed", "erase");
        let b = Colorings::with_guess_target("speed", "erase");
        assert_eq!(a, b);
    }

    /// For every letter, the number of Correct/Present squares showing that letter can never
    /// exceed the letter's count in the target.
    #[test]
    fn test_matches_bounded_by_target_multiplicity() {
        let pairs = [
            ("speed", "erase"),
            ("alloy", "loyal"),
            ("geese", "creep"),
            ("eerie", "tepee"),
            ("mamma", "madam"),
            ("otter", "totem"),
        ];

        for (guess, target) in pairs {
            let colorings = Colorings::with_guess_target(guess, target);
            let target_counts = count_letters(target);

            let mut matched = [0usize; ALPHABET_SIZE];
            for (i, c) in colorings.iter().enumerate() {
                if c != Coloring::Absent {
                    matched[letter_idx(guess.as_bytes()[i])] += 1;
                }
            }

            for letter in 0..ALPHABET_SIZE {
                assert!(
                    matched[letter] <= target_counts[letter],
                    "guess={} target={} over-matched letter #{}",
                    guess,
                    target,
                    letter,
                );
            }
        }
    }

    #[test]
    fn test_all_correct_detection() {
        assert!(Colorings::with_guess_target("loyal", "loyal").is_all_correct());
        assert!(!Colorings::with_guess_target("loyal", "alloy").is_all_correct());
    }

    #[test]
    fn test_display_uses_one_emoji_per_square() {
        let row = Colorings::with_guess_target("speed", "erase");
        assert_eq!(format!("{}", row), "🟨⬛🟨🟨⬛");
    }
}
