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

use crate::wordle::prelude::*;
use lazy_static::lazy_static;
use rust_embed::RustEmbed;
use std::collections::HashSet;
use std::str::Utf8Error;
use thiserror::Error;

// Embedded word lists, one word per line
pub const ANSWERS_FILE_NAME: &str = "answers.txt";
pub const DICTIONARY_FILE_NAME: &str = "dictionary.txt";

lazy_static! {
    pub static ref DATA: Data = Data::read().expect("should have no failures reading data...");
}

#[derive(RustEmbed)]
#[folder = "data/"]
struct RawData;

/// Holds all of the data represented by the static/embedded text files
#[derive(Clone, Debug)]
pub struct Data {
    /// The ordered list of words that can be an answer, in daily rotation order
    answers: Vec<String>,
    /// Every word a player is allowed to guess (the dictionary plus all answers)
    accepted: HashSet<String>,
}

#[derive(Error, Debug)]
pub enum LoadDataErr {
    #[error("missing word list file '{0}'")]
    MissingFile(String),
    #[error(transparent)]
    EncodingError(#[from] Utf8Error),
    #[error("the word '{0}' is not usable as an answer")]
    MalformedAnswer(String),
    #[error("the answer word '{0}' appears more than once")]
    DuplicateAnswer(String),
    #[error("the answer list is empty")]
    NoAnswers,
}

impl Data {
    pub fn read() -> Result<Self, LoadDataErr> {
        let answers_raw = retrieve_file_as_str(ANSWERS_FILE_NAME)?;
        let dictionary_raw = retrieve_file_as_str(DICTIONARY_FILE_NAME)?;
        let out = Self::from_texts(&answers_raw, &dictionary_raw)?;
        log::debug!(
            "got {} answer words and {} accepted words from data files",
            out.answers.len(),
            out.accepted.len(),
        );
        Ok(out)
    }

    ///
    /// Builds the word data from raw text instead of the embedded files, which is how tests pin
    /// down small word lists.
    ///
    /// The answer list is strict: every non-blank line must normalize to a valid lowercase
    /// 5-letter word and no word may repeat, because the daily rotation indexes into it by
    /// position. The dictionary is lenient and simply drops anything that isn't 5 letters, the
    /// same way the accepted-word sources it is built from mix in words of every length.
    ///
    pub fn from_texts(answers: &str, dictionary: &str) -> Result<Self, LoadDataErr> {
        let answers = try_parse_answers(answers)?;

        let mut accepted: HashSet<String> = dictionary
            .lines()
            .map(normalize_wordle_word)
            .filter(|line| is_wordle_str(line))
            .collect();
        accepted.extend(answers.iter().cloned());

        Ok(Self { answers, accepted })
    }

    /// The ordered answer list (the daily selector indexes into this)
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// True iff the word (after normalization) may be submitted as a guess. O(1) average.
    pub fn is_valid(&self, word: &str) -> bool {
        self.accepted.contains(&normalize_wordle_word(word))
    }
}

fn try_parse_answers(raw: &str) -> Result<Vec<String>, LoadDataErr> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for line in raw.lines() {
        let word = normalize_wordle_word(line);
        if word.is_empty() {
            continue;
        }
        if !is_wordle_str(&word) {
            return Err(LoadDataErr::MalformedAnswer(word));
        }
        if !seen.insert(word.clone()) {
            return Err(LoadDataErr::DuplicateAnswer(word));
        }
        out.push(word);
    }

    if out.is_empty() {
        return Err(LoadDataErr::NoAnswers);
    }

    Ok(out)
}

fn retrieve_file_as_str(name: &str) -> Result<String, LoadDataErr> {
    let f: rust_embed::EmbeddedFile =
        RawData::get(name).ok_or_else(|| LoadDataErr::MissingFile(name.to_string()))?;

    Ok(std::str::from_utf8(&f.data)
        .map_err(LoadDataErr::EncodingError)?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_loads() {
        assert!(!DATA.answers().is_empty());
        assert!(DATA.answers().iter().all(|w| is_wordle_str(w)));

        // answers are always accepted guesses
        for word in DATA.answers() {
            assert!(DATA.is_valid(word), "answer '{}' should be accepted", word);
        }
    }

    #[test]
    fn test_from_texts() {
        let data = Data::from_texts("apple\nchair\n\nSTONE\n", "ab\ncrane\ntoolong\n").unwrap();
        assert_eq!(data.answers(), &["apple", "chair", "stone"]);

        assert!(data.is_valid("apple"));
        assert!(data.is_valid("crane"));
        assert!(data.is_valid("CRANE"));
        assert!(data.is_valid("  stone "));
        assert!(!data.is_valid("ab"));
        assert!(!data.is_valid("toolong"));
        assert!(!data.is_valid("zzzzz"));
    }

    #[test]
    fn test_empty_answer_list_is_rejected() {
        assert!(matches!(
            Data::from_texts("", "crane\n"),
            Err(LoadDataErr::NoAnswers)
        ));
        assert!(matches!(
            Data::from_texts("\n\n", "crane\n"),
            Err(LoadDataErr::NoAnswers)
        ));
    }

    #[test]
    fn test_malformed_answer_is_rejected() {
        assert!(matches!(
            Data::from_texts("apple\nfour\n", ""),
            Err(LoadDataErr::MalformedAnswer(w)) if w == "four"
        ));
    }

    #[test]
    fn test_duplicate_answer_is_rejected() {
        assert!(matches!(
            Data::from_texts("apple\nchair\nAPPLE\n", ""),
            Err(LoadDataErr::DuplicateAnswer(w)) if w == "apple"
        ));
    }
}
