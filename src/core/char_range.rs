use crate::utils::error::{RangeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

/// An inclusive range of ASCII letters, walked forward or backward depending
/// on the order of the endpoints.
///
/// ```
/// use rangekit::CharRange;
///
/// let h_to_b = CharRange::from_to('h', 'b')?;
/// assert_eq!(h_to_b.iter().collect::<String>(), "hgfedcb");
/// assert_eq!(CharRange::alphabet().len(), 26);
/// # Ok::<(), rangekit::RangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCharRange")]
pub struct CharRange {
    start: char,
    end: char,
}

#[derive(Deserialize)]
struct RawCharRange {
    start: char,
    end: char,
}

impl TryFrom<RawCharRange> for CharRange {
    type Error = RangeError;

    fn try_from(raw: RawCharRange) -> Result<Self> {
        CharRange::from_to(raw.start, raw.end)
    }
}

impl CharRange {
    /// # Errors
    ///
    /// [`RangeError::InvalidLetter`] when either endpoint is not an ASCII
    /// letter, [`RangeError::MixedCase`] when one is upper case and the other
    /// lower case.
    pub fn from_to(start: char, end: char) -> Result<Self> {
        for letter in [start, end] {
            if !letter.is_ascii_alphabetic() {
                return Err(RangeError::InvalidLetter { value: letter });
            }
        }
        if start.is_ascii_uppercase() != end.is_ascii_uppercase() {
            return Err(RangeError::MixedCase { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn alphabet() -> Self {
        Self {
            start: 'a',
            end: 'z',
        }
    }

    pub fn upper_alphabet() -> Self {
        Self {
            start: 'A',
            end: 'Z',
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn start(&self) -> char {
        self.start
    }

    pub fn end(&self) -> char {
        self.end
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.start as u8).abs_diff(self.end as u8) as usize + 1
    }

    pub fn contains(&self, letter: char) -> bool {
        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        (low..=high).contains(&letter)
    }

    pub fn iter(&self) -> CharRangeIter {
        CharRangeIter {
            front: self.start as u8,
            back: self.end as u8,
            descending: self.start > self.end,
            done: false,
        }
    }

    /// Each letter as its own one-character `String`.
    pub fn strings(&self) -> impl DoubleEndedIterator<Item = String> + ExactSizeIterator {
        self.iter().map(String::from)
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharRange(start={}, end={})", self.start, self.end)
    }
}

#[derive(Debug, Clone)]
pub struct CharRangeIter {
    front: u8,
    back: u8,
    descending: bool,
    done: bool,
}

impl CharRangeIter {
    fn remaining(&self) -> usize {
        if self.done {
            0
        } else {
            self.front.abs_diff(self.back) as usize + 1
        }
    }
}

impl Iterator for CharRangeIter {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.done {
            return None;
        }
        let letter = self.front;
        if self.front == self.back {
            self.done = true;
        } else if self.descending {
            self.front -= 1;
        } else {
            self.front += 1;
        }
        Some(char::from(letter))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for CharRangeIter {
    fn next_back(&mut self) -> Option<char> {
        if self.done {
            return None;
        }
        let letter = self.back;
        if self.front == self.back {
            self.done = true;
        } else if self.descending {
            self.back += 1;
        } else {
            self.back -= 1;
        }
        Some(char::from(letter))
    }
}

impl ExactSizeIterator for CharRangeIter {}

impl FusedIterator for CharRangeIter {}

impl IntoIterator for CharRange {
    type Item = char;
    type IntoIter = CharRangeIter;

    fn into_iter(self) -> CharRangeIter {
        self.iter()
    }
}

impl IntoIterator for &CharRange {
    type Item = char;
    type IntoIter = CharRangeIter;

    fn into_iter(self) -> CharRangeIter {
        self.iter()
    }
}
