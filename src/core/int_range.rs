use crate::utils::error::{Parity, RangeError, Result};
use crate::utils::validation::validate_min;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

/// An inclusive range of `i32` values walked with a fixed step.
///
/// The step always points from `from` toward `to`, so a range is never empty:
/// `from` is its first value and the last value is the furthest step that
/// does not pass `to`.
///
/// ```
/// use rangekit::IntRange;
///
/// assert_eq!(IntRange::from_to(1, 5).to_vec(), vec![1, 2, 3, 4, 5]);
/// assert_eq!(IntRange::from_to(5, 1).to_vec(), vec![5, 4, 3, 2, 1]);
/// assert_eq!(IntRange::from_to_with_step(1, 10, 3)?.to_vec(), vec![1, 4, 7, 10]);
/// assert_eq!(IntRange::evens_from_to(1, 10)?.to_vec(), vec![2, 4, 6, 8, 10]);
/// assert_eq!(IntRange::odds_from_to(10, 1)?.to_vec(), vec![9, 7, 5, 3, 1]);
/// assert_eq!(IntRange::from_to(1, 5).reverse(), IntRange::from_to(5, 1));
/// # Ok::<(), rangekit::RangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIntRange")]
pub struct IntRange {
    from: i32,
    to: i32,
    step: i32,
}

#[derive(Deserialize)]
struct RawIntRange {
    from: i32,
    to: i32,
    #[serde(default = "default_step")]
    step: i32,
}

fn default_step() -> i32 {
    1
}

impl TryFrom<RawIntRange> for IntRange {
    type Error = RangeError;

    fn try_from(raw: RawIntRange) -> Result<Self> {
        IntRange::from_to_with_step(raw.from, raw.to, raw.step)
    }
}

impl IntRange {
    /// `magnitude` must be positive.
    fn directed(from: i32, to: i32, magnitude: i32) -> Self {
        let step = if from > to { -magnitude } else { magnitude };
        Self { from, to, step }
    }

    /// Step 1 toward `to`; both ends included.
    pub fn from_to(from: i32, to: i32) -> Self {
        Self::directed(from, to, 1)
    }

    pub fn zero_to(to: i32) -> Self {
        Self::from_to(0, to)
    }

    pub fn one_to(to: i32) -> Self {
        Self::from_to(1, to)
    }

    /// Builds a range with the given step. The sign of `step` is ignored: it
    /// is flipped to point from `from` toward `to`, so
    /// `from_to_with_step(10, 1, 3)` yields `10, 7, 4, 1`.
    ///
    /// # Errors
    ///
    /// [`RangeError::ZeroStep`] when `step` is zero, and
    /// [`RangeError::InvalidArgument`] for `i32::MIN`, whose magnitude has no
    /// positive `i32` counterpart.
    pub fn from_to_with_step(from: i32, to: i32, step: i32) -> Result<Self> {
        if step == 0 {
            return Err(RangeError::ZeroStep);
        }
        let magnitude = step.checked_abs().ok_or_else(|| {
            RangeError::invalid_argument("step", step, "step magnitude exceeds i32::MAX")
        })?;

        let range = Self::directed(from, to, magnitude);
        if range.step != step {
            tracing::debug!(from, to, step, normalised = range.step, "flipped step direction");
        }
        Ok(range)
    }

    pub fn zero_to_with_step(to: i32, step: i32) -> Result<Self> {
        Self::from_to_with_step(0, to, step)
    }

    pub fn one_to_with_step(to: i32, step: i32) -> Result<Self> {
        Self::from_to_with_step(1, to, step)
    }

    /// `from, from - 1, ..., 1`. Fails when `from < 1`.
    pub fn down_to_one(from: i32) -> Result<Self> {
        validate_min("from", from, 1)?;
        Ok(Self::from_to(from, 1))
    }

    /// `from, from - 1, ..., 0`. Fails when `from < 0`.
    pub fn down_to_zero(from: i32) -> Result<Self> {
        validate_min("from", from, 0)?;
        Ok(Self::from_to(from, 0))
    }

    /// Even values between `from` and `to`. An odd `from` is moved one
    /// position toward `to` first.
    ///
    /// # Errors
    ///
    /// [`RangeError::NoValues`] when `from == to` and both are odd.
    pub fn evens_from_to(from: i32, to: i32) -> Result<Self> {
        Self::with_parity(from, to, Parity::Even)
    }

    pub fn evens_from_zero_to(to: i32) -> Self {
        Self::directed(0, to, 2)
    }

    /// Fails when `from < 0`.
    pub fn evens_down_to_zero(from: i32) -> Result<Self> {
        validate_min("from", from, 0)?;
        Self::with_parity(from, 0, Parity::Even)
    }

    /// Odd values between `from` and `to`. An even `from` is moved one
    /// position toward `to` first.
    ///
    /// # Errors
    ///
    /// [`RangeError::NoValues`] when `from == to` and both are even.
    pub fn odds_from_to(from: i32, to: i32) -> Result<Self> {
        Self::with_parity(from, to, Parity::Odd)
    }

    pub fn odds_from_one_to(to: i32) -> Self {
        Self::directed(1, to, 2)
    }

    /// Fails when `from < 1`.
    pub fn odds_down_to_one(from: i32) -> Result<Self> {
        validate_min("from", from, 1)?;
        Self::with_parity(from, 1, Parity::Odd)
    }

    fn with_parity(from: i32, to: i32, parity: Parity) -> Result<Self> {
        let is_even = from.rem_euclid(2) == 0;
        let matches = match parity {
            Parity::Even => is_even,
            Parity::Odd => !is_even,
        };

        let start = if matches {
            from
        } else if from > to {
            from - 1
        } else if from < to {
            from + 1
        } else {
            return Err(RangeError::NoValues { from, to, parity });
        };

        if start != from {
            tracing::debug!(from, start, %parity, "moved start onto parity");
        }
        Ok(Self::directed(start, to, 2))
    }

    /// Swaps the endpoints and walks back with the same step size.
    ///
    /// The reversed range starts at the old `to`, which is not the old last
    /// value when the step does not land on `to`:
    /// `from_to_with_step(1, 15, 3)` yields `1..13` and its reverse yields
    /// `15, 12, ..., 3`. Use `iter().rev()` for the values backwards.
    pub fn reverse(&self) -> Self {
        Self::directed(self.to, self.from, self.step.abs())
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    fn count(&self) -> u64 {
        let span = (i64::from(self.to) - i64::from(self.from)).unsigned_abs();
        span / u64::from(self.step.unsigned_abs()) + 1
    }

    /// Number of values; always at least 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.count() as usize
    }

    /// The last value yielded, which equals `to` only when the step lands on it.
    pub fn last(&self) -> i32 {
        let offset = (self.count() - 1) as i64 * i64::from(self.step);
        (i64::from(self.from) + offset) as i32
    }

    pub fn contains(&self, value: i32) -> bool {
        let (low, high) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        if value < low || value > high {
            return false;
        }
        (i64::from(value) - i64::from(self.from)) % i64::from(self.step) == 0
    }

    pub fn iter(&self) -> IntRangeIter {
        IntRangeIter {
            from: i64::from(self.from),
            step: i64::from(self.step),
            front: 0,
            back: self.count(),
        }
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntRange(from={}, to={}, step={})",
            self.from, self.to, self.step
        )
    }
}

/// Iterator over an [`IntRange`]. Values are computed from an index, so the
/// walk never overflows near `i32::MIN` / `i32::MAX`.
#[derive(Debug, Clone)]
pub struct IntRangeIter {
    from: i64,
    step: i64,
    // 尚未產生的索引區間 [front, back)
    front: u64,
    back: u64,
}

impl IntRangeIter {
    fn value_at(&self, index: u64) -> i32 {
        (self.from + index as i64 * self.step) as i32
    }
}

impl Iterator for IntRangeIter {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.front >= self.back {
            return None;
        }
        let value = self.value_at(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.back - self.front) as usize;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<i32> {
        self.front = self.front.saturating_add(n as u64).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for IntRangeIter {
    fn next_back(&mut self) -> Option<i32> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.value_at(self.back))
    }
}

impl ExactSizeIterator for IntRangeIter {}

impl FusedIterator for IntRangeIter {}

impl IntoIterator for IntRange {
    type Item = i32;
    type IntoIter = IntRangeIter;

    fn into_iter(self) -> IntRangeIter {
        self.iter()
    }
}

impl IntoIterator for &IntRange {
    type Item = i32;
    type IntoIter = IntRangeIter;

    fn into_iter(self) -> IntRangeIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_sign_is_normalised() {
        let range = IntRange::from_to_with_step(1, 10, -3).unwrap();
        assert_eq!(range.step(), 3);
        assert_eq!(range.to_vec(), vec![1, 4, 7, 10]);

        let range = IntRange::from_to_with_step(10, 1, 3).unwrap();
        assert_eq!(range.step(), -3);

        let single = IntRange::from_to_with_step(1, 1, -1).unwrap();
        assert_eq!(single, IntRange::from_to(1, 1));
    }

    #[test]
    fn test_rejects_zero_and_min_step() {
        assert!(matches!(
            IntRange::from_to_with_step(0, 10, 0),
            Err(RangeError::ZeroStep)
        ));
        assert!(matches!(
            IntRange::from_to_with_step(0, 10, i32::MIN),
            Err(RangeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_len_last_and_contains() {
        let range = IntRange::from_to_with_step(1, 15, 3).unwrap();
        assert_eq!(range.len(), 5);
        assert_eq!(range.last(), 13);
        assert!(range.contains(7));
        assert!(!range.contains(8));
        assert!(!range.contains(16));

        let down = IntRange::from_to_with_step(50, 10, 5).unwrap();
        assert_eq!(down.len(), 9);
        assert_eq!(down.last(), 10);
        assert!(down.contains(35));
        assert!(!down.contains(36));
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let top = IntRange::from_to(i32::MAX - 2, i32::MAX);
        assert_eq!(top.to_vec(), vec![i32::MAX - 2, i32::MAX - 1, i32::MAX]);

        let bottom = IntRange::from_to(i32::MIN + 1, i32::MIN);
        assert_eq!(bottom.to_vec(), vec![i32::MIN + 1, i32::MIN]);

        let whole = IntRange::from_to_with_step(i32::MIN, i32::MAX, i32::MAX).unwrap();
        assert_eq!(whole.to_vec(), vec![i32::MIN, -1, i32::MAX - 1]);
        assert_eq!(whole.len(), 3);
    }

    #[test]
    fn test_double_ended_iteration() {
        let range = IntRange::one_to(5);
        let mut iter = range.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.rev().collect::<Vec<_>>(), vec![4, 3, 2]);
        assert_eq!(range.iter().nth(10), None);
        assert_eq!(range.iter().nth(2), Some(3));
    }

    #[test]
    fn test_parity_on_negative_numbers() {
        assert_eq!(IntRange::evens_from_to(-3, 3).unwrap().to_vec(), vec![-2, 0, 2]);
        assert_eq!(IntRange::odds_from_to(-4, 0).unwrap().to_vec(), vec![-3, -1]);
        assert!(matches!(
            IntRange::evens_from_to(-3, -3),
            Err(RangeError::NoValues { parity: Parity::Even, .. })
        ));
    }

    #[test]
    fn test_reverse_starts_at_old_to() {
        let range = IntRange::from_to_with_step(1, 15, 3).unwrap();
        let reversed = range.reverse();
        assert_eq!(reversed.to_vec(), vec![15, 12, 9, 6, 3]);
        assert_eq!(reversed.reverse(), range);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            IntRange::from_to(5, 1).to_string(),
            "IntRange(from=5, to=1, step=-1)"
        );
    }

    #[test]
    fn test_serde_revalidates() {
        let range: IntRange = serde_json::from_str(r#"{"from":10,"to":1,"step":2}"#).unwrap();
        assert_eq!(range.step(), -2);

        let json = serde_json::to_string(&IntRange::one_to(3)).unwrap();
        assert_eq!(json, r#"{"from":1,"to":3,"step":1}"#);

        assert!(serde_json::from_str::<IntRange>(r#"{"from":1,"to":3,"step":0}"#).is_err());
    }
}
