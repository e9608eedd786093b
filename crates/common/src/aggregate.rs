//! Aggregate computations over student and faculty records.
//!
//! These functions are storage-agnostic: callers feed them values loaded from
//! the database, either fully collected or streamed row by row.

use rayon::prelude::*;

/// Running state for an average age computation.
///
/// Allows feeding ages one at a time from a row stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AgeAccumulator {
    sum: i64,
    count: i64,
}

impl AgeAccumulator {
    /// Add a single age value.
    pub fn push(mut self, age: i32) -> Self {
        self.sum += i64::from(age);
        self.count += 1;
        self
    }

    /// Arithmetic mean truncated toward zero, or `0` if no ages were added.
    pub fn average(&self) -> i32 {
        average_from_totals(self.sum, self.count)
    }
}

/// Compute an average from precomputed `sum` and `count` values.
///
/// Truncates toward zero and returns `0` when `count` is zero.
pub fn average_from_totals(sum: i64, count: i64) -> i32 {
    if count == 0 {
        return 0;
    }

    (sum / count) as i32
}

/// Average of the provided ages, see [`AgeAccumulator::average`].
pub fn average_age<I>(ages: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    ages.into_iter()
        .fold(AgeAccumulator::default(), AgeAccumulator::push)
        .average()
}

/// Find the name with the largest character count.
///
/// On ties the first encountered name wins. Returns an empty string
/// if there are no names at all.
pub fn longest_name<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .fold(None, |longest: Option<(usize, String)>, name| {
            let len = name.chars().count();

            match longest {
                Some((max, current)) if max >= len => Some((max, current)),
                _ => Some((len, name)),
            }
        })
        .map(|(_, name)| name)
        .unwrap_or_default()
}

/// Select names that start with `prefix` (case-sensitive), convert them
/// to upper case and sort them in ascending order.
pub fn names_starting_with<I, S>(names: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = names
        .into_iter()
        .filter(|name| name.as_ref().starts_with(prefix))
        .map(|name| name.as_ref().to_uppercase())
        .collect();

    names.sort_unstable();
    names
}

/// Sum of all integers in `[1, n]` using 32-bit wrapping arithmetic.
///
/// The range is split across the rayon thread pool. Wrapping addition is
/// associative, so the result doesn't depend on how the range was split.
pub fn range_sum(n: i32) -> i32 {
    (1..=n)
        .into_par_iter()
        .reduce(|| 0, |left, right| left.wrapping_add(right))
}

/// Sum of all integers in `[1, n]` without wraparound.
pub fn range_sum_exact(n: i64) -> i64 {
    (1..=n).into_par_iter().sum()
}
