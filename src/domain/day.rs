//! Calendar-day index for daily transaction limits.

use core::fmt;

/// A calendar-day index supplied by the embedding environment.
///
/// The crate performs no I/O and never reads a clock; callers derive the
/// day from whatever time source their execution environment provides
/// (e.g. `unix_timestamp / 86_400`) and pass it through the call context.
/// Only equality matters to the limiter: a differing day resets the
/// per-sender transaction counter.
///
/// # Examples
///
/// ```
/// use remora_token::domain::Day;
///
/// let today = Day::new(19_600);
/// assert_eq!(today.get(), 19_600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(u64);

impl Day {
    /// Creates a `Day` from a raw index.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying index.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day#{}", self.0)
    }
}
