use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Running time of a medium, song or episode, stored as whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(u32);

impl Time {
    pub const fn from_seconds(seconds: u32) -> Self {
        Time(seconds)
    }

    pub const fn from_parts(hours: u32, minutes: u32, seconds: u32) -> Self {
        Time(hours * 3600 + minutes * 60 + seconds)
    }

    pub const fn total_seconds(self) -> u32 {
        self.0
    }

    pub const fn hours(self) -> u32 {
        self.0 / 3600
    }

    pub const fn minutes(self) -> u32 {
        self.0 / 60 % 60
    }

    pub const fn seconds(self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for Time {
    /// Formats as `H:MM:SS`; hours are not padded and may exceed two digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sum for Time {
    fn sum<I: Iterator<Item = Time>>(iter: I) -> Time {
        iter.fold(Time::default(), Add::add)
    }
}
