//! # Time of Day
//!
//! A wall-clock time of day stored in 24-hour form. The textual grammar
//! accepted by [`Time::parse`] is `H:MM[:SS]` with an optional `am`/`pm`
//! suffix (case-insensitive, embedded spaces ignored):
//!
//! - 24-hour mode (no suffix): hour in `0..24`
//! - am/pm mode: hour in `1..=12`; `12am` maps to hour 0, `12pm` stays 12,
//!   other pm hours add 12
//! - minutes and seconds in `0..60`
//!
//! Display renders the am/pm form (`12:00am`, `1:20:30pm`); the SQL
//! literal form is the zero-padded 24-hour `HH:MM:SS` produced by
//! [`Value::render_literal`](super::Value::render_literal).

use std::fmt;

use eyre::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SqlError;

/// A time of day in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

enum Meridiem {
    Am,
    Pm,
    Military,
}

impl Time {
    pub const MIDNIGHT: Time = Time {
        hour: 0,
        minute: 0,
        second: 0,
    };

    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Parses `H:MM[:SS]` with an optional am/pm suffix.
    pub fn parse(text: &str) -> Result<Time> {
        let invalid = || SqlError::new(format!("'{}' is not a valid time", text));

        let mut normalized: String = text
            .chars()
            .filter(|c| *c != ' ')
            .collect::<String>()
            .to_lowercase();
        let mode = if let Some(stripped) = normalized.strip_suffix("pm") {
            let stripped = stripped.to_string();
            normalized = stripped;
            Meridiem::Pm
        } else if let Some(stripped) = normalized.strip_suffix("am") {
            let stripped = stripped.to_string();
            normalized = stripped;
            Meridiem::Am
        } else {
            Meridiem::Military
        };

        let components: Vec<&str> = normalized.split(':').collect();
        let (hour, minute, second): (i32, i32, i32) = match components.as_slice() {
            [h, m] => (
                h.parse().map_err(|_| invalid())?,
                m.parse().map_err(|_| invalid())?,
                0,
            ),
            [h, m, s] => (
                h.parse().map_err(|_| invalid())?,
                m.parse().map_err(|_| invalid())?,
                s.parse().map_err(|_| invalid())?,
            ),
            _ => return Err(invalid().into()),
        };

        if !(0..60).contains(&minute) || !(0..60).contains(&second) {
            return Err(invalid().into());
        }

        let hour = match mode {
            Meridiem::Am => {
                if !(1..=12).contains(&hour) {
                    return Err(invalid().into());
                }
                hour % 12
            }
            Meridiem::Pm => {
                if !(1..=12).contains(&hour) {
                    return Err(invalid().into());
                }
                (hour % 12) + 12
            }
            Meridiem::Military => {
                if !(0..24).contains(&hour) {
                    return Err(invalid().into());
                }
                hour
            }
        };

        Ok(Time {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, meridiem) = match self.hour {
            0 => (12, "am"),
            1..=11 => (self.hour as u32, "am"),
            12 => (12, "pm"),
            _ => (self.hour as u32 - 12, "pm"),
        };
        if self.second == 0 {
            write!(f, "{}:{:02}{}", hour, self.minute, meridiem)
        } else {
            write!(
                f,
                "{}:{:02}:{:02}{}",
                hour, self.minute, self.second, meridiem
            )
        }
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Time::parse(&text).map_err(|e| D::Error::custom(e.to_string()))
    }
}
