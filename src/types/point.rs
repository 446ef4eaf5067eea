//! # Geometric Point
//!
//! A 2D point with `f32` components. The database wire format is the
//! textual tuple `(x,y)`; inside JSON blobs a point is an `{x, y}` object.

use serde::{Deserialize, Serialize};

/// A 2D point. `x` is longitude and `y` is latitude when used for
/// geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_lat_long(latitude: f32, longitude: f32) -> Self {
        Self {
            x: longitude,
            y: latitude,
        }
    }

    /// Parses the wire form `(x,y)`.
    ///
    /// Returns `None` on any deviation (missing parentheses, wrong
    /// component count, non-numeric component). Parse failure is treated
    /// as absence by callers, never as an error.
    pub fn parse(text: &str) -> Option<Point> {
        let inner = text.strip_prefix('(')?.strip_suffix(')')?;
        let (x, y) = inner.split_once(',')?;
        if y.contains(',') {
            return None;
        }
        Some(Point {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        })
    }
}
