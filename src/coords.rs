//! Canvas coordinates and colors.
//!
//! The canvas is y-up with the origin at the bottom-left corner, in whole
//! canvas units. Terminal cells are only involved at render time.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A position on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width] x [0, height]`
    pub fn clamp_to(self, size: CanvasSize) -> Self {
        Self {
            x: self.x.clamp(0, axis_limit(size.width)),
            y: self.y.clamp(0, axis_limit(size.height)),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Largest coordinate reachable along an axis of length `extent`.
/// Points are `i32`, so extents past `i32::MAX` saturate.
pub fn axis_limit(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}

/// Canvas dimensions in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// An RGBA color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Self = Self([0, 0, 0, 255]);

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }

    pub fn a(self) -> u8 {
        self.0[3]
    }

    /// Build a color from four channel strings, e.g. `["0", "0", "255", "50"]`
    pub fn from_args(args: &[&str]) -> Result<Self, ColorParseError> {
        let [r, g, b, a] = args else {
            return Err(ColorParseError::ChannelCount(args.len()));
        };
        Ok(Self([
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            parse_channel(a)?,
        ]))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "{} {} {} {}", r, g, b, a)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        Self::from_args(&parts)
    }
}

fn parse_channel(s: &str) -> Result<u8, ColorParseError> {
    s.parse::<u8>()
        .map_err(|_| ColorParseError::Channel(s.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color needs 4 channels, got {0}")]
    ChannelCount(usize),

    #[error("'{0}' is not a channel value (0-255)")]
    Channel(String),
}
