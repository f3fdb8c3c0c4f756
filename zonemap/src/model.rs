use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::ZoneError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Ordered vertices of an implicitly closed polygon. The closing edge
/// (last -> first) is never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Point>);

impl Ring {
    pub fn new() -> Self {
        Ring(Vec::new())
    }
    /// Fewer than three vertices: drawable as a draft, never filled or tested.
    pub fn is_complete(&self) -> bool {
        self.0.len() >= 3
    }
    pub fn push(&mut self, p: Point) {
        self.0.push(p);
    }
    pub(crate) fn points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.0
    }
}

impl Deref for Ring {
    type Target = [Point];
    fn deref(&self) -> &[Point] {
        &self.0
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Ring(points)
    }
}

impl FromIterator<Point> for Ring {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Ring(iter.into_iter().collect())
    }
}

/// 24-bit RGB color, carried as `#rrggbb` across serde boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// LimeGreen, the widget's stock zone fill.
pub const DEFAULT_ZONE_COLOR: Color = Color::rgb(0x32, 0xCD, 0x32);

impl Default for Color {
    fn default() -> Self {
        DEFAULT_ZONE_COLOR
    }
}

impl FromStr for Color {
    type Err = ZoneError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ZoneError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }
        let full: String = match hex.len() {
            // #rgb shorthand
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(bad()),
        };
        let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).map_err(|_| bad());
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ZoneError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(token: impl Into<String>) -> Self {
        ZoneId(token.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub color: Color,
    pub ring: Ring,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_parsing() {
        assert_eq!("#32CD32".parse::<Color>().unwrap(), DEFAULT_ZONE_COLOR);
        assert_eq!("#32cd32".parse::<Color>().unwrap(), DEFAULT_ZONE_COLOR);
        assert_eq!("#f00".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert!("32CD32".parse::<Color>().is_err());
        assert!("#32CD3".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102FF");
    }

    #[test]
    fn ring_completeness() {
        let mut r: Ring = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)].into();
        assert!(!r.is_complete());
        r.push(Point::new(1.0, 1.0));
        assert!(r.is_complete());
        assert!(!Ring::new().is_complete());
    }
}
