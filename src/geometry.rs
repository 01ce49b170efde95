//! Pixel geometry shared by widgets and layout commands

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D vector in screen pixels, used for positions, sizes and offsets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`
    pub fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Replace the component along `axis`
    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Copy of this vector with the component along `axis` replaced
    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        self.set(axis, value);
        self
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the two screen axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Alignment point of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Anchor {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Placement of an anchor point along a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::Top => "top",
            Anchor::TopRight => "top_right",
            Anchor::Left => "left",
            Anchor::Center => "center",
            Anchor::Right => "right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::Bottom => "bottom",
            Anchor::BottomRight => "bottom_right",
        }
    }

    fn horizontal(self) -> Edge {
        match self {
            Anchor::TopLeft | Anchor::Left | Anchor::BottomLeft => Edge::Start,
            Anchor::Top | Anchor::Center | Anchor::Bottom => Edge::Middle,
            Anchor::TopRight | Anchor::Right | Anchor::BottomRight => Edge::End,
        }
    }

    fn vertical(self) -> Edge {
        match self {
            Anchor::TopLeft | Anchor::Top | Anchor::TopRight => Edge::Start,
            Anchor::Left | Anchor::Center | Anchor::Right => Edge::Middle,
            Anchor::BottomLeft | Anchor::Bottom | Anchor::BottomRight => Edge::End,
        }
    }

    /// The anchor point on a rectangle at `origin` with `size`
    pub fn point_on(self, origin: Vec2, size: Vec2) -> Vec2 {
        let along = |edge: Edge, start: f32, extent: f32| match edge {
            Edge::Start => start,
            Edge::Middle => start + extent / 2.0,
            Edge::End => start + extent,
        };
        Vec2::new(
            along(self.horizontal(), origin.x, size.x),
            along(self.vertical(), origin.y, size.y),
        )
    }
}

/// Error returned when an anchor name is not recognized
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown anchor '{0}' (valid anchors: top_left, top, top_right, left, center, right, bottom_left, bottom, bottom_right)")]
pub struct ParseAnchorError(pub String);

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "topleft" => Ok(Anchor::TopLeft),
            "top" => Ok(Anchor::Top),
            "topright" => Ok(Anchor::TopRight),
            "left" => Ok(Anchor::Left),
            "center" | "centre" => Ok(Anchor::Center),
            "right" => Ok(Anchor::Right),
            "bottomleft" => Ok(Anchor::BottomLeft),
            "bottom" => Ok(Anchor::Bottom),
            "bottomright" => Ok(Anchor::BottomRight),
            _ => Err(ParseAnchorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Anchor {
    type Error = ParseAnchorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.name().to_string()
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-left position of a child so that its `anchor` point lands on the same
/// point of the parent rectangle.
///
/// `parent_origin` is the parent's draw position with any offset already
/// applied. Centering is rounded to whole pixels.
pub fn anchor_position(anchor: Anchor, child_size: Vec2, parent_origin: Vec2, parent_size: Vec2) -> Vec2 {
    let along = |edge: Edge, start: f32, parent: f32, child: f32| match edge {
        Edge::Start => start,
        Edge::Middle => start + (parent / 2.0 - child / 2.0).round(),
        Edge::End => start + parent - child,
    };
    Vec2::new(
        along(anchor.horizontal(), parent_origin.x, parent_size.x, child_size.x),
        along(anchor.vertical(), parent_origin.y, parent_size.y, child_size.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_points_coincide() {
        let parent_origin = Vec2::new(100.0, 50.0);
        let parent_size = Vec2::new(200.0, 120.0);
        let child_size = Vec2::new(40.0, 30.0);

        for anchor in Anchor::ALL {
            let pos = anchor_position(anchor, child_size, parent_origin, parent_size);
            assert_eq!(
                anchor.point_on(pos, child_size),
                anchor.point_on(parent_origin, parent_size),
                "anchor {anchor}"
            );
        }
    }

    #[test]
    fn test_anchor_center_rounds_to_pixel() {
        let pos = anchor_position(Anchor::Center, Vec2::new(3.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert_eq!(pos, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_anchor_bottom_right() {
        let pos = anchor_position(
            Anchor::BottomRight,
            Vec2::new(10.0, 20.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(100.0, 50.0),
        );
        assert_eq!(pos, Vec2::new(95.0, 35.0));
    }

    #[test]
    fn test_anchor_from_str() {
        assert_eq!("top_left".parse::<Anchor>(), Ok(Anchor::TopLeft));
        assert_eq!("BottomRight".parse::<Anchor>(), Ok(Anchor::BottomRight));
        assert_eq!("center".parse::<Anchor>(), Ok(Anchor::Center));
        assert!("middle".parse::<Anchor>().is_err());
    }

    #[test]
    fn test_vec2_axis_access() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(v.get(Axis::Y), 2.0);
        v.set(Axis::X, 7.0);
        assert_eq!(v, Vec2::new(7.0, 2.0));
        assert_eq!(v.with(Axis::Y, 0.0), Vec2::new(7.0, 0.0));
    }
}
