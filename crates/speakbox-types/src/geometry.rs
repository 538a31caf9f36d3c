use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`
    pub fn delta_from(self, origin: Point) -> (i32, i32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Rectangle in absolute screen coordinates.
///
/// Origins are signed because monitors placed left of or above the primary
/// one live at negative coordinates of the virtual screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two arbitrary corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x).abs_diff(x),
            height: a.y.max(b.y).abs_diff(y),
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Region) -> Region {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Region::new(x, y, right.abs_diff(x), bottom.abs_diff(y))
    }

    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Region::new(x, y, right.abs_diff(x), bottom.abs_diff(y)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Parses `x,y,width,height`
impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, w, h] = parts.as_slice() else {
            return Err(format!("expected x,y,width,height, got '{s}'"));
        };
        let num = |v: &str| v.parse::<i64>().map_err(|e| format!("'{v}': {e}"));
        let (x, y, w, h) = (num(x)?, num(y)?, num(w)?, num(h)?);
        if w <= 0 || h <= 0 {
            return Err("width and height must be positive".to_string());
        }
        // Far edges must stay on the i32 screen plane
        let edge = |origin: i64, len: i64| {
            i32::try_from(origin)
                .and_then(|_| i32::try_from(len))
                .and_then(|_| i32::try_from(origin + len))
                .map_err(|_| format!("region {s} leaves the screen coordinate range"))
        };
        edge(x, w)?;
        edge(y, h)?;
        Ok(Region::new(x as i32, y as i32, w as u32, h as u32))
    }
}

/// Which edge or corner of the overlay box a resize gesture drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    #[default]
    None,
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeMode {
    pub const ALL: [ResizeMode; 8] = [
        ResizeMode::N,
        ResizeMode::S,
        ResizeMode::E,
        ResizeMode::W,
        ResizeMode::NE,
        ResizeMode::NW,
        ResizeMode::SE,
        ResizeMode::SW,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, ResizeMode::W | ResizeMode::NW | ResizeMode::SW)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, ResizeMode::E | ResizeMode::NE | ResizeMode::SE)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, ResizeMode::N | ResizeMode::NE | ResizeMode::NW)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeMode::S | ResizeMode::SE | ResizeMode::SW)
    }

    /// Cursor glyph shown while hovering
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeMode::None => "fleur",
            ResizeMode::N => "top_side",
            ResizeMode::S => "bottom_side",
            ResizeMode::E => "right_side",
            ResizeMode::W => "left_side",
            ResizeMode::NE => "top_right_corner",
            ResizeMode::NW => "top_left_corner",
            ResizeMode::SE => "bottom_right_corner",
            ResizeMode::SW => "bottom_left_corner",
        }
    }
}

impl FromStr for ResizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" => Ok(ResizeMode::N),
            "s" => Ok(ResizeMode::S),
            "e" => Ok(ResizeMode::E),
            "w" => Ok(ResizeMode::W),
            "ne" => Ok(ResizeMode::NE),
            "nw" => Ok(ResizeMode::NW),
            "se" => Ok(ResizeMode::SE),
            "sw" => Ok(ResizeMode::SW),
            "none" => Ok(ResizeMode::None),
            other => Err(format!("unknown resize mode '{other}'")),
        }
    }
}
