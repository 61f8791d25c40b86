use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Plain 2D vector in world units (y points up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        (*self - *other).length()
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}

/// Position and heading of the lander. Rotation 0 is upright,
/// positive values tilt the nose clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector2D,
    pub rotation: f64,
}

impl Pose {
    pub fn new(position: Vector2D, rotation: f64) -> Self {
        Self { position, rotation }
    }
}

/// Discrete control input applied for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Thrust,
    None,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::RotateLeft,
        Action::RotateRight,
        Action::Thrust,
        Action::None,
    ];
}

/// Terminal classification of one simulated run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Landed,
    Crashed,
    TimedOut,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Landed => write!(f, "landed"),
            Outcome::Crashed => write!(f, "crashed"),
            Outcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Landing pad: centre on the ground line and half its horizontal extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingPad {
    pub position: Vector2D,
    pub half_width: f64,
}

impl LandingPad {
    pub fn new(position: Vector2D, half_width: f64) -> Self {
        Self { position, half_width }
    }

    pub fn contains_x(&self, x: f64) -> bool {
        (x - self.position.x).abs() <= self.half_width
    }

    /// Horizontal distance from the nearest pad edge, 0 when over the pad
    pub fn edge_distance(&self, x: f64) -> f64 {
        ((x - self.position.x).abs() - self.half_width).max(0.0)
    }
}
