//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Wall-clock timestamp in milliseconds, supplied by the driver on every tick.
pub type WallClockMs = u64;

/// 2D position in play-field space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity in pixels per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Simulation time tracking. Advances only while the world is running and unpaused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulated frame).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Elapsed whole minutes at the nominal 60 Hz frame rate.
    pub fn minutes(&self) -> u64 {
        self.tick / 3600
    }

    /// Seconds within the current minute at the nominal 60 Hz frame rate.
    pub fn seconds(&self) -> u64 {
        (self.tick % 3600) / 60
    }

    /// HUD label in `m:ss` form.
    pub fn elapsed_label(&self) -> String {
        format!("{}:{:02}", self.minutes(), self.seconds())
    }
}

/// Angle of the vector `from -> to` in radians.
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle in radians.
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Circle-circle overlap test (`dist < ra + rb`).
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Fraction in [0, 1]; a zero or negative denominator yields 0.
#[inline]
pub fn unit_fraction(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    (numerator / denominator).clamp(0.0, 1.0)
}

/// Pack an RGB triple into `0xRRGGBB`.
#[inline]
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Fully saturated, half-lightness colour for a hue in degrees.
pub fn hue_to_rgb(hue: f32) -> u32 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_byte = |c: f32| (c * 255.0).round() as u8;
    rgb(to_byte(r), to_byte(g), to_byte(b))
}
