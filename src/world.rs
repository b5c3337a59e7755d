//! The play field the host simulates: a static bell and a striker that falls,
//! bounces off the bell and respawns when it leaves the field.
//!
//! Coordinates are in world units with the origin at the top-left corner and
//! `y` growing downwards. The world knows nothing about sessions; `step`
//! only reports when the striker starts touching the bell.

use std::ops::{Add, Mul, Sub};

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

/// Below this the striker is considered lost and respawns
pub const RESET_BELOW_Y: f64 = 800.0;

pub const BELL_POS: Vec2 = Vec2::new(400.0, 300.0);
pub const BELL_HALF_EXTENTS: Vec2 = Vec2::new(40.0, 45.0);

pub const STRIKER_SPAWN: Vec2 = Vec2::new(400.0, 500.0);
pub const STRIKER_RADIUS: f64 = 12.0;

/// Added to the vertical velocity every physics step
pub const GRAVITY: f64 = 0.5;
pub const BOUNCE: f64 = 0.8;

/// Physics steps run per host tick (100ms at 60 steps per second)
pub const STEPS_PER_TICK: usize = 6;

/// Speed cap per step so the striker cannot tunnel through the bell
pub const MAX_SPEED: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn clamp_length(self, max: f64) -> Vec2 {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// The moving ball the player launches at the bell
#[derive(Debug, Clone, PartialEq)]
pub struct Striker {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    /// Pinned strikers ignore gravity and velocity (while dragged or following)
    pub pinned: bool,
}

impl Default for Striker {
    fn default() -> Self {
        Self {
            pos: STRIKER_SPAWN,
            vel: Vec2::ZERO,
            radius: STRIKER_RADIUS,
            pinned: false,
        }
    }
}

/// Static axis-aligned bell body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bell {
    pub pos: Vec2,
    pub half_extents: Vec2,
}

impl Default for Bell {
    fn default() -> Self {
        Self {
            pos: BELL_POS,
            half_extents: BELL_HALF_EXTENTS,
        }
    }
}

impl Bell {
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(
                self.pos.x - self.half_extents.x,
                self.pos.x + self.half_extents.x,
            ),
            p.y.clamp(
                self.pos.y - self.half_extents.y,
                self.pos.y + self.half_extents.y,
            ),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (p.x - self.pos.x).abs() <= self.half_extents.x
            && (p.y - self.pos.y).abs() <= self.half_extents.y
    }

    /// Outward normal through the nearest face for a point inside the bell
    fn exit_normal(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        let pen_x = self.half_extents.x - d.x.abs();
        let pen_y = self.half_extents.y - d.y.abs();

        if pen_x < pen_y {
            Vec2::new(if d.x < 0.0 { -1.0 } else { 1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if d.y < 0.0 { -1.0 } else { 1.0 })
        }
    }

    fn surface_along(&self, p: Vec2, normal: Vec2) -> Vec2 {
        if normal.x != 0.0 {
            Vec2::new(self.pos.x + normal.x * self.half_extents.x, p.y)
        } else {
            Vec2::new(p.x, self.pos.y + normal.y * self.half_extents.y)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// Striker and bell started touching during this step
    BellHit,
    /// Striker left the field and was put back at the spawn point
    StrikerReset,
}

#[derive(Debug, Clone, Default)]
pub struct World {
    pub bell: Bell,
    pub striker: Striker,
    touching: bool,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one host tick worth of physics and collect what happened
    pub fn on_tick(&mut self) -> Vec<WorldEvent> {
        (0..STEPS_PER_TICK).filter_map(|_| self.step()).collect()
    }

    /// A single physics step
    pub fn step(&mut self) -> Option<WorldEvent> {
        if !self.striker.pinned {
            self.striker.vel.y += GRAVITY;
            self.striker.vel = self.striker.vel.clamp_length(MAX_SPEED);
            self.striker.pos = self.striker.pos + self.striker.vel;
        }

        if self.is_out_of_bounds() {
            self.reset_striker();
            return Some(WorldEvent::StrikerReset);
        }

        self.resolve_bell_contact()
    }

    fn is_out_of_bounds(&self) -> bool {
        let pos = self.striker.pos;
        pos.y > RESET_BELOW_Y || pos.x < 0.0 || pos.x > WORLD_WIDTH
    }

    pub fn reset_striker(&mut self) {
        self.striker.pos = STRIKER_SPAWN;
        self.striker.vel = Vec2::ZERO;
        self.touching = false;
    }

    fn resolve_bell_contact(&mut self) -> Option<WorldEvent> {
        let striker = &mut self.striker;
        let closest = self.bell.closest_point(striker.pos);
        let offset = striker.pos - closest;
        let distance = offset.length();

        let overlapping = distance < striker.radius || self.bell.contains(striker.pos);
        if !overlapping {
            self.touching = false;
            return None;
        }

        let normal = if distance > f64::EPSILON {
            offset * (1.0 / distance)
        } else {
            self.bell.exit_normal(striker.pos)
        };

        // push the striker out along the contact normal
        let surface = if distance > f64::EPSILON {
            closest
        } else {
            self.bell.surface_along(striker.pos, normal)
        };
        striker.pos = surface + normal * striker.radius;

        let approach = striker.vel.dot(normal);
        if approach < 0.0 {
            striker.vel = striker.vel - normal * ((1.0 + BOUNCE) * approach);
        }

        let started = !self.touching;
        self.touching = true;
        started.then_some(WorldEvent::BellHit)
    }

    /// Move a pinned striker (dragging or following the pointer)
    pub fn place_striker(&mut self, pos: Vec2) {
        self.striker.pos = pos;
        self.striker.vel = Vec2::ZERO;
    }

    pub fn pin_striker(&mut self) {
        self.striker.pinned = true;
        self.striker.vel = Vec2::ZERO;
    }

    /// Release the striker with a launch velocity
    pub fn launch_striker(&mut self, velocity: Vec2) {
        self.striker.pinned = false;
        self.striker.vel = velocity;
    }
}
