use serde::{Deserialize, Serialize};

use crate::constants::{GRAINS_PER_POUND, GRAVITY_FPS2};

/// State of the projectile as it crosses one whole yard of range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Range (yards)
    pub range: f64,
    /// Bullet path relative to the line of sight (inches)
    pub path_y: f64,
    /// Wind drift (inches)
    pub path_x: f64,
    /// Bullet path (MOA)
    pub elevation: f64,
    /// Wind drift (MOA)
    pub windage: f64,
    /// Time of flight (seconds)
    pub time: f64,
    /// Velocity (fps)
    pub velocity: f64,
    /// Velocity along the line of sight (fps)
    pub velocity_x: f64,
    /// Velocity across the line of sight (fps)
    pub velocity_y: f64,
}

/// Selects one field of a [`TrajectorySample`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleField {
    Range,
    PathY,
    PathX,
    Elevation,
    Windage,
    Time,
    Velocity,
    VelocityX,
    VelocityY,
}

impl TrajectorySample {
    pub fn field(&self, field: SampleField) -> f64 {
        match field {
            SampleField::Range => self.range,
            SampleField::PathY => self.path_y,
            SampleField::PathX => self.path_x,
            SampleField::Elevation => self.elevation,
            SampleField::Windage => self.windage,
            SampleField::Time => self.time,
            SampleField::Velocity => self.velocity,
            SampleField::VelocityX => self.velocity_x,
            SampleField::VelocityY => self.velocity_y,
        }
    }
}

/// Kinetic energy (ft-lb) of a `weight` grain bullet at `velocity` fps
pub fn compute_energy(velocity: f64, weight: f64) -> f64 {
    weight * velocity * velocity / (2.0 * -GRAVITY_FPS2 * GRAINS_PER_POUND)
}
