use serde::{Deserialize, Serialize};

use crate::angle::deg_to_rad;
use crate::constants::MPH_TO_INCHES_PER_SECOND;

/// Wind resolved along and across the line of fire (mph)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindComponents {
    /// Positive when blowing against the projectile
    pub headwind: f64,
    /// Positive when blowing from right to left
    pub crosswind: f64,
}

impl WindComponents {
    /// Decompose a wind of `speed` mph coming from `angle` degrees:
    ///
    /// * 0: straight ahead
    /// * 90: right to left
    /// * 180: from behind
    /// * 270 or -90: left to right
    pub fn resolve(speed: f64, angle: f64) -> Self {
        Self {
            headwind: head_wind(speed, angle),
            crosswind: cross_wind(speed, angle),
        }
    }
}

pub fn head_wind(speed: f64, angle: f64) -> f64 {
    deg_to_rad(angle).cos() * speed
}

pub fn cross_wind(speed: f64, angle: f64) -> f64 {
    deg_to_rad(angle).sin() * speed
}

/// Lateral drift (inches) caused by `crosswind` mph after `time` seconds of
/// flight over `range` feet, using the lag time against a drag-free flight at
/// `muzzle_velocity`.
pub fn compute_windage(crosswind: f64, muzzle_velocity: f64, range: f64, time: f64) -> f64 {
    let wind_ips = crosswind * MPH_TO_INCHES_PER_SECOND;
    wind_ips * (time - range / muzzle_velocity)
}
