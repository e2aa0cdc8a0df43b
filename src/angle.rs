//! Angular unit conversions.
//!
//! One minute of angle (MOA) is 1/60 of a degree. Mils follow one of the two
//! common reticle conventions, see [`MilDotSpec`].

use std::f64::consts::PI;

/// Reticle convention used when converting MOA to mils
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MilDotSpec {
    /// 3.438 MOA per mil
    #[default]
    Usmc,
    /// 3.375 MOA per mil
    Army,
}

impl MilDotSpec {
    pub fn moa_per_mil(self) -> f64 {
        match self {
            MilDotSpec::Usmc => 3.438,
            MilDotSpec::Army => 3.375,
        }
    }
}

pub fn deg_to_moa(deg: f64) -> f64 {
    deg * 60.0
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn moa_to_deg(moa: f64) -> f64 {
    moa / 60.0
}

pub fn moa_to_rad(moa: f64) -> f64 {
    moa / 60.0 * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

pub fn rad_to_moa(rad: f64) -> f64 {
    rad * 60.0 * 180.0 / PI
}

pub fn moa_to_mil(moa: f64, spec: MilDotSpec) -> f64 {
    moa / spec.moa_per_mil()
}
