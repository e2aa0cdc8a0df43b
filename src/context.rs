//! Computation context holding the coefficients and the solution table.
//!
//! Reads are total: asking for a range that was not computed yields 0.0 (or
//! `None` from [`BallisticsContext::sample`]) rather than an error or a
//! panic. Callers detect a short table through
//! [`BallisticsContext::max_valid_range`] and
//! [`BallisticsContext::sample_count`].

use crate::ballistic_coefficient::{BallisticCoefficient, CoefficientSet};
use crate::trajectory_sampling::{SampleField, TrajectorySample};

/// Why the last trajectory integration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every requested yard was sampled
    RangeReached,
    /// Vertical speed exceeded three times the horizontal speed
    SteepFlight,
    /// Velocity or downrange distance stopped being positive
    Stalled,
    /// No ballistic coefficient could be selected
    NoCoefficient,
    /// The drag model produced no retardation for the current state
    NoRetardation,
    /// No sample table could be allocated for the requested range
    TableTooLarge,
}

#[derive(Debug, Clone, Default)]
pub struct BallisticsContext {
    pub(crate) coefficients: CoefficientSet,
    /// `max_range + 2` slots, the last one is the bookkeeping sentinel
    pub(crate) trajectory: Vec<TrajectorySample>,
    pub(crate) sample_count: usize,
    pub(crate) max_range: usize,
    pub(crate) max_valid_range: usize,
    pub(crate) termination: Option<Termination>,
}

impl BallisticsContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a coefficient valid between `min_velocity` and `max_velocity`
    /// fps. Use zero for both bounds when the projectile has a single BC.
    pub fn add_coefficient(&mut self, bc: f64, min_velocity: f64, max_velocity: f64) {
        self.coefficients
            .push(BallisticCoefficient::new(bc, min_velocity, max_velocity));
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    /// Maximum range (yards) requested by the last integration
    pub fn max_range(&self) -> usize {
        self.max_range
    }

    /// Highest range (yards) actually populated by the last integration
    pub fn max_valid_range(&self) -> usize {
        self.max_valid_range
    }

    /// Number of samples produced by the last integration
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Sample at `range` yards, `None` past the valid part of the table
    pub fn sample(&self, range: usize) -> Option<&TrajectorySample> {
        if range <= self.max_valid_range && range < self.sample_count {
            self.trajectory.get(range)
        } else {
            None
        }
    }

    /// Valid samples, indexed by range in yards
    pub fn samples(&self) -> &[TrajectorySample] {
        let end = self.sample_count.min(self.max_valid_range + 1);
        &self.trajectory[..end]
    }

    /// Slot just past `max_range` whose `range` records the sample count
    pub fn sentinel(&self) -> Option<&TrajectorySample> {
        self.trajectory.last()
    }

    pub fn get(&self, field: SampleField, range: usize) -> f64 {
        self.sample(range).map_or(0.0, |s| s.field(field))
    }

    pub fn range(&self, range: usize) -> f64 {
        self.get(SampleField::Range, range)
    }

    pub fn path_y(&self, range: usize) -> f64 {
        self.get(SampleField::PathY, range)
    }

    pub fn path_x(&self, range: usize) -> f64 {
        self.get(SampleField::PathX, range)
    }

    pub fn elevation(&self, range: usize) -> f64 {
        self.get(SampleField::Elevation, range)
    }

    pub fn windage(&self, range: usize) -> f64 {
        self.get(SampleField::Windage, range)
    }

    pub fn time(&self, range: usize) -> f64 {
        self.get(SampleField::Time, range)
    }

    pub fn velocity(&self, range: usize) -> f64 {
        self.get(SampleField::Velocity, range)
    }

    pub fn velocity_x(&self, range: usize) -> f64 {
        self.get(SampleField::VelocityX, range)
    }

    pub fn velocity_y(&self, range: usize) -> f64 {
        self.get(SampleField::VelocityY, range)
    }

    /// Nearest range (yards) from which the bullet stays within
    /// `vital_zone_radius` inches of the line of sight up to `zero_range`.
    pub fn min_pbr(&self, zero_range: usize, vital_zone_radius: f64) -> usize {
        let mut min_pbr = zero_range;
        for range in (1..=zero_range).rev() {
            if self.path_y(range).abs() <= vital_zone_radius {
                min_pbr = range;
            } else {
                break;
            }
        }
        min_pbr
    }

    /// Farthest range (yards) up to which the bullet stays within
    /// `vital_zone_radius` inches of the line of sight past `zero_range`.
    pub fn max_pbr(&self, zero_range: usize, vital_zone_radius: f64) -> usize {
        let mut max_pbr = zero_range;
        for range in zero_range..self.max_valid_range {
            if self.path_y(range).abs() <= vital_zone_radius {
                max_pbr = range;
            } else {
                break;
            }
        }
        max_pbr
    }
}
