// CLI API module - high level shot pipeline used by the command-line tool
use crate::atmosphere::{apply_atmosphere, Atmosphere};
use crate::ballistic_coefficient::{BallisticCoefficient, CoefficientSet};
use crate::constants::MAX_TABLE_RANGE_YD;
use crate::context::{BallisticsContext, Termination};
use crate::error::BallisticsError;
use crate::trajectory_sampling::compute_energy;
use crate::trajectory_solver::TrajectoryInputs;
use crate::zero_angle::{solve_zero_angle, ZeroSolution};
use crate::DragModel;
use serde::{Deserialize, Serialize};

// Wind conditions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConditions {
    pub speed: f64, // mph
    pub angle: f64, // degrees, 0 = from ahead, 90 = from the right
}

// Everything needed to describe one shot
#[derive(Debug, Clone, PartialEq)]
pub struct BallisticInputs {
    pub drag_model: DragModel,
    pub velocity: f64,     // fps
    pub sight_height: f64, // inches above the bore
    pub weight: f64,       // grains
    pub zero_range: f64,   // yards
    pub y_intercept: f64,  // inches above the line of sight at the zero range
    pub los_angle: f64,    // degrees
    pub coefficients: CoefficientSet,
    pub max_range: usize, // yards
    pub wind: WindConditions,
    pub atmosphere: Atmosphere,
}

impl Default for BallisticInputs {
    fn default() -> Self {
        Self {
            drag_model: DragModel::G1,
            velocity: 2600.0,
            sight_height: 1.5,
            weight: 175.0,
            zero_range: 100.0,
            y_intercept: 0.0,
            los_angle: 0.0,
            coefficients: CoefficientSet::new(),
            max_range: 1000,
            wind: WindConditions::default(),
            atmosphere: Atmosphere::standard(),
        }
    }
}

impl BallisticInputs {
    /// Check the inputs the integrator cannot recover from
    pub fn validate(&self) -> Result<(), BallisticsError> {
        if !(self.velocity > 0.0) {
            return Err(format!("muzzle velocity must be positive, got {}", self.velocity).into());
        }
        if self.coefficients.is_empty() {
            return Err(BallisticsError::NoCoefficients);
        }
        if let Some(bad) = self.coefficients.iter().find(|c| !(c.bc > 0.0)) {
            return Err(format!("ballistic coefficient must be positive, got {}", bad.bc).into());
        }
        if self.zero_range < 0.0 {
            return Err(format!("zero range must not be negative, got {}", self.zero_range).into());
        }
        if self.weight < 0.0 {
            return Err(format!("bullet weight must not be negative, got {}", self.weight).into());
        }
        if self.max_range > MAX_TABLE_RANGE_YD {
            return Err(format!(
                "maximum range must not exceed {MAX_TABLE_RANGE_YD} yards, got {}",
                self.max_range
            )
            .into());
        }
        if !(-90.0..=90.0).contains(&self.los_angle) {
            return Err(format!("line of sight angle must be within ±90°, got {}", self.los_angle).into());
        }
        Ok(())
    }
}

// Trajectory solver combining atmosphere correction, zeroing and integration
#[derive(Debug, Clone)]
pub struct TrajectorySolver {
    inputs: BallisticInputs,
}

impl TrajectorySolver {
    pub fn new(inputs: BallisticInputs) -> Result<Self, BallisticsError> {
        inputs.validate()?;
        Ok(Self { inputs })
    }

    pub fn inputs(&self) -> &BallisticInputs {
        &self.inputs
    }

    /// Coefficients rescaled to the shooting atmosphere, velocity bands kept
    pub fn corrected_coefficients(&self) -> CoefficientSet {
        self.inputs
            .coefficients
            .iter()
            .map(|c| BallisticCoefficient {
                bc: apply_atmosphere(c.bc, &self.inputs.atmosphere),
                ..*c
            })
            .collect()
    }

    /// Zero the rifle with the catch-all coefficient, or the first one listed
    pub fn solve_zero(&self) -> ZeroSolution {
        let coefficients = self.corrected_coefficients();
        let bc = coefficients
            .iter()
            .find(|c| c.is_catch_all())
            .or_else(|| coefficients.iter().next())
            .map_or(0.0, |c| c.bc);

        solve_zero_angle(
            self.inputs.drag_model,
            bc,
            self.inputs.velocity,
            self.inputs.sight_height,
            self.inputs.zero_range,
            self.inputs.y_intercept,
        )
    }

    pub fn solve(&self) -> Result<TrajectoryReport, BallisticsError> {
        let zero = self.solve_zero();

        let mut context = BallisticsContext::new();
        for coefficient in &self.corrected_coefficients() {
            context.add_coefficient(coefficient.bc, coefficient.min_velocity, coefficient.max_velocity);
        }

        let inputs = TrajectoryInputs {
            drag_model: self.inputs.drag_model,
            velocity: self.inputs.velocity,
            sight_height: self.inputs.sight_height,
            los_angle: self.inputs.los_angle,
            zero_angle: zero.angle,
            wind_speed: self.inputs.wind.speed,
            wind_angle: self.inputs.wind.angle,
            max_range: self.inputs.max_range,
        };
        if context.compute_trajectory(&inputs) == 0 {
            let reason = match context.termination() {
                Some(Termination::TableTooLarge) => {
                    format!("no trajectory table for {} yards", self.inputs.max_range)
                }
                _ => format!(
                    "{} has no retardation data at {} fps",
                    self.inputs.drag_model, self.inputs.velocity
                ),
            };
            return Err(reason.into());
        }

        Ok(TrajectoryReport {
            zero,
            zero_range: self.inputs.zero_range as usize,
            context,
            weight: self.inputs.weight,
        })
    }
}

// Result of a full solve
#[derive(Debug, Clone)]
pub struct TrajectoryReport {
    pub zero: ZeroSolution,
    pub zero_range: usize, // yards
    pub context: BallisticsContext,
    pub weight: f64, // grains
}

// One printable line of the range card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryRow {
    pub range: usize,     // yards
    pub path: f64,        // inches
    pub path_moa: f64,    // MOA
    pub windage: f64,     // inches
    pub windage_moa: f64, // MOA
    pub velocity: f64,    // fps
    pub energy: f64,      // ft-lb
    pub time: f64,        // seconds
}

impl TrajectoryReport {
    pub fn row(&self, range: usize) -> Option<TrajectoryRow> {
        let sample = self.context.sample(range)?;
        Some(TrajectoryRow {
            range,
            path: sample.path_y,
            path_moa: sample.elevation,
            windage: sample.path_x,
            windage_moa: sample.windage,
            velocity: sample.velocity,
            energy: compute_energy(sample.velocity, self.weight),
            time: sample.time,
        })
    }

    /// Rows every `step` yards from the muzzle to the last valid range
    pub fn rows(&self, step: usize) -> impl Iterator<Item = TrajectoryRow> + '_ {
        (0..=self.context.max_valid_range())
            .step_by(step.max(1))
            .filter_map(move |range| self.row(range))
    }

    pub fn min_pbr(&self, vital_zone_radius: f64) -> usize {
        self.context.min_pbr(self.zero_range, vital_zone_radius)
    }

    pub fn max_pbr(&self, vital_zone_radius: f64) -> usize {
        self.context.max_pbr(self.zero_range, vital_zone_radius)
    }
}
