//! Yard-by-yard trajectory integration.
//!
//! Explicit Euler on velocity with a trapezoidal position update. The time
//! step is `0.5 / v`, so the projectile advances about half a foot per step
//! whatever its speed.

use nalgebra::Vector2;
use tracing::{debug, warn};

use crate::angle::{deg_to_rad, rad_to_moa};
use crate::constants::{
    FEET_PER_YARD, GRAVITY_FPS2, INCHES_PER_FOOT, MAX_TABLE_RANGE_YD, STEEP_FLIGHT_RATIO,
    WINDAGE_MOA_FACTOR,
};
use crate::context::{BallisticsContext, Termination};
use crate::drag;
use crate::trajectory_sampling::TrajectorySample;
use crate::wind::{compute_windage, WindComponents};
use crate::DragModel;

/// Parameters of one trajectory computation
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryInputs {
    pub drag_model: DragModel,
    /// Muzzle velocity (fps)
    pub velocity: f64,
    /// Height of the sight above the bore (inches)
    pub sight_height: f64,
    /// Line of sight angle (degrees, 90 straight up, -90 straight down)
    pub los_angle: f64,
    /// Bore angle relative to the line of sight (degrees), usually from
    /// [`crate::compute_zero_angle`]
    pub zero_angle: f64,
    /// Wind speed (mph)
    pub wind_speed: f64,
    /// Wind origin (degrees, 0 ahead, 90 from the right)
    pub wind_angle: f64,
    /// Last range to sample (yards)
    pub max_range: usize,
}

impl Default for TrajectoryInputs {
    fn default() -> Self {
        Self {
            drag_model: DragModel::G1,
            velocity: 2600.0,
            sight_height: 1.5,
            los_angle: 0.0,
            zero_angle: 0.0,
            wind_speed: 0.0,
            wind_angle: 0.0,
            max_range: 1000,
        }
    }
}

impl BallisticsContext {
    /// Integrate a trajectory and replace the solution table with one sample
    /// per yard from 0 to `max_range`.
    ///
    /// Returns the number of samples produced. A flight that ends early
    /// (steep fall, stall, no usable coefficient or retardation) leaves a
    /// shorter table; [`BallisticsContext::max_valid_range`] tells how far
    /// it goes. A `max_range` beyond [`MAX_TABLE_RANGE_YD`], or one whose
    /// table cannot be allocated, leaves an empty table and
    /// [`Termination::TableTooLarge`].
    pub fn compute_trajectory(&mut self, inputs: &TrajectoryInputs) -> usize {
        let max_range = inputs.max_range;
        self.max_range = max_range;
        self.max_valid_range = 0;
        self.sample_count = 0;

        let Some(table) = sample_table(max_range) else {
            warn!(max_range, "no trajectory table for the requested range");
            self.trajectory = Vec::new();
            self.termination = Some(Termination::TableTooLarge);
            return 0;
        };
        self.trajectory = table;
        // one slot per yard in 0..=max_range, the sentinel follows
        let slots = max_range + 1;

        if self.coefficients.is_empty() {
            warn!("computing a trajectory without any ballistic coefficient");
        }

        let wind = WindComponents::resolve(inputs.wind_speed, inputs.wind_angle);

        let bore = deg_to_rad(inputs.los_angle + inputs.zero_angle);
        let gravity = Vector2::new(GRAVITY_FPS2 * bore.sin(), GRAVITY_FPS2 * bore.cos());

        let launch = deg_to_rad(inputs.zero_angle);
        let mut velocity = Vector2::new(inputs.velocity * launch.cos(), inputs.velocity * launch.sin());
        let mut position = Vector2::new(0.0, -inputs.sight_height / INCHES_PER_FOOT);

        let mut t = 0.0;
        let mut n = 0;
        let mut last_bc: Option<f64> = None;

        let termination = loop {
            let previous = velocity;
            let v = velocity.norm();
            let dt = 0.5 / v;

            let air_speed = v + wind.headwind;
            let bc = match self.coefficients.select(air_speed).filter(|bc| *bc != 0.0) {
                Some(bc) => {
                    last_bc = Some(bc);
                    bc
                }
                None => match last_bc.or_else(|| self.coefficients.select_for_lowest_velocity()) {
                    Some(bc) if bc != 0.0 => bc,
                    _ => break Termination::NoCoefficient,
                },
            };

            let Some(retardation) = drag::retardation(inputs.drag_model, bc, air_speed) else {
                break Termination::NoRetardation;
            };

            let drag = -velocity / v * retardation;
            velocity += (drag + gravity) * dt;

            let x = position.x;
            if x / FEET_PER_YARD >= n as f64 {
                let range = x / FEET_PER_YARD;
                let path_x = compute_windage(wind.crosswind, inputs.velocity, x, t + dt);
                let (elevation, windage) = if x > 0.0 {
                    (
                        rad_to_moa((position.y / x).atan()),
                        path_x * WINDAGE_MOA_FACTOR / range,
                    )
                } else {
                    (0.0, 0.0)
                };
                self.trajectory[n] = TrajectorySample {
                    range,
                    path_y: position.y * INCHES_PER_FOOT,
                    path_x,
                    elevation,
                    windage,
                    time: t + dt,
                    velocity: v,
                    velocity_x: velocity.x,
                    velocity_y: velocity.y,
                };
                n += 1;
            }

            position += (velocity + previous) * (dt / 2.0);

            if velocity.y.abs() > STEEP_FLIGHT_RATIO * velocity.x.abs() {
                break Termination::SteepFlight;
            }
            if n >= slots {
                break Termination::RangeReached;
            }
            if v <= 0.0 || position.x <= 0.0 {
                break Termination::Stalled;
            }
            self.max_valid_range = (position.x / FEET_PER_YARD) as usize;
            t += dt;
        };

        self.sample_count = n;
        self.max_valid_range = self.max_valid_range.min(n.saturating_sub(1));
        self.termination = Some(termination);
        self.trajectory[slots].range = n as f64;

        debug!(
            ?termination,
            samples = n,
            max_valid_range = self.max_valid_range,
            time_of_flight = t,
            "trajectory integration finished"
        );
        n
    }
}

/// Zeroed table of `max_range + 2` slots, `None` when it cannot be had
fn sample_table(max_range: usize) -> Option<Vec<TrajectorySample>> {
    if max_range > MAX_TABLE_RANGE_YD {
        return None;
    }
    let len = max_range.checked_add(2)?;
    let mut table = Vec::new();
    table.try_reserve_exact(len).ok()?;
    table.resize(len, TrajectorySample::default());
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zero_angle::compute_zero_angle;

    fn rifle_context(bc: f64) -> BallisticsContext {
        let mut context = BallisticsContext::new();
        context.add_coefficient(bc, 0.0, 0.0);
        context
    }

    #[test]
    fn test_flat_fire_fills_requested_range() {
        let mut context = rifle_context(0.495);
        let inputs = TrajectoryInputs { max_range: 500, ..Default::default() };
        let n = context.compute_trajectory(&inputs);

        assert_eq!(n, 501);
        assert_eq!(context.sample_count(), 501);
        assert_eq!(context.max_valid_range(), 500);
        assert_eq!(context.termination(), Some(Termination::RangeReached));
        assert_eq!(context.sentinel().map(|s| s.range), Some(501.0));
    }

    #[test]
    fn test_sample_ranges_track_their_index() {
        let mut context = rifle_context(0.495);
        context.compute_trajectory(&TrajectoryInputs { max_range: 300, ..Default::default() });

        let samples = context.samples();
        assert_eq!(samples.len(), 301);
        for (i, sample) in samples.iter().enumerate() {
            assert!((sample.range - i as f64).abs() < 0.25, "sample {i} at {}", sample.range);
        }
        assert!(samples.windows(2).all(|w| w[1].range > w[0].range));
        assert!(samples.windows(2).all(|w| w[1].time > w[0].time));
        assert!(samples.windows(2).all(|w| w[1].velocity < w[0].velocity));
    }

    #[test]
    fn test_muzzle_sample() {
        let mut context = rifle_context(0.495);
        context.compute_trajectory(&TrajectoryInputs { max_range: 10, ..Default::default() });

        let muzzle = context.sample(0).unwrap();
        assert_eq!(muzzle.range, 0.0);
        assert!((muzzle.path_y + 1.5).abs() < 1e-9);
        assert_eq!(muzzle.elevation, 0.0);
        assert_eq!(muzzle.windage, 0.0);
        assert_eq!(muzzle.velocity, 2600.0);
    }

    #[test]
    fn test_no_coefficient_yields_empty_table() {
        let mut context = BallisticsContext::new();
        let n = context.compute_trajectory(&TrajectoryInputs { max_range: 100, ..Default::default() });
        assert_eq!(n, 0);
        assert_eq!(context.termination(), Some(Termination::NoCoefficient));
        assert_eq!(context.max_valid_range(), 0);
        assert!(context.sample(0).is_none());
        assert_eq!(context.velocity(0), 0.0);
        assert_eq!(context.sentinel().map(|s| s.range), Some(0.0));
    }

    #[test]
    fn test_drag_model_without_fit_stops_immediately() {
        let mut context = rifle_context(0.4);
        let inputs = TrajectoryInputs { drag_model: DragModel::G3, max_range: 100, ..Default::default() };
        assert_eq!(context.compute_trajectory(&inputs), 0);
        assert_eq!(context.termination(), Some(Termination::NoRetardation));
    }

    #[test]
    fn test_out_of_bracket_velocity_reuses_last_coefficient() {
        let mut bracketed = BallisticsContext::new();
        bracketed.add_coefficient(0.495, 2000.0, 3000.0);
        let inputs = TrajectoryInputs { max_range: 1000, ..Default::default() };
        let n = bracketed.compute_trajectory(&inputs);

        let mut single = rifle_context(0.495);
        single.compute_trajectory(&inputs);

        // below 2000 fps the bracket no longer matches but the last BC is kept
        assert_eq!(n, 1001);
        assert!(bracketed.velocity(1000) < 2000.0);
        assert_eq!(bracketed.velocity(1000), single.velocity(1000));
    }

    #[test]
    fn test_muzzle_velocity_outside_every_bracket_uses_lowest() {
        let mut context = BallisticsContext::new();
        context.add_coefficient(0.3, 1000.0, 1500.0);
        context.add_coefficient(0.6, 1500.0, 2000.0);
        let n = context.compute_trajectory(&TrajectoryInputs { max_range: 100, ..Default::default() });
        assert_eq!(n, 101);

        let mut reference = rifle_context(0.3);
        reference.compute_trajectory(&TrajectoryInputs { max_range: 100, ..Default::default() });
        assert_eq!(context.velocity(100), reference.velocity(100));
    }

    #[test]
    fn test_stepped_coefficients_change_retardation() {
        let mut stepped = BallisticsContext::new();
        stepped.add_coefficient(0.55, 2200.0, 0.0);
        stepped.add_coefficient(0.25, 0.0, 2200.0);
        stepped.compute_trajectory(&TrajectoryInputs { max_range: 800, ..Default::default() });

        let mut constant = rifle_context(0.55);
        constant.compute_trajectory(&TrajectoryInputs { max_range: 800, ..Default::default() });

        // identical until the velocity drops under 2200 fps
        assert_eq!(stepped.velocity(50), constant.velocity(50));
        assert!(stepped.velocity(800) < constant.velocity(800));
    }

    #[test]
    fn test_crosswind_from_right_drifts_left_positive() {
        let mut context = rifle_context(0.495);
        let inputs = TrajectoryInputs {
            wind_speed: 10.0,
            wind_angle: 90.0,
            max_range: 500,
            ..Default::default()
        };
        context.compute_trajectory(&inputs);

        assert!(context.path_x(100) > 0.0);
        assert!(context.path_x(500) > context.path_x(100));
        assert!(context.windage(500) > context.windage(100));
    }

    #[test]
    fn test_headwind_slows_the_projectile() {
        let mut calm = rifle_context(0.495);
        calm.compute_trajectory(&TrajectoryInputs { max_range: 500, ..Default::default() });

        let mut head = rifle_context(0.495);
        head.compute_trajectory(&TrajectoryInputs {
            wind_speed: 20.0,
            wind_angle: 0.0,
            max_range: 500,
            ..Default::default()
        });
        assert!(head.velocity(500) < calm.velocity(500));
    }

    #[test]
    fn test_tailwind_shifts_coefficient_selection() {
        let tailwind = TrajectoryInputs {
            wind_speed: 20.0,
            wind_angle: 180.0,
            max_range: 100,
            ..Default::default()
        };

        // 2600 fps muzzle, 2580 fps through the air: already in the low bracket
        let mut stepped = BallisticsContext::new();
        stepped.add_coefficient(0.5, 2590.0, 0.0);
        stepped.add_coefficient(0.1, 0.0, 2589.0);
        stepped.compute_trajectory(&tailwind);

        let mut low_only = rifle_context(0.1);
        low_only.compute_trajectory(&tailwind);

        assert_eq!(stepped.velocity(10), low_only.velocity(10));
        assert_eq!(stepped.velocity(100), low_only.velocity(100));

        // in still air the first steps still use the high bracket
        let mut calm = BallisticsContext::new();
        calm.add_coefficient(0.5, 2590.0, 0.0);
        calm.add_coefficient(0.1, 0.0, 2589.0);
        calm.compute_trajectory(&TrajectoryInputs { max_range: 100, ..Default::default() });
        assert!(calm.velocity(10) > low_only.velocity(10));
    }

    #[test]
    fn test_oversized_table_is_refused() {
        let mut context = rifle_context(0.495);
        context.compute_trajectory(&TrajectoryInputs { max_range: 100, ..Default::default() });

        for max_range in [usize::MAX, usize::MAX - 1, MAX_TABLE_RANGE_YD + 1] {
            let n = context.compute_trajectory(&TrajectoryInputs { max_range, ..Default::default() });
            assert_eq!(n, 0);
            assert_eq!(context.sample_count(), 0);
            assert_eq!(context.max_valid_range(), 0);
            assert_eq!(context.termination(), Some(Termination::TableTooLarge));
            assert!(context.samples().is_empty());
            assert!(context.sentinel().is_none());
            assert_eq!(context.velocity(50), 0.0);
        }
    }

    #[test]
    fn test_steep_fall_ends_the_table_early() {
        // a slow projectile falls out of the sky long before 5000 yards
        let mut context = rifle_context(0.2);
        let inputs = TrajectoryInputs { velocity: 900.0, max_range: 5000, ..Default::default() };
        let n = context.compute_trajectory(&inputs);

        assert!(n < 5001);
        assert_eq!(context.termination(), Some(Termination::SteepFlight));
        assert!(context.max_valid_range() < context.max_range());
        assert_eq!(context.max_valid_range(), n - 1);
        assert_eq!(context.path_y(n), 0.0);
    }

    #[test]
    fn test_recomputing_replaces_the_table() {
        let mut context = rifle_context(0.495);
        context.compute_trajectory(&TrajectoryInputs { max_range: 500, ..Default::default() });
        assert!(context.velocity(400) > 0.0);

        context.compute_trajectory(&TrajectoryInputs { max_range: 200, ..Default::default() });
        assert_eq!(context.max_range(), 200);
        assert_eq!(context.max_valid_range(), 200);
        assert_eq!(context.velocity(400), 0.0);
    }

    #[test]
    fn test_zero_angle_brings_path_to_line_of_sight() {
        let angle = compute_zero_angle(DragModel::G1, 0.495, 2600.0, 1.5, 200.0, 0.0);
        let mut context = rifle_context(0.495);
        context.compute_trajectory(&TrajectoryInputs { zero_angle: angle, max_range: 300, ..Default::default() });

        assert!(context.path_y(200).abs() < 0.1, "path at zero: {}", context.path_y(200));
        // above the line of sight between the two crossings, below past the zero
        assert!(context.path_y(100) > 1.0);
        assert!(context.path_y(300) < -5.0);
    }
}
