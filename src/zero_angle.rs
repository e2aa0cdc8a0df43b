//! Bore angle needed to zero a rifle at a given range.
//!
//! There is no closed form once drag depends on velocity, so the angle is
//! found by successive approximation: starting flat, the angle climbs in
//! 14 degree steps until the projectile passes above the target, then the
//! step is halved and reversed every time the target is crossed. Each trial
//! flies a reduced trajectory (single BC, no sampling, `dt = 1 / v`).
//!
//! The search gives up once the angle exceeds 45 degrees. The angle reached
//! at that point is still returned, so a result at or above 45 degrees means
//! the zero was not found; [`solve_zero_angle`] reports this explicitly.
//!
//! A trial cut short by the steep-flight check counts as passing above the
//! target, so a zero beyond the projectile's reach can still settle on an
//! angle below 45 degrees. [`solve_zero_angle`] flags that case too.

use nalgebra::Vector2;
use serde::Serialize;
use tracing::{trace, warn};

use crate::angle::{deg_to_rad, moa_to_rad, rad_to_deg};
use crate::constants::{
    FEET_PER_YARD, GRAVITY_FPS2, INCHES_PER_FOOT, STEEP_FLIGHT_RATIO, ZERO_INITIAL_STEP_DEG,
    ZERO_MAX_ANGLE_DEG, ZERO_TOLERANCE_MOA,
};
use crate::drag;
use crate::DragModel;

/// Outer iterations allowed before the search is abandoned
const MAX_ZERO_ITERATIONS: usize = 1000;

/// Outcome of the zero-angle search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZeroSolution {
    /// Bore angle (degrees)
    pub angle: f64,
    /// Trial trajectories flown
    pub iterations: usize,
    /// `false` when the search left through the 45 degree limit, ran out of
    /// iterations, never flew a trial out to the zero range, or could not
    /// fly the projectile at all (no retardation for the drag model, or a
    /// non-positive BC or velocity)
    pub converged: bool,
}

/// Bore angle (degrees) at which a projectile crosses `y_intercept` inches
/// above the line of sight at `zero_range` yards.
pub fn compute_zero_angle(
    drag_model: DragModel,
    bc: f64,
    velocity: f64,
    sight_height: f64,
    zero_range: f64,
    y_intercept: f64,
) -> f64 {
    solve_zero_angle(drag_model, bc, velocity, sight_height, zero_range, y_intercept).angle
}

/// Same search as [`compute_zero_angle`], reporting whether it converged
pub fn solve_zero_angle(
    drag_model: DragModel,
    bc: f64,
    velocity: f64,
    sight_height: f64,
    zero_range: f64,
    y_intercept: f64,
) -> ZeroSolution {
    // already at the muzzle
    if zero_range <= 0.0 {
        return ZeroSolution { angle: 0.0, iterations: 0, converged: true };
    }
    if !drag::has_retardation(drag_model) || !(velocity > 0.0) || !(bc > 0.0) {
        warn!(%drag_model, bc, velocity, "cannot fly a zeroing trajectory");
        return ZeroSolution { angle: 0.0, iterations: 0, converged: false };
    }

    let target = y_intercept / INCHES_PER_FOOT;
    let range = zero_range * FEET_PER_YARD;
    let tolerance = moa_to_rad(ZERO_TOLERANCE_MOA);
    let max_angle = deg_to_rad(ZERO_MAX_ANGLE_DEG);

    let mut angle = 0.0;
    let mut step = deg_to_rad(ZERO_INITIAL_STEP_DEG);
    let mut iterations = 0;
    let mut reached = false;

    let settled = loop {
        iterations += 1;
        let flight = fly_to_range(drag_model, bc, velocity, sight_height, angle, range, target);
        reached |= flight.distance > range;
        let height = flight.height;

        if height > target && step > 0.0 {
            step = -step / 2.0;
        }
        if height < target && step < 0.0 {
            step = -step / 2.0;
        }
        trace!(iterations, angle_deg = rad_to_deg(angle), height, step, "zero search");

        if step.abs() < tolerance {
            break true;
        }
        if angle > max_angle {
            warn!(
                angle_deg = rad_to_deg(angle),
                zero_range, "zero is out of reach below 45 degrees"
            );
            break false;
        }
        if iterations >= MAX_ZERO_ITERATIONS {
            warn!(iterations, "zero search did not settle");
            break false;
        }
        angle += step;
    };

    if settled && !reached {
        warn!(zero_range, "zero range is beyond the reach of every trial flight");
    }
    ZeroSolution {
        angle: rad_to_deg(angle),
        iterations,
        converged: settled && reached,
    }
}

/// End of one trial flight
struct TrialFlight {
    /// Height above the line of sight (ft)
    height: f64,
    /// Distance flown along the line of sight (ft)
    distance: f64,
}

/// Fly until the projectile passes `range` feet, or until the flight is cut
/// short: falling below `target`, climbing steeply, or leaving the drag
/// tables.
fn fly_to_range(
    drag_model: DragModel,
    bc: f64,
    velocity: f64,
    sight_height: f64,
    angle: f64,
    range: f64,
    target: f64,
) -> TrialFlight {
    let mut v_vec = Vector2::new(velocity * angle.cos(), velocity * angle.sin());
    let gravity = Vector2::new(GRAVITY_FPS2 * angle.sin(), GRAVITY_FPS2 * angle.cos());
    let mut position = Vector2::new(0.0, -sight_height / INCHES_PER_FOOT);

    while position.x <= range {
        let previous = v_vec;
        let v = v_vec.norm();
        let dt = 1.0 / v;

        let Some(retardation) = drag::retardation(drag_model, bc, v) else {
            break;
        };
        v_vec += (-v_vec / v * retardation + gravity) * dt;
        position += (v_vec + previous) * (dt / 2.0);

        if v_vec.y < 0.0 && position.y < target {
            break;
        }
        if v_vec.y > STEEP_FLIGHT_RATIO * v_vec.x {
            break;
        }
    }
    TrialFlight { height: position.y, distance: position.x }
}
