//! Physical and numerical constants used in ballistics calculations.
//!
//! Everything is expressed in the imperial units of the classic ballistic
//! tables: feet, yards, inches, feet per second, grains and degrees Fahrenheit.

/// Standard gravitational acceleration in ft/s² (negative: points down)
pub const GRAVITY_FPS2: f64 = -32.194;

/// Offset between the Fahrenheit and Rankine scales
pub const ABSOLUTE_ZERO_F: f64 = 459.67;

/// Standard temperature for drag tables (°F)
pub const STANDARD_TEMPERATURE_F: f64 = 59.0;

/// Standard sea level barometric pressure (inHg)
pub const STANDARD_PRESSURE_INHG: f64 = 29.92;

/// Standard relative humidity (fraction)
pub const STANDARD_HUMIDITY: f64 = 0.78;

/// Grains per pound
pub const GRAINS_PER_POUND: f64 = 7000.0;

pub const FEET_PER_YARD: f64 = 3.0;
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Crosswind conversion: mph to inches per second
pub const MPH_TO_INCHES_PER_SECOND: f64 = 17.60;

/// Windage inches to MOA scaling at one yard.
///
/// Empirical: 100 yards / 1.047 inches per MOA. Kept as the fixed constant
/// used by the classic tables, not derived from the exact arc length.
pub const WINDAGE_MOA_FACTOR: f64 = 95.5;

/// Retardation of the standard projectile per unit drag coefficient, per fps².
///
/// ½·ρ·(π/4)/144 with ρ = 0.0764742 lb/ft³ and a sectional density of
/// 1 lb/in², so that `retardation = RETARDATION_PER_CD · Cd · v² / bc`.
pub const RETARDATION_PER_CD: f64 = 2.0856e-4;

/// Upper bound of the velocity brackets in the retardation fits (fps)
pub const MAX_TABLE_VELOCITY: f64 = 10000.0;

// Zero-angle solver

/// First angular step of the successive approximation (degrees)
pub const ZERO_INITIAL_STEP_DEG: f64 = 14.0;

/// Convergence threshold on the angular step (MOA)
pub const ZERO_TOLERANCE_MOA: f64 = 0.01;

/// Launch angle above which the zero is considered unreachable (degrees)
pub const ZERO_MAX_ANGLE_DEG: f64 = 45.0;

/// Ratio of vertical to horizontal speed beyond which a flight is abandoned
pub const STEEP_FLIGHT_RATIO: f64 = 3.0;

/// Largest range (yards) a trajectory table is allocated for
pub const MAX_TABLE_RANGE_YD: usize = 1_000_000;
