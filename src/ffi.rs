//! C ABI bindings
//!
//! The context is handed out as an opaque pointer: create it, register
//! coefficients, compute, read the table back by integer yard, then release
//! it with `ballistics_finish`. Getters return 0.0 for a null handle or a
//! range that was not computed, status codes are negative on failure.

use crate::angle::{moa_to_mil, MilDotSpec};
use crate::atmosphere::{apply_atmosphere, Atmosphere};
use crate::trajectory_sampling::{compute_energy, SampleField};
use crate::{compute_zero_angle, BallisticsContext, DragModel, Termination, TrajectoryInputs};
use std::os::raw::{c_char, c_double, c_int};

fn context_ref<'a>(context: *const BallisticsContext) -> Option<&'a BallisticsContext> {
    if context.is_null() {
        None
    } else {
        Some(unsafe { &*context })
    }
}

fn context_mut<'a>(context: *mut BallisticsContext) -> Option<&'a mut BallisticsContext> {
    if context.is_null() {
        None
    } else {
        Some(unsafe { &mut *context })
    }
}

fn read_field(context: *const BallisticsContext, field: SampleField, range: c_int) -> c_double {
    match (context_ref(context), usize::try_from(range)) {
        (Some(context), Ok(range)) => context.get(field, range),
        _ => 0.0,
    }
}

// Allocate an empty context
#[no_mangle]
pub extern "C" fn ballistics_create() -> *mut BallisticsContext {
    Box::into_raw(Box::new(BallisticsContext::new()))
}

// Release a context returned by ballistics_create
#[no_mangle]
pub extern "C" fn ballistics_finish(context: *mut BallisticsContext) {
    if !context.is_null() {
        unsafe {
            drop(Box::from_raw(context));
        }
    }
}

// Register a coefficient valid between min_velocity and max_velocity fps
#[no_mangle]
pub extern "C" fn ballistics_add_coefficient(
    context: *mut BallisticsContext,
    bc: c_double,
    min_velocity: c_double,
    max_velocity: c_double,
) -> c_int {
    match context_mut(context) {
        Some(context) => {
            context.add_coefficient(bc, min_velocity, max_velocity);
            0
        }
        None => -1,
    }
}

// Integrate a trajectory, returning the number of samples or -1 when the
// arguments are unusable or the table cannot be allocated
#[no_mangle]
pub extern "C" fn ballistics_compute_trajectory(
    context: *mut BallisticsContext,
    drag_model: c_int,
    velocity: c_double,
    sight_height: c_double,
    los_angle: c_double,
    zero_angle: c_double,
    wind_speed: c_double,
    wind_angle: c_double,
    max_range: c_int,
) -> c_int {
    let (Some(context), Some(drag_model), Ok(max_range)) = (
        context_mut(context),
        DragModel::from_id(drag_model),
        usize::try_from(max_range),
    ) else {
        return -1;
    };

    let inputs = TrajectoryInputs {
        drag_model,
        velocity,
        sight_height,
        los_angle,
        zero_angle,
        wind_speed,
        wind_angle,
        max_range,
    };
    let samples = context.compute_trajectory(&inputs);
    if context.termination() == Some(Termination::TableTooLarge) {
        return -1;
    }
    c_int::try_from(samples).unwrap_or(c_int::MAX)
}

// Bore angle (degrees) for a zero, NaN for an unknown drag model id
#[no_mangle]
pub extern "C" fn ballistics_compute_zero_angle(
    drag_model: c_int,
    bc: c_double,
    velocity: c_double,
    sight_height: c_double,
    zero_range: c_double,
    y_intercept: c_double,
) -> c_double {
    match DragModel::from_id(drag_model) {
        Some(model) => compute_zero_angle(model, bc, velocity, sight_height, zero_range, y_intercept),
        None => f64::NAN,
    }
}

#[no_mangle]
pub extern "C" fn ballistics_get_range(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::Range, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_path(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::PathY, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_windage(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::PathX, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_moa(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::Elevation, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_windage_moa(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::Windage, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_time(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::Time, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_velocity(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::Velocity, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_velocity_x(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::VelocityX, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_velocity_y(context: *const BallisticsContext, range: c_int) -> c_double {
    read_field(context, SampleField::VelocityY, range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_max_valid_range(context: *const BallisticsContext) -> c_int {
    context_ref(context)
        .and_then(|context| c_int::try_from(context.max_valid_range()).ok())
        .unwrap_or(0)
}

// Point-blank range limits (yards) for a vital zone radius in inches
#[no_mangle]
pub extern "C" fn ballistics_get_min_pbr(
    context: *const BallisticsContext,
    zero_range: c_int,
    vital_zone_radius: c_double,
) -> c_int {
    match (context_ref(context), usize::try_from(zero_range)) {
        (Some(context), Ok(zero_range)) => {
            c_int::try_from(context.min_pbr(zero_range, vital_zone_radius)).unwrap_or(0)
        }
        _ => 0,
    }
}

#[no_mangle]
pub extern "C" fn ballistics_get_max_pbr(
    context: *const BallisticsContext,
    zero_range: c_int,
    vital_zone_radius: c_double,
) -> c_int {
    match (context_ref(context), usize::try_from(zero_range)) {
        (Some(context), Ok(zero_range)) => {
            c_int::try_from(context.max_pbr(zero_range, vital_zone_radius)).unwrap_or(0)
        }
        _ => 0,
    }
}

#[no_mangle]
pub extern "C" fn ballistics_compute_energy(velocity: c_double, weight: c_double) -> c_double {
    compute_energy(velocity, weight)
}

#[no_mangle]
pub extern "C" fn ballistics_apply_atmosphere(
    bc: c_double,
    altitude: c_double,
    pressure: c_double,
    temperature: c_double,
    humidity: c_double,
) -> c_double {
    apply_atmosphere(bc, &Atmosphere { altitude, pressure, temperature, humidity })
}

// army != 0 selects the Army mil-dot (3.375 MOA), otherwise USMC (3.438 MOA)
#[no_mangle]
pub extern "C" fn ballistics_moa_to_mil(moa: c_double, army: c_int) -> c_double {
    let spec = if army != 0 { MilDotSpec::Army } else { MilDotSpec::Usmc };
    moa_to_mil(moa, spec)
}

// Get library version
#[no_mangle]
pub extern "C" fn ballistics_get_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}
