//! Retardation and drag coefficients of the standard G projectiles.
//!
//! Each model is described by piecewise power-law fits of the standard
//! drag tables: above `min_velocity` the retardation of a projectile with a
//! ballistic coefficient of 1.0 is `a * v^m` (fps/s). A projectile with
//! ballistic coefficient `bc` decelerates `1 / bc` times as fast.

use crate::constants::{
    ABSOLUTE_ZERO_F, MAX_TABLE_VELOCITY, RETARDATION_PER_CD, STANDARD_TEMPERATURE_F,
};
use crate::DragModel;

/// One velocity bracket of a retardation fit
#[derive(Debug, Clone, Copy)]
pub struct RetardationSegment {
    pub min_velocity: f64,
    pub a: f64,
    pub m: f64,
}

const fn seg(min_velocity: f64, a: f64, m: f64) -> RetardationSegment {
    RetardationSegment { min_velocity, a, m }
}

// Brackets are listed from the fastest to the slowest.

static G1_SEGMENTS: &[RetardationSegment] = &[
    seg(4230.0, 1.477404177730177e-04, 1.9565),
    seg(3680.0, 1.920339268755614e-04, 1.925),
    seg(3450.0, 2.894751026819746e-04, 1.875),
    seg(3295.0, 4.349905111115636e-04, 1.825),
    seg(3130.0, 6.520421871892662e-04, 1.775),
    seg(2960.0, 9.748073694078696e-04, 1.725),
    seg(2830.0, 1.453721560187286e-03, 1.675),
    seg(2680.0, 2.162887202930376e-03, 1.625),
    seg(2460.0, 3.209559783129881e-03, 1.575),
    seg(2225.0, 3.904368218691249e-03, 1.55),
    seg(2015.0, 3.222942271262336e-03, 1.575),
    seg(1890.0, 2.203329542297809e-03, 1.625),
    seg(1810.0, 1.511001028891904e-03, 1.675),
    seg(1730.0, 8.609957592468259e-04, 1.75),
    seg(1595.0, 4.086146797305117e-04, 1.85),
    seg(1520.0, 1.954473210037398e-04, 1.95),
    seg(1420.0, 5.431896266462351e-05, 2.125),
    seg(1360.0, 8.847742581674416e-06, 2.375),
    seg(1315.0, 1.456922328720298e-06, 2.625),
    seg(1280.0, 2.419485191895565e-07, 2.875),
    seg(1220.0, 1.657956321067612e-08, 3.25),
    seg(1185.0, 4.745469537157371e-10, 3.75),
    seg(1150.0, 1.379746590025088e-11, 4.25),
    seg(1100.0, 4.070157961147882e-13, 4.75),
    seg(1060.0, 2.938236954847331e-14, 5.125),
    seg(1025.0, 1.228597370774746e-14, 5.25),
    seg(980.0, 2.916938264100495e-14, 5.125),
    seg(945.0, 3.855099424807451e-13, 4.75),
    seg(905.0, 1.185097045689854e-11, 4.25),
    seg(860.0, 3.566129470974951e-10, 3.75),
    seg(810.0, 1.045513263966272e-08, 3.25),
    seg(780.0, 1.291159200846216e-07, 2.875),
    seg(750.0, 6.824429329105383e-07, 2.625),
    seg(700.0, 3.569169672385163e-06, 2.375),
    seg(640.0, 1.839015095899579e-05, 2.125),
    seg(600.0, 5.71117468873424e-05, 1.950),
    seg(550.0, 9.226557091973427e-05, 1.875),
    seg(250.0, 9.337991957131389e-05, 1.875),
    seg(100.0, 7.225247327590413e-05, 1.925),
    seg(65.0, 5.792684957074546e-05, 1.975),
    seg(0.0, 5.206214107320588e-05, 2.000),
];

static G2_SEGMENTS: &[RetardationSegment] = &[
    seg(1674.0, 0.0079470052136733, 1.36999902851493),
    seg(1172.0, 1.00419763721974e-03, 1.65392237010294),
    seg(1060.0, 7.15571228255369e-23, 7.91913562392361),
    seg(949.0, 1.39589807205091e-10, 3.81439537623717),
    seg(670.0, 2.34364342818625e-04, 1.71869536324748),
    seg(335.0, 1.77962438921838e-04, 1.76877550388679),
    seg(0.0, 5.18033561289704e-05, 1.98160270524632),
];

static G5_SEGMENTS: &[RetardationSegment] = &[
    seg(1730.0, 7.24854775171929e-03, 1.41538574492812),
    seg(1228.0, 3.50563361516117e-05, 2.13077307854948),
    seg(1116.0, 1.84029481181151e-13, 4.81927320350395),
    seg(1004.0, 1.34713064017409e-22, 7.8100555281422),
    seg(837.0, 1.03965974081168e-07, 2.84204791809926),
    seg(335.0, 1.09301593869823e-04, 1.81096361579504),
    seg(0.0, 3.51963178524273e-05, 2.00477856801111),
];

static G6_SEGMENTS: &[RetardationSegment] = &[
    seg(3236.0, 0.0455384883480781, 1.15997674041274),
    seg(2065.0, 7.167261849653769e-02, 1.10704436538885),
    seg(1311.0, 1.66676386084348e-03, 1.60085100195952),
    seg(1144.0, 1.01482730119215e-07, 2.9569674731838),
    seg(1004.0, 4.31542773103552e-18, 6.34106317069757),
    seg(670.0, 2.04835650496866e-05, 2.11688446325998),
    seg(0.0, 7.50912466084823e-05, 1.92031057847052),
];

static G7_SEGMENTS: &[RetardationSegment] = &[
    seg(4200.0, 1.29081656775919e-09, 3.24121295355962),
    seg(3000.0, 0.0171422231434847, 1.27907168025204),
    seg(1470.0, 2.33355948302505e-03, 1.52693913274526),
    seg(1260.0, 7.97592111627665e-04, 1.67688974440324),
    seg(1110.0, 5.71086414289273e-12, 4.3212826264889),
    seg(960.0, 3.02865108244904e-17, 5.99074203776707),
    seg(670.0, 7.52285155782535e-06, 2.1738019851075),
    seg(540.0, 1.31766281225189e-05, 2.08774690257991),
    seg(0.0, 1.34504843776525e-05, 2.08702306738884),
];

static G8_SEGMENTS: &[RetardationSegment] = &[
    seg(3571.0, 0.0112263766252305, 1.33207346655961),
    seg(1841.0, 0.0167252613732636, 1.28662041261785),
    seg(1120.0, 2.20172456619625e-03, 1.55636358091189),
    seg(1088.0, 2.0538037167098e-16, 5.80410776994789),
    seg(976.0, 5.92182174254121e-12, 4.29275576134191),
    seg(0.0, 4.3917343795117e-05, 1.99978116283334),
];

/// Retardation fit for a drag model, `None` for G3/G4 which have no
/// published power-law fit
pub fn segments_for(drag_model: DragModel) -> Option<&'static [RetardationSegment]> {
    match drag_model {
        DragModel::G1 => Some(G1_SEGMENTS),
        DragModel::G2 => Some(G2_SEGMENTS),
        DragModel::G5 => Some(G5_SEGMENTS),
        DragModel::G6 => Some(G6_SEGMENTS),
        DragModel::G7 => Some(G7_SEGMENTS),
        DragModel::G8 => Some(G8_SEGMENTS),
        DragModel::G3 | DragModel::G4 => None,
    }
}

pub fn has_retardation(drag_model: DragModel) -> bool {
    segments_for(drag_model).is_some()
}

/// Deceleration (fps/s) of a projectile with ballistic coefficient `bc`
/// flying at `velocity` fps.
///
/// Returns `None` when the model has no fit, the coefficient is not
/// positive, or the velocity is outside the tabulated `(0, 10000)` fps.
pub fn retardation(drag_model: DragModel, bc: f64, velocity: f64) -> Option<f64> {
    if !(velocity > 0.0 && velocity < MAX_TABLE_VELOCITY) || bc <= 0.0 {
        return None;
    }
    let segment = segments_for(drag_model)?
        .iter()
        .find(|s| velocity > s.min_velocity)?;
    Some(segment.a * velocity.powf(segment.m) / bc)
}

/// Drag coefficient of the standard projectile of `drag_model` at `velocity`
/// fps and ambient `temperature` (°F).
///
/// The fits are tabulated at the standard 59°F, so the velocity is first
/// rescaled to the one giving the same Mach number at standard temperature.
/// This lets a BC be converted between drag models.
pub fn drag_for_model(drag_model: DragModel, velocity: f64, temperature: f64) -> Option<f64> {
    let rankine = temperature + ABSOLUTE_ZERO_F;
    if rankine <= 0.0 {
        return None;
    }
    let standard_rankine = STANDARD_TEMPERATURE_F + ABSOLUTE_ZERO_F;
    let equivalent_velocity = velocity * (standard_rankine / rankine).sqrt();

    let retard = retardation(drag_model, 1.0, equivalent_velocity)?;
    Some(retard / (RETARDATION_PER_CD * equivalent_velocity * equivalent_velocity))
}
