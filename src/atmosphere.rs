//! Atmospheric correction of ballistic coefficients.
//!
//! Published coefficients are referenced to the standard atmosphere. The
//! empirical factors below (altitude, temperature, pressure, humidity)
//! rescale a coefficient to the conditions of the shot. Apply the correction
//! once, before registering the coefficient with a context.

use serde::{Deserialize, Serialize};

use crate::constants::{STANDARD_HUMIDITY, STANDARD_PRESSURE_INHG, STANDARD_TEMPERATURE_F};

/// Shooting conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    /// Altitude above sea level (ft)
    pub altitude: f64,
    /// Barometric pressure (inHg)
    pub pressure: f64,
    /// Temperature (°F)
    pub temperature: f64,
    /// Relative humidity (0.0 - 1.0)
    pub humidity: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::standard()
    }
}

impl Atmosphere {
    pub const fn standard() -> Self {
        Self {
            altitude: 0.0,
            pressure: STANDARD_PRESSURE_INHG,
            temperature: STANDARD_TEMPERATURE_F,
            humidity: STANDARD_HUMIDITY,
        }
    }

    /// Combined correction factor `FA * (1 + FT - FP) * FR`
    pub fn correction_factor(&self) -> f64 {
        let fa = calc_fa(self.altitude);
        let ft = calc_ft(self.temperature, self.altitude);
        let fr = calc_fr(self.temperature, self.pressure, self.humidity);
        let fp = calc_fp(self.pressure);
        fa * (1.0 + ft - fp) * fr
    }
}

/// Humidity factor
pub fn calc_fr(temperature: f64, pressure: f64, humidity: f64) -> f64 {
    let vapor_pressure = 4e-6 * temperature.powi(3) - 0.0004 * temperature.powi(2)
        + 0.0234 * temperature
        - 0.2517;
    0.995 * (pressure / (pressure - 0.3783 * humidity * vapor_pressure))
}

/// Pressure factor
pub fn calc_fp(pressure: f64) -> f64 {
    (pressure - STANDARD_PRESSURE_INHG) / STANDARD_PRESSURE_INHG
}

/// Temperature factor, relative to the standard temperature at `altitude`
pub fn calc_ft(temperature: f64, altitude: f64) -> f64 {
    let standard_temperature = -0.0036 * altitude + STANDARD_TEMPERATURE_F;
    (temperature - standard_temperature) / (459.6 + standard_temperature)
}

/// Altitude factor
pub fn calc_fa(altitude: f64) -> f64 {
    let fa = -4e-15 * altitude.powi(3) + 4e-10 * altitude.powi(2) - 3e-5 * altitude + 1.0;
    1.0 / fa
}

/// Ballistic coefficient corrected for `atmosphere`
pub fn apply_atmosphere(bc: f64, atmosphere: &Atmosphere) -> f64 {
    bc * atmosphere.correction_factor()
}
