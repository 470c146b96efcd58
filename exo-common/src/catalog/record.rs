//! Catalog record and Earth Similarity Index scoring

use serde::Serialize;
use std::fmt;

/// Earth radius in Earth radii (reference for the radius sub-score)
pub const EARTH_RADIUS: f64 = 1.0;

/// Earth equilibrium temperature in Kelvin (reference for the temperature sub-score)
pub const EARTH_EQUILIBRIUM_TEMP_K: f64 = 288.0;

/// Earth Similarity Index from planet radius (Earth radii) and equilibrium temperature (K)
///
/// ```text
/// esi_radius = 1 - |radius - 1| / (radius + 1)
/// esi_temp   = 1 - |temp - 288| / (temp + 288)
/// score      = sqrt(esi_radius * esi_temp)
/// ```
///
/// The result is not clamped. A negative product under the root yields NaN,
/// which cannot happen for the positive inputs [`CelestialRecord::new`] accepts.
///
/// # Examples
/// ```
/// use exo_common::similarity_score;
///
/// assert_eq!(similarity_score(1.0, 288.0), 1.0);
/// assert!(similarity_score(11.2, 1500.0) < 0.5);
/// ```
pub fn similarity_score(radius: f64, equilibrium_temp: f64) -> f64 {
    let esi_radius = 1.0 - (radius - EARTH_RADIUS).abs() / (radius + EARTH_RADIUS);
    let esi_temp = 1.0
        - (equilibrium_temp - EARTH_EQUILIBRIUM_TEMP_K).abs()
            / (equilibrium_temp + EARTH_EQUILIBRIUM_TEMP_K);
    (esi_radius * esi_temp).sqrt()
}

/// Why a catalog row was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingName,
    InvalidRadius,
    InvalidEquilibriumTemp,
    InvalidHostStarTemp,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::MissingName => "missing planet name",
            Rejection::InvalidRadius => "radius is not a positive finite number",
            Rejection::InvalidEquilibriumTemp => {
                "equilibrium temperature is not a positive finite number"
            }
            Rejection::InvalidHostStarTemp => "host star temperature is not a finite number",
        };
        f.write_str(reason)
    }
}

/// One exoplanet from the catalog with its derived similarity score
///
/// Only constructed through [`CelestialRecord::new`], so the score always
/// matches radius and temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialRecord {
    name: String,
    radius: f64,
    equilibrium_temp: f64,
    host_star_temp: f64,
    similarity_score: f64,
}

impl CelestialRecord {
    /// Validate raw values and compute the similarity score
    ///
    /// Requires a non-empty name, a positive finite radius and equilibrium
    /// temperature, and a finite host star temperature.
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        equilibrium_temp: f64,
        host_star_temp: f64,
    ) -> Result<Self, Rejection> {
        let name = name.into();
        if name.is_empty() {
            return Err(Rejection::MissingName);
        }
        if !is_positive_finite(radius) {
            return Err(Rejection::InvalidRadius);
        }
        if !is_positive_finite(equilibrium_temp) {
            return Err(Rejection::InvalidEquilibriumTemp);
        }
        if !host_star_temp.is_finite() {
            return Err(Rejection::InvalidHostStarTemp);
        }

        Ok(Self {
            similarity_score: similarity_score(radius, equilibrium_temp),
            name,
            radius,
            equilibrium_temp,
            host_star_temp,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Planet radius in Earth radii
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Planet equilibrium temperature in Kelvin
    pub fn equilibrium_temp(&self) -> f64 {
        self.equilibrium_temp
    }

    /// Host star effective temperature in Kelvin
    pub fn host_star_temp(&self) -> f64 {
        self.host_star_temp
    }

    /// Earth Similarity Index
    pub fn similarity_score(&self) -> f64 {
        self.similarity_score
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
