//! Settings for an optimization run, loaded from JSON. Every field is optional and falls back to
//! the values of the reference setup.

use crate::airfoil::discretize::DiscretizationConfig;
use crate::airfoil::ShapeParameters;
use crate::conditions::{FreestreamConditions, GasProperties, Inflow};
use crate::errors::{ConditionsError, ConfigError};
use crate::polar::{ObjectiveWeights, PolarObjective};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lower and upper bound of a parameter, written as a two element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds(pub f64, pub f64);

impl Bounds {
    pub fn lower(&self) -> f64 {
        self.0
    }

    pub fn upper(&self) -> f64 {
        self.1
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.0 + self.1)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.0 && value <= self.1
    }
}

/// The search space handed to the optimizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterBounds {
    pub f_max: Bounds,
    pub t_max: Bounds,
    pub xf: Bounds,
    pub kr: Bounds,
    pub n1: Bounds,
    pub n2: Bounds,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        ParameterBounds {
            f_max: Bounds(0.005, 0.05),
            t_max: Bounds(0.05, 0.15),
            xf: Bounds(0.35, 0.75),
            kr: Bounds(0.2, 0.8),
            n1: Bounds(0.4, 0.6),
            n2: Bounds(0.8, 1.1),
        }
    }
}

impl ParameterBounds {
    fn named(&self) -> [(&'static str, Bounds); 6] {
        [
            ("f_max", self.f_max),
            ("t_max", self.t_max),
            ("xf", self.xf),
            ("kr", self.kr),
            ("n1", self.n1),
            ("n2", self.n2),
        ]
    }

    /// The center of the search space
    pub fn midpoint(&self) -> ShapeParameters {
        ShapeParameters::new(
            self.n1.midpoint(),
            self.n2.midpoint(),
            self.kr.midpoint(),
            self.f_max.midpoint(),
            self.xf.midpoint(),
            self.t_max.midpoint(),
        )
    }

    pub fn contains(&self, params: &ShapeParameters) -> bool {
        self.f_max.contains(params.f_max)
            && self.t_max.contains(params.t_max)
            && self.xf.contains(params.xf)
            && self.kr.contains(params.kr)
            && self.n1.contains(params.n1)
            && self.n2.contains(params.n2)
    }
}

/// Which freestream quantity is prescribed when computing the initial conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ComputeFrom {
    #[serde(rename = "U")]
    Velocity,

    #[serde(rename = "Ma")]
    Mach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bounds: ParameterBounds,

    /// Freestream Mach number, used when `compute_ic` is `Ma`
    pub ma: Option<f64>,

    /// Reynolds number based on the chord
    pub re: f64,
    pub compute_ic: ComputeFrom,

    /// Freestream velocity, used when `compute_ic` is `U`
    pub u_inf: Option<f64>,

    /// Turbulence intensity as a fraction (not in percent)
    pub tu: f64,
    pub rho_inf: f64,
    pub t_inf: f64,
    pub chord: f64,

    pub n_trials: usize,
    pub alpha_target: f64,
    pub alpha_range: (f64, f64),
    pub cl_target: f64,
    pub weights: ObjectiveWeights,
    pub write_precision: usize,

    pub n_points: usize,
    pub cosine_distributed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bounds: ParameterBounds::default(),
            ma: Some(0.1),
            re: 3e5,
            compute_ic: ComputeFrom::Velocity,
            u_inf: Some(20.0),
            tu: 0.01,
            rho_inf: 1.0,
            t_inf: 273.0,
            chord: 0.15,
            n_trials: 1,
            alpha_target: 0.0,
            alpha_range: (-2.0, 5.0),
            cl_target: 0.4,
            weights: ObjectiveWeights::default(),
            write_precision: 6,
            n_points: 1000,
            cosine_distributed: true,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Settings, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Settings, ConfigError> {
        Settings::from_json(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, b) in self.bounds.named() {
            if !(b.0.is_finite() && b.1.is_finite()) || b.0 > b.1 {
                return Err(ConfigError::Invalid(format!(
                    "bounds of {} must be finite and ordered, got [{}, {}]",
                    name, b.0, b.1
                )));
            }
        }
        if self.tu >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "tu is a fraction, not a percentage, got {}",
                self.tu
            )));
        }

        self.discretization()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.objective()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.freestream()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// The airfoil spans the chord starting at the origin
    pub fn discretization(&self) -> DiscretizationConfig {
        DiscretizationConfig::new(self.n_points, self.cosine_distributed, 0.0, self.chord)
    }

    pub fn objective(&self) -> Result<PolarObjective, crate::errors::PolarError> {
        Ok(PolarObjective::new(
            self.cl_target,
            self.alpha_target,
            self.alpha_range,
            self.weights,
        )?
        .with_precision(self.write_precision))
    }

    pub fn gas(&self) -> GasProperties {
        GasProperties {
            temperature: self.t_inf,
            density: self.rho_inf,
            ..GasProperties::default()
        }
    }

    pub fn freestream(&self) -> Result<FreestreamConditions, ConditionsError> {
        let inflow = match self.compute_ic {
            ComputeFrom::Velocity => Inflow::Velocity(self.u_inf.ok_or(ConditionsError::Underdetermined)?),
            ComputeFrom::Mach => Inflow::Mach(self.ma.ok_or(ConditionsError::Underdetermined)?),
        };
        FreestreamConditions::compute(self.tu, self.re, self.chord, inflow, &self.gas())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(Settings::default(), settings);
        assert!(settings.bounds.contains(&settings.bounds.midpoint()));
        assert!(settings.bounds.midpoint().validate().is_ok());
    }

    #[test]
    fn test_partial_settings() {
        let text = r#"{
            "bounds": { "xf": [0.3, 0.5] },
            "compute_ic": "Ma",
            "alpha_range": [-4.0, 8.0],
            "weights": { "c2": 0.35 }
        }"#;
        let settings = Settings::from_json(text).unwrap();

        assert_eq!(Bounds(0.3, 0.5), settings.bounds.xf);
        assert_eq!(Bounds(0.4, 0.6), settings.bounds.n1);
        assert_eq!((-4.0, 8.0), settings.alpha_range);
        assert_relative_eq!(0.35, settings.weights.c2);
        assert_relative_eq!(0.45, settings.weights.c1);

        let freestream = settings.freestream().unwrap();
        assert_relative_eq!(0.1, freestream.mach);
    }

    #[test]
    fn test_reversed_bounds_rejected() {
        let result = Settings::from_json(r#"{ "bounds": { "t_max": [0.15, 0.05] } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_degenerate_alpha_range_rejected() {
        let result = Settings::from_json(r#"{ "alpha_range": [2.0, 2.0] }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_velocity_rejected() {
        let result = Settings::from_json(r#"{ "u_inf": null }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Settings::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "chord": 0.2, "n_trials": 5 }"#).unwrap();
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(5, settings.n_trials);
        assert_relative_eq!(0.2, settings.discretization().x_stop);
    }
}
