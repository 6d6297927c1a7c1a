//! Freestream initial conditions for the flow solver, derived from the Reynolds number, the
//! turbulence intensity and either the freestream velocity or the Mach number.

use crate::errors::ConditionsError;
use serde::{Deserialize, Serialize};

/// Model constant of the k-omega turbulence closure
pub const C_MU: f64 = 0.09;

/// Which quantity defines the inflow, the other one is derived from the speed of sound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Inflow {
    Velocity(f64),
    Mach(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasProperties {
    /// Ratio of specific heats
    pub gamma: f64,

    /// Specific gas constant in J/(kg K)
    pub r: f64,

    /// Static temperature in K
    pub temperature: f64,

    /// Density in kg/m^3
    pub density: f64,
}

impl Default for GasProperties {
    fn default() -> Self {
        GasProperties {
            gamma: 1.4,
            r: 287.053,
            temperature: 273.0,
            density: 1.0,
        }
    }
}

impl GasProperties {
    pub fn speed_of_sound(&self) -> f64 {
        (self.gamma * self.r * self.temperature).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreestreamConditions {
    pub u_inf: f64,
    pub mach: f64,

    /// Turbulent kinetic energy
    pub k: f64,

    /// Specific dissipation rate
    pub omega: f64,

    /// Kinematic viscosity
    pub nu: f64,

    /// Dynamic viscosity
    pub mu: f64,
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConditionsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConditionsError::NonPositive { name, value })
    }
}

impl FreestreamConditions {
    /// Computes the inflow state.
    ///
    /// # Arguments
    ///
    /// * `tu` - turbulence intensity as a fraction, for example 0.01 for one percent
    /// * `reynolds` - Reynolds number based on the chord length
    /// * `chord` - chord length of the airfoil
    /// * `inflow` - the freestream velocity or Mach number
    /// * `gas` - properties of the freestream gas
    pub fn compute(
        tu: f64,
        reynolds: f64,
        chord: f64,
        inflow: Inflow,
        gas: &GasProperties,
    ) -> Result<FreestreamConditions, ConditionsError> {
        let tu = positive("tu", tu)?;
        let reynolds = positive("reynolds", reynolds)?;
        let chord = positive("chord", chord)?;
        positive("gamma", gas.gamma)?;
        positive("r", gas.r)?;
        positive("temperature", gas.temperature)?;
        let density = positive("density", gas.density)?;

        let a = gas.speed_of_sound();
        let (u_inf, mach) = match inflow {
            Inflow::Velocity(u) => {
                let u = positive("u_inf", u)?;
                (u, u / a)
            }
            Inflow::Mach(ma) => {
                let ma = positive("mach", ma)?;
                (ma * a, ma)
            }
        };

        let k = 1.5 * (u_inf * tu).powi(2);
        let omega = k.sqrt() / (chord * C_MU.powf(0.25));
        let nu = u_inf * chord / reynolds;

        Ok(FreestreamConditions {
            u_inf,
            mach,
            k,
            omega,
            nu,
            mu: density * nu,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn test_from_velocity() {
        let gas = GasProperties::default();
        let c = FreestreamConditions::compute(0.01, 3e5, 0.15, Inflow::Velocity(20.0), &gas)
            .unwrap();

        assert_relative_eq!(20.0, c.u_inf);
        assert_relative_eq!(0.06, c.k, epsilon = 1e-12);
        assert_relative_eq!(2.981424, c.omega, epsilon = 1e-6);
        assert_relative_eq!(1e-5, c.nu, epsilon = 1e-15);
        assert_relative_eq!(20.0 / 331.2275, c.mach, epsilon = 1e-6);
    }

    #[test]
    fn test_velocity_and_mach_agree() {
        let gas = GasProperties::default();
        let a = FreestreamConditions::compute(0.01, 3e5, 0.15, Inflow::Velocity(20.0), &gas)
            .unwrap();
        let b = FreestreamConditions::compute(0.01, 3e5, 0.15, Inflow::Mach(a.mach), &gas)
            .unwrap();

        assert_relative_eq!(a.u_inf, b.u_inf, epsilon = 1e-10);
        assert_relative_eq!(a.k, b.k, epsilon = 1e-10);
        assert_relative_eq!(a.omega, b.omega, epsilon = 1e-10);
    }

    #[test]
    fn test_dynamic_viscosity_scales_with_density() {
        let gas = GasProperties {
            density: 1.2,
            ..GasProperties::default()
        };
        let c = FreestreamConditions::compute(0.01, 3e5, 0.15, Inflow::Velocity(20.0), &gas)
            .unwrap();
        assert_relative_eq!(1.2e-5, c.mu, epsilon = 1e-15);
    }

    #[test_case(0.0, 3e5, 0.15, Inflow::Velocity(20.0))]
    #[test_case(0.01, -1.0, 0.15, Inflow::Velocity(20.0))]
    #[test_case(0.01, 3e5, 0.0, Inflow::Velocity(20.0))]
    #[test_case(0.01, 3e5, 0.15, Inflow::Velocity(f64::NAN))]
    #[test_case(0.01, 3e5, 0.15, Inflow::Mach(0.0))]
    fn test_rejects_non_positive(tu: f64, re: f64, chord: f64, inflow: Inflow) {
        let result = FreestreamConditions::compute(tu, re, chord, inflow, &GasProperties::default());
        assert!(matches!(result, Err(ConditionsError::NonPositive { .. })));
    }
}
