//! Reduction of a polar to the scalar loss handed to the optimizer.
//!
//! Drag is penalized at every angle, while the lift target and the pitching moment are only
//! scored at the design angle. Each angle's contribution is weighted by
//! `1 - |alpha_target - alpha| / (alpha_max - alpha_min)`, which is not clamped and becomes
//! negative for angles far outside of the sampled range.

use super::{CoefficientSample, Polar};
use crate::errors::PolarError;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Marker written in place of coefficient values for angles which did not converge
pub const NOT_CONVERGED_MARKER: &str = "not_converged";

/// Column labels of a polar file. Drag-like values precede lift-like ones.
pub const POLAR_HEADER: [&str; 4] = ["alpha", "cd", "cl", "cm_pitch"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Weight of the drag-like coefficient
    pub c1: f64,

    /// Weight of the deviation from the lift target
    pub c2: f64,

    /// Weight of the pitching moment magnitude
    pub c3: f64,

    /// Contribution assigned to an angle which did not converge
    pub value_not_converged: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectiveWeights {
            c1: 0.45,
            c2: 0.25,
            c3: 0.2,
            value_not_converged: 10.0,
        }
    }
}

impl ObjectiveWeights {
    pub fn new(c1: f64, c2: f64, c3: f64, value_not_converged: f64) -> ObjectiveWeights {
        ObjectiveWeights {
            c1,
            c2,
            c3,
            value_not_converged,
        }
    }

    pub fn validate(&self) -> Result<(), PolarError> {
        for (name, value) in [("c1", self.c1), ("c2", self.c2), ("c3", self.c3)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PolarError::InvalidConfig(format!(
                    "weight {} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !self.value_not_converged.is_finite() {
            return Err(PolarError::InvalidConfig(format!(
                "value_not_converged must be finite, got {}",
                self.value_not_converged
            )));
        }
        Ok(())
    }
}

/// The scoring and reporting configuration for one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarObjective {
    cl_target: f64,
    alpha_target: f64,
    alpha_min: f64,
    alpha_max: f64,
    weights: ObjectiveWeights,
    precision: usize,
}

impl PolarObjective {
    /// Create a new objective. The order of the bounds in `alpha_range` does not matter, but they
    /// must differ since their distance normalizes the angle weighting.
    pub fn new(
        cl_target: f64,
        alpha_target: f64,
        alpha_range: (f64, f64),
        weights: ObjectiveWeights,
    ) -> Result<PolarObjective, PolarError> {
        weights.validate()?;
        let alpha_min = alpha_range.0.min(alpha_range.1);
        let alpha_max = alpha_range.0.max(alpha_range.1);

        if !(cl_target.is_finite() && alpha_target.is_finite()) {
            return Err(PolarError::InvalidConfig(format!(
                "targets must be finite, got cl = {}, alpha = {}",
                cl_target, alpha_target
            )));
        }
        if !(alpha_min.is_finite() && alpha_max.is_finite()) || alpha_min == alpha_max {
            return Err(PolarError::InvalidConfig(format!(
                "alpha range must span a finite, non-zero interval, got [{}, {}]",
                alpha_range.0, alpha_range.1
            )));
        }

        Ok(PolarObjective {
            cl_target,
            alpha_target,
            alpha_min,
            alpha_max,
            weights,
            precision: 6,
        })
    }

    /// Number of decimals used when rendering the polar
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The linear fall-off weight of an angle with its distance from the design angle
    pub fn weight(&self, alpha: f64) -> f64 {
        1.0 - (self.alpha_target - alpha).abs() / (self.alpha_max - self.alpha_min)
    }

    /// The unweighted contribution of a single sample
    pub fn contribution(&self, alpha: f64, sample: &CoefficientSample) -> f64 {
        let w = &self.weights;
        match sample {
            CoefficientSample::NotConverged => w.value_not_converged,
            CoefficientSample::Converged(c) => {
                let drag = w.c1 * c.cx;
                if alpha == self.alpha_target {
                    drag + w.c2 * (self.cl_target - c.cy).abs() + w.c3 * c.cm_pitch.abs()
                } else {
                    drag
                }
            }
        }
    }

    /// Sums the weighted contributions of every angle in the polar.
    pub fn score(&self, polar: &Polar) -> Result<f64, PolarError> {
        if polar.is_empty() {
            return Err(PolarError::EmptyPolar);
        }

        Ok(polar
            .iter()
            .map(|(alpha, sample)| self.weight(alpha) * self.contribution(alpha, sample))
            .sum())
    }

    /// Renders the polar as a tab separated table: a header, a rule, and one row per angle in
    /// increasing order. Non-converged angles carry a marker instead of numbers.
    pub fn render(&self, polar: &Polar) -> String {
        let p = self.precision;
        let rule = "-".repeat(p + 2);
        let mut text = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(text, "{}", POLAR_HEADER.join("\t"));
        let _ = writeln!(text, "{}", [rule.as_str(); 4].join("\t"));
        for (alpha, sample) in polar.iter() {
            match sample {
                CoefficientSample::Converged(c) => {
                    let _ = writeln!(
                        text,
                        "{:.p$}\t{:.p$}\t{:.p$}\t{:.p$}",
                        alpha,
                        c.cx,
                        c.cy,
                        c.cm_pitch,
                        p = p
                    );
                }
                CoefficientSample::NotConverged => {
                    let _ = writeln!(
                        text,
                        "{:.p$}\t{m}\t{m}\t{m}",
                        alpha,
                        m = NOT_CONVERGED_MARKER,
                        p = p
                    );
                }
            }
        }
        text
    }
}
