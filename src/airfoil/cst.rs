//! Class-shape transformation (CST) thickness distribution with a rational parabolic camber line.
//!
//! The thickness envelope follows Kulfan's method: a class function `C(x) = x^n1 (1 - x)^n2`
//! multiplied by a shape function `S(x) = x / kr + kr (1 - x)`. The camber line is the parabolic
//! family `y = a x (1 - x) / (1 + b x)` with `a = f_max / xf^2` and `b = (1 - 2 xf) / xf^2`, which
//! peaks at `f_max` at `x = xf`.

use crate::airfoil::{CamberStation, ShapeParameters};
use crate::errors::GeometryError;
use ncollide2d::na::Point2;

/// A section shape is an entity which can compute the position of the mean camber line and an
/// (unscaled) thickness distribution at fractions of the chord. This provides the information
/// necessary to compute the airfoil surfaces.
pub trait SectionShape {
    /// Height of the camber line at a chord fraction from 0.0 to 1.0
    fn camber_line(&self, x: f64) -> f64;

    /// Relative thickness distribution at a chord fraction from 0.0 to 1.0. Only its shape
    /// matters, the stations are scaled so that the peak matches `t_max()`.
    fn thickness(&self, x: f64) -> f64;

    /// The full maximum thickness of the section as a fraction of the chord
    fn t_max(&self) -> f64;

    /// Computes the camber stations at the given chord fractions. The thickness is split evenly
    /// above and below the camber line and measured perpendicular to the chord.
    fn stations(&self, xs: &[f64]) -> Result<Vec<CamberStation>, GeometryError> {
        let thickness: Vec<f64> = xs.iter().map(|x| self.thickness(*x)).collect();
        let peak = thickness.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !(peak.is_finite() && peak > 0.0) {
            return Err(GeometryError::invalid(
                "thickness",
                peak,
                "thickness distribution has no positive peak",
            ));
        }

        let scale = 0.5 * self.t_max() / peak;
        Ok(xs
            .iter()
            .zip(thickness.iter())
            .map(|(&x, &t)| {
                let c = self.camber_line(x);
                CamberStation::new(
                    Point2::new(x, c),
                    Point2::new(x, c + t * scale),
                    Point2::new(x, c - t * scale),
                )
            })
            .collect())
    }
}

/// A validated set of shape parameters, ready for evaluation.
#[derive(Debug, Clone, Copy)]
pub struct CstSection {
    params: ShapeParameters,
    a: f64,
    b: f64,
}

impl CstSection {
    /// Create a new section, failing if any of the parameters leave the class/shape functions or
    /// the camber line undefined.
    pub fn new(params: ShapeParameters) -> Result<CstSection, GeometryError> {
        params.validate()?;
        let xf2 = params.xf.powi(2);
        Ok(CstSection {
            params,
            a: params.f_max / xf2,
            b: (1.0 - 2.0 * params.xf) / xf2,
        })
    }

    pub fn params(&self) -> &ShapeParameters {
        &self.params
    }

    pub fn class_function(&self, x: f64) -> f64 {
        x.powf(self.params.n1) * (1.0 - x).powf(self.params.n2)
    }

    pub fn shape_function(&self, x: f64) -> f64 {
        x / self.params.kr + self.params.kr * (1.0 - x)
    }
}

impl SectionShape for CstSection {
    fn camber_line(&self, x: f64) -> f64 {
        self.a * x * (1.0 - x) / (1.0 + self.b * x)
    }

    fn thickness(&self, x: f64) -> f64 {
        self.class_function(x) * self.shape_function(x)
    }

    fn t_max(&self) -> f64 {
        self.params.t_max
    }
}
