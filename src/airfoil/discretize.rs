use crate::errors::GeometryError;
use itertools::Itertools;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Controls how the chord is sampled when generating an outline. Fixed for the lifetime of a
/// generator and reused for every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscretizationConfig {
    /// Number of points on each side of the airfoil
    pub n_points: usize,

    /// Cluster the points towards the leading and trailing edges, otherwise space them evenly
    pub cosine_distributed: bool,

    /// Chordwise position of the leading edge
    pub x_start: f64,

    /// Chordwise position of the trailing edge
    pub x_stop: f64,
}

impl Default for DiscretizationConfig {
    fn default() -> Self {
        DiscretizationConfig {
            n_points: 1000,
            cosine_distributed: true,
            x_start: 0.0,
            x_stop: 1.0,
        }
    }
}

impl DiscretizationConfig {
    pub fn new(n_points: usize, cosine_distributed: bool, x_start: f64, x_stop: f64) -> Self {
        DiscretizationConfig {
            n_points,
            cosine_distributed,
            x_start,
            x_stop,
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.n_points < 3 {
            return Err(GeometryError::InvalidConfig(format!(
                "at least 3 points per side are required, got {}",
                self.n_points
            )));
        }
        if !(self.x_start.is_finite() && self.x_stop.is_finite()) || self.x_start >= self.x_stop {
            return Err(GeometryError::InvalidConfig(format!(
                "chord bounds must be finite with x_start < x_stop, got [{}, {}]",
                self.x_start, self.x_stop
            )));
        }
        Ok(())
    }

    pub fn chord(&self) -> f64 {
        self.x_stop - self.x_start
    }

    /// Computes the chordwise sample positions on the unit interval, in increasing order starting
    /// at 0.0 and ending at 1.0.
    pub fn unit_stations(&self) -> Result<Vec<f64>, GeometryError> {
        self.validate()?;

        let last = (self.n_points - 1) as f64;
        let linear = (0..self.n_points).map(|i| i as f64 / last);
        let raw: Vec<f64> = if self.cosine_distributed {
            linear.map(|t| 0.5 * (1.0 - (PI * t).cos())).collect()
        } else {
            linear.collect()
        };

        let (lo, hi) = raw
            .iter()
            .cloned()
            .minmax()
            .into_option()
            .ok_or_else(|| GeometryError::InvalidConfig("no sample positions".to_string()))?;

        Ok(raw.iter().map(|x| (x - lo) / (hi - lo)).collect())
    }

    /// Maps a point from unit chord coordinates onto the configured chord bounds. Both axes share
    /// the chord length as scale so the section keeps its aspect ratio.
    ///
    /// Only x is shifted by `x_start`; y stays centered on the chord line. Adding `x_start` to
    /// both axes, as the Python optimizer did, lifts the whole section whenever `x_start != 0`.
    pub fn to_chord(&self, p: &Point2<f64>) -> Point2<f64> {
        let c = self.chord();
        Point2::new(self.x_start + p.x * c, p.y * c)
    }
}
