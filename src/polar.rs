use crate::errors::PolarError;
use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod objective;
pub mod record;
pub mod source;

pub use aggregate::{PolarAggregator, TrialState};
pub use objective::{ObjectiveWeights, PolarObjective};
pub use record::{load_polar_files, parse_polar_file};
pub use source::{CoefficientSource, ForceCoefficientFiles};

/// The force and moment coefficients of a converged run. `cx` is the drag-like and `cy` the
/// lift-like coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub cx: f64,
    pub cy: f64,
    pub cm_pitch: f64,
}

impl Coefficients {
    pub fn new(cx: f64, cy: f64, cm_pitch: f64) -> Coefficients {
        Coefficients { cx, cy, cm_pitch }
    }
}

/// The outcome of the solver run at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoefficientSample {
    Converged(Coefficients),
    NotConverged,
}

impl CoefficientSample {
    pub fn converged(cx: f64, cy: f64, cm_pitch: f64) -> CoefficientSample {
        CoefficientSample::Converged(Coefficients::new(cx, cy, cm_pitch))
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, CoefficientSample::Converged(_))
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        match self {
            CoefficientSample::Converged(c) => Some(c),
            CoefficientSample::NotConverged => None,
        }
    }
}

/// Coefficient samples keyed by angle of attack, kept in increasing angle order. Recording an
/// angle twice replaces the earlier sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polar {
    entries: Vec<(f64, CoefficientSample)>,
}

impl Polar {
    pub fn new() -> Polar {
        Polar::default()
    }

    /// Inserts a sample, returning the one it replaced if the angle was already present.
    pub fn insert(
        &mut self,
        alpha: f64,
        sample: CoefficientSample,
    ) -> Result<Option<CoefficientSample>, PolarError> {
        if !alpha.is_finite() {
            return Err(PolarError::InvalidAngle(alpha));
        }
        let alpha = signless_zero(alpha);

        match self.entries.binary_search_by(|(a, _)| a.total_cmp(&alpha)) {
            Ok(i) => Ok(Some(std::mem::replace(&mut self.entries[i].1, sample))),
            Err(i) => {
                self.entries.insert(i, (alpha, sample));
                Ok(None)
            }
        }
    }

    pub fn get(&self, alpha: f64) -> Option<&CoefficientSample> {
        let alpha = signless_zero(alpha);
        self.entries
            .binary_search_by(|(a, _)| a.total_cmp(&alpha))
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Iterates over the samples in increasing angle order
    pub fn iter(&self) -> impl Iterator<Item = (f64, &CoefficientSample)> {
        self.entries.iter().map(|(a, s)| (*a, s))
    }

    pub fn angles(&self) -> Vec<f64> {
        self.entries.iter().map(|(a, _)| *a).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }
}

/// Maps -0.0 to 0.0 so both key the same angle
fn signless_zero(alpha: f64) -> f64 {
    alpha + 0.0
}
