//! Structured events reported by the geometry generator and the polar aggregator.
//!
//! Neither component touches global logging state. Each one owns an [`Observer`] supplied by the
//! caller and reports what it did through it. `()` discards events, a `Vec<Event>` collects them
//! and [`TracingObserver`] forwards them to `tracing`.

use crate::airfoil::ShapeParameters;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    GeometryGenerated {
        name: String,
        params: ShapeParameters,
        points: usize,
    },
    GeometryWritten {
        path: PathBuf,
    },
    SampleRecorded {
        alpha: f64,
        converged: bool,
    },
    TrialScored {
        objective: f64,
        angles: usize,
    },
    PolarWritten {
        trial: usize,
        path: PathBuf,
    },
}

/// Receives the events emitted by a component.
pub trait Observer {
    fn observe(&mut self, event: &Event);
}

impl Observer for () {
    fn observe(&mut self, _event: &Event) {}
}

impl Observer for Vec<Event> {
    fn observe(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, event: &Event) {
        (**self).observe(event)
    }
}

/// Forwards events to whatever `tracing` subscriber the caller installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&mut self, event: &Event) {
        match event {
            Event::GeometryGenerated {
                name,
                params,
                points,
            } => tracing::info!(name = %name, params = ?params, points, "Generated airfoil geometry"),
            Event::GeometryWritten { path } => {
                tracing::debug!(path = %path.display(), "Wrote airfoil geometry")
            }
            Event::SampleRecorded { alpha, converged } => {
                if *converged {
                    tracing::debug!(alpha, "Recorded coefficient sample");
                } else {
                    tracing::warn!(alpha, "Angle of attack is not converged");
                }
            }
            Event::TrialScored { objective, angles } => {
                tracing::info!(objective, angles, "Trial scored")
            }
            Event::PolarWritten { trial, path } => {
                tracing::info!(trial, path = %path.display(), "Wrote polar file")
            }
        }
    }
}
