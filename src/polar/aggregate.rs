use super::objective::PolarObjective;
use super::record::polar_file_name;
use super::source::CoefficientSource;
use super::{CoefficientSample, Polar};
use crate::errors::PolarError;
use crate::observe::{Event, Observer};
use crate::serialize::write_replacing;
use std::fs;
use std::path::{Path, PathBuf};

/// Where an aggregator is in the lifecycle of a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialState {
    /// Nothing has been recorded since the last render
    Empty,

    /// At least one sample has been recorded but the polar has not been scored
    Accumulating,

    /// The accumulated polar has been scored. Scoring again returns the same value; recording
    /// another sample returns to `Accumulating`.
    Scored(f64),
}

/// Collects the coefficient samples of one trial, scores them and writes the polar record. Once
/// the polar has been rendered the accumulated samples are discarded, ready for the next trial.
pub struct PolarAggregator<O = ()> {
    objective: PolarObjective,
    polar: Polar,
    state: TrialState,
    observer: O,
}

impl PolarAggregator<()> {
    pub fn new(objective: PolarObjective) -> PolarAggregator<()> {
        PolarAggregator {
            objective,
            polar: Polar::new(),
            state: TrialState::Empty,
            observer: (),
        }
    }
}

impl<O: Observer> PolarAggregator<O> {
    pub fn with_observer<P: Observer>(self, observer: P) -> PolarAggregator<P> {
        PolarAggregator {
            objective: self.objective,
            polar: self.polar,
            state: self.state,
            observer,
        }
    }

    pub fn objective(&self) -> &PolarObjective {
        &self.objective
    }

    pub fn polar(&self) -> &Polar {
        &self.polar
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn record(&mut self, alpha: f64, sample: CoefficientSample) -> Result<(), PolarError> {
        self.polar.insert(alpha, sample)?;
        self.state = TrialState::Accumulating;
        self.observer.observe(&Event::SampleRecorded {
            alpha,
            converged: sample.is_converged(),
        });
        Ok(())
    }

    /// Scores the accumulated polar. Fails with `EmptyPolar` if nothing has been recorded since
    /// the last render.
    pub fn score(&mut self) -> Result<f64, PolarError> {
        match self.state {
            TrialState::Scored(objective) => Ok(objective),
            _ => {
                let objective = self.objective.score(&self.polar)?;
                self.state = TrialState::Scored(objective);
                self.observer.observe(&Event::TrialScored {
                    objective,
                    angles: self.polar.len(),
                });
                Ok(objective)
            }
        }
    }

    /// Renders the accumulated polar and clears it.
    pub fn render(&mut self) -> Result<String, PolarError> {
        if self.polar.is_empty() {
            return Err(PolarError::EmptyPolar);
        }
        let text = self.objective.render(&self.polar);
        self.reset();
        Ok(text)
    }

    /// Renders the accumulated polar into `<dir>/polar_trial_<trial>.dat` and clears it.
    pub fn write_polar_file(&mut self, dir: &Path, trial: usize) -> Result<PathBuf, PolarError> {
        if self.polar.is_empty() {
            return Err(PolarError::EmptyPolar);
        }
        let text = self.objective.render(&self.polar);

        fs::create_dir_all(dir)?;
        let path = dir.join(polar_file_name(trial));
        write_replacing(&path, &text)?;

        self.reset();
        self.observer.observe(&Event::PolarWritten {
            trial,
            path: path.clone(),
        });
        Ok(path)
    }

    /// Discards the accumulated samples without rendering them.
    pub fn reset(&mut self) {
        self.polar.clear();
        self.state = TrialState::Empty;
    }

    /// Loads every angle of a run through the source, then scores the trial, writes its polar
    /// record into `dir` and returns the objective.
    pub fn evaluate_trial<S: CoefficientSource + ?Sized>(
        &mut self,
        trial: usize,
        run: &str,
        labels: &[String],
        source: &S,
        dir: &Path,
    ) -> Result<f64, PolarError> {
        self.reset();
        for label in labels {
            let alpha = label
                .parse::<f64>()
                .map_err(|_| PolarError::InvalidLabel(label.clone()))?;
            let sample = source.sample(run, label)?;
            self.record(alpha, sample)?;
        }

        let objective = self.score()?;
        self.write_polar_file(dir, trial)?;
        Ok(objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::objective::ObjectiveWeights;
    use crate::polar::record::parse_polar_file;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    struct Samples(HashMap<String, CoefficientSample>);

    impl CoefficientSource for Samples {
        fn sample(&self, _run: &str, alpha_label: &str) -> Result<CoefficientSample, PolarError> {
            Ok(self
                .0
                .get(alpha_label)
                .cloned()
                .unwrap_or(CoefficientSample::NotConverged))
        }
    }

    fn aggregator() -> PolarAggregator<Vec<Event>> {
        let objective =
            PolarObjective::new(0.4, 0.0, (-2.0, 5.0), ObjectiveWeights::default()).unwrap();
        PolarAggregator::new(objective).with_observer(Vec::<Event>::new())
    }

    #[test]
    fn test_lifecycle() {
        let mut agg = aggregator();
        assert_eq!(TrialState::Empty, agg.state());
        assert!(matches!(agg.score(), Err(PolarError::EmptyPolar)));

        agg.record(0.0, CoefficientSample::converged(0.02, 0.4, -0.01))
            .unwrap();
        assert_eq!(TrialState::Accumulating, agg.state());

        let first = agg.score().unwrap();
        assert_relative_eq!(0.011, first, epsilon = 1e-12);
        assert_eq!(TrialState::Scored(first), agg.state());
        assert_eq!(first, agg.score().unwrap());

        let text = agg.render().unwrap();
        assert_eq!(3, text.lines().count());
        assert_eq!(TrialState::Empty, agg.state());
        assert!(agg.polar().is_empty());
        assert!(matches!(agg.score(), Err(PolarError::EmptyPolar)));
        assert!(matches!(agg.render(), Err(PolarError::EmptyPolar)));
    }

    #[test]
    fn test_recording_after_score_rescores() {
        let mut agg = aggregator();
        agg.record(0.0, CoefficientSample::converged(0.02, 0.4, -0.01))
            .unwrap();
        let first = agg.score().unwrap();
        agg.record(2.0, CoefficientSample::NotConverged).unwrap();
        assert_eq!(TrialState::Accumulating, agg.state());
        assert!(agg.score().unwrap() > first);
    }

    #[test]
    fn test_events() {
        let mut agg = aggregator();
        agg.record(1.0, CoefficientSample::NotConverged).unwrap();
        agg.score().unwrap();
        agg.score().unwrap();

        let events = agg.into_observer();
        assert_eq!(
            vec![
                Event::SampleRecorded {
                    alpha: 1.0,
                    converged: false
                },
                Event::TrialScored {
                    objective: 10.0 * (1.0 - 1.0 / 7.0),
                    angles: 1
                },
            ],
            events
        );
    }

    #[test]
    fn test_evaluate_trial() {
        let dir = tempfile::tempdir().unwrap();
        let mut samples = HashMap::new();
        samples.insert(
            "0".to_string(),
            CoefficientSample::converged(0.02, 0.4, -0.01),
        );
        let source = Samples(samples);
        let labels = vec!["-2".to_string(), "0".to_string()];

        let mut agg = aggregator();
        let objective = agg
            .evaluate_trial(7, "trial_0", &labels, &source, dir.path())
            .unwrap();

        let expected = 0.011 + (1.0 - 2.0 / 7.0) * 10.0;
        assert_relative_eq!(expected, objective, epsilon = 1e-12);
        assert_eq!(TrialState::Empty, agg.state());

        let text = fs::read_to_string(dir.path().join("polar_trial_7.dat")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(4, lines.len());
        assert!(lines[2].starts_with("-2.000000\tnot_converged"));
        let row: Vec<&str> = lines[3].split('\t').collect();
        assert_eq!(vec!["0.000000", "0.020000", "0.400000", "-0.010000"], row);
    }

    #[test]
    fn test_negative_zero_label_is_the_design_angle() {
        let mut agg = aggregator();
        agg.record(0.0, CoefficientSample::converged(0.02, 0.4, -0.01))
            .unwrap();
        agg.record(-0.0, CoefficientSample::converged(0.02, 0.4, -0.01))
            .unwrap();

        assert_eq!(1, agg.polar().len());
        assert_relative_eq!(0.011, agg.score().unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_written_polar_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut agg = aggregator();
        agg.record(-2.0, CoefficientSample::NotConverged).unwrap();
        agg.record(0.0, CoefficientSample::converged(0.02, 0.4, -0.01))
            .unwrap();
        let expected = agg.polar().clone();
        let path = agg.write_polar_file(dir.path(), 3).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(expected, parse_polar_file(&path, &text).unwrap());
        assert!(!dir.path().join("polar_trial_3.dat.tmp").exists());
    }

    #[test]
    fn test_evaluate_trial_bad_label() {
        let dir = tempfile::tempdir().unwrap();
        let source = Samples(HashMap::new());
        let mut agg = aggregator();
        let result = agg.evaluate_trial(0, "run", &["abc".to_string()], &source, dir.path());
        assert!(matches!(result, Err(PolarError::InvalidLabel(_))));
    }
}
