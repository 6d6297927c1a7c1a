//! Reading back the polar files written for each trial.

use super::objective::{NOT_CONVERGED_MARKER, POLAR_HEADER};
use super::{CoefficientSample, Polar};
use crate::errors::PolarError;
use std::fs;
use std::path::Path;

const POLAR_PREFIX: &str = "polar_trial_";
const POLAR_EXTENSION: &str = ".dat";

/// Header and rule precede the data rows
const POLAR_HEADER_LINES: usize = 2;

pub fn polar_file_name(trial: usize) -> String {
    format!("{}{}{}", POLAR_PREFIX, trial, POLAR_EXTENSION)
}

/// The trial number encoded in a polar file name, if it is one
pub fn trial_of_file_name(name: &str) -> Option<usize> {
    name.strip_prefix(POLAR_PREFIX)?
        .strip_suffix(POLAR_EXTENSION)?
        .parse()
        .ok()
}

/// Parses a rendered polar. Rows whose coefficient columns hold the not-converged marker become
/// `NotConverged` samples.
pub fn parse_polar_file(path: &Path, text: &str) -> Result<Polar, PolarError> {
    let mut polar = Polar::new();
    for (i, line) in text.lines().enumerate().skip(POLAR_HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |reason: String| PolarError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            reason,
        };

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() != POLAR_HEADER.len() {
            return Err(parse_error(format!(
                "expected {} columns, found {}",
                POLAR_HEADER.len(),
                columns.len()
            )));
        }

        let value = |j: usize| {
            columns[j]
                .parse::<f64>()
                .map_err(|e| parse_error(format!("column {}: {}", POLAR_HEADER[j], e)))
        };

        let alpha = value(0)?;
        let sample = if columns[1..].iter().all(|c| *c == NOT_CONVERGED_MARKER) {
            CoefficientSample::NotConverged
        } else {
            CoefficientSample::converged(value(1)?, value(2)?, value(3)?)
        };
        polar.insert(alpha, sample)?;
    }
    Ok(polar)
}

/// Loads every polar file in a directory, ordered by trial number. Other files are ignored.
pub fn load_polar_files(dir: &Path) -> Result<Vec<(usize, Polar)>, PolarError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(trial) = trial_of_file_name(&name) {
            files.push((trial, entry.path()));
        }
    }
    files.sort_by_key(|(trial, _)| *trial);

    files
        .into_iter()
        .map(|(trial, path)| {
            let text = fs::read_to_string(&path)?;
            Ok((trial, parse_polar_file(&path, &text)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::{ObjectiveWeights, PolarObjective};
    use test_case::test_case;

    fn objective() -> PolarObjective {
        PolarObjective::new(0.4, 0.0, (-2.0, 5.0), ObjectiveWeights::default()).unwrap()
    }

    fn sample_polar() -> Polar {
        let mut polar = Polar::new();
        polar
            .insert(-2.0, CoefficientSample::converged(0.03, 0.1, -0.02))
            .unwrap();
        polar
            .insert(0.0, CoefficientSample::converged(0.02, 0.4, -0.01))
            .unwrap();
        polar.insert(3.5, CoefficientSample::NotConverged).unwrap();
        polar
    }

    #[test]
    fn test_rendered_polar_reads_back() {
        let polar = sample_polar();
        let text = objective().render(&polar);
        let parsed = parse_polar_file(Path::new("polar_trial_0.dat"), &text).unwrap();
        assert_eq!(polar, parsed);
    }

    #[test]
    fn test_columns_are_drag_then_lift() {
        let text = "alpha\tcd\tcl\tcm_pitch\n----\t----\t----\t----\n1.0\t0.02\t0.4\t-0.01\n";
        let polar = parse_polar_file(Path::new("p.dat"), text).unwrap();
        let c = polar.get(1.0).unwrap().coefficients().unwrap();
        assert_eq!(0.02, c.cx);
        assert_eq!(0.4, c.cy);
    }

    #[test_case("1.0\t0.02\t0.4\n"; "short row")]
    #[test_case("1.0\t0.02\tlift\t-0.01\n"; "bad number")]
    #[test_case("1.0\tnot_converged\t0.4\t-0.01\n"; "partial marker")]
    fn test_malformed_row(row: &str) {
        let text = format!("alpha\tcd\tcl\tcm_pitch\n----\n{}", row);
        let result = parse_polar_file(Path::new("p.dat"), &text);
        assert!(matches!(result, Err(PolarError::Parse { line: 3, .. })));
    }

    #[test_case("polar_trial_12.dat", Some(12))]
    #[test_case("polar_trial_x.dat", None)]
    #[test_case("polar_trial_3.txt", None)]
    #[test_case("log.optimization", None)]
    fn test_trial_of_file_name(name: &str, expected: Option<usize>) {
        assert_eq!(expected, trial_of_file_name(name));
    }

    #[test]
    fn test_load_sorted_by_trial() {
        let dir = tempfile::tempdir().unwrap();
        let text = objective().render(&sample_polar());
        for trial in [10, 2, 0] {
            fs::write(dir.path().join(polar_file_name(trial)), &text).unwrap();
        }
        fs::write(dir.path().join("log.optimization"), "trial\n").unwrap();

        let loaded = load_polar_files(dir.path()).unwrap();
        let trials: Vec<usize> = loaded.iter().map(|(t, _)| *t).collect();
        assert_eq!(vec![0, 2, 10], trials);
        assert!(loaded.iter().all(|(_, p)| *p == sample_polar()));
    }
}
