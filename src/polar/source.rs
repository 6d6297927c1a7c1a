use super::CoefficientSample;
use crate::errors::PolarError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Anything which can return the final coefficients of the run for one angle of attack.
/// Implementations report a run which produced no data as `NotConverged`, and reserve errors for
/// data which exists but cannot be read.
pub trait CoefficientSource {
    fn sample(&self, run: &str, alpha_label: &str) -> Result<CoefficientSample, PolarError>;
}

/// Reads the force coefficient time series written by the flow solver's force function object,
/// found at `<root>/<run>/postProcessing/forces/alpha_<label>/coefficient.dat`. Only the last
/// time step is used.
#[derive(Debug, Clone)]
pub struct ForceCoefficientFiles {
    root: PathBuf,
}

const FORCES_DIR: [&str; 2] = ["postProcessing", "forces"];
const ALPHA_PREFIX: &str = "alpha_";
const COEFFICIENT_FILE: &str = "coefficient.dat";

// Columns of the coefficient file: time, Cd, Cd(f), Cd(r), Cl, Cl(f), Cl(r), CmPitch, ...
const TIME_COLUMN: usize = 0;
const CX_COLUMN: usize = 1;
const CY_COLUMN: usize = 4;
const CM_PITCH_COLUMN: usize = 7;

impl ForceCoefficientFiles {
    pub fn new(root: impl Into<PathBuf>) -> ForceCoefficientFiles {
        ForceCoefficientFiles { root: root.into() }
    }

    fn forces_dir(&self, run: &str) -> PathBuf {
        FORCES_DIR
            .iter()
            .fold(self.root.join(run), |path, part| path.join(part))
    }

    pub fn coefficient_path(&self, run: &str, alpha_label: &str) -> PathBuf {
        self.forces_dir(run)
            .join(format!("{}{}", ALPHA_PREFIX, alpha_label))
            .join(COEFFICIENT_FILE)
    }

    /// Lists the angle labels a run produced output for, in increasing numeric order. Directories
    /// whose suffix is not a number are ignored, and a run without any output has no labels.
    pub fn angle_labels(&self, run: &str) -> Result<Vec<String>, PolarError> {
        let entries = match fs::read_dir(self.forces_dir(run)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut labels: Vec<(f64, String)> = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(label) = name.strip_prefix(ALPHA_PREFIX) {
                if let Ok(alpha) = label.parse::<f64>() {
                    labels.push((alpha, label.to_string()));
                }
            }
        }

        labels.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(labels.into_iter().map(|(_, label)| label).collect())
    }
}

impl CoefficientSource for ForceCoefficientFiles {
    fn sample(&self, run: &str, alpha_label: &str) -> Result<CoefficientSample, PolarError> {
        let path = self.coefficient_path(run, alpha_label);
        match fs::read_to_string(&path) {
            Ok(text) => parse_last_coefficients(&path, &text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(CoefficientSample::NotConverged),
            Err(e) => Err(e.into()),
        }
    }
}

/// Extracts the coefficients of the last data row. A file without data rows, or whose last row
/// holds non-finite values, belongs to a run which did not converge.
pub fn parse_last_coefficients(path: &Path, text: &str) -> Result<CoefficientSample, PolarError> {
    let last = text
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .last();

    let (index, line) = match last {
        Some(found) => found,
        None => return Ok(CoefficientSample::NotConverged),
    };

    let parse_error = |reason: String| PolarError::Parse {
        path: path.to_path_buf(),
        line: index + 1,
        reason,
    };

    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() <= CM_PITCH_COLUMN {
        return Err(parse_error(format!(
            "expected at least {} columns, found {}",
            CM_PITCH_COLUMN + 1,
            columns.len()
        )));
    }

    let value = |i: usize| {
        columns[i]
            .parse::<f64>()
            .map_err(|e| parse_error(format!("column {}: {}", i, e)))
    };

    value(TIME_COLUMN)?;
    let (cx, cy, cm_pitch) = (value(CX_COLUMN)?, value(CY_COLUMN)?, value(CM_PITCH_COLUMN)?);
    if [cx, cy, cm_pitch].iter().all(|v| v.is_finite()) {
        Ok(CoefficientSample::converged(cx, cy, cm_pitch))
    } else {
        Ok(CoefficientSample::NotConverged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::Coefficients;

    const COEFFICIENTS: &str = "\
# Force coefficients
# Time          Cd      Cd(f)   Cd(r)   Cl      Cl(f)   Cl(r)   CmPitch CmRoll  CmYaw   Cs      Cs(f)   Cs(r)
1       0.030   0.015   0.015   0.300   0.150   0.150   -0.020  0       0       0       0       0
2       0.025   0.012   0.013   0.380   0.190   0.190   -0.015  0       0       0       0       0
";

    fn write_run(root: &Path, run: &str, label: &str, contents: &str) {
        let dir = root
            .join(run)
            .join("postProcessing")
            .join("forces")
            .join(format!("alpha_{}", label));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("coefficient.dat"), contents).unwrap();
    }

    #[test]
    fn test_reads_last_time_step() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), "trial_0", "0.00000", COEFFICIENTS);

        let source = ForceCoefficientFiles::new(dir.path());
        let sample = source.sample("trial_0", "0.00000").unwrap();
        assert_eq!(
            Some(&Coefficients::new(0.025, 0.38, -0.015)),
            sample.coefficients()
        );
    }

    #[test]
    fn test_missing_file_is_not_converged() {
        let dir = tempfile::tempdir().unwrap();
        let source = ForceCoefficientFiles::new(dir.path());
        assert_eq!(
            CoefficientSample::NotConverged,
            source.sample("trial_0", "2.00000").unwrap()
        );
    }

    #[test]
    fn test_header_only_is_not_converged() {
        let sample = parse_last_coefficients(Path::new("c.dat"), "# Time Cd\n\n").unwrap();
        assert_eq!(CoefficientSample::NotConverged, sample);
    }

    #[test]
    fn test_nan_is_not_converged() {
        let text = "1 nan 0 0 nan 0 0 nan\n";
        let sample = parse_last_coefficients(Path::new("c.dat"), text).unwrap();
        assert_eq!(CoefficientSample::NotConverged, sample);
    }

    #[test]
    fn test_short_row_is_an_error() {
        let text = "# header\n1 0.02 0.01\n";
        let result = parse_last_coefficients(Path::new("c.dat"), text);
        assert!(matches!(result, Err(PolarError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_angle_labels_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for label in ["5.00000", "-2.00000", "0.00000", "10.00000", "notes"] {
            write_run(dir.path(), "trial_0", label, COEFFICIENTS);
        }

        let source = ForceCoefficientFiles::new(dir.path());
        assert_eq!(
            vec!["-2.00000", "0.00000", "5.00000", "10.00000"],
            source.angle_labels("trial_0").unwrap()
        );
        assert!(source.angle_labels("trial_1").unwrap().is_empty());
    }
}
