use crate::airfoil::ShapeParameters;
use crate::errors::LogError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_NAME: &str = "log.optimization";

const HEADER: [&str; 8] = ["trial", "f_max", "t_max", "xf", "KR", "N1", "N2", "objective"];

/// Header and rule precede the trial rows
const HEADER_LINES: usize = 2;

/// One row of the log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    pub trial: usize,
    pub params: ShapeParameters,
    pub objective: f64,
}

/// A tab separated record of every trial of an optimization: the shape parameters which were
/// evaluated and the objective they scored.
pub struct TrialLog {
    path: PathBuf,
}

impl TrialLog {
    /// Creates the log file, replacing any previous one, and writes the header.
    pub fn create(dir: &Path, name: &str) -> Result<TrialLog, LogError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(name);
        let rule = ["--------"; 8].join("\t");
        fs::write(&path, format!("{}\n{}\n", HEADER.join("\t"), rule))?;
        Ok(TrialLog { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(
        &self,
        trial: usize,
        params: &ShapeParameters,
        objective: f64,
    ) -> Result<(), LogError> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(
            file,
            "{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            trial,
            params.f_max,
            params.t_max,
            params.xf,
            params.kr,
            params.n1,
            params.n2,
            objective
        )?;
        Ok(())
    }

    /// Reads every trial written to this log so far
    pub fn records(&self) -> Result<Vec<TrialRecord>, LogError> {
        read_log(&self.path)
    }
}

pub fn read_log(path: &Path) -> Result<Vec<TrialRecord>, LogError> {
    parse_log(&fs::read_to_string(path)?)
}

/// Parses the rows of a log, skipping its header and rule.
pub fn parse_log(text: &str) -> Result<Vec<TrialRecord>, LogError> {
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |reason: String| LogError::Parse {
            line: i + 1,
            reason,
        };

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() != HEADER.len() {
            return Err(parse_error(format!(
                "expected {} columns, found {}",
                HEADER.len(),
                columns.len()
            )));
        }

        let trial = columns[0]
            .parse::<usize>()
            .map_err(|e| parse_error(format!("trial: {}", e)))?;
        let mut values = [0.0; 7];
        for (j, v) in values.iter_mut().enumerate() {
            *v = columns[j + 1]
                .parse::<f64>()
                .map_err(|e| parse_error(format!("{}: {}", HEADER[j + 1], e)))?;
        }
        let [f_max, t_max, xf, kr, n1, n2, objective] = values;

        records.push(TrialRecord {
            trial,
            params: ShapeParameters::new(n1, n2, kr, f_max, xf, t_max),
            objective,
        });
    }
    Ok(records)
}
