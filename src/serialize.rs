//! The two-column coordinate file format read by XFOIL-style tools: the airfoil name on the first
//! line followed by one `x  y` pair per line at fixed precision.

use crate::airfoil::AirfoilOutline;
use crate::errors::GeometryError;
use ncollide2d::na::Point2;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

pub const COORDINATE_PRECISION: usize = 8;

pub fn coordinate_file(name: &str, outline: &AirfoilOutline) -> String {
    let mut text = String::with_capacity(outline.len() * 2 * (COORDINATE_PRECISION + 6));
    text.push_str(name);
    text.push('\n');
    for p in outline.points() {
        // Writing into a String cannot fail
        let _ = writeln!(
            text,
            "{:.prec$}  {:.prec$}",
            p.x,
            p.y,
            prec = COORDINATE_PRECISION
        );
    }
    text
}

/// Reads back a coordinate file, returning the name and the points in file order.
pub fn parse_coordinate_file(text: &str) -> Result<(String, Vec<Point2<f64>>), GeometryError> {
    let mut lines = text.lines();
    let name = lines
        .next()
        .ok_or(GeometryError::Parse {
            line: 1,
            reason: "file is empty".to_string(),
        })?
        .trim()
        .to_string();

    let mut points = Vec::new();
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();
        if values.len() != 2 {
            return Err(GeometryError::Parse {
                line: line_no,
                reason: format!("expected 2 columns, found {}", values.len()),
            });
        }

        let parse = |s: &str| {
            s.parse::<f64>().map_err(|e| GeometryError::Parse {
                line: line_no,
                reason: e.to_string(),
            })
        };
        points.push(Point2::new(parse(values[0])?, parse(values[1])?));
    }

    Ok((name, points))
}

/// Writes `contents` to a `.tmp` sibling of `path` and renames it into place, so the target is
/// either left untouched or fully written. The temporary file is removed if either step fails.
pub fn write_replacing(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
