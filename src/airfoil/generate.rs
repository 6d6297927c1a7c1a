use crate::airfoil::cst::{CstSection, SectionShape};
use crate::airfoil::discretize::DiscretizationConfig;
use crate::airfoil::{AirfoilOutline, ShapeParameters};
use crate::errors::GeometryError;
use crate::observe::{Event, Observer};
use crate::serialize::{coordinate_file, write_replacing};
use crate::surface::{ClosedSurface, Extrusion};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The file format written by `AirfoilGenerator::write`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryFormat {
    /// Name on the first line followed by `x  y` pairs, written to `<name>.dat`
    CoordinateList,

    /// The outline extruded into a capped prism, written as ASCII STL to `<name>.stl`
    ClosedSurface(Extrusion),
}

impl GeometryFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            GeometryFormat::CoordinateList => "dat",
            GeometryFormat::ClosedSurface(_) => "stl",
        }
    }
}

impl Default for GeometryFormat {
    fn default() -> Self {
        GeometryFormat::ClosedSurface(Extrusion::default())
    }
}

/// Turns shape parameters into airfoil outlines on a fixed chordwise discretization. The sample
/// positions are computed once on construction; every evaluation starts from them, so nothing
/// carries over from one set of parameters to the next.
pub struct AirfoilGenerator<O = ()> {
    config: DiscretizationConfig,
    stations: Vec<f64>,
    format: GeometryFormat,
    observer: O,
}

impl AirfoilGenerator<()> {
    pub fn new(config: DiscretizationConfig) -> Result<AirfoilGenerator<()>, GeometryError> {
        Ok(AirfoilGenerator {
            stations: config.unit_stations()?,
            config,
            format: GeometryFormat::default(),
            observer: (),
        })
    }
}

impl<O: Observer> AirfoilGenerator<O> {
    pub fn with_format(mut self, format: GeometryFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_observer<P: Observer>(self, observer: P) -> AirfoilGenerator<P> {
        AirfoilGenerator {
            config: self.config,
            stations: self.stations,
            format: self.format,
            observer,
        }
    }

    pub fn config(&self) -> &DiscretizationConfig {
        &self.config
    }

    pub fn format(&self) -> GeometryFormat {
        self.format
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Computes the closed outline for a set of shape parameters, scaled onto the configured chord
    /// bounds.
    pub fn outline(
        &mut self,
        params: &ShapeParameters,
        name: &str,
    ) -> Result<AirfoilOutline, GeometryError> {
        let section = CstSection::new(*params)?;
        let outline: AirfoilOutline = section
            .stations(&self.stations)?
            .into_iter()
            .collect::<Result<AirfoilOutline, GeometryError>>()?
            .map_points(|p| self.config.to_chord(p));

        self.observer.observe(&Event::GeometryGenerated {
            name: name.to_string(),
            params: *params,
            points: outline.len(),
        });
        Ok(outline)
    }

    /// Generates the outline and writes it to `<dir>/<name>.<ext>` in the configured format. The
    /// directory is created if it does not exist. Invalid parameters are rejected before anything
    /// touches the file system, and the file is written under a temporary name and then renamed
    /// so a failed write never leaves a partial artifact at the target path.
    pub fn write(
        &mut self,
        params: &ShapeParameters,
        name: &str,
        dir: &Path,
    ) -> Result<PathBuf, GeometryError> {
        let outline = self.outline(params, name)?;
        let contents = match &self.format {
            GeometryFormat::CoordinateList => coordinate_file(name, &outline),
            GeometryFormat::ClosedSurface(extrusion) => {
                ClosedSurface::extrude(&outline, extrusion).to_stl(name)
            }
        };

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.{}", name, self.format.extension()));
        write_replacing(&path, &contents)?;

        self.observer
            .observe(&Event::GeometryWritten { path: path.clone() });
        Ok(path)
    }
}
