use crate::errors::GeometryError;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};

pub mod analyze;
pub mod cst;
pub mod discretize;
pub mod generate;

/// The six scalar coefficients which describe a CST airfoil with a parabolic camber line. A fresh
/// set is supplied by the optimizer for every trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParameters {
    /// Class function exponent controlling the leading edge
    pub n1: f64,

    /// Class function exponent controlling the trailing edge
    pub n2: f64,

    /// Shape factor of the thickness distribution
    pub kr: f64,

    /// Maximum camber as a fraction of the chord
    pub f_max: f64,

    /// Chordwise location of the maximum camber, as a fraction of the chord
    pub xf: f64,

    /// Maximum thickness as a fraction of the chord
    pub t_max: f64,
}

impl ShapeParameters {
    pub fn new(n1: f64, n2: f64, kr: f64, f_max: f64, xf: f64, t_max: f64) -> ShapeParameters {
        ShapeParameters {
            n1,
            n2,
            kr,
            f_max,
            xf,
            t_max,
        }
    }

    /// Checks that the class/shape functions and the camber line are all defined for these values.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let named = [
            ("n1", self.n1),
            ("n2", self.n2),
            ("kr", self.kr),
            ("f_max", self.f_max),
            ("xf", self.xf),
            ("t_max", self.t_max),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(GeometryError::invalid(name, value, "must be finite"));
            }
        }

        if self.n1 <= 0.0 {
            return Err(GeometryError::invalid("n1", self.n1, "exponent must be positive"));
        }
        if self.n2 <= 0.0 {
            return Err(GeometryError::invalid("n2", self.n2, "exponent must be positive"));
        }
        if self.kr == 0.0 {
            return Err(GeometryError::invalid("kr", self.kr, "shape factor must be non-zero"));
        }
        if self.xf <= 0.0 || self.xf >= 1.0 {
            return Err(GeometryError::invalid(
                "xf",
                self.xf,
                "camber location must lie strictly inside (0, 1)",
            ));
        }
        if self.t_max < 0.0 {
            return Err(GeometryError::invalid("t_max", self.t_max, "thickness must not be negative"));
        }

        Ok(())
    }
}

/// One chordwise station of the section: the point on the camber line and the matching points on
/// the suction (upper) and pressure (lower) sides, which share its x position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// A closed airfoil outline. The points start at the trailing edge, run along the suction side to
/// the leading edge and return along the pressure side to the trailing edge. The leading edge
/// point appears exactly once, at `leading_edge_index()`, and both sides have the same number of
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilOutline {
    points: Vec<Point2<f64>>,
    leading_edge: usize,
}

impl AirfoilOutline {
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2<f64>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn leading_edge_index(&self) -> usize {
        self.leading_edge
    }

    pub fn leading_edge(&self) -> Point2<f64> {
        self.points[self.leading_edge]
    }

    /// The suction side ordered from the trailing edge to the leading edge, inclusive
    pub fn suction_side(&self) -> &[Point2<f64>] {
        &self.points[..=self.leading_edge]
    }

    /// The pressure side ordered from the leading edge to the trailing edge, inclusive
    pub fn pressure_side(&self) -> &[Point2<f64>] {
        &self.points[self.leading_edge..]
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Applies the same transformation to every point, keeping the ordering invariant intact.
    pub fn map_points<F>(self, f: F) -> AirfoilOutline
    where
        F: Fn(&Point2<f64>) -> Point2<f64>,
    {
        AirfoilOutline {
            points: self.points.iter().map(f).collect(),
            leading_edge: self.leading_edge,
        }
    }
}

/// Assembles an `AirfoilOutline` from camber stations given in order of increasing chord position,
/// starting at the leading edge.
#[derive(Default)]
pub struct OutlineBuilder {
    suction: Vec<Point2<f64>>,
    pressure: Vec<Point2<f64>>,
}

impl OutlineBuilder {
    pub fn new() -> OutlineBuilder {
        OutlineBuilder::default()
    }

    pub fn with_capacity(stations: usize) -> OutlineBuilder {
        OutlineBuilder {
            suction: Vec::with_capacity(stations),
            pressure: Vec::with_capacity(stations),
        }
    }

    pub fn push(&mut self, station: &CamberStation) -> Result<(), GeometryError> {
        if let Some(last) = self.pressure.last() {
            if station.camber.x <= last.x {
                return Err(GeometryError::InvalidConfig(format!(
                    "stations must increase along the chord, got {} after {}",
                    station.camber.x, last.x
                )));
            }
        }
        self.suction.push(station.upper);
        self.pressure.push(station.lower);
        Ok(())
    }

    /// Closes the outline. The first station is the leading edge and is emitted once, from the
    /// pressure side, so the suction side contributes every station except that one.
    pub fn build(self) -> Result<AirfoilOutline, GeometryError> {
        let stations = self.pressure.len();
        if stations < 2 {
            return Err(GeometryError::InvalidConfig(format!(
                "an outline needs at least 2 stations, got {}",
                stations
            )));
        }

        let mut points = Vec::with_capacity(2 * stations - 1);
        points.extend(self.suction.iter().skip(1).rev());
        let leading_edge = points.len();
        points.extend(self.pressure);

        Ok(AirfoilOutline {
            points,
            leading_edge,
        })
    }
}

impl FromIterator<CamberStation> for Result<AirfoilOutline, GeometryError> {
    fn from_iter<T: IntoIterator<Item = CamberStation>>(iter: T) -> Self {
        let mut builder = OutlineBuilder::new();
        for station in iter {
            builder.push(&station)?;
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn station(x: f64, t: f64) -> CamberStation {
        CamberStation::new(
            Point2::new(x, 0.0),
            Point2::new(x, t),
            Point2::new(x, -t),
        )
    }

    #[test]
    fn test_outline_ordering() {
        let mut builder = OutlineBuilder::new();
        for (x, t) in [(0.0, 0.0), (0.5, 0.1), (1.0, 0.0)] {
            builder.push(&station(x, t)).unwrap();
        }
        let outline = builder.build().unwrap();

        let expected = vec![
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 0.1),
            Point2::new(0.0, 0.0),
            Point2::new(0.5, -0.1),
            Point2::new(1.0, 0.0),
        ];
        assert_eq!(expected, outline.points());
        assert_eq!(2, outline.leading_edge_index());
        assert_eq!(3, outline.suction_side().len());
        assert_eq!(3, outline.pressure_side().len());
    }

    #[test]
    fn test_outline_rejects_unordered_stations() {
        let mut builder = OutlineBuilder::new();
        builder.push(&station(0.5, 0.1)).unwrap();
        assert!(builder.push(&station(0.2, 0.1)).is_err());
    }

    #[test]
    fn test_outline_needs_two_stations() {
        let outline: Result<AirfoilOutline, _> = vec![station(0.0, 0.0)].into_iter().collect();
        assert!(matches!(outline, Err(GeometryError::InvalidConfig(_))));
    }

    #[test_case(0.5, 1.0, 0.6, 0.01, 0.25, 0.08, true)]
    #[test_case(0.0, 1.0, 0.6, 0.01, 0.25, 0.08, false)]
    #[test_case(0.5, -1.0, 0.6, 0.01, 0.25, 0.08, false)]
    #[test_case(0.5, 1.0, 0.0, 0.01, 0.25, 0.08, false)]
    #[test_case(0.5, 1.0, 0.6, 0.01, 0.0, 0.08, false)]
    #[test_case(0.5, 1.0, 0.6, 0.01, 1.0, 0.08, false)]
    #[test_case(0.5, 1.0, 0.6, 0.01, 0.25, -0.08, false)]
    #[test_case(0.5, 1.0, 0.6, f64::NAN, 0.25, 0.08, false)]
    fn test_parameter_validation(n1: f64, n2: f64, kr: f64, f_max: f64, xf: f64, t_max: f64, ok: bool) {
        let params = ShapeParameters::new(n1, n2, kr, f_max, xf, t_max);
        assert_eq!(ok, params.validate().is_ok());
    }
}
