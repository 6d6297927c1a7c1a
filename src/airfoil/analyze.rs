//! Measurements taken directly from a generated outline: bounds, thickness and the mean line.
//! Both sides of a generated outline share the same chordwise stations, so the suction and
//! pressure sides can be compared point by point.

use crate::airfoil::AirfoilOutline;
use crate::algorithms::interpolate;
use ncollide2d::bounding_volume::AABB;
use ncollide2d::na::Point2;

/// Signed area of a closed polygon, positive when the points run counter-clockwise.
pub fn shoelace_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

impl AirfoilOutline {
    /// The axis aligned bounding box of all of the outline points
    pub fn bounds(&self) -> AABB<f64> {
        let mut mins = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut maxs = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in self.points.iter() {
            mins.x = mins.x.min(p.x);
            mins.y = mins.y.min(p.y);
            maxs.x = maxs.x.max(p.x);
            maxs.y = maxs.y.max(p.y);
        }
        AABB::new(mins, maxs)
    }

    /// The suction side in order of increasing x, starting at the leading edge
    fn upper_ascending(&self) -> (Vec<f64>, Vec<f64>) {
        self.suction_side().iter().rev().map(|p| (p.x, p.y)).unzip()
    }

    fn lower_ascending(&self) -> (Vec<f64>, Vec<f64>) {
        self.pressure_side().iter().map(|p| (p.x, p.y)).unzip()
    }

    /// Largest distance between the suction and pressure sides measured perpendicular to the
    /// chord, found over the shared stations.
    pub fn max_thickness(&self) -> f64 {
        self.suction_side()
            .iter()
            .rev()
            .zip(self.pressure_side().iter())
            .map(|(u, l)| u.y - l.y)
            .fold(0.0, f64::max)
    }

    /// Thickness perpendicular to the chord at the chordwise position `x`, or `None` if `x` lies
    /// outside of the outline.
    pub fn thickness_at(&self, x: f64) -> Option<f64> {
        let (ux, uy) = self.upper_ascending();
        let (lx, ly) = self.lower_ascending();
        Some(interpolate(&ux, &uy, x)? - interpolate(&lx, &ly, x)?)
    }

    /// Height of the mean line halfway between the two sides at the chordwise position `x`
    pub fn camber_at(&self, x: f64) -> Option<f64> {
        let (ux, uy) = self.upper_ascending();
        let (lx, ly) = self.lower_ascending();
        Some(0.5 * (interpolate(&ux, &uy, x)? + interpolate(&lx, &ly, x)?))
    }
}
