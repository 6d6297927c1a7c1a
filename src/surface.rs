//! Closed triangulated surfaces built by extruding a 2D outline, for consumption by 3D meshers.

use crate::airfoil::AirfoilOutline;
use itertools::Itertools;
use ncollide2d::na::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Placement of the extruded section. The outline lies in the x-z plane at `y = offset` and is
/// swept a distance `depth` along +y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    pub offset: f64,
    pub depth: f64,
}

impl Default for Extrusion {
    fn default() -> Self {
        Extrusion {
            offset: -0.1,
            depth: 0.5,
        }
    }
}

pub type Triangle = [Point3<f64>; 3];

/// Triangle normal, not normalized
pub fn triangle_normal(t: &Triangle) -> Vector3<f64> {
    (t[1] - t[0]).cross(&(t[2] - t[0]))
}

fn is_degenerate(t: &Triangle) -> bool {
    let e0 = t[1] - t[0];
    let e1 = t[2] - t[0];
    e0.cross(&e1).norm() <= 1e-12 * e0.norm() * e1.norm()
}

/// A closed, consistently oriented triangle surface with outward facing normals.
pub struct ClosedSurface {
    triangles: Vec<Triangle>,
}

impl ClosedSurface {
    /// Sweeps the outline into a prism and caps both ends. The caps are triangulated as a strip
    /// between matching suction and pressure side stations, which relies on the outline having the
    /// same chordwise positions on both sides. Zero-area triangles (at the leading and trailing
    /// edges where the two sides meet) are dropped.
    pub fn extrude(outline: &AirfoilOutline, extrusion: &Extrusion) -> ClosedSurface {
        let y0 = extrusion.offset;
        let y1 = extrusion.offset + extrusion.depth;
        let at = |p: &Point2<f64>, y: f64| Point3::new(p.x, y, p.y);

        let mut triangles: Vec<Triangle> = Vec::new();

        // Side walls, following the counter-clockwise outline
        for (a, b) in outline.points().iter().circular_tuple_windows() {
            let (a0, a1, b0, b1) = (at(a, y0), at(a, y1), at(b, y0), at(b, y1));
            triangles.push([a0, b1, b0]);
            triangles.push([a0, a1, b1]);
        }

        // End caps
        let upper: Vec<&Point2<f64>> = outline.suction_side().iter().rev().collect();
        let lower = outline.pressure_side();
        for ((u0, u1), (l0, l1)) in upper
            .iter()
            .tuple_windows()
            .zip(lower.iter().tuple_windows())
        {
            for y in [y0, y1] {
                let mut first = [at(l0, y), at(l1, y), at(u1, y)];
                let mut second = [at(l0, y), at(u1, y), at(u0, y)];
                if y == y1 {
                    first.swap(1, 2);
                    second.swap(1, 2);
                }
                triangles.push(first);
                triangles.push(second);
            }
        }

        triangles.retain(|t| !is_degenerate(t));
        ClosedSurface { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Volume enclosed by the surface, from the divergence theorem
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| t[0].coords.dot(&t[1].coords.cross(&t[2].coords)) / 6.0)
            .sum()
    }

    /// Renders the surface as an ASCII STL solid.
    pub fn to_stl(&self, name: &str) -> String {
        let mut text = String::with_capacity(self.triangles.len() * 256);
        // Writing into a String cannot fail
        let _ = writeln!(text, "solid {}", name);
        for t in self.triangles.iter() {
            let n = triangle_normal(t).normalize();
            let _ = writeln!(text, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
            let _ = writeln!(text, "    outer loop");
            for v in t.iter() {
                let _ = writeln!(text, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z);
            }
            let _ = writeln!(text, "    endloop");
            let _ = writeln!(text, "  endfacet");
        }
        let _ = writeln!(text, "endsolid {}", name);
        text
    }
}
