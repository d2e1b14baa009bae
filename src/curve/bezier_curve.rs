use std::{fmt, str::FromStr};

use nalgebra::{Matrix4, Point3};
use simba::scalar::SupersetOf;

use crate::misc::{FloatingPoint, Transformable};

/// One of the four control points of a cubic Bezier curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    P0,
    P1,
    P2,
    P3,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::P0, Slot::P1, Slot::P2, Slot::P3];

    pub fn index(&self) -> usize {
        match self {
            Slot::P0 => 0,
            Slot::P1 => 1,
            Slot::P2 => 2,
            Slot::P3 => 3,
        }
    }

    /// Check if the slot is the start or end point of the curve
    pub fn is_endpoint(&self) -> bool {
        matches!(self, Slot::P0 | Slot::P3)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.index())
    }
}

impl FromStr for Slot {
    type Err = anyhow::Error;

    /// Accepts `p0`..`p3` as well as the `v0`..`v3` names used by vector based scene graphs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p0" | "v0" => Ok(Slot::P0),
            "p1" | "v1" => Ok(Slot::P1),
            "p2" | "v2" => Ok(Slot::P2),
            "p3" | "v3" => Ok(Slot::P3),
            _ => Err(anyhow::anyhow!(
                "Unknown control point slot `{}`, expected v0, v1, v2 or v3",
                s
            )),
        }
    }
}

/// Cubic Bezier curve in 3D space
/// defined by four control points, evaluated over the parameter range [0, 1]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezierCurve<T: FloatingPoint> {
    control_points: [Point3<T>; 4],
}

impl<T: FloatingPoint> BezierCurve<T> {
    pub fn new(p0: Point3<T>, p1: Point3<T>, p2: Point3<T>, p3: Point3<T>) -> Self {
        Self {
            control_points: [p0, p1, p2, p3],
        }
    }

    /// Create a straight curve from `start` to `end`
    /// with the inner control points evenly spaced at 1/3 and 2/3
    /// # Example
    /// ```
    /// use coons::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let line = BezierCurve::line(Point3::new(0., 0., 0.), Point3::new(3., 0., 0.));
    /// assert_eq!(line.control_point(Slot::P1), &Point3::new(1., 0., 0.));
    /// assert_eq!(line.point_at(0.5), Point3::new(1.5, 0., 0.));
    /// ```
    pub fn line(start: Point3<T>, end: Point3<T>) -> Self {
        let third = (end - start) / T::lit(3.0);
        Self::new(start, start + third, end - third, end)
    }

    pub fn control_points(&self) -> &[Point3<T>; 4] {
        &self.control_points
    }

    pub fn control_point(&self, slot: Slot) -> &Point3<T> {
        &self.control_points[slot.index()]
    }

    pub fn control_point_mut(&mut self, slot: Slot) -> &mut Point3<T> {
        &mut self.control_points[slot.index()]
    }

    pub fn set_control_point(&mut self, slot: Slot, point: Point3<T>) {
        self.control_points[slot.index()] = point;
    }

    pub fn start(&self) -> &Point3<T> {
        &self.control_points[0]
    }

    pub fn end(&self) -> &Point3<T> {
        &self.control_points[3]
    }

    /// Evaluate the curve at a given parameter with the Bernstein form
    /// `B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`
    ///
    /// The parameter is expected to be in [0, 1] and is not clamped.
    pub fn point_at(&self, t: T) -> Point3<T> {
        let [b0, b1, b2, b3] = cubic_bernstein(t);
        let [p0, p1, p2, p3] = &self.control_points;
        Point3::from(p0.coords * b0 + p1.coords * b1 + p2.coords * b2 + p3.coords * b3)
    }

    /// Sample the curve at a given number of evenly spaced parameters including both ends
    pub fn sample_regular(&self, samples: usize) -> Vec<Point3<T>> {
        if samples < 2 {
            return vec![*self.start(), *self.end()];
        }
        let step = T::one() / T::from_usize(samples - 1).unwrap_or_else(T::one);
        (0..samples)
            .map(|i| {
                // pin the last sample to the end parameter to avoid accumulated error
                let t = if i == samples - 1 {
                    T::one()
                } else {
                    T::from_usize(i).unwrap_or_else(T::zero) * step
                };
                self.point_at(t)
            })
            .collect()
    }

    /// Cast the curve to a different floating point type.
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> BezierCurve<F> {
        let [p0, p1, p2, p3] = &self.control_points;
        BezierCurve::new(p0.cast(), p1.cast(), p2.cast(), p3.cast())
    }
}

impl<'a, T: FloatingPoint> Transformable<&'a Matrix4<T>> for BezierCurve<T> {
    fn transform(&mut self, transform: &'a Matrix4<T>) {
        self.control_points.iter_mut().for_each(|p| {
            let transformed = transform * p.to_homogeneous();
            let w = transformed[3];
            *p = Point3::new(transformed[0] / w, transformed[1] / w, transformed[2] / w);
        });
    }
}

/// Bernstein basis of degree 3 at `t`
fn cubic_bernstein<T: FloatingPoint>(t: T) -> [T; 4] {
    let s = T::one() - t;
    let three = T::lit(3.0);
    [s * s * s, three * s * s * t, three * s * t * t, t * t * t]
}
