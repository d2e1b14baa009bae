use itertools::Itertools;
use nalgebra::Point3;

use crate::misc::FloatingPoint;

use super::MIN_SAMPLE_STEP;

/// Which iso-curve families of the grid are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsoCurveDisplay {
    #[default]
    UAndV,
    UOnly,
    VOnly,
}

impl IsoCurveDisplay {
    /// Cycle through `UAndV -> UOnly -> VOnly -> UAndV`
    pub fn next(&self) -> Self {
        match self {
            IsoCurveDisplay::UAndV => IsoCurveDisplay::UOnly,
            IsoCurveDisplay::UOnly => IsoCurveDisplay::VOnly,
            IsoCurveDisplay::VOnly => IsoCurveDisplay::UAndV,
        }
    }

    pub fn shows_u(&self) -> bool {
        !matches!(self, IsoCurveDisplay::VOnly)
    }

    pub fn shows_v(&self) -> bool {
        !matches!(self, IsoCurveDisplay::UOnly)
    }
}

/// Points sampled on a surface along both parameter directions,
/// laid out as polylines for the presentation layer
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid<T: FloatingPoint> {
    parameters: Vec<T>,
    /// `u_curves[i][j]` is the point at `(parameters[i], parameters[j])`: u fixed, v varying
    u_curves: Vec<Vec<Point3<T>>>,
    /// `v_curves[i][j]` is the point at `(parameters[j], parameters[i])`: v fixed, u varying
    v_curves: Vec<Vec<Point3<T>>>,
}

impl<T: FloatingPoint> SampleGrid<T> {
    /// Sample `f(u, v)` at `0, step, 2 step, ...` in both directions, the last parameter clamped to 1
    pub fn build<F>(step: T, f: F) -> Self
    where
        F: Fn(T, T) -> Point3<T>,
    {
        let parameters = sample_parameters(step);
        let n = parameters.len();
        let mut u_curves = vec![Vec::with_capacity(n); n];
        let mut v_curves = vec![Vec::with_capacity(n); n];
        for (i, j) in (0..n).cartesian_product(0..n) {
            let p = f(parameters[i], parameters[j]);
            u_curves[i].push(p);
            v_curves[j].push(p);
        }
        Self {
            parameters,
            u_curves,
            v_curves,
        }
    }

    /// A grid without samples, as a placeholder until the first build
    pub fn empty() -> Self {
        Self {
            parameters: vec![],
            u_curves: vec![],
            v_curves: vec![],
        }
    }

    pub fn parameters(&self) -> &[T] {
        &self.parameters
    }

    pub fn u_curves(&self) -> &[Vec<Point3<T>>] {
        &self.u_curves
    }

    pub fn v_curves(&self) -> &[Vec<Point3<T>>] {
        &self.v_curves
    }

    /// Number of samples along each direction
    pub fn resolution(&self) -> usize {
        self.parameters.len()
    }

    /// Sampled point at grid position `(i, j)`, i.e. `(parameters[i], parameters[j])`
    pub fn point(&self, i: usize, j: usize) -> Option<&Point3<T>> {
        self.u_curves.get(i).and_then(|row| row.get(j))
    }

    /// Check if an iso-curve lies on the patch boundary
    pub fn is_boundary_curve(&self, i: usize) -> bool {
        i == 0 || i + 1 == self.parameters.len()
    }
}

/// Parameters from 0 to 1 inclusive at a fixed increment, no finer than `MIN_SAMPLE_STEP`
fn sample_parameters<T: FloatingPoint>(step: T) -> Vec<T> {
    let step = step.max(T::lit(MIN_SAMPLE_STEP));
    let segments = (T::one() / step - T::default_epsilon().sqrt())
        .ceil()
        .to_usize()
        .unwrap_or(1)
        .max(1);
    (0..=segments)
        .map(|i| {
            let t = T::from_usize(i).unwrap_or_else(T::zero) * step;
            if i == segments || t > T::one() {
                T::one()
            } else {
                t
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_step_gives_26_parameters() {
        let params = sample_parameters(0.04_f64);
        assert_eq!(params.len(), 26);
        assert_eq!(params[0], 0.);
        assert_eq!(params[25], 1.);
        assert_relative_eq!(params[1], 0.04);
    }

    #[test]
    fn uneven_step_clamps_last_parameter() {
        let params = sample_parameters(0.3_f64);
        assert_eq!(params.len(), 5);
        assert_eq!(params[4], 1.);
        assert_relative_eq!(params[3], 0.9, epsilon = 1e-12);
    }

    #[test]
    fn tiny_steps_are_raised_to_the_minimum() {
        for step in [1e-9_f64, 0., -0.5] {
            let params = sample_parameters(step);
            assert_eq!(params.len(), 1001);
            assert_eq!(params[1000], 1.);
        }
    }

    #[test]
    fn grid_layout_follows_parameters() {
        let grid = SampleGrid::build(0.5_f64, |u, v| Point3::new(u, v, 0.));
        assert_eq!(grid.resolution(), 3);
        assert_eq!(grid.u_curves()[2][1], Point3::new(1., 0.5, 0.));
        assert_eq!(grid.v_curves()[2][1], Point3::new(0.5, 1., 0.));
        assert_eq!(grid.point(0, 2), Some(&Point3::new(0., 1., 0.)));
        assert!(grid.is_boundary_curve(0));
        assert!(grid.is_boundary_curve(2));
        assert!(!grid.is_boundary_curve(1));
    }

    #[test]
    fn display_cycles() {
        let d = IsoCurveDisplay::default();
        assert!(d.shows_u() && d.shows_v());
        let d = d.next();
        assert!(d.shows_u() && !d.shows_v());
        let d = d.next();
        assert!(!d.shows_u() && d.shows_v());
        assert_eq!(d.next(), IsoCurveDisplay::UAndV);
    }
}
