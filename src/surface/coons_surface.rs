use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};
use simba::scalar::SupersetOf;

use crate::{
    curve::{BezierCurve, Slot},
    misc::{Axis, FloatingPoint, Transformable},
};

use super::{
    catalog_index, cycle_index, Boundary, ControlPoint, ControlPointId, IsoCurveDisplay,
    SampleGrid, SurfaceOptions, CONTROL_LINES, CONTROL_POINTS, CORNERS,
};

/// Distance an active control point moves per unit of a numeric control nudge
pub const NUDGE_STEP: f64 = 0.005;

/// A surface patched from four cubic Bezier boundary curves
///
/// The patch is evaluated with the bilinearly blended Coons formula.
/// The two boundaries meeting at each corner store the corner twice;
/// every editing operation keeps both copies identical.
#[derive(Debug)]
pub struct CoonsSurface<T: FloatingPoint> {
    /// boundaries indexed by `Boundary::index`
    curves: [BezierCurve<T>; 4],
    options: SurfaceOptions<T>,
    /// derived samples, rebuilt after every mutation
    grid: SampleGrid<T>,
    display: IsoCurveDisplay,
    active_control_point: Option<usize>,
    last_active_control_point: Option<usize>,
    controls_enabled: bool,
    selected_axis: Option<Axis>,
}

impl<T: FloatingPoint> CoonsSurface<T> {
    /// Create a surface from four boundary curves `u0`, `u1`, `v0`, `v1`.
    ///
    /// Corners are not checked; call `resolve` if the boundaries may disagree.
    pub fn new(
        u0: BezierCurve<T>,
        u1: BezierCurve<T>,
        v0: BezierCurve<T>,
        v1: BezierCurve<T>,
        options: SurfaceOptions<T>,
    ) -> Self {
        let mut surface = Self {
            curves: [u0, u1, v0, v1],
            grid: SampleGrid::empty(),
            options,
            display: IsoCurveDisplay::default(),
            active_control_point: None,
            last_active_control_point: None,
            controls_enabled: true,
            selected_axis: None,
        };
        surface.rebuild_grid();
        surface
    }

    /// The canonical surface: the unit square centered at the origin in the xy plane
    /// with straight boundaries and inner control points at 1/3 and 2/3
    /// # Example
    /// ```
    /// use approx::assert_relative_eq;
    /// use coons::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let surface = CoonsSurface::<f64>::with_options(SurfaceOptions::default());
    /// assert_eq!(surface.patch(0., 0.), Point3::new(-0.5, -0.5, 0.));
    /// assert_relative_eq!(surface.patch(0.5, 0.5), Point3::origin(), epsilon = 1e-12);
    /// ```
    pub fn with_options(options: SurfaceOptions<T>) -> Self {
        let half = T::lit(0.5);
        let corner = |x: T, y: T| Point3::new(x - half, y - half, T::zero());
        let (zero, one) = (T::zero(), T::one());
        let c00 = corner(zero, zero);
        let c10 = corner(one, zero);
        let c01 = corner(zero, one);
        let c11 = corner(one, one);
        Self::new(
            BezierCurve::line(c00, c10),
            BezierCurve::line(c01, c11),
            BezierCurve::line(c00, c01),
            BezierCurve::line(c10, c11),
            options,
        )
    }

    pub fn curve(&self, boundary: Boundary) -> &BezierCurve<T> {
        &self.curves[boundary.index()]
    }

    pub fn curves(&self) -> &[BezierCurve<T>; 4] {
        &self.curves
    }

    pub fn options(&self) -> &SurfaceOptions<T> {
        &self.options
    }

    /// Evaluate the patch at `(u, v)` in [0, 1]^2
    ///
    /// `Lu + Lv - B` where `Lu` and `Lv` are the ruled surfaces between opposite boundaries
    /// and `B` is the bilinear interpolation of the four corners.
    pub fn patch(&self, u: T, v: T) -> Point3<T> {
        let u0 = self.curve(Boundary::U0);
        let u1 = self.curve(Boundary::U1);
        let v0 = self.curve(Boundary::V0);
        let v1 = self.curve(Boundary::V1);
        let one = T::one();

        let lu = u0.point_at(u).coords * (one - v) + u1.point_at(u).coords * v;
        let lv = v0.point_at(v).coords * (one - u) + v1.point_at(v).coords * u;
        let b = u0.start().coords * ((one - u) * (one - v))
            + u0.end().coords * (u * (one - v))
            + u1.start().coords * ((one - u) * v)
            + u1.end().coords * (u * v);

        Point3::from(lu + lv - b)
    }

    /// Recompute the iso-curve sample grid at the configured step
    pub fn rebuild_grid(&mut self) {
        self.grid = SampleGrid::build(self.options.sample_step, |u, v| self.patch(u, v));
    }

    pub fn grid(&self) -> &SampleGrid<T> {
        &self.grid
    }

    pub fn display(&self) -> IsoCurveDisplay {
        self.display
    }

    /// Switch to the next iso-curve display mode
    pub fn next_display(&mut self) -> IsoCurveDisplay {
        self.display = self.display.next();
        self.display
    }

    /// The iso-curve polylines selected by the current display mode
    pub fn iso_curves(&self) -> Vec<&[Point3<T>]> {
        let mut curves = vec![];
        if self.display.shows_u() {
            curves.extend(self.grid.u_curves().iter().map(|c| c.as_slice()));
        }
        if self.display.shows_v() {
            curves.extend(self.grid.v_curves().iter().map(|c| c.as_slice()));
        }
        curves
    }

    /// Segments of the control polygon, empty while controls are disabled
    pub fn control_polygon(&self) -> Vec<(Point3<T>, Point3<T>)> {
        if !self.controls_enabled {
            return vec![];
        }
        CONTROL_LINES
            .iter()
            .map(|(a, b)| (*self.control_point(*a), *self.control_point(*b)))
            .collect()
    }

    pub fn control_point(&self, id: ControlPointId) -> &Point3<T> {
        self.curve(id.boundary).control_point(id.slot)
    }

    /// Set a control point; a corner is written to both boundaries that share it
    pub fn set_control_point(&mut self, id: ControlPointId, point: Point3<T>) {
        self.write_control_point(id, point);
        self.rebuild_grid();
    }

    /// Write a control point and its corner partner without rebuilding the grid
    pub(crate) fn write_control_point(&mut self, id: ControlPointId, point: Point3<T>) {
        self.curves[id.boundary.index()].set_control_point(id.slot, point);
        if let Some(partner) = id.partner() {
            self.curves[partner.boundary.index()].set_control_point(partner.slot, point);
        }
    }

    /// Position of the catalog entry at `index`
    pub fn control_point_at(&self, index: usize) -> Option<&Point3<T>> {
        CONTROL_POINTS
            .get(index)
            .map(|cp| self.control_point(cp.id()))
    }

    /// Catalog entries paired with their current positions
    pub fn catalog(&self) -> impl Iterator<Item = (&ControlPoint, &Point3<T>)> {
        CONTROL_POINTS
            .iter()
            .map(move |cp| (cp, self.control_point(cp.id())))
    }

    pub fn active_control_point_index(&self) -> Option<usize> {
        self.active_control_point
    }

    pub fn last_active_control_point_index(&self) -> Option<usize> {
        self.last_active_control_point
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn selected_axis(&self) -> Option<Axis> {
        self.selected_axis
    }

    pub fn set_axis(&mut self, axis: Option<Axis>) {
        self.selected_axis = axis;
    }

    /// Position of the selected control point, if any
    pub fn active_control_point(&self) -> Option<Point3<T>> {
        self.active_control_point
            .and_then(|i| self.control_point_at(i))
            .cloned()
    }

    /// Move the selected control point to `point` and mark `axis` as the live axis.
    ///
    /// All three coordinates of `point` are applied.
    /// Nothing moves when no control point is selected.
    pub fn set_active_control_point(&mut self, point: Point3<T>, axis: Option<Axis>) {
        self.selected_axis = axis;
        let Some(cp) = self.active_control_point.and_then(|i| CONTROL_POINTS.get(i)) else {
            return;
        };
        self.set_control_point(cp.id(), point);
    }

    /// Nudge the selected control point along `axis` by `amount` numeric control steps
    pub fn nudge_active_control_point(&mut self, axis: Axis, amount: T) {
        if let Some(mut p) = self.active_control_point() {
            p[axis.index()] += amount * T::lit(NUDGE_STEP);
            self.set_active_control_point(p, Some(axis));
        }
    }

    /// Move the selection `delta` entries through the catalog, wrapping in both directions
    pub fn set_active_control_point_index(&mut self, delta: isize) {
        self.active_control_point = Some(cycle_index(self.active_control_point, delta));
    }

    /// Select a control point by identity, either copy of a corner is accepted
    pub fn select_control_point(&mut self, id: ControlPointId) -> Option<usize> {
        let index = catalog_index(id)?;
        self.active_control_point = Some(index);
        Some(index)
    }

    /// Clear the selection, remembering it for the next `activate_controls`
    pub fn deactivate_control_point(&mut self) {
        self.last_active_control_point = self.active_control_point;
        self.active_control_point = None;
    }

    /// Enable control point interaction, restoring the last selection or the first entry
    pub fn activate_controls(&mut self) {
        self.active_control_point = Some(self.last_active_control_point.unwrap_or(0));
        self.controls_enabled = true;
    }

    /// Disable control point interaction, clearing the selection and the axis
    pub fn deactivate_controls(&mut self) {
        self.controls_enabled = false;
        self.deactivate_control_point();
        self.selected_axis = None;
    }

    pub fn toggle_controls(&mut self) {
        if self.controls_enabled {
            self.deactivate_controls();
        } else {
            self.activate_controls();
        }
    }

    /// Rotate every control point about `axis` through the origin by `angle` radians.
    /// A zero length axis leaves the surface unchanged.
    pub fn rotate(&mut self, axis: &Vector3<T>, angle: T) {
        let Some(axis) = Unit::try_new(*axis, T::default_epsilon()) else {
            return;
        };
        let rotation = Rotation3::from_axis_angle(&axis, angle);
        self.transform(&rotation.to_homogeneous());
    }

    /// Overwrite the `v` boundary copy of each corner with its `u` boundary copy
    pub fn resolve(&mut self) {
        for corner in CORNERS.iter() {
            let p = *self.control_point(corner.owner);
            self.curves[corner.shadow.boundary.index()].set_control_point(corner.shadow.slot, p);
        }
        self.rebuild_grid();
    }

    /// Check if both copies of every corner agree within `tolerance`
    pub fn is_resolved(&self, tolerance: T) -> bool {
        CORNERS.iter().all(|corner| {
            let a = self.control_point(corner.owner);
            let b = self.control_point(corner.shadow);
            (a - b).norm() <= tolerance
        })
    }

    /// Iterate over all 16 control point slots of the four boundaries
    pub fn control_point_ids() -> impl Iterator<Item = ControlPointId> {
        Boundary::ALL
            .into_iter()
            .flat_map(|b| Slot::ALL.into_iter().map(move |s| ControlPointId::new(b, s)))
    }

    /// Cast the surface to a different floating point type.
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> CoonsSurface<F> {
        let [u0, u1, v0, v1] = &self.curves;
        let options = SurfaceOptions {
            sample_step: nalgebra::convert(self.options.sample_step),
        };
        let mut surface = CoonsSurface::new(u0.cast(), u1.cast(), v0.cast(), v1.cast(), options);
        surface.active_control_point = self.active_control_point;
        surface
    }
}

impl<T: FloatingPoint> Default for CoonsSurface<T> {
    fn default() -> Self {
        Self::with_options(SurfaceOptions::default())
    }
}

/// Deep copy of the geometry and the active control point.
/// Presentation state (controls toggle, selected axis, remembered selection) starts fresh.
impl<T: FloatingPoint> Clone for CoonsSurface<T> {
    fn clone(&self) -> Self {
        Self {
            curves: self.curves.clone(),
            options: self.options.clone(),
            grid: self.grid.clone(),
            display: self.display,
            active_control_point: self.active_control_point,
            last_active_control_point: None,
            controls_enabled: true,
            selected_axis: None,
        }
    }
}

impl<'a, T: FloatingPoint> Transformable<&'a Matrix4<T>> for CoonsSurface<T> {
    fn transform(&mut self, transform: &'a Matrix4<T>) {
        self.curves.iter_mut().for_each(|c| c.transform(transform));
        self.rebuild_grid();
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for CoonsSurface<T>
where
    T: FloatingPoint + serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CoonsSurface", 5)?;
        state.serialize_field("u0", self.curve(Boundary::U0))?;
        state.serialize_field("u1", self.curve(Boundary::U1))?;
        state.serialize_field("v0", self.curve(Boundary::V0))?;
        state.serialize_field("v1", self.curve(Boundary::V1))?;
        state.serialize_field("options", &self.options)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for CoonsSurface<T>
where
    T: FloatingPoint + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(bound(deserialize = "T: FloatingPoint + serde::Deserialize<'de>"))]
        struct Geometry<T: FloatingPoint> {
            u0: BezierCurve<T>,
            u1: BezierCurve<T>,
            v0: BezierCurve<T>,
            v1: BezierCurve<T>,
            options: SurfaceOptions<T>,
        }

        let g = Geometry::<T>::deserialize(deserializer)?;
        g.options.validate().map_err(serde::de::Error::custom)?;
        Ok(CoonsSurface::new(g.u0, g.u1, g.v0, g.v1, g.options))
    }
}
