use std::fmt;

use crate::curve::Slot;

use super::{Boundary, ControlPointId};

/// Base radius multiplied by a control point's weight to get its display radius
pub const CONTROL_POINT_RADIUS: f64 = 0.006;

/// An entry of the control point catalog:
/// a logical control point with the visual weight the presentation layer draws it with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPoint {
    id: ControlPointId,
    weight: u8,
}

impl ControlPoint {
    pub const fn new(boundary: Boundary, slot: Slot, weight: u8) -> Self {
        Self {
            id: ControlPointId::new(boundary, slot),
            weight,
        }
    }

    pub fn id(&self) -> ControlPointId {
        self.id
    }

    pub fn boundary(&self) -> Boundary {
        self.id.boundary
    }

    pub fn slot(&self) -> Slot {
        self.id.slot
    }

    pub fn weight(&self) -> u8 {
        self.weight
    }

    /// Radius of the sphere drawn for this point
    pub fn radius(&self) -> f64 {
        CONTROL_POINT_RADIUS * self.weight as f64
    }
}

impl fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control-pt-{}-{}", self.id.boundary, self.id.slot)
    }
}

/// The 12 logical control points in selection order:
/// a walk around the patch starting at the `u0`/`v0` corner.
/// Corners appear once, through their `v` boundary copy, and carry a heavier weight.
pub static CONTROL_POINTS: [ControlPoint; 12] = [
    ControlPoint::new(Boundary::V0, Slot::P0, 3),
    ControlPoint::new(Boundary::V0, Slot::P1, 2),
    ControlPoint::new(Boundary::V0, Slot::P2, 2),
    ControlPoint::new(Boundary::V0, Slot::P3, 3),
    ControlPoint::new(Boundary::U1, Slot::P1, 2),
    ControlPoint::new(Boundary::U1, Slot::P2, 2),
    ControlPoint::new(Boundary::V1, Slot::P3, 3),
    ControlPoint::new(Boundary::V1, Slot::P2, 2),
    ControlPoint::new(Boundary::V1, Slot::P1, 2),
    ControlPoint::new(Boundary::V1, Slot::P0, 3),
    ControlPoint::new(Boundary::U0, Slot::P2, 2),
    ControlPoint::new(Boundary::U0, Slot::P1, 2),
];

/// Advance a catalog position cyclically by `delta`.
/// `None` behaves as the position just before the first entry.
/// Any `delta` is accepted, the full `isize` range included.
pub fn cycle_index(current: Option<usize>, delta: isize) -> usize {
    let len = CONTROL_POINTS.len() as isize;
    let current = current.map(|i| i as isize % len).unwrap_or(-1);
    // reduce first so the sum stays within -1..2 * len
    (current + delta.rem_euclid(len)).rem_euclid(len) as usize
}

/// Find the catalog position of a control point, accepting either copy of a corner
pub fn catalog_index(id: ControlPointId) -> Option<usize> {
    CONTROL_POINTS
        .iter()
        .position(|cp| cp.id() == id || id.partner() == Some(cp.id()))
}

/// Segments of the control polygon drawn between each corner and its adjacent interior points
pub static CONTROL_LINES: [(ControlPointId, ControlPointId); 8] = [
    (
        ControlPointId::new(Boundary::V0, Slot::P0),
        ControlPointId::new(Boundary::V0, Slot::P1),
    ),
    (
        ControlPointId::new(Boundary::V0, Slot::P0),
        ControlPointId::new(Boundary::U0, Slot::P1),
    ),
    (
        ControlPointId::new(Boundary::V0, Slot::P3),
        ControlPointId::new(Boundary::V0, Slot::P2),
    ),
    (
        ControlPointId::new(Boundary::V0, Slot::P3),
        ControlPointId::new(Boundary::U1, Slot::P1),
    ),
    (
        ControlPointId::new(Boundary::V1, Slot::P0),
        ControlPointId::new(Boundary::V1, Slot::P1),
    ),
    (
        ControlPointId::new(Boundary::V1, Slot::P0),
        ControlPointId::new(Boundary::U0, Slot::P2),
    ),
    (
        ControlPointId::new(Boundary::V1, Slot::P3),
        ControlPointId::new(Boundary::V1, Slot::P2),
    ),
    (
        ControlPointId::new(Boundary::V1, Slot::P3),
        ControlPointId::new(Boundary::U1, Slot::P2),
    ),
];
