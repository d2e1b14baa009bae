use std::{fmt, str::FromStr};

use crate::curve::Slot;

/// Name of one of the four boundary curves of a Coons patch
///
/// `U0` and `U1` run along u at v = 0 and v = 1 (bottom, top),
/// `V0` and `V1` run along v at u = 0 and u = 1 (left, right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    U0,
    U1,
    V0,
    V1,
}

impl Boundary {
    pub const ALL: [Boundary; 4] = [Boundary::U0, Boundary::U1, Boundary::V0, Boundary::V1];

    pub fn index(&self) -> usize {
        match self {
            Boundary::U0 => 0,
            Boundary::U1 => 1,
            Boundary::V0 => 2,
            Boundary::V1 => 3,
        }
    }

    /// Check if the boundary runs along the u direction
    pub fn is_u(&self) -> bool {
        matches!(self, Boundary::U0 | Boundary::U1)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Boundary::U0 => "u0",
            Boundary::U1 => "u1",
            Boundary::V0 => "v0",
            Boundary::V1 => "v1",
        };
        f.write_str(name)
    }
}

impl FromStr for Boundary {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "u0" => Ok(Boundary::U0),
            "u1" => Ok(Boundary::U1),
            "v0" => Ok(Boundary::V0),
            "v1" => Ok(Boundary::V1),
            _ => Err(anyhow::anyhow!("Must get u0, u1, v0, or v1, got `{}`", s)),
        }
    }
}

/// Identity of a control point: which boundary curve and which of its four slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPointId {
    pub boundary: Boundary,
    pub slot: Slot,
}

impl ControlPointId {
    pub const fn new(boundary: Boundary, slot: Slot) -> Self {
        Self { boundary, slot }
    }

    /// Check if the control point is a patch corner shared by two boundaries
    pub fn is_corner(&self) -> bool {
        self.slot.is_endpoint()
    }

    /// The matching control point on the other boundary meeting at the same corner
    /// # Example
    /// ```
    /// use coons::prelude::*;
    ///
    /// let id = ControlPointId::new(Boundary::U0, Slot::P3);
    /// assert_eq!(id.partner(), Some(ControlPointId::new(Boundary::V1, Slot::P0)));
    /// assert_eq!(ControlPointId::new(Boundary::U0, Slot::P1).partner(), None);
    /// ```
    pub fn partner(&self) -> Option<ControlPointId> {
        CORNERS.iter().find_map(|corner| {
            if corner.owner == *self {
                Some(corner.shadow)
            } else if corner.shadow == *self {
                Some(corner.owner)
            } else {
                None
            }
        })
    }

    /// The copy of this control point that wins when corners are resolved.
    /// Interior points are their own canonical copy.
    pub fn canonical(&self) -> ControlPointId {
        CORNERS
            .iter()
            .find(|corner| corner.shadow == *self)
            .map(|corner| corner.owner)
            .unwrap_or(*self)
    }
}

impl fmt::Display for ControlPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.boundary, self.slot)
    }
}

/// A patch corner stored twice: once on a u boundary (the owner) and once on a v boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub owner: ControlPointId,
    pub shadow: ControlPointId,
}

/// The four corners of the patch
/// `u0.P0 == v0.P0`, `u0.P3 == v1.P0`, `u1.P0 == v0.P3`, `u1.P3 == v1.P3`
pub static CORNERS: [Corner; 4] = [
    Corner {
        owner: ControlPointId::new(Boundary::U0, Slot::P0),
        shadow: ControlPointId::new(Boundary::V0, Slot::P0),
    },
    Corner {
        owner: ControlPointId::new(Boundary::U0, Slot::P3),
        shadow: ControlPointId::new(Boundary::V1, Slot::P0),
    },
    Corner {
        owner: ControlPointId::new(Boundary::U1, Slot::P0),
        shadow: ControlPointId::new(Boundary::V0, Slot::P3),
    },
    Corner {
        owner: ControlPointId::new(Boundary::U1, Slot::P3),
        shadow: ControlPointId::new(Boundary::V1, Slot::P3),
    },
];
