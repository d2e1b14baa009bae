use std::{fmt, str::FromStr};

use nalgebra::Vector3;

use crate::misc::FloatingPoint;

/// World axis along which an active control point may be moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of the axis in a `Point3` / `Vector3`
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector pointing along the axis
    pub fn unit_vector<T: FloatingPoint>(&self) -> Vector3<T> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            _ => Err(anyhow::anyhow!("Unknown axis `{}`, expected x, y or z", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_axis() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!("Z".parse::<Axis>().unwrap(), Axis::Z);
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn unit_vector_matches_index() {
        for axis in Axis::ALL {
            let v = axis.unit_vector::<f64>();
            assert_eq!(v[axis.index()], 1.0);
            assert_eq!(v.norm(), 1.0);
        }
    }
}
