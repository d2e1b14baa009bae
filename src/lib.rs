//! Geometry core of an interactive Coons patch:
//! four cubic Bezier boundaries sharing corners, bilinearly blended evaluation,
//! corner consistent control point editing and frame-stepped morphing.

mod curve;
mod misc;
mod morph;
mod surface;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::misc::*;
    pub use crate::morph::*;
    pub use crate::surface::*;
}
