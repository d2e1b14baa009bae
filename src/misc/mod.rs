pub mod axis;
pub mod floating_point;
pub mod transformable;

pub use axis::*;
pub use floating_point::*;
pub use transformable::*;
