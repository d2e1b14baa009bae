use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Used as the scalar of every point, curve and surface in the crate
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Convert an `f64` literal into the scalar type
    fn lit(value: f64) -> Self {
        nalgebra::convert(value)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
