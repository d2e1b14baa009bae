use super::Easing;

/// Default length of a morph, in frames
pub const DEFAULT_MORPH_DURATION: usize = 60;

/// Options for morphing a surface
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MorphOptions {
    /// Pace of the motion
    pub easing: Easing,
    /// Edge length of the cube random offsets are drawn from in `randomize`
    pub random_spread: f64,
    /// Edge length of the cube random offsets are drawn from in `randomize_close_to_original`
    pub close_random_spread: f64,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            easing: Easing::default(),
            random_spread: 1.0,
            close_random_spread: 0.8,
        }
    }
}
