pub mod easing;
pub mod morph_engine;
pub mod morph_options;

pub use easing::*;
pub use morph_engine::*;
pub use morph_options::*;
