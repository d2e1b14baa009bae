pub mod boundary;
pub mod control_point;
pub mod coons_surface;
pub mod sample_grid;
pub mod surface_options;

pub use boundary::*;
pub use control_point::*;
pub use coons_surface::*;
pub use sample_grid::*;
pub use surface_options::*;
