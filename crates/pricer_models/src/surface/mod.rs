//! Price surfaces over a spot × volatility mesh.
//!
//! - `range`: mesh bounds, resolution and validation
//! - `generator`: call and put grid generation
//! - `colour`: value-to-colour mapping for heatmap rendering

pub mod colour;
pub mod generator;
pub mod range;

pub use colour::{ColourMapper, ColourScheme, Hsl, Rgb};
pub use generator::{generate_surface, grid_max, PriceSurface, SurfaceCell};
pub use range::{SurfaceRange, DEFAULT_STEPS, DEFAULT_VOL_RANGE, MAX_STEPS, MIN_STEPS};
