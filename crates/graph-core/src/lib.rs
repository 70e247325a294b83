pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod function;
pub mod render;
pub mod transition;

// Shaders bundled as string constants
pub static KERNELS_WGSL: &str = include_str!("../shaders/kernels.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use camera::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use dispatch::*;
pub use engine::*;
pub use error::*;
pub use function::*;
pub use render::*;
pub use transition::*;
