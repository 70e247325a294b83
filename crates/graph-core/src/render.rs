use crate::config::GraphConfig;
use crate::constants::MAX_RESOLUTION;
use crate::dispatch::grid_step;
use glam::Vec3;

/// Axis-aligned bounding volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub half_extent: Vec3,
}

impl Bounds {
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extent
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extent
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Everything the instanced draw needs besides the position buffer itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawParams {
    pub step: f32,
    pub bounds: Bounds,
    pub instance_count: u32,
}

impl DrawParams {
    pub fn new(config: &GraphConfig) -> Self {
        let resolution = config.resolution.clamp(1, MAX_RESOLUTION);
        Self {
            step: grid_step(resolution),
            bounds: graph_bounds(resolution),
            instance_count: resolution * resolution,
        }
    }
}

/// Bounds of every point the kernels can produce, padded by half a cell so
/// points at the far edge are fully enclosed.
pub fn graph_bounds(resolution: u32) -> Bounds {
    let half = 1.0 + 1.0 / resolution.max(1) as f32;
    Bounds {
        center: Vec3::ZERO,
        half_extent: Vec3::splat(half),
    }
}
