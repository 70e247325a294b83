use glam::Vec3;

// Shared tuning constants used by the engine and the native frontend.

// Grid
pub const MIN_RESOLUTION: u32 = 10;
pub const MAX_RESOLUTION: u32 = 1000;
pub const DEFAULT_RESOLUTION: u32 = MIN_RESOLUTION;

// Position buffer: one packed vec3<f32> per grid cell
pub const POSITION_STRIDE: usize = 3 * std::mem::size_of::<f32>();
pub const POSITION_CAPACITY: usize = (MAX_RESOLUTION as usize) * (MAX_RESOLUTION as usize);

// Compute kernels run 8x8 workgroups
pub const GROUP_SIZE: u32 = 8;

// Timing (seconds)
pub const DEFAULT_FUNCTION_DURATION: f32 = 3.0;
pub const DEFAULT_TRANSITION_DURATION: f32 = 3.0;

// Interactive edits
pub const RESOLUTION_STEP: u32 = 10; // Up/Down keys
pub const ORBIT_STEP_RADIANS: f32 = 0.1; // Left/Right keys

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.6, 3.2];
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 100.0;

pub const CLEAR_COLOR: [f64; 4] = [0.02, 0.02, 0.04, 1.0];

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::new(CAMERA_EYE[0], CAMERA_EYE[1], CAMERA_EYE[2])
}
