// Host-side tests for constants and their relationships.

use graph_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn resolution_bounds_are_ordered() {
    assert!(MIN_RESOLUTION > 0);
    assert!(MIN_RESOLUTION <= DEFAULT_RESOLUTION);
    assert!(DEFAULT_RESOLUTION <= MAX_RESOLUTION);
    assert!(RESOLUTION_STEP < MAX_RESOLUTION - MIN_RESOLUTION);
}

#[test]
fn position_buffer_holds_the_largest_grid() {
    assert_eq!(POSITION_STRIDE, 12);
    assert_eq!(
        POSITION_CAPACITY,
        (MAX_RESOLUTION * MAX_RESOLUTION) as usize
    );
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_defaults_are_non_negative() {
    assert!(DEFAULT_FUNCTION_DURATION >= 0.0);
    assert!(DEFAULT_TRANSITION_DURATION >= 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_planes_are_sane() {
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZFAR > CAMERA_ZNEAR);
    // The eye must sit outside the padded graph bounds.
    assert!(camera_eye_vec3().length() > graph_bounds(MIN_RESOLUTION).half_extent.length());
}

#[test]
fn kernel_table_covers_every_function_pair() {
    assert_eq!(KernelTable::REQUIRED, FUNCTION_COUNT * FUNCTION_COUNT);
    assert!(KERNELS_WGSL.contains("@workgroup_size(8, 8, 1)"));
    assert_eq!(GROUP_SIZE, 8);
}
